use serde::{Deserialize, Serialize};

/// Maximum number of fields that can be picked for display.
pub const MAX_DISPLAY_FIELDS: usize = 6;

/// Page sizes offered by the selector table.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

// ============================================================================
// Wire types
// ============================================================================

/// One row of the custom-field catalog as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub cf_id: String,
    pub cf_name: String,
    pub cf_key: String,
}

/// A persisted display-settings entry: the subset of a catalog row
/// that survives into the saved selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFieldRef {
    pub cf_id: String,
    pub cf_name: String,
}

/// Request body for persisting the display settings.
///
/// The backend expects the camelCase `displaySetting` key while the entries
/// themselves keep their snake_case field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDisplaySettingsDto {
    #[serde(rename = "displaySetting")]
    pub display_setting: Vec<DisplayFieldRef>,
}

// ============================================================================
// Working selection
// ============================================================================

/// The user's working selection: ordered, unique by `cf_id`, capped at
/// [`MAX_DISPLAY_FIELDS`].
///
/// `toggle` is the only mutation. Removing is always allowed; adding is
/// refused once the cap is reached, so the length never leaves `0..=6`
/// regardless of the toggle sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySelection {
    fields: Vec<DisplayFieldRef>,
}

impl DisplaySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership of `cf_id`. Returns `true` if the selection changed
    /// (a full selection silently refuses new entries).
    pub fn toggle(&mut self, cf_id: &str, cf_name: &str) -> bool {
        if let Some(pos) = self.fields.iter().position(|f| f.cf_id == cf_id) {
            self.fields.remove(pos);
            return true;
        }
        if self.fields.len() >= MAX_DISPLAY_FIELDS {
            return false;
        }
        self.fields.push(DisplayFieldRef {
            cf_id: cf_id.to_string(),
            cf_name: cf_name.to_string(),
        });
        true
    }

    pub fn contains(&self, cf_id: &str) -> bool {
        self.fields.iter().any(|f| f.cf_id == cf_id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.fields.len() >= MAX_DISPLAY_FIELDS
    }

    /// Whether the checkbox for `cf_id` must be greyed out: the selection is
    /// full and the row is not already part of it (removal stays possible).
    pub fn blocks_adding(&self, cf_id: &str) -> bool {
        self.is_full() && !self.contains(cf_id)
    }

    /// Whether the selection can be saved right now: non-empty and no save
    /// already in flight.
    pub fn can_save(&self, saving: bool) -> bool {
        !saving && !self.is_empty()
    }

    pub fn as_slice(&self) -> &[DisplayFieldRef] {
        &self.fields
    }

    /// The payload sent to the backend on save.
    pub fn to_dto(&self) -> UpdateDisplaySettingsDto {
        UpdateDisplaySettingsDto {
            display_setting: self.fields.clone(),
        }
    }
}

// ============================================================================
// View derivation
// ============================================================================

/// Position within the filtered catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: PAGE_SIZE_OPTIONS[0],
        }
    }
}

impl PageCursor {
    /// Switch the page size, snapping back to the first page.
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self { page: 0, page_size }
    }
}

/// One derived page of the filtered catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPage {
    pub fields: Vec<CustomField>,
    /// Number of fields matching the query (not just on this page).
    pub total_count: usize,
    pub total_pages: usize,
}

/// Case-insensitive substring match against any of the three text
/// attributes of a catalog row.
pub fn matches_filter(field: &CustomField, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    field.cf_id.to_lowercase().contains(&query)
        || field.cf_key.to_lowercase().contains(&query)
        || field.cf_name.to_lowercase().contains(&query)
}

/// Slice `items` down to the cursor's page.
///
/// A cursor past the end yields an empty slice rather than panicking, a zero
/// page size is clamped to 1, and the returned page count is at least 1 so
/// pagination controls always have a valid page to point at.
pub fn slice_page<T: Clone>(items: &[T], cursor: PageCursor) -> (Vec<T>, usize) {
    let page_size = cursor.page_size.max(1);
    let total = items.len();
    let total_pages = if total == 0 {
        1
    } else {
        (total + page_size - 1) / page_size
    };

    let start = cursor.page.saturating_mul(page_size).min(total);
    let end = (start + page_size).min(total);
    (items[start..end].to_vec(), total_pages)
}

/// Filter the catalog by `query`, then slice out the cursor's page.
pub fn derive_view(catalog: &[CustomField], query: &str, cursor: PageCursor) -> FieldPage {
    let filtered: Vec<CustomField> = catalog
        .iter()
        .filter(|f| matches_filter(f, query))
        .cloned()
        .collect();

    let total_count = filtered.len();
    let (fields, total_pages) = slice_page(&filtered, cursor);

    FieldPage {
        fields,
        total_count,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &str, name: &str, key: &str) -> CustomField {
        CustomField {
            cf_id: id.to_string(),
            cf_name: name.to_string(),
            cf_key: key.to_string(),
        }
    }

    fn catalog() -> Vec<CustomField> {
        vec![field("a", "Alpha", "k1"), field("b", "Beta", "k2")]
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut sel = DisplaySelection::new();
        assert!(sel.toggle("a", "Alpha"));
        assert!(sel.contains("a"));
        assert_eq!(sel.len(), 1);

        assert!(sel.toggle("a", "Alpha"));
        assert!(sel.is_empty());
    }

    #[test]
    fn toggle_refuses_seventh_entry() {
        let mut sel = DisplaySelection::new();
        for i in 0..6 {
            assert!(sel.toggle(&format!("id{}", i), &format!("Field {}", i)));
        }
        assert!(sel.is_full());

        assert!(!sel.toggle("id6", "Field 6"));
        assert_eq!(sel.len(), 6);
        assert!(!sel.contains("id6"));
    }

    #[test]
    fn toggle_removes_even_when_full() {
        let mut sel = DisplaySelection::new();
        for i in 0..6 {
            sel.toggle(&format!("id{}", i), &format!("Field {}", i));
        }
        assert!(sel.toggle("id0", "Field 0"));
        assert_eq!(sel.len(), 5);
        assert!(!sel.is_full());
    }

    #[test]
    fn toggle_keeps_insertion_order() {
        let mut sel = DisplaySelection::new();
        sel.toggle("b", "Beta");
        sel.toggle("a", "Alpha");
        let ids: Vec<&str> = sel.as_slice().iter().map(|f| f.cf_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn selection_length_stays_in_bounds_under_random_toggles() {
        let mut sel = DisplaySelection::new();
        for i in 0..50 {
            sel.toggle(&format!("id{}", i % 9), "x");
            assert!(sel.len() <= MAX_DISPLAY_FIELDS);
        }
    }

    #[test]
    fn checkbox_blocked_only_for_unselected_rows_of_a_full_selection() {
        let mut sel = DisplaySelection::new();
        assert!(!sel.blocks_adding("a"));

        for i in 0..6 {
            sel.toggle(&format!("id{}", i), &format!("Field {}", i));
        }
        assert!(sel.blocks_adding("new-id"));
        // Already-selected rows stay toggleable so they can be removed.
        assert!(!sel.blocks_adding("id0"));

        sel.toggle("id0", "Field 0");
        assert!(!sel.blocks_adding("new-id"));
    }

    #[test]
    fn save_allowed_only_when_non_empty_and_idle() {
        let mut sel = DisplaySelection::new();
        assert!(!sel.can_save(false));
        assert!(!sel.can_save(true));

        sel.toggle("a", "Alpha");
        assert!(sel.can_save(false));
        assert!(!sel.can_save(true));

        sel.toggle("a", "Alpha");
        assert!(!sel.can_save(false));
    }

    #[test]
    fn filter_matches_any_attribute_case_insensitively() {
        let f = field("CF_42", "Delivery Notes", "warehouse_key");
        assert!(matches_filter(&f, "cf_42"));
        assert!(matches_filter(&f, "NOTES"));
        assert!(matches_filter(&f, "house"));
        assert!(!matches_filter(&f, "zzz"));
    }

    #[test]
    fn empty_query_matches_everything() {
        for f in catalog() {
            assert!(matches_filter(&f, ""));
        }
    }

    #[test]
    fn derive_view_filters_and_slices() {
        let page = derive_view(
            &catalog(),
            "alp",
            PageCursor {
                page: 0,
                page_size: 5,
            },
        );
        assert_eq!(page.total_count, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.fields.len(), 1);
        assert_eq!(page.fields[0].cf_id, "a");
    }

    #[test]
    fn derive_view_excludes_nothing_that_matches() {
        let cat: Vec<CustomField> = (0..12)
            .map(|i| field(&format!("id{}", i), &format!("Name {}", i), "shared"))
            .collect();
        let page = derive_view(
            &cat,
            "shared",
            PageCursor {
                page: 0,
                page_size: 25,
            },
        );
        assert_eq!(page.total_count, 12);
        assert_eq!(page.fields.len(), 12);
    }

    #[test]
    fn derive_view_paginates_over_the_filtered_list() {
        let cat: Vec<CustomField> = (0..12)
            .map(|i| field(&format!("id{}", i), &format!("Name {}", i), "k"))
            .collect();
        let cursor = PageCursor {
            page: 2,
            page_size: 5,
        };
        let page = derive_view(&cat, "", cursor);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.fields.len(), 2);
        assert_eq!(page.fields[0].cf_id, "id10");
    }

    #[test]
    fn derive_view_out_of_range_cursor_is_empty_not_a_panic() {
        let page = derive_view(
            &catalog(),
            "",
            PageCursor {
                page: 9,
                page_size: 10,
            },
        );
        assert!(page.fields.is_empty());
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn derive_view_empty_catalog_still_reports_one_page() {
        let page = derive_view(&[], "anything", PageCursor::default());
        assert!(page.fields.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn slice_page_works_for_plain_ref_lists() {
        let items: Vec<DisplayFieldRef> = (0..7)
            .map(|i| DisplayFieldRef {
                cf_id: format!("id{}", i),
                cf_name: format!("Field {}", i),
            })
            .collect();
        let (page, total_pages) = slice_page(
            &items,
            PageCursor {
                page: 1,
                page_size: 5,
            },
        );
        assert_eq!(total_pages, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].cf_id, "id5");
    }

    #[test]
    fn slice_page_tolerates_zero_page_size() {
        let items = catalog();
        let (page, total_pages) = slice_page(
            &items,
            PageCursor {
                page: 0,
                page_size: 0,
            },
        );
        assert_eq!(total_pages, 2);
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn page_size_change_resets_page() {
        let cursor = PageCursor {
            page: 3,
            page_size: 5,
        };
        let cursor = cursor.with_page_size(10);
        assert_eq!(cursor.page, 0);
        assert_eq!(cursor.page_size, 10);
    }

    #[test]
    fn dto_serializes_with_camel_case_wrapper_key() {
        let mut sel = DisplaySelection::new();
        sel.toggle("a", "Alpha");
        let json = serde_json::to_value(sel.to_dto()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "displaySetting": [{ "cf_id": "a", "cf_name": "Alpha" }]
            })
        );
    }
}
