mod state;

use contracts::domain::custom_fields::{derive_view, slice_page, CustomField, DisplaySelection};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::custom_fields::api::FieldsApiHandle;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table_checkbox::TableCheckbox;
use crate::shared::icons::icon;
use crate::shared::toast::ToastService;
use state::{create_saved_state, create_state};

/// Field selector screen: pick up to six custom fields from the catalog,
/// persist the pick, and review the previously saved pick in a second grid.
#[component]
pub fn CustomFieldsPage() -> impl IntoView {
    let api = StoredValue::new(
        use_context::<FieldsApiHandle>().expect("FieldsApi not found in context"),
    );
    let toasts = use_context::<ToastService>().expect("ToastService not found in context");

    let state = create_state();
    let saved = create_saved_state();
    let selection: RwSignal<DisplaySelection> = RwSignal::new(DisplaySelection::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let load_catalog = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api.get_value().fetch_fields().await {
                Ok(fields) => {
                    state.update(|s| {
                        s.catalog = fields;
                        s.cursor.page = 0;
                        s.is_loaded = true;
                    });
                    set_loading.set(false);
                }
                Err(e) => {
                    log::error!("Failed to load custom fields: {}", e);
                    set_error.set(Some(format!("Failed to load custom fields: {}", e)));
                    set_loading.set(false);
                }
            }
        });
    };

    let load_saved = move || {
        spawn_local(async move {
            match api.get_value().fetch_display_settings().await {
                Ok(items) => saved.update(|s| {
                    s.items = items;
                    s.cursor.page = 0;
                }),
                Err(e) => log::error!("Failed to load display settings: {}", e),
            }
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_catalog();
            load_saved();
        }
    });

    let search_signal = RwSignal::new(String::new());

    // Any change of the search text snaps the table back to the first page.
    Effect::new(move |_| {
        let query = search_signal.get();
        state.update(|s| {
            if s.search_query != query {
                s.search_query = query;
                s.cursor.page = 0;
            }
        });
    });

    let field_page =
        Signal::derive(move || state.with(|s| derive_view(&s.catalog, &s.search_query, s.cursor)));

    let go_to_page = move |page: usize| {
        state.update(|s| s.cursor.page = page);
    };

    let change_page_size = move |size: usize| {
        state.update(|s| s.cursor = s.cursor.with_page_size(size));
    };

    let saved_page = Signal::derive(move || saved.with(|s| slice_page(&s.items, s.cursor)));

    let saved_go_to_page = move |page: usize| {
        saved.update(|s| s.cursor.page = page);
    };

    let saved_change_page_size = move |size: usize| {
        saved.update(|s| s.cursor = s.cursor.with_page_size(size));
    };

    let on_save = move |_| {
        // The button is disabled in these states, but guard anyway.
        if !selection.with_untracked(|s| s.can_save(saving.get_untracked())) {
            return;
        }
        set_saving.set(true);
        spawn_local(async move {
            let api = api.get_value();
            match api.save_display_settings(selection.with_untracked(|s| s.to_dto())).await {
                Ok(()) => {
                    toasts.success("Selections saved successfully!");

                    // Post-save effects run in order: image settings first,
                    // then both grids get fresh data.
                    if let Err(e) = api.refresh_image_settings().await {
                        log::error!("Failed to refresh image settings: {}", e);
                    }
                    match api.fetch_fields().await {
                        Ok(fields) => state.update(|s| {
                            s.catalog = fields;
                            s.cursor.page = 0;
                        }),
                        Err(e) => {
                            log::error!("Failed to reload custom fields: {}", e);
                            set_error.set(Some(format!("Failed to load custom fields: {}", e)));
                        }
                    }
                    match api.fetch_display_settings().await {
                        Ok(items) => saved.update(|s| {
                            s.items = items;
                            s.cursor.page = 0;
                        }),
                        Err(e) => log::error!("Failed to reload display settings: {}", e),
                    }
                    set_saving.set(false);
                }
                Err(e) => {
                    log::error!("Failed to save display settings: {}", e);
                    toasts.error("Error saving selections!");
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Select Custom Fields"</h1>
                    <Badge>
                        {move || field_page.get().total_count.to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            load_catalog();
                            load_saved();
                        }
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            {icon("search")}
                            <span class="filter-panel__title">"Search Fields"</span>
                        </div>
                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || state.get().cursor.page)
                                total_pages=Signal::derive(move || field_page.get().total_pages)
                                total_count=Signal::derive(move || field_page.get().total_count)
                                page_size=Signal::derive(move || state.get().cursor.page_size)
                                on_page_change=Callback::new(go_to_page)
                                on_page_size_change=Callback::new(change_page_size)
                            />
                        </div>
                        <div class="filter-panel-header__right">
                        </div>
                    </div>

                    <div class="filter-panel-content">
                        <div style="flex: 1; max-width: 320px;">
                            <Input
                                value=search_signal
                                placeholder="Filter by id, key or name..."
                            />
                        </div>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=140.0>"Field (ID)"</TableHeaderCell>
                                <TableHeaderCell min_width=200.0>"Value (Name)"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Select"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || field_page.get().fields
                                key=|f| f.cf_id.clone()
                                children=move |field: CustomField| {
                                    let cf_id = field.cf_id.clone();
                                    let cf_name = field.cf_name.clone();
                                    let id_for_checked = cf_id.clone();
                                    let id_for_disabled = cf_id.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {field.cf_id.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {field.cf_name.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCheckbox
                                                checked=Signal::derive(move || {
                                                    selection.with(|s| s.contains(&id_for_checked))
                                                })
                                                disabled=Signal::derive(move || {
                                                    selection.with(|s| s.blocks_adding(&id_for_disabled))
                                                })
                                                on_change=Callback::new(move |_checked: bool| {
                                                    selection.update(|s| {
                                                        s.toggle(&cf_id, &cf_name);
                                                    });
                                                })
                                            />
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <div class="page__actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || {
                            !selection.with(|s| s.can_save(saving.get()))
                        })
                    >
                        {icon("save")}
                        {move || if saving.get() { " Saving..." } else { " Save Selections" }}
                    </Button>
                    <Badge>
                        {move || selection.with(|s| format!("{} / 6 selected", s.len()))}
                    </Badge>
                </div>

                <div class="page__header">
                    <div class="page__header-left">
                        <h2 class="page__title">"Saved Fields"</h2>
                        <Badge>
                            {move || saved.with(|s| s.items.len().to_string())}
                        </Badge>
                    </div>
                    <div class="page__header-right">
                        <PaginationControls
                            current_page=Signal::derive(move || saved.get().cursor.page)
                            total_pages=Signal::derive(move || saved_page.get().1)
                            total_count=Signal::derive(move || saved.get().items.len())
                            page_size=Signal::derive(move || saved.get().cursor.page_size)
                            on_page_change=Callback::new(saved_go_to_page)
                            on_page_size_change=Callback::new(saved_change_page_size)
                        />
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=140.0>"Field Key (ID)"</TableHeaderCell>
                                <TableHeaderCell min_width=200.0>"Field Value (Name)"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || saved_page.get().0
                                key=|f| f.cf_id.clone()
                                children=move |field| {
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {field.cf_id.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {field.cf_name.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </div>
    }
}
