use leptos::prelude::*;
use thaw::*;

/// Checkbox cell for selectable table rows.
///
/// Both `checked` and `disabled` are reactive so a row can grey out while
/// it stays visible (e.g. when a selection cap is reached elsewhere).
/// Clicks on the cell do not propagate to the row.
#[component]
pub fn TableCheckbox(
    /// Checked state of this row
    #[prop(into)]
    checked: Signal<bool>,

    /// Whether the checkbox can currently be toggled
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,

    /// Callback with the new checked state
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                prop:disabled=move || disabled.get().unwrap_or(false)
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run(checked);
                }
            />
        </TableCell>
    }
}
