use crate::domain::custom_fields::api::{FieldsApiHandle, HttpFieldsApi};
use crate::domain::custom_fields::ui::selector::CustomFieldsPage;
use crate::shared::toast::{ToastHost, ToastService};
use leptos::prelude::*;
use std::sync::Arc;

#[component]
pub fn App() -> impl IntoView {
    // Provide the toast service for user-facing notifications
    provide_context(ToastService::new());

    // Provide the data-access seam so the screen stays transport-agnostic
    provide_context::<FieldsApiHandle>(Arc::new(HttpFieldsApi));

    view! {
        <ToastHost />
        <CustomFieldsPage />
    }
}
