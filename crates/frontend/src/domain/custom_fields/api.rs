use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use contracts::domain::custom_fields::{CustomField, DisplayFieldRef, UpdateDisplaySettingsDto};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

pub type ApiResult<T> = Result<T, String>;
pub type ApiFuture<T> = Pin<Box<dyn Future<Output = ApiResult<T>>>>;

/// Data access for the field selector screen.
///
/// The screen talks to this trait only, so the transport (and tests) can
/// swap implementations through context.
pub trait FieldsApi: Send + Sync {
    /// Full custom-field catalog.
    fn fetch_fields(&self) -> ApiFuture<Vec<CustomField>>;

    /// Previously persisted display selection.
    fn fetch_display_settings(&self) -> ApiFuture<Vec<DisplayFieldRef>>;

    /// Persist the working selection.
    fn save_display_settings(&self, dto: UpdateDisplaySettingsDto) -> ApiFuture<()>;

    /// Kick the image-settings refresh after a successful save.
    fn refresh_image_settings(&self) -> ApiFuture<()>;
}

pub type FieldsApiHandle = Arc<dyn FieldsApi>;

/// Production implementation over the backend HTTP API.
pub struct HttpFieldsApi;

impl FieldsApi for HttpFieldsApi {
    fn fetch_fields(&self) -> ApiFuture<Vec<CustomField>> {
        Box::pin(fetch_custom_fields())
    }

    fn fetch_display_settings(&self) -> ApiFuture<Vec<DisplayFieldRef>> {
        Box::pin(fetch_display_settings())
    }

    fn save_display_settings(&self, dto: UpdateDisplaySettingsDto) -> ApiFuture<()> {
        Box::pin(update_display_settings(dto))
    }

    fn refresh_image_settings(&self) -> ApiFuture<()> {
        Box::pin(refresh_image_settings())
    }
}

async fn fetch_custom_fields() -> ApiResult<Vec<CustomField>> {
    let response = Request::get(&api_url("/api/custom-fields"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!(
            "Failed to fetch custom fields: {}",
            response.status()
        ));
    }

    response
        .json::<Vec<CustomField>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

async fn fetch_display_settings() -> ApiResult<Vec<DisplayFieldRef>> {
    let response = Request::get(&api_url("/api/custom-fields/display"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!(
            "Failed to fetch display settings: {}",
            response.status()
        ));
    }

    response
        .json::<Vec<DisplayFieldRef>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

async fn update_display_settings(dto: UpdateDisplaySettingsDto) -> ApiResult<()> {
    let response = Request::put(&api_url("/api/custom-fields/display"))
        .json(&dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!(
            "Failed to update display settings: {}",
            response.status()
        ));
    }

    Ok(())
}

async fn refresh_image_settings() -> ApiResult<()> {
    let response = Request::post(&api_url("/api/image-settings/refresh"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!(
            "Failed to refresh image settings: {}",
            response.status()
        ));
    }

    Ok(())
}
