//! Fetch the category documents and build the catalog.
use armory_core::{ArmorCategory, CatalogBuilder, CatalogError, CatalogLoad};

use crate::{dom, paths};

/// Fetch every category document. A category that fails to fetch is
/// recorded on the builder and loading moves on to the next one.
///
/// # Errors
/// Returns [`CatalogError::NothingLoaded`] if no category produced a record.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_catalog() -> Result<CatalogLoad, CatalogError> {
    let mut builder = CatalogBuilder::new();
    for category in ArmorCategory::ALL {
        let url = cache_busted(&paths::catalog_url(category), js_sys::Date::now());
        match dom::fetch_text(&url).await {
            Ok(body) => {
                if let Err(err) = builder.add_category_json(category, &body) {
                    log::warn!("{category} catalog not loaded: {err}");
                }
            }
            Err(err) => builder.record_failure(
                category,
                format!("Failed to load {category} data: {}", dom::js_error_message(&err)),
            ),
        }
    }
    builder.finish()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cache_busted(url: &str, now_ms: f64) -> String {
    format!("{url}?t={}", now_ms as u64)
}
