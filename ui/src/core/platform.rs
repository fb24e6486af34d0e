//! Platform glue: task spawning and fetching the raw dataset text.

use std::future::Future;

use super::dataset::{Dataset, LoadError};

#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    dioxus::prelude::spawn(future);
}

/// Reads the dataset from a file path.
#[cfg(not(target_arch = "wasm32"))]
pub async fn load_text(source: &str) -> Result<String, LoadError> {
    Ok(std::fs::read_to_string(source)?)
}

/// Fetches the dataset relative to the page URL.
#[cfg(target_arch = "wasm32")]
pub async fn load_text(source: &str) -> Result<String, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let fetch_error = |err: wasm_bindgen::JsValue| LoadError::Fetch(format!("{err:?}"));

    let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(source))
        .await
        .map_err(fetch_error)?;
    let response: web_sys::Response = response.dyn_into().map_err(fetch_error)?;
    if !response.ok() {
        return Err(LoadError::Fetch(format!("HTTP {}", response.status())));
    }
    let text = JsFuture::from(response.text().map_err(fetch_error)?)
        .await
        .map_err(fetch_error)?;
    text.as_string()
        .ok_or_else(|| LoadError::Fetch("response body was not text".into()))
}

/// Loads and normalizes the dataset from the configured source.
pub async fn load_dataset(source: &str) -> Result<Dataset, LoadError> {
    let text = load_text(source).await?;
    Dataset::from_csv_text(&text)
}
