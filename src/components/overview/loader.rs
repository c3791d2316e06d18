//! Fetching and parsing diagram documents.

use std::future::Future;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::error::LoadError;
use super::types::DiagramDocument;

/// Source of diagram documents, addressed by an opaque locator.
pub trait DiagramStore {
	fn fetch(&self, locator: &str) -> impl Future<Output = Result<DiagramDocument, LoadError>>;
}

/// Parses a JSON diagram document.
pub fn parse_document(locator: &str, json: &str) -> Result<DiagramDocument, LoadError> {
	serde_json::from_str(json).map_err(|err| LoadError::Parse {
		locator: locator.to_owned(),
		message: err.to_string(),
	})
}

/// Loads documents over HTTP with the browser's `fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpDiagramStore;

impl DiagramStore for HttpDiagramStore {
	fn fetch(&self, locator: &str) -> impl Future<Output = Result<DiagramDocument, LoadError>> {
		let locator = locator.to_owned();
		async move {
			let text = fetch_text(&locator).await?;
			parse_document(&locator, &text)
		}
	}
}

async fn fetch_text(locator: &str) -> Result<String, LoadError> {
	let fetch_err = |message: String| LoadError::Fetch {
		locator: locator.to_owned(),
		message,
	};
	let js_err = |value: wasm_bindgen::JsValue| fetch_err(format!("{value:?}"));

	let window = web_sys::window().ok_or_else(|| fetch_err("no window".into()))?;
	let response: Response = JsFuture::from(window.fetch_with_str(locator))
		.await
		.map_err(js_err)?
		.dyn_into()
		.map_err(js_err)?;
	if !response.ok() {
		return Err(LoadError::Status {
			locator: locator.to_owned(),
			status: response.status(),
		});
	}
	let body = JsFuture::from(response.text().map_err(js_err)?)
		.await
		.map_err(js_err)?;
	body.as_string()
		.ok_or_else(|| fetch_err("response body is not text".into()))
}
