//! Framework-neutral WASM <-> JavaScript bridge over the timeline core.

use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use epoch_appwrite::{parse_document_page_value, snapshot_from_pages, DocumentPage};
use epoch_core::{Era, TimelineError};

/// Build the sorted, grouped timeline snapshot from an array of raw
/// list-documents payloads (one per fetched page).
#[wasm_bindgen]
pub fn build_timeline_snapshot(pages: JsValue) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let payloads: Vec<serde_json::Value> = from_value(pages)
        .map_err(|err| JsValue::from_str(&format!("could not read page payloads: {err}")))?;

    let mut parsed: Vec<DocumentPage> = Vec::with_capacity(payloads.len());
    for payload in &payloads {
        let page = parse_document_page_value(payload)
            .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;
        parsed.push(page);
    }

    let snapshot = snapshot_from_pages(parsed);

    to_value(&snapshot)
        .map_err(|err| JsValue::from_str(&format!("could not serialize snapshot: {err}")))
}

/// Theme class for a given year, e.g. `1983` -> `"era-1980s"`.
#[wasm_bindgen]
pub fn era_theme_class(year: i32) -> String {
    Era::from_year(year).theme_class()
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("timeline error: {err}")
}
