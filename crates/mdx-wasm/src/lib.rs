//! WASM bindings for the MDX compiler.
//!
//! Exposes `transform()`, `transformWith()`, `parse()` and `version()` to
//! JavaScript via wasm-bindgen. Errors are thrown as JS errors.

use mdx_codegen::{RenderOptions, Style};
use wasm_bindgen::prelude::*;

/// Transform MDX source into indented HTML.
#[wasm_bindgen]
pub fn transform(source: &str) -> Result<String, JsError> {
    mdx_codegen::transform(source).map_err(|e| JsError::new(&e.to_string()))
}

/// Transform MDX source with options `{ lineWidth?: number, compact?: boolean }`.
#[wasm_bindgen(js_name = transformWith)]
pub fn transform_with(source: &str, options: JsValue) -> Result<String, JsError> {
    let options = read_options(&options)?;
    mdx_codegen::transform_with(source, &options).map_err(|e| JsError::new(&e.to_string()))
}

/// Parse MDX source and return the component tree as plain JS objects.
///
/// Each component carries a `type` field naming its variant.
#[wasm_bindgen]
pub fn parse(source: &str) -> Result<JsValue, JsError> {
    let components = mdx_parser::parse(source).map_err(|e| JsError::new(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&components).map_err(|e| JsError::new(&e.to_string()))
}

/// Get the compiler version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn read_options(value: &JsValue) -> Result<RenderOptions, JsError> {
    let mut options = RenderOptions::default();
    if value.is_undefined() || value.is_null() {
        return Ok(options);
    }

    let line_width = js_sys::Reflect::get(value, &"lineWidth".into())
        .map_err(|_| JsError::new("Failed to read lineWidth option"))?;
    if let Some(width) = line_width.as_f64() {
        options.line_width = parse_line_width(width)
            .ok_or_else(|| JsError::new("lineWidth must be a positive number"))?;
    }

    let compact = js_sys::Reflect::get(value, &"compact".into())
        .map_err(|_| JsError::new("Failed to read compact option"))?;
    if compact.as_bool() == Some(true) {
        options.style = Style::Compact;
    }

    Ok(options)
}

/// Width from a JS number; `None` unless finite and at least 1.
fn parse_line_width(width: f64) -> Option<usize> {
    (width.is_finite() && width >= 1.0).then(|| width as usize)
}
