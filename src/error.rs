use log::warn;
use std::fmt;
use wasm_bindgen::JsValue;

/// Reasons a page behavior could not be attached.
///
/// None of these are fatal: the enhancer logs the error and leaves the
/// affected part of the page in its plain, unscripted state.
#[derive(Debug)]
pub enum EnhanceError {
    /// No `window`/`document` (e.g. running outside a browser main thread).
    NoDocument,
    /// A required element was not found for the given selector.
    MissingElement(String),
    /// A selector matched an element of the wrong kind.
    WrongElementKind {
        selector: String,
        expected: &'static str,
    },
    /// A DOM call threw.
    Js(String),
}

impl fmt::Display for EnhanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnhanceError::NoDocument => write!(f, "No browser document available"),
            EnhanceError::MissingElement(selector) => {
                write!(f, "No element matches `{}`", selector)
            }
            EnhanceError::WrongElementKind { selector, expected } => {
                write!(f, "Element `{}` is not a {}", selector, expected)
            }
            EnhanceError::Js(msg) => write!(f, "DOM call failed: {}", msg),
        }
    }
}

impl std::error::Error for EnhanceError {}

impl From<JsValue> for EnhanceError {
    fn from(value: JsValue) -> Self {
        EnhanceError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

/// Keep the value of a successful attach; otherwise log a warning and carry
/// on without it.
pub fn warn_on_err<T>(context: &str, result: Result<T, EnhanceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{}: {}", context, e);
            None
        }
    }
}
