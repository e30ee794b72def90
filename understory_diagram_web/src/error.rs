// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Failures of the browser-facing entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No global `window` (not running in a browser main thread).
    #[error("no global window")]
    MissingWindow,
    /// The window has no document.
    #[error("window has no document")]
    MissingDocument,
    /// The document has no `<body>`.
    #[error("document has no body")]
    MissingBody,
    /// A DOM call threw.
    #[error("DOM call `{op}` failed: {message}")]
    Dom {
        /// The DOM operation that failed.
        op: &'static str,
        /// The thrown value, rendered for logging.
        message: String,
    },
    /// The JSON passed to `configure` did not parse.
    #[error("invalid interaction config: {0}")]
    Config(#[from] serde_json::Error),
    /// The element has no interaction attached.
    #[error("element has no diagram interaction attached")]
    NotAttached,
    /// The runtime was entered again while already in use.
    #[error("interaction runtime is busy")]
    Busy,
}

/// Result alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(target_arch = "wasm32")]
impl Error {
    /// Wraps a thrown `JsValue` from the DOM call `op`.
    pub(crate) fn dom(op: &'static str, value: &wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(value)
                    .ok()
                    .and_then(|s| s.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Dom { op, message }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<Error> for wasm_bindgen::JsValue {
    fn from(err: Error) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Extension for mapping `Result<T, JsValue>` into [`Error::Dom`].
#[cfg(target_arch = "wasm32")]
pub(crate) trait DomResultExt<T> {
    fn dom(self, op: &'static str) -> Result<T>;
}

#[cfg(target_arch = "wasm32")]
impl<T> DomResultExt<T> for core::result::Result<T, wasm_bindgen::JsValue> {
    fn dom(self, op: &'static str) -> Result<T> {
        self.map_err(|value| Error::dom(op, &value))
    }
}
