//! Structured error types for sheetnav.
//!
//! Every failure is caught at the boundary of the operation that produced it
//! and turned into dropped data or a user-visible placeholder; nothing here is
//! meant to reach the host page as an unhandled fault.

/// Coarse classification of [`SheetNavError`] used by the page layer to
/// decide how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network/request failure, shown in place of the data table.
    Transport,
    /// A single unit of data could not be decoded and was dropped.
    Parse,
    /// Button configuration is unusable; navigation is not built.
    Config,
    /// A rendering target that should exist does not.
    MissingContainer,
}

/// All errors that can occur while loading, decoding and navigating sheets.
#[derive(Debug, thiserror::Error)]
pub enum SheetNavError {
    /// Request failed or the response body could not be read.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response was readable but not shaped like a sheet payload.
    #[error("Unexpected response shape: {0}")]
    Response(String),

    /// A link-row cell did not hold a valid link object.
    #[error("Invalid external link JSON in cell {cell:?}: {source}")]
    LinkParse {
        cell: String,
        #[source]
        source: serde_json::Error,
    },

    /// Button configuration is missing required header columns.
    #[error("Missing required headers in configuration data: {}", .0.join(", "))]
    MissingHeaders(Vec<&'static str>),

    /// Button configuration has no header row or no button rows.
    #[error("No valid button configuration data available")]
    NoButtonData,

    /// A rendering container could not be found.
    #[error("No {0} container found")]
    MissingContainer(String),

    /// A click referenced a button that is not rendered at that level.
    #[error("Button {button_id:?} is not rendered at level {level}")]
    UnknownButton { level: usize, button_id: String },

    /// A DOM operation on an existing container failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SheetNavError {
    /// Classify this error into the page-level taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::Response(_) => ErrorKind::Transport,
            Self::LinkParse { .. } | Self::Json(_) => ErrorKind::Parse,
            Self::MissingHeaders(_) | Self::NoButtonData | Self::Config(_) => ErrorKind::Config,
            Self::MissingContainer(_) | Self::UnknownButton { .. } | Self::Render(_) => {
                ErrorKind::MissingContainer
            }
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SheetNavError>;

#[cfg(target_arch = "wasm32")]
impl From<SheetNavError> for wasm_bindgen::JsValue {
    fn from(e: SheetNavError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
