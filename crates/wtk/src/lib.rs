#![forbid(unsafe_code)]

//! wtk public facade crate.
//!
//! Re-exports the geometry and layout types and offers a small prelude, plus
//! loading of layout configuration from JSON documents.

use std::fmt;

// --- Geometry re-exports ---------------------------------------------------

pub use wtk_core::geometry::{DEFAULT_MAX_SIZE, Hint, Insets, Point, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use wtk_layout::{
    Alignment, Axis, CellData, CellDataError, Container, FlexConfigError, FlexLayout, Grab, Panel,
    Sizer, Sizes, SolvePass, SolveReport, WrappedText,
};

#[cfg(feature = "tracing-json")]
pub use wtk_core::logging::init_json;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for wtk.
#[derive(Debug)]
pub enum Error {
    /// Invalid layout configuration.
    Config(FlexConfigError),
    /// Invalid cell metadata.
    Cell(CellDataError),
    /// Malformed configuration document.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Cell(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid layout document: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Cell(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<FlexConfigError> for Error {
    fn from(err: FlexConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<CellDataError> for Error {
    fn from(err: CellDataError) -> Self {
        Self::Cell(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Standard result type for wtk APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Configuration ----------------------------------------------------------

/// Parse and validate a [`FlexLayout`] from JSON. Missing fields take their defaults.
///
/// ```
/// let flex = wtk::flex_from_json(r#"{"columns": 2, "h_spacing": 10.0}"#).unwrap();
/// assert_eq!(flex.column_count(), 2);
/// ```
pub fn flex_from_json(json: &str) -> Result<FlexLayout> {
    let flex: FlexLayout = serde_json::from_str(json)?;
    flex.validate()?;
    Ok(flex)
}

/// Parse and validate [`CellData`] from JSON. Missing fields take their defaults.
pub fn cell_from_json(json: &str) -> Result<CellData> {
    let data: CellData = serde_json::from_str(json)?;
    data.validate()?;
    Ok(data)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Alignment, CellData, Error, FlexLayout, Hint, Insets, Panel, Rect, Result, Size, Sizer,
        Sizes, WrappedText,
    };

    pub use crate::{core, layout};
}

pub use wtk_core as core;
pub use wtk_layout as layout;
