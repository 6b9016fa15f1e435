//! Boundary errors.
//!
//! Layout computation itself never fails: every call over a well-formed
//! graph returns a usable position map, with explicit fallbacks for
//! degenerate inputs. Errors only exist at the request boundary, where JSON
//! or an algorithm name can be malformed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("unknown layout algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("unknown layout direction '{0}'")]
    UnknownDirection(String),

    #[error("malformed request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}
