//! Error types for the Galaxy3D collision core
//!
//! Only construction-time operations (bounding volumes from vertex slices,
//! mesh entities, configuration) can fail. Per-frame queries never return
//! errors: degenerate geometry is skipped instead of being reported.

use std::fmt;

/// Result type for Galaxy3D collision operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D collision errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Vertex/index data cannot describe a valid shape (empty range, bad index, ...)
    InvalidGeometry(String),

    /// Configuration value out of its valid domain
    InvalidConfig(String),

    /// Entity key does not refer to a live scene entity
    InvalidEntity(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Error::InvalidEntity(msg) => write!(f, "Invalid entity: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error at ERROR severity (with file:line) and build an `Error` value.
///
/// The first argument selects the variant.
///
/// ```ignore
/// return Err(engine_err!(InvalidGeometry, "galaxy3d::BoundingInfo", "empty range"));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($kind:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::$kind(message)
    }};
}

/// Log an error and return it from the enclosing function.
#[macro_export]
macro_rules! engine_bail {
    ($kind:ident, $source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($kind, $source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
