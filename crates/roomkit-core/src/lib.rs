//! Core types: error kinds, wire enums, identifiers, tracing

pub mod error;
pub mod ids;
pub mod tracing;
pub mod wire_enum;

pub use error::{Error, ErrorKind, Result};
pub use ids::IdKind;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use wire_enum::WireEnum;

#[doc(hidden)]
pub mod __private {
    pub use ::tracing::warn;
}
