//! Cross-cutting HTTP layers.

pub mod cors;
pub mod logging;

/// Request body cap applied to the whole API.
pub const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;
