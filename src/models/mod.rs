//! Typed records used across layers.

pub mod record;
pub mod row;
