//! Header-level decoding: RFC 2047 encoded words, folded subjects, dates.

pub mod date;
pub mod header;
pub mod subject;
