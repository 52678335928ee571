//! Cross-module scenario tests
//!
//! End-to-end checks of the conversion core:
//! - Encoding normalization feeding the parser
//! - Parser/generator composition invariants
//! - Strict validator vs. compliance report agreement
