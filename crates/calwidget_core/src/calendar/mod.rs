//! Month navigation and grid derivation.
//!
//! # Responsibility
//! - Track the displayed month (`cursor`).
//! - Derive day cells for that month (`grid`).

pub mod cursor;
pub mod grid;
