//! Terminal output for the defuse binary
//!
//! Everything here renders to strings first so views can be tested
//! without a terminal.

pub mod blocks;
pub mod ci;
pub mod console;
pub mod context;
pub mod error;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
