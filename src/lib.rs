//! Turfwar territory board library.
//!
//! Exposes the polygon geometry, the board model and its queries, the stock
//! Night City setup, and the text protocol session used by the binary.

pub mod board;
pub mod geometry;
pub mod protocol;
pub mod session;
pub mod setup;
