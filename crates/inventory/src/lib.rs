//! Inventory domain module: catalog items and stock quantities.
//!
//! This crate contains business rules for item bookkeeping, implemented purely
//! as deterministic domain logic (no IO, no logging, no storage).

pub mod item;
pub mod stock;

pub use item::{Item, Storage};
pub use stock::{Stock, StockEntry, StockFormat};
