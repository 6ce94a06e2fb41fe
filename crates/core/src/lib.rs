//! `stockroom-core`: shared building blocks for the store domain.
//!
//! This crate contains **pure domain** primitives (no IO, no logging setup):
//! the error model shared by every other crate and the strongly-typed item
//! identifier.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{
    DeliveryError, DeliveryResult, FormatError, FormatResult, InventoryError, InventoryResult,
    RecordKind, StockError, StockResult,
};
pub use id::{ItemId, VehicleId};
