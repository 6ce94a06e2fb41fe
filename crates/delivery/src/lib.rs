//! Delivery domain module: capacity-bounded vehicles and the manifests that
//! sequence them.
//!
//! Pure domain logic (no IO, no logging).

pub mod manifest;
pub mod vehicle;

pub use manifest::Manifest;
pub use vehicle::{
    ORDINARY_CAPACITY, REFRIGERATED_CAPACITY, Vehicle, VehicleKind,
};
