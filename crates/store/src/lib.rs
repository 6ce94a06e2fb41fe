//! Store transactions and replenishment planning.
//!
//! The [`Store`] owns the live stock and capital and applies catalog, sales and
//! delivery transactions. The [`ReplenishmentPlanner`] turns the store's state
//! into a priority-ordered reorder list and packs it into a [`Manifest`].
//!
//! [`Manifest`]: stockroom_delivery::Manifest

pub mod planner;
pub mod store;

pub use planner::{DryGoods, OversizePolicy, PlannerConfig, ReplenishmentPlanner, reorder_list};
pub use store::{Store, StoreSnapshot, StockRow};
