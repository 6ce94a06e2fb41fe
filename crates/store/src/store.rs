use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use stockroom_core::{
    DeliveryError, DeliveryResult, InventoryError, InventoryResult, StockError, StockResult,
};
use stockroom_delivery::Manifest;
use stockroom_inventory::{Item, Stock, Storage};

use crate::planner;

/// A single retail store: its name, capital and live stock.
///
/// Transactions are applied record by record and are **not** atomic: when one
/// fails part-way, the records before it stay applied. Callers that need
/// all-or-nothing semantics should work on a clone and swap it in on success.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    name: String,
    capital: f64,
    stock: Stock,
}

/// One row of a [`StoreSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRow {
    pub name: String,
    pub quantity: i64,
    pub cost: f64,
    pub price: f64,
    pub reorder_point: u32,
    pub reorder_amount: u32,
    pub storage: Storage,
}

/// Serializable view of a store, rows in name order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub name: String,
    pub capital: f64,
    pub items: Vec<StockRow>,
}

impl Store {
    pub fn new(name: impl Into<String>, capital: f64) -> Self {
        Self::with_stock(name, capital, Stock::new())
    }

    pub fn with_stock(name: impl Into<String>, capital: f64, stock: Stock) -> Self {
        Self {
            name: name.into(),
            capital,
            stock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn capital(&self) -> f64 {
        self.capital
    }

    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    /// Catalog lookup by name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.stock.item(name)
    }

    /// Registers every catalog item the store does not know yet, at quantity 0.
    ///
    /// Items already known by identity are skipped silently; a new item whose
    /// name is already taken is skipped with a warning, so importing the same
    /// catalog twice changes nothing. Returns the number of items registered.
    #[instrument(skip_all, fields(store = %self.name))]
    pub fn import_catalog(&mut self, catalog: &Stock) -> usize {
        let mut registered = 0;
        for (item, _) in catalog.sorted_by_name() {
            if self.stock.contains(item) {
                continue;
            }
            if self.stock.contains_name(item.name()) {
                warn!(item = item.name(), "catalog item name already in use; skipped");
                continue;
            }
            self.stock.add_item(item.clone());
            debug!(item = item.name(), "catalog item registered");
            registered += 1;
        }
        info!(registered, known = self.stock.unique_count(), "catalog imported");
        registered
    }

    /// Applies a sales log: stock goes down, capital goes up by `price × quantity`.
    ///
    /// Not atomic; see the type-level docs.
    #[instrument(skip_all, fields(store = %self.name))]
    pub fn import_sales(&mut self, sold: &Stock) -> StockResult<()> {
        for (item, quantity) in sold.sorted_by_name() {
            self.stock.adjust_quantity(item, -quantity)?;
            self.capital += item.price() * quantity as f64;
            debug!(item = item.name(), quantity, "sale applied");
        }
        info!(lines = sold.unique_count(), units = sold.size(), capital = self.capital, "sales imported");
        Ok(())
    }

    /// Applies a delivery: stock goes up, capital goes down by each item's
    /// `cost × quantity` and by each vehicle's hire price.
    ///
    /// Not atomic; see the type-level docs.
    #[instrument(skip_all, fields(store = %self.name, vehicles = manifest.len()))]
    pub fn import_manifest(&mut self, manifest: &Manifest) -> InventoryResult<()> {
        for vehicle in manifest {
            for (item, quantity) in vehicle.stock().sorted_by_name() {
                self.stock
                    .adjust_quantity(item, quantity)
                    .map_err(|e| match e {
                        StockError::UnknownItem(name) => {
                            InventoryError::from(DeliveryError::UnknownItem(name))
                        }
                        other => InventoryError::from(other),
                    })?;
                self.capital -= item.cost() * quantity as f64;
                debug!(item = item.name(), quantity, "delivery applied");
            }
            let hire = vehicle.price()?;
            self.capital -= hire;
            debug!(kind = %vehicle.kind(), price = hire, "vehicle paid");
        }
        info!(capital = self.capital, "manifest imported");
        Ok(())
    }

    /// Store-level quantity change for a catalog item.
    pub fn adjust_quantity(&mut self, item: &Item, delta: i64) -> StockResult<i64> {
        self.stock.adjust_quantity(item, delta)
    }

    /// Adds `delta` to capital. Refused (capital unchanged) if the result
    /// would be negative.
    pub fn adjust_capital(&mut self, delta: f64) -> DeliveryResult<f64> {
        let next = self.capital + delta;
        if next < 0.0 {
            return Err(DeliveryError::NegativeCapital(next));
        }
        self.capital = next;
        Ok(next)
    }

    /// Items at or below their reorder point, cold (coldest first) then dry
    /// (largest reorder amount first).
    pub fn generate_reorder_list(&self) -> Vec<Item> {
        planner::reorder_list(&self.stock)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let items = self
            .stock
            .sorted_by_name()
            .into_iter()
            .map(|(item, quantity)| StockRow {
                name: item.name().to_string(),
                quantity,
                cost: item.cost(),
                price: item.price(),
                reorder_point: item.reorder_point(),
                reorder_amount: item.reorder_amount(),
                storage: item.storage(),
            })
            .collect();
        StoreSnapshot {
            name: self.name.clone(),
            capital: self.capital,
            items,
        }
    }
}
