//! Replenishment planning: which items to reorder, in what order, and how the
//! reorder is packed into delivery vehicles.
//!
//! Packing walks the reorder list once with a small state machine. A vehicle
//! stays open until the running total of *full* reorder amounts reaches its
//! capacity. Each item is placed clipped to the room left; when the running
//! total went past capacity, the next vehicle opens pre-loaded with the
//! clipped remainder of the item that overflowed, in a vehicle of that item's
//! type.

use std::cmp::Reverse;

use tracing::{debug, info, instrument};

use stockroom_core::{DeliveryError, InventoryResult};
use stockroom_delivery::{Manifest, Vehicle, VehicleKind};
use stockroom_inventory::{Item, Stock};

use crate::store::Store;

/// What to do with an item whose reorder amount exceeds one vehicle of its
/// own type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversizePolicy {
    /// Refuse to plan (`DeliveryError::ReorderExceedsCapacity`).
    #[default]
    Reject,
    /// Keep spilling the remainder into further full vehicles of the item's type.
    Split,
}

/// Whether dry goods may fill the spare room of a refrigerated vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DryGoods {
    /// Dry items join whatever vehicle is open.
    #[default]
    Share,
    /// Dry items only travel in ordinary vehicles.
    Separate,
}

/// Planner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlannerConfig {
    pub oversize: OversizePolicy,
    pub dry_goods: DryGoods,
}

impl PlannerConfig {
    pub fn with_oversize(mut self, oversize: OversizePolicy) -> Self {
        self.oversize = oversize;
        self
    }

    pub fn with_dry_goods(mut self, dry_goods: DryGoods) -> Self {
        self.dry_goods = dry_goods;
        self
    }
}

/// Items at or below their reorder point: cold items by ascending temperature,
/// then dry items by descending reorder amount. Both sorts are stable over the
/// stock's identity order.
pub fn reorder_list(stock: &Stock) -> Vec<Item> {
    let (mut cold, mut dry): (Vec<Item>, Vec<Item>) = stock
        .iter()
        .filter(|(item, quantity)| *quantity <= i64::from(item.reorder_point()))
        .map(|(item, _)| item.clone())
        .partition(Item::is_cold);

    cold.sort_by(|a, b| {
        let ta = a.temperature().unwrap_or(f64::INFINITY);
        let tb = b.temperature().unwrap_or(f64::INFINITY);
        ta.total_cmp(&tb)
    });
    dry.sort_by_key(|item| Reverse(item.reorder_amount()));

    cold.extend(dry);
    cold
}

/// Vehicle under construction.
#[derive(Debug)]
struct OpenVehicle {
    kind: VehicleKind,
    /// Running total of full reorder amounts (plus any carried remainder).
    /// May exceed capacity; the excess is the overflow.
    accumulated: i64,
    load: Stock,
    /// Last item placed; owner of any overflow.
    last: Option<Item>,
}

impl OpenVehicle {
    fn empty(kind: VehicleKind) -> Self {
        Self {
            kind,
            accumulated: 0,
            load: Stock::new(),
            last: None,
        }
    }

    /// Opens a vehicle of `item`'s type carrying `remainder` units of it.
    fn seeded(item: Item, remainder: i64) -> InventoryResult<Self> {
        let mut open = Self::empty(VehicleKind::for_item(&item));
        let placed = remainder.min(open.capacity());
        open.add(&item, placed)?;
        open.accumulated = remainder;
        open.last = Some(item);
        Ok(open)
    }

    fn capacity(&self) -> i64 {
        i64::from(self.kind.capacity())
    }

    fn is_filled(&self) -> bool {
        self.accumulated >= self.capacity()
    }

    fn accepts(&self, item: &Item, dry_goods: DryGoods) -> bool {
        match (self.kind, item.is_cold()) {
            (VehicleKind::Ordinary, cold) => !cold,
            (VehicleKind::Refrigerated, true) => true,
            (VehicleKind::Refrigerated, false) => dry_goods == DryGoods::Share,
        }
    }

    fn add(&mut self, item: &Item, quantity: i64) -> InventoryResult<()> {
        self.load.add_item(item.clone());
        self.load.adjust_quantity(item, quantity)?;
        Ok(())
    }

    /// Places `item`, clipped to the room left. The running total grows by the
    /// full reorder amount.
    fn place(&mut self, item: &Item) -> InventoryResult<i64> {
        let amount = i64::from(item.reorder_amount());
        let placed = amount.min(self.capacity() - self.accumulated);
        self.add(item, placed)?;
        self.accumulated += amount;
        self.last = Some(item.clone());
        Ok(placed)
    }

    /// Overflowed item and its unplaced remainder.
    fn overflow(&self) -> Option<(Item, i64)> {
        let excess = self.accumulated - self.capacity();
        match &self.last {
            Some(item) if excess > 0 => Some((item.clone(), excess)),
            _ => None,
        }
    }

    fn finish(self) -> InventoryResult<Vehicle> {
        Ok(Vehicle::loaded(self.kind, self.load)?)
    }
}

/// Packing state between items.
#[derive(Debug)]
enum PackState {
    NoOpenVehicle,
    Open(OpenVehicle),
}

/// Turns store state into a packed delivery manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplenishmentPlanner {
    config: PlannerConfig,
}

impl ReplenishmentPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    /// Reorder list of `store`, in priority order.
    pub fn generate_reorder_list(&self, store: &Store) -> Vec<Item> {
        reorder_list(store.stock())
    }

    /// Reorder list of `store`, packed.
    #[instrument(skip_all, fields(store = store.name()))]
    pub fn plan(&self, store: &Store) -> InventoryResult<Manifest> {
        let items = self.generate_reorder_list(store);
        self.pack(&items)
    }

    /// Packs `items` (expected in reorder-list order) into vehicles.
    ///
    /// Every unit of every reorder amount lands in exactly one vehicle and no
    /// vehicle exceeds its capacity. An empty list gives an empty manifest.
    pub fn pack(&self, items: &[Item]) -> InventoryResult<Manifest> {
        if self.config.oversize == OversizePolicy::Reject {
            check_fits(items)?;
        }

        let mut manifest = Manifest::new();
        let mut state = PackState::NoOpenVehicle;

        for item in items {
            let mut open = match state {
                PackState::NoOpenVehicle => OpenVehicle::empty(VehicleKind::for_item(item)),
                PackState::Open(open) => open,
            };
            while open.is_filled() || !open.accepts(item, self.config.dry_goods) {
                let next = match open.overflow() {
                    Some((carried, remainder)) => OpenVehicle::seeded(carried, remainder)?,
                    None => OpenVehicle::empty(VehicleKind::for_item(item)),
                };
                manifest.push(open.finish()?);
                open = next;
            }
            let placed = open.place(item)?;
            debug!(item = item.name(), placed, kind = %open.kind, "reorder placed");
            state = PackState::Open(open);
        }

        if let PackState::Open(mut open) = state {
            loop {
                let carry = open.overflow();
                manifest.push(open.finish()?);
                match carry {
                    Some((carried, remainder)) => open = OpenVehicle::seeded(carried, remainder)?,
                    None => break,
                }
            }
        }

        info!(items = items.len(), vehicles = manifest.len(), "reorder packed");
        Ok(manifest)
    }
}

fn check_fits(items: &[Item]) -> InventoryResult<()> {
    for item in items {
        let capacity = VehicleKind::for_item(item).capacity();
        if item.reorder_amount() > capacity {
            return Err(DeliveryError::ReorderExceedsCapacity {
                item: item.name().to_string(),
                amount: item.reorder_amount(),
                capacity,
            }
            .into());
        }
    }
    Ok(())
}
