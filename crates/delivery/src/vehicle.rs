use serde::{Deserialize, Serialize};

use stockroom_core::{DeliveryError, DeliveryResult, StockResult, VehicleId};
use stockroom_inventory::{Item, Stock, StockFormat};

pub const ORDINARY_CAPACITY: u32 = 1000;
pub const REFRIGERATED_CAPACITY: u32 = 800;

const ORDINARY_BASE_PRICE: f64 = 750.0;
const ORDINARY_PRICE_PER_UNIT: f64 = 0.25;
const REFRIGERATED_BASE_PRICE: f64 = 900.0;
const REFRIGERATED_COOLING_PRICE: f64 = 200.0;

/// Vehicle variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    /// Dry goods only.
    Ordinary,
    /// Any goods; runs at the lowest temperature of its cold load.
    Refrigerated,
}

impl VehicleKind {
    pub fn capacity(self) -> u32 {
        match self {
            VehicleKind::Ordinary => ORDINARY_CAPACITY,
            VehicleKind::Refrigerated => REFRIGERATED_CAPACITY,
        }
    }

    /// Record marker (`>Ordinary` / `>Refrigerated`).
    pub fn marker(self) -> &'static str {
        match self {
            VehicleKind::Ordinary => ">Ordinary",
            VehicleKind::Refrigerated => ">Refrigerated",
        }
    }

    pub fn from_marker(marker: &str) -> DeliveryResult<Self> {
        match marker {
            ">Ordinary" => Ok(VehicleKind::Ordinary),
            ">Refrigerated" => Ok(VehicleKind::Refrigerated),
            other => Err(DeliveryError::UnrecognizedVehicleType(other.to_string())),
        }
    }

    /// Cold items need refrigeration; dry items go ordinary.
    pub fn for_item(item: &Item) -> Self {
        if item.is_cold() {
            VehicleKind::Refrigerated
        } else {
            VehicleKind::Ordinary
        }
    }
}

impl core::fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.marker()[1..])
    }
}

/// A capacity-bounded carrier of a [`Stock`].
///
/// Equality compares kind and load; manifest membership uses [`Vehicle::id`].
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: VehicleId,
    kind: VehicleKind,
    stock: Stock,
}

impl Vehicle {
    /// Empty vehicle.
    pub fn new(kind: VehicleKind) -> Self {
        Self {
            id: VehicleId::new(),
            kind,
            stock: Stock::new(),
        }
    }

    /// Vehicle loaded with `stock`, validated like [`Vehicle::assign_stock`].
    pub fn loaded(kind: VehicleKind, stock: Stock) -> DeliveryResult<Self> {
        let mut vehicle = Self::new(kind);
        vehicle.assign_stock(stock)?;
        Ok(vehicle)
    }

    pub fn ordinary(stock: Stock) -> DeliveryResult<Self> {
        Self::loaded(VehicleKind::Ordinary, stock)
    }

    pub fn refrigerated(stock: Stock) -> DeliveryResult<Self> {
        Self::loaded(VehicleKind::Refrigerated, stock)
    }

    /// Replaces the load. On error the previous load is kept.
    pub fn assign_stock(&mut self, stock: Stock) -> DeliveryResult<()> {
        let size = stock.size();
        if size > i64::from(self.capacity()) {
            return Err(DeliveryError::OverCapacity {
                capacity: self.capacity(),
                size: u32::try_from(size).unwrap_or(u32::MAX),
            });
        }
        if self.kind == VehicleKind::Ordinary {
            if let Some((cold, _)) = stock.sorted_by_name().into_iter().find(|(i, _)| i.is_cold()) {
                return Err(DeliveryError::ColdItemRejected(cold.name().to_string()));
            }
        }
        self.stock = stock;
        Ok(())
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    pub fn capacity(&self) -> u32 {
        self.kind.capacity()
    }

    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    /// Units on board.
    pub fn count(&self) -> i64 {
        self.stock.size()
    }

    pub fn is_full(&self) -> bool {
        self.stock.size() >= i64::from(self.capacity())
    }

    /// Operating temperature. `None` for ordinary vehicles; a refrigerated
    /// vehicle without cold items has no defined temperature.
    pub fn temperature(&self) -> StockResult<Option<f64>> {
        match self.kind {
            VehicleKind::Ordinary => Ok(None),
            VehicleKind::Refrigerated => self.stock.lowest_temperature().map(Some),
        }
    }

    /// Hire price of the vehicle for one delivery.
    pub fn price(&self) -> StockResult<f64> {
        match self.kind {
            VehicleKind::Ordinary => {
                Ok(ORDINARY_BASE_PRICE + ORDINARY_PRICE_PER_UNIT * self.stock.size() as f64)
            }
            VehicleKind::Refrigerated => {
                let temperature = self.stock.lowest_temperature()?;
                Ok(REFRIGERATED_BASE_PRICE
                    + REFRIGERATED_COOLING_PRICE * 0.7_f64.powf(temperature / 5.0))
            }
        }
    }

    /// Marker line followed by the load's `name,quantity` lines.
    pub fn encode(&self) -> String {
        if self.stock.is_empty() {
            return self.kind.marker().to_string();
        }
        format!("{}\n{}", self.kind.marker(), self.stock.encode(StockFormat::Name))
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.stock == other.stock
    }
}

impl core::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.encode())
    }
}
