use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, ItemId};

/// Storage requirement of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Storage {
    /// No temperature requirement; travels in any vehicle.
    Dry,
    /// Must be kept at or below `temperature` (degrees Celsius).
    Cold { temperature: f64 },
}

impl Storage {
    pub fn temperature(&self) -> Option<f64> {
        match self {
            Storage::Dry => None,
            Storage::Cold { temperature } => Some(*temperature),
        }
    }
}

/// Immutable catalog record.
///
/// Equality and hashing go through [`ItemId`] only. Building the same catalog
/// line twice yields two different items.
#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    name: String,
    cost: f64,
    price: f64,
    reorder_point: u32,
    reorder_amount: u32,
    storage: Storage,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        cost: f64,
        price: f64,
        reorder_point: u32,
        reorder_amount: u32,
        storage: Storage,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            price,
            reorder_point,
            reorder_amount,
            storage,
        }
    }

    /// Dry item with a fresh identity.
    pub fn dry(
        name: impl Into<String>,
        cost: f64,
        price: f64,
        reorder_point: u32,
        reorder_amount: u32,
    ) -> Self {
        Self::new(
            ItemId::new(),
            name,
            cost,
            price,
            reorder_point,
            reorder_amount,
            Storage::Dry,
        )
    }

    /// Cold item with a fresh identity.
    pub fn cold(
        name: impl Into<String>,
        cost: f64,
        price: f64,
        reorder_point: u32,
        reorder_amount: u32,
        temperature: f64,
    ) -> Self {
        Self::new(
            ItemId::new(),
            name,
            cost,
            price,
            reorder_point,
            reorder_amount,
            Storage::Cold { temperature },
        )
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Purchase cost per unit.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Sale price per unit.
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn reorder_point(&self) -> u32 {
        self.reorder_point
    }

    pub fn reorder_amount(&self) -> u32 {
        self.reorder_amount
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }

    /// `None` for dry items.
    pub fn temperature(&self) -> Option<f64> {
        self.storage.temperature()
    }

    pub fn is_dry(&self) -> bool {
        matches!(self.storage, Storage::Dry)
    }

    pub fn is_cold(&self) -> bool {
        !self.is_dry()
    }

    /// Full field dump: `name,cost,price,reorderPoint,reorderAmount[,temperature]`.
    pub fn details(&self) -> String {
        let mut out = format!(
            "{},{},{},{},{}",
            self.name, self.cost, self.price, self.reorder_point, self.reorder_amount
        );
        if let Storage::Cold { temperature } = self.storage {
            out.push(',');
            out.push_str(&temperature.to_string());
        }
        out
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl core::hash::Hash for Item {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl core::fmt::Display for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.details())
    }
}
