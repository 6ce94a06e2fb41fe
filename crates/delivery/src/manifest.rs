use stockroom_core::StockResult;
use stockroom_inventory::Item;

use crate::vehicle::Vehicle;

/// Ordered, append-only sequence of vehicles making up one delivery.
///
/// Order is the packing order and also the encoded order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    vehicles: Vec<Vehicle>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `vehicle`; an absent vehicle is refused with `false`.
    pub fn append(&mut self, vehicle: Option<Vehicle>) -> bool {
        match vehicle {
            Some(vehicle) => {
                self.vehicles.push(vehicle);
                true
            }
            None => false,
        }
    }

    pub fn push(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    /// Membership by vehicle identity.
    pub fn contains(&self, vehicle: &Vehicle) -> bool {
        self.vehicles.iter().any(|v| v.id() == vehicle.id())
    }

    pub fn get(&self, index: usize) -> Option<&Vehicle> {
        self.vehicles.get(index)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Units of `item` across every vehicle.
    pub fn quantity_of(&self, item: &Item) -> i64 {
        self.vehicles
            .iter()
            .filter_map(|v| v.stock().quantity(item))
            .sum()
    }

    /// Sum of every vehicle's hire price.
    pub fn total_price(&self) -> StockResult<f64> {
        self.vehicles.iter().map(Vehicle::price).sum()
    }

    /// Vehicle blocks joined by `\n`, no trailing separator.
    pub fn encode(&self) -> String {
        self.vehicles
            .iter()
            .map(Vehicle::encode)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl core::fmt::Display for Manifest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a Vehicle;
    type IntoIter = std::slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}

impl IntoIterator for Manifest {
    type Item = Vehicle;
    type IntoIter = std::vec::IntoIter<Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.into_iter()
    }
}
