use std::collections::BTreeMap;

use stockroom_core::{ItemId, StockError, StockResult};

use crate::item::Item;

/// Encoding mode for [`Stock::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockFormat {
    /// `name,quantity` pairs, one per line.
    Name,
    /// Full item field dumps joined by `,`.
    Details,
}

/// One registered item and its quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct StockEntry {
    pub item: Item,
    pub quantity: i64,
}

/// Mapping from item identity to a non-negative quantity.
///
/// An item registered with quantity 0 is "known but out of stock". Quantities
/// can only change through [`Stock::set_quantity`] and its wrappers, which
/// enforce the non-negative invariant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stock {
    entries: BTreeMap<ItemId, StockEntry>,
}

impl Stock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `item` at quantity 0. Returns `false` if it was already known.
    pub fn add_item(&mut self, item: Item) -> bool {
        let id = item.id_typed();
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, StockEntry { item, quantity: 0 });
        true
    }

    /// Forgets `item`. Returns `false` if it was not registered.
    pub fn remove_item(&mut self, item: &Item) -> bool {
        self.entries.remove(&item.id_typed()).is_some()
    }

    /// Registers `item` (if needed) and sets its quantity.
    pub fn put(&mut self, item: Item, quantity: i64) -> StockResult<()> {
        if quantity < 0 {
            return Err(StockError::NegativeQuantity {
                item: item.name().to_string(),
                quantity,
            });
        }
        let id = item.id_typed();
        self.add_item(item);
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.quantity = quantity;
        }
        Ok(())
    }

    pub fn set_quantity(&mut self, item: &Item, quantity: i64) -> StockResult<()> {
        if quantity < 0 {
            return Err(StockError::NegativeQuantity {
                item: item.name().to_string(),
                quantity,
            });
        }
        let entry = self
            .entries
            .get_mut(&item.id_typed())
            .ok_or_else(|| StockError::UnknownItem(item.name().to_string()))?;
        entry.quantity = quantity;
        Ok(())
    }

    /// `set_quantity(item, current + delta)`. Returns the new quantity.
    pub fn adjust_quantity(&mut self, item: &Item, delta: i64) -> StockResult<i64> {
        let current = self
            .quantity(item)
            .ok_or_else(|| StockError::UnknownItem(item.name().to_string()))?;
        let next = current
            .checked_add(delta)
            .ok_or_else(|| StockError::QuantityOverflow(item.name().to_string()))?;
        self.set_quantity(item, next)?;
        Ok(next)
    }

    /// `None` if the item is not registered.
    pub fn quantity(&self, item: &Item) -> Option<i64> {
        self.entries.get(&item.id_typed()).map(|e| e.quantity)
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.entries.contains_key(&item.id_typed())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.item(name).is_some()
    }

    /// Linear scan by name; returns the first match in identity order.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.entries
            .values()
            .map(|e| &e.item)
            .find(|item| item.name() == name)
    }

    /// Sum of all quantities, saturating at `i64::MAX`.
    pub fn size(&self) -> i64 {
        self.entries
            .values()
            .fold(0i64, |total, e| total.saturating_add(e.quantity))
    }

    /// Number of registered items.
    pub fn unique_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&Item, i64)> {
        self.entries.values().map(|e| (&e.item, e.quantity))
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.entries.values().map(|e| &e.item)
    }

    /// Lowest temperature among registered cold items.
    pub fn lowest_temperature(&self) -> StockResult<f64> {
        self.items()
            .filter_map(Item::temperature)
            .reduce(f64::min)
            .ok_or(StockError::NoColdItems)
    }

    /// Entries sorted by name (identity breaks ties).
    pub fn sorted_by_name(&self) -> Vec<(&Item, i64)> {
        let mut rows: Vec<(&Item, i64)> = self.iter().collect();
        rows.sort_by(|(a, _), (b, _)| {
            a.name()
                .cmp(b.name())
                .then_with(|| a.id_typed().cmp(&b.id_typed()))
        });
        rows
    }

    /// Text view in ascending name order.
    pub fn encode(&self, format: StockFormat) -> String {
        let rows = self.sorted_by_name();
        match format {
            StockFormat::Name => rows
                .iter()
                .map(|(item, quantity)| format!("{},{}", item.name(), quantity))
                .collect::<Vec<_>>()
                .join("\n"),
            StockFormat::Details => rows
                .iter()
                .map(|(item, _)| item.details())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl core::fmt::Display for Stock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.encode(StockFormat::Name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rice() -> Item {
        Item::dry("Rice", 1.0, 3.0, 300, 320)
    }

    fn beef() -> Item {
        Item::cold("Beef", 10.0, 12.0, 300, 320, 5.0)
    }

    #[test]
    fn add_item_registers_at_zero_once() {
        let mut stock = Stock::new();
        let item = rice();
        assert!(stock.add_item(item.clone()));
        assert!(!stock.add_item(item.clone()));
        assert_eq!(stock.quantity(&item), Some(0));
        assert_eq!(stock.unique_count(), 1);
        assert_eq!(stock.size(), 0);
    }

    #[test]
    fn twin_items_are_separate_entries() {
        let mut stock = Stock::new();
        assert!(stock.add_item(rice()));
        assert!(stock.add_item(rice()));
        assert_eq!(stock.unique_count(), 2);
    }

    #[test]
    fn set_quantity_rejects_negative_values() {
        let mut stock = Stock::new();
        let item = rice();
        stock.put(item.clone(), 7).unwrap();

        let err = stock.set_quantity(&item, -1).unwrap_err();
        assert_eq!(
            err,
            StockError::NegativeQuantity {
                item: "Rice".to_string(),
                quantity: -1
            }
        );
        assert_eq!(stock.quantity(&item), Some(7));
    }

    #[test]
    fn set_quantity_rejects_unknown_items() {
        let mut stock = Stock::new();
        let err = stock.set_quantity(&rice(), 3).unwrap_err();
        assert_eq!(err, StockError::UnknownItem("Rice".to_string()));
    }

    #[test]
    fn adjust_quantity_propagates_errors() {
        let mut stock = Stock::new();
        let item = rice();
        stock.put(item.clone(), 5).unwrap();

        assert_eq!(stock.adjust_quantity(&item, 4).unwrap(), 9);
        assert!(matches!(
            stock.adjust_quantity(&item, -10),
            Err(StockError::NegativeQuantity { quantity: -1, .. })
        ));
        assert_eq!(stock.quantity(&item), Some(9));
        assert!(matches!(
            stock.adjust_quantity(&beef(), 1),
            Err(StockError::UnknownItem(_))
        ));
    }

    #[test]
    fn adjust_quantity_refuses_to_overflow() {
        let mut stock = Stock::new();
        let item = rice();
        stock.put(item.clone(), i64::MAX).unwrap();
        assert_eq!(
            stock.adjust_quantity(&item, 1),
            Err(StockError::QuantityOverflow("Rice".to_string()))
        );
        assert_eq!(stock.quantity(&item), Some(i64::MAX));
    }

    #[test]
    fn size_saturates_instead_of_wrapping() {
        let mut stock = Stock::new();
        stock.put(rice(), i64::MAX).unwrap();
        stock.put(beef(), 1).unwrap();
        assert_eq!(stock.size(), i64::MAX);
    }

    #[test]
    fn remove_item_reports_whether_anything_changed() {
        let mut stock = Stock::new();
        let item = rice();
        stock.add_item(item.clone());
        assert!(stock.remove_item(&item));
        assert!(!stock.remove_item(&item));
        assert!(stock.is_empty());
    }

    #[test]
    fn lookup_by_name_scans_identities() {
        let mut stock = Stock::new();
        let item = beef();
        stock.add_item(item.clone());
        assert!(stock.contains_name("Beef"));
        assert!(!stock.contains_name("beef"));
        assert_eq!(stock.item("Beef"), Some(&item));
    }

    #[test]
    fn lowest_temperature_ignores_dry_items() {
        let mut stock = Stock::new();
        stock.add_item(rice());
        stock.add_item(beef());
        stock.add_item(Item::cold("ice cream", 6.0, 12.0, 260, 300, -5.0));
        assert_eq!(stock.lowest_temperature().unwrap(), -5.0);
    }

    #[test]
    fn lowest_temperature_without_cold_items_is_an_error() {
        let mut stock = Stock::new();
        assert_eq!(stock.lowest_temperature(), Err(StockError::NoColdItems));
        stock.add_item(rice());
        assert_eq!(stock.lowest_temperature(), Err(StockError::NoColdItems));
    }

    #[test]
    fn name_encoding_is_sorted_and_unterminated() {
        let mut stock = Stock::new();
        stock.put(rice(), 12).unwrap();
        stock.put(beef(), 3).unwrap();
        stock.put(Item::dry("Beans", 4.0, 5.0, 120, 200), 0).unwrap();
        assert_eq!(stock.encode(StockFormat::Name), "Beans,0\nBeef,3\nRice,12");
        assert_eq!(stock.to_string(), "Beans,0\nBeef,3\nRice,12");
    }

    #[test]
    fn details_encoding_joins_items_with_commas() {
        let mut stock = Stock::new();
        stock.add_item(rice());
        stock.add_item(beef());
        assert_eq!(
            stock.encode(StockFormat::Details),
            "Beef,10,12,300,320,5,Rice,1,3,300,320"
        );
    }

    #[test]
    fn empty_stock_encodes_to_nothing() {
        assert_eq!(Stock::new().encode(StockFormat::Name), "");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a successful set is observable, a failed one leaves state alone.
        #[test]
        fn set_quantity_is_exact_or_a_no_op(start in 0i64..10_000, next in -10_000i64..10_000) {
            let mut stock = Stock::new();
            let item = rice();
            stock.put(item.clone(), start).unwrap();

            let outcome = stock.set_quantity(&item, next);
            if next >= 0 {
                prop_assert!(outcome.is_ok());
                prop_assert_eq!(stock.quantity(&item), Some(next));
            } else {
                let is_negative_error = matches!(outcome, Err(StockError::NegativeQuantity { .. }));
                prop_assert!(is_negative_error);
                prop_assert_eq!(stock.quantity(&item), Some(start));
            }
        }

        /// Property: size is the sum of every registered quantity.
        #[test]
        fn size_is_the_sum_of_quantities(quantities in prop::collection::vec(0i64..5_000, 0..40)) {
            let mut stock = Stock::new();
            for (i, q) in quantities.iter().enumerate() {
                stock.put(Item::dry(format!("item-{i}"), 1.0, 2.0, 10, 20), *q).unwrap();
            }
            let expected: i64 = quantities.iter().sum();
            prop_assert_eq!(stock.size(), expected);
            prop_assert_eq!(stock.iter().map(|(_, q)| q).sum::<i64>(), expected);
            prop_assert_eq!(stock.unique_count(), quantities.len());
        }
    }
}
