use std::collections::HashSet;

use tracing::debug;

use stockroom_core::{
    DeliveryError, FormatError, FormatResult, InventoryResult, ItemId, RecordKind,
};
use stockroom_delivery::{Manifest, Vehicle, VehicleKind};
use stockroom_inventory::{Item, Stock, StockFormat, Storage};
use stockroom_store::{ReplenishmentPlanner, Store};

use crate::grammar;

/// One `name,quantitySold` line, before the name is resolved against a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    pub name: String,
    pub quantity: i64,
}

/// Folds `\r\n` and lone `\r` into `\n` and drops trailing line breaks.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    unified.trim_end_matches('\n').to_string()
}

fn parse_field<T: std::str::FromStr>(line: usize, field: &str, what: &str) -> FormatResult<T> {
    field
        .parse()
        .map_err(|_| FormatError::malformed(format!("line {line}: invalid {what} '{field}'")))
}

/// Decodes a catalog into a stock of fresh items at quantity 0.
///
/// A five-field line is a dry item; a sixth field is the storage temperature of
/// a cold item. Names must be unique within the document.
pub fn decode_catalog(text: &str) -> FormatResult<Stock> {
    let document = normalize(text);
    grammar::validate(RecordKind::Catalog, &document)?;

    let mut stock = Stock::new();
    let mut names = HashSet::new();
    for (index, record) in document.split('\n').enumerate() {
        let line = index + 1;
        let fields: Vec<&str> = record.split(',').collect();
        let name = fields[0];
        if !names.insert(name) {
            return Err(FormatError::malformed(format!(
                "line {line}: item '{name}' is defined twice"
            )));
        }
        let storage = match fields.get(5) {
            Some(temperature) => Storage::Cold {
                temperature: parse_field(line, temperature, "temperature")?,
            },
            None => Storage::Dry,
        };
        let item = Item::new(
            ItemId::new(),
            name,
            parse_field(line, fields[1], "cost")?,
            parse_field(line, fields[2], "price")?,
            parse_field(line, fields[3], "reorder point")?,
            parse_field(line, fields[4], "reorder amount")?,
            storage,
        );
        stock.add_item(item);
    }
    debug!(items = stock.unique_count(), "catalog decoded");
    Ok(stock)
}

/// Decodes a sales log into raw records, in document order.
pub fn decode_sales_records(text: &str) -> FormatResult<Vec<SalesRecord>> {
    let document = normalize(text);
    grammar::validate(RecordKind::Sales, &document)?;

    document
        .split('\n')
        .enumerate()
        .map(|(index, record)| {
            let (name, quantity) = split_pair(record);
            Ok(SalesRecord {
                name: name.to_string(),
                quantity: parse_field(index + 1, quantity, "quantity")?,
            })
        })
        .collect()
}

/// Decodes a sales log against the store's catalog.
///
/// Repeated names accumulate. A name the store does not carry fails with
/// `DeliveryError::UnknownItem`.
pub fn decode_sales(text: &str, store: &Store) -> InventoryResult<Stock> {
    let mut sold = Stock::new();
    for (index, record) in decode_sales_records(text)?.into_iter().enumerate() {
        let item = resolve(store, &record.name)?;
        accumulate(&mut sold, item, record.quantity, index + 1)?;
    }
    Ok(sold)
}

/// Decodes a manifest, resolving every item against the store.
///
/// Each marker line opens a vehicle; the pairs after it form that vehicle's
/// load, which must fit its capacity and (for ordinary vehicles) hold no cold
/// items.
pub fn decode_manifest(text: &str, store: &Store) -> InventoryResult<Manifest> {
    let document = normalize(text);
    grammar::validate(RecordKind::Manifest, &document)?;

    let mut manifest = Manifest::new();
    let mut open: Option<(VehicleKind, Stock)> = None;
    for (index, record) in document.split('\n').enumerate() {
        if record.starts_with('>') {
            let kind = VehicleKind::from_marker(record)?;
            if let Some((kind, load)) = open.replace((kind, Stock::new())) {
                manifest.push(Vehicle::loaded(kind, load)?);
            }
            continue;
        }
        let (name, quantity) = split_pair(record);
        let quantity: i64 = parse_field(index + 1, quantity, "quantity")?;
        let item = resolve(store, name)?;
        // The grammar guarantees a marker on the first line.
        if let Some((_, load)) = open.as_mut() {
            accumulate(load, item, quantity, index + 1)?;
        }
    }
    if let Some((kind, load)) = open {
        manifest.push(Vehicle::loaded(kind, load)?);
    }
    debug!(vehicles = manifest.len(), "manifest decoded");
    Ok(manifest)
}

/// Serializes a manifest; the result decodes back to an equal manifest.
pub fn encode_manifest(manifest: &Manifest) -> FormatResult<String> {
    if manifest.is_empty() {
        return Err(FormatError::EmptyExport);
    }
    let document = manifest.encode();
    grammar::validate(RecordKind::Manifest, &document)?;
    Ok(document)
}

/// One catalog line per item, in name order.
pub fn encode_catalog(stock: &Stock) -> String {
    stock
        .sorted_by_name()
        .into_iter()
        .map(|(item, _)| item.details())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `name,quantity` line per item, in name order.
pub fn encode_sales(sold: &Stock) -> String {
    sold.encode(StockFormat::Name)
}

/// Plans a delivery for `store` and serializes it.
pub fn export_manifest(store: &Store, planner: &ReplenishmentPlanner) -> InventoryResult<String> {
    let manifest = planner.plan(store)?;
    Ok(encode_manifest(&manifest)?)
}

/// Adds `quantity` units of `item` to `stock`, refusing totals past `i64::MAX`.
fn accumulate(stock: &mut Stock, item: &Item, quantity: i64, line: usize) -> InventoryResult<()> {
    let already = stock.quantity(item).unwrap_or(0);
    let total = already.checked_add(quantity).ok_or_else(|| {
        FormatError::malformed(format!("line {line}: total quantity of '{}' overflows", item.name()))
    })?;
    stock.put(item.clone(), total)?;
    Ok(())
}

fn split_pair(record: &str) -> (&str, &str) {
    // Names hold no commas, so the last comma separates the quantity.
    record.rsplit_once(',').unwrap_or((record, ""))
}

fn resolve<'a>(store: &'a Store, name: &str) -> Result<&'a Item, DeliveryError> {
    store
        .item(name)
        .ok_or_else(|| DeliveryError::UnknownItem(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::{InventoryError, StockError};

    const CATALOG: &str = "rice,2,3,225,300\nbeef,12,17,425,550,3\nice cream,8,14,175,250,-20";

    fn store_from(catalog: &str) -> Store {
        let mut store = Store::new("SuperMart", 100_000.0);
        store.import_catalog(&decode_catalog(catalog).unwrap());
        store
    }

    #[test]
    fn normalize_unifies_line_endings_and_trims_the_tail() {
        assert_eq!(normalize("a,1\r\nb,2\rc,3\n\n"), "a,1\nb,2\nc,3");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn catalog_field_count_decides_storage() {
        let stock = decode_catalog(CATALOG).unwrap();
        assert_eq!(stock.unique_count(), 3);

        let rice = stock.item("rice").unwrap();
        assert!(rice.is_dry());
        assert_eq!(rice.reorder_amount(), 300);
        assert_eq!(stock.quantity(rice), Some(0));

        let ice = stock.item("ice cream").unwrap();
        assert_eq!(ice.temperature(), Some(-20.0));
        assert_eq!(ice.cost(), 8.0);
    }

    #[test]
    fn catalog_accepts_crlf_and_trailing_newline() {
        let stock = decode_catalog("rice,2,3,225,300\r\nbeans,4,6,330,450\r\n").unwrap();
        assert_eq!(stock.unique_count(), 2);
    }

    #[test]
    fn catalog_rejects_bad_grammar_and_duplicate_names() {
        assert_eq!(
            decode_catalog("rice,2,3"),
            Err(FormatError::PatternMismatch(RecordKind::Catalog))
        );
        assert!(matches!(
            decode_catalog("rice,2,3,225,300\nrice,1,1,1,1"),
            Err(FormatError::MalformedRecord(_))
        ));
    }

    #[test]
    fn catalog_rejects_counts_out_of_range() {
        assert!(matches!(
            decode_catalog("rice,2,3,99999999999,300"),
            Err(FormatError::MalformedRecord(_))
        ));
    }

    #[test]
    fn encoded_catalog_decodes_to_the_same_fields() {
        let stock = decode_catalog(CATALOG).unwrap();
        let text = encode_catalog(&stock);
        assert_eq!(
            text,
            "beef,12,17,425,550,3\nice cream,8,14,175,250,-20\nrice,2,3,225,300"
        );
        let again = decode_catalog(&text).unwrap();
        assert_eq!(encode_catalog(&again), text);
    }

    #[test]
    fn sales_records_keep_document_order() {
        let records = decode_sales_records("rice,12\nbeef,3").unwrap();
        assert_eq!(
            records,
            vec![
                SalesRecord { name: "rice".into(), quantity: 12 },
                SalesRecord { name: "beef".into(), quantity: 3 },
            ]
        );
    }

    #[test]
    fn sales_resolve_against_the_store_and_accumulate() {
        let store = store_from(CATALOG);
        let sold = decode_sales("rice,12\nbeef,3\nrice,8", &store).unwrap();
        let rice = store.item("rice").unwrap();
        assert_eq!(sold.quantity(rice), Some(20));
        assert_eq!(sold.size(), 23);
        assert_eq!(encode_sales(&sold), "beef,3\nrice,20");
    }

    #[test]
    fn sales_for_unknown_items_fail() {
        let store = store_from(CATALOG);
        assert_eq!(
            decode_sales("tofu,1", &store),
            Err(InventoryError::Delivery(DeliveryError::UnknownItem("tofu".into())))
        );
        assert_eq!(
            decode_sales("tofu,-1", &store),
            Err(InventoryError::Format(FormatError::PatternMismatch(RecordKind::Sales)))
        );
    }

    #[test]
    fn manifest_splits_into_vehicles_by_marker() {
        let store = store_from(CATALOG);
        let text = ">Refrigerated\nbeef,320\nice cream,100\n>Ordinary\nrice,320";
        let manifest = decode_manifest(text, &store).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.vehicles()[0].kind(), VehicleKind::Refrigerated);
        assert_eq!(manifest.vehicles()[0].count(), 420);
        assert_eq!(manifest.vehicles()[1].kind(), VehicleKind::Ordinary);
        assert_eq!(encode_manifest(&manifest).unwrap(), ">Refrigerated\nbeef,320\nice cream,100\n>Ordinary\nrice,320");
    }

    #[test]
    fn manifest_keeps_empty_vehicles() {
        let store = store_from(CATALOG);
        let manifest = decode_manifest(">Ordinary\n>Ordinary\nrice,5", &store).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.vehicles()[0].count(), 0);
    }

    #[test]
    fn manifest_errors_surface_by_family() {
        let store = store_from(CATALOG);
        assert_eq!(
            decode_manifest(">Boat\nrice,1", &store),
            Err(InventoryError::Delivery(DeliveryError::UnrecognizedVehicleType(">Boat".into())))
        );
        assert_eq!(
            decode_manifest(">Ordinary\ntofu,1", &store),
            Err(InventoryError::Delivery(DeliveryError::UnknownItem("tofu".into())))
        );
        assert_eq!(
            decode_manifest(">Ordinary\nbeef,1", &store),
            Err(InventoryError::Delivery(DeliveryError::ColdItemRejected("beef".into())))
        );
        assert_eq!(
            decode_manifest(">Refrigerated\nbeef,801", &store),
            Err(InventoryError::Delivery(DeliveryError::OverCapacity { capacity: 800, size: 801 }))
        );
        assert_eq!(
            decode_manifest("rice,1", &store),
            Err(InventoryError::Format(FormatError::PatternMismatch(RecordKind::Manifest)))
        );
    }

    const MAX: i64 = i64::MAX;

    fn malformed_line(result: InventoryResult<impl std::fmt::Debug>, line: usize) {
        match result {
            Err(InventoryError::Format(FormatError::MalformedRecord(msg))) => {
                assert!(msg.starts_with(&format!("line {line}:")), "{msg}");
            }
            other => panic!("expected a malformed record on line {line}, got {other:?}"),
        }
    }

    #[test]
    fn sales_quantity_at_the_top_of_the_range_decodes() {
        let store = store_from(CATALOG);
        let sold = decode_sales(&format!("rice,{MAX}"), &store).unwrap();
        assert_eq!(sold.size(), MAX);
        assert_eq!(
            decode_sales("rice,9223372036854775808", &store),
            Err(InventoryError::Format(FormatError::malformed(
                "line 1: invalid quantity '9223372036854775808'"
            )))
        );
    }

    #[test]
    fn repeated_sales_lines_summing_past_the_range_are_malformed() {
        let store = store_from(CATALOG);
        malformed_line(decode_sales(&format!("rice,{MAX}\nrice,1"), &store), 2);
    }

    #[test]
    fn repeated_manifest_lines_summing_past_the_range_are_malformed() {
        let store = store_from(CATALOG);
        malformed_line(decode_manifest(&format!(">Ordinary\nrice,{MAX}\nrice,1"), &store), 3);
    }

    #[test]
    fn vehicle_block_whose_total_wraps_is_over_capacity() {
        let store = store_from("rice,2,3,225,300\nbeans,4,6,330,450");
        assert_eq!(
            decode_manifest(&format!(">Ordinary\nrice,{MAX}\nbeans,1"), &store),
            Err(InventoryError::Delivery(DeliveryError::OverCapacity {
                capacity: 1000,
                size: u32::MAX,
            }))
        );
        assert_eq!(
            decode_manifest(&format!(">Refrigerated\nbeef,{MAX}"), &store_from(CATALOG)),
            Err(InventoryError::Delivery(DeliveryError::OverCapacity {
                capacity: 800,
                size: u32::MAX,
            }))
        );
    }

    #[test]
    fn empty_manifest_cannot_be_exported() {
        assert_eq!(encode_manifest(&Manifest::new()), Err(FormatError::EmptyExport));
    }

    #[test]
    fn export_plans_and_encodes() {
        let store = store_from("rice,2,3,225,300\nbeef,12,17,425,550,3");
        let text = export_manifest(&store, &ReplenishmentPlanner::default()).unwrap();
        assert_eq!(text, ">Refrigerated\nbeef,550\nrice,250\n>Ordinary\nrice,50");

        let empty = Store::new("Empty", 0.0);
        assert_eq!(
            export_manifest(&empty, &ReplenishmentPlanner::default()),
            Err(InventoryError::Format(FormatError::EmptyExport))
        );
    }

    #[test]
    fn refrigerated_vehicle_without_cold_items_still_decodes() {
        let store = store_from(CATALOG);
        let manifest = decode_manifest(">Refrigerated\nrice,10", &store).unwrap();
        assert_eq!(manifest.total_price(), Err(StockError::NoColdItems));
    }
}
