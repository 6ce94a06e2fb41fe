//! File boundary around the codec.
//!
//! Read failures and write failures surface as `FormatError::Io`; everything
//! after the bytes are in memory is the codec's business.

use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use stockroom_core::{FormatResult, InventoryResult};
use stockroom_delivery::Manifest;
use stockroom_store::{ReplenishmentPlanner, Store};

use crate::codec;

/// Reads a record file and normalizes its line endings.
pub fn read_records(path: impl AsRef<Path>) -> FormatResult<String> {
    let text = fs::read_to_string(path.as_ref())?;
    Ok(codec::normalize(&text))
}

pub fn write_records(path: impl AsRef<Path>, document: &str) -> FormatResult<()> {
    fs::write(path.as_ref(), document)?;
    Ok(())
}

/// Decodes a catalog file and registers its items. Returns the number of new
/// items.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn import_catalog_file(store: &mut Store, path: impl AsRef<Path>) -> InventoryResult<usize> {
    let catalog = codec::decode_catalog(&read_records(&path)?)?;
    Ok(store.import_catalog(&catalog))
}

/// Decodes a sales file against the store and applies it.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn import_sales_file(store: &mut Store, path: impl AsRef<Path>) -> InventoryResult<()> {
    let sold = codec::decode_sales(&read_records(&path)?, store)?;
    store.import_sales(&sold)?;
    Ok(())
}

/// Decodes a manifest file against the store and applies it.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn import_manifest_file(store: &mut Store, path: impl AsRef<Path>) -> InventoryResult<()> {
    let manifest = codec::decode_manifest(&read_records(&path)?, store)?;
    store.import_manifest(&manifest)
}

/// Plans a delivery for `store` and writes it to `path`. The file is not
/// touched when there is nothing to export.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn export_manifest_file(
    store: &Store,
    planner: &ReplenishmentPlanner,
    path: impl AsRef<Path>,
) -> InventoryResult<Manifest> {
    let manifest = planner.plan(store)?;
    let document = codec::encode_manifest(&manifest)?;
    write_records(&path, &document)?;
    info!(vehicles = manifest.len(), "manifest exported");
    Ok(manifest)
}
