//! Record codec: the flat text formats exchanged with the outside world.
//!
//! Three grammars are supported, all comma-separated with one record per line:
//!
//! - **catalog**: `name,cost,price,reorderPoint,reorderAmount[,temperature]`
//!   (a sixth field marks a cold item);
//! - **sales**: `name,quantitySold`;
//! - **manifest**: `>Ordinary` / `>Refrigerated` marker lines, each followed by
//!   `name,quantity` lines for that vehicle.
//!
//! Every document is checked against its full grammar before any field is
//! interpreted. [`io`] wraps the codec with file reading and writing.

pub mod codec;
pub mod grammar;
pub mod io;

pub use codec::{
    SalesRecord, decode_catalog, decode_manifest, decode_sales, decode_sales_records,
    encode_catalog, encode_manifest, encode_sales, export_manifest, normalize,
};
