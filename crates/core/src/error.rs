//! Domain error model.
//!
//! Errors are grouped into three families: stock bookkeeping, deliveries and
//! record formats. Every family is returned to the immediate caller; nothing is
//! swallowed inside the domain crates.

use thiserror::Error;

pub type StockResult<T> = Result<T, StockError>;
pub type DeliveryResult<T> = Result<T, DeliveryError>;
pub type FormatResult<T> = Result<T, FormatError>;
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Stock bookkeeping failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StockError {
    /// A quantity would drop below zero.
    #[error("negative quantity {quantity} for item '{item}'")]
    NegativeQuantity { item: String, quantity: i64 },

    /// The item is not registered in the stock.
    #[error("item '{0}' is not in the stock")]
    UnknownItem(String),

    /// A temperature was requested from a stock holding no cold items.
    #[error("stock holds no cold items")]
    NoColdItems,

    /// A quantity would exceed the representable range.
    #[error("quantity overflow for item '{0}'")]
    QuantityOverflow(String),
}

/// Delivery and capital failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeliveryError {
    /// A vehicle was handed more units than it can carry.
    #[error("vehicle over capacity: {size} units for a capacity of {capacity}")]
    OverCapacity { capacity: u32, size: u32 },

    /// A cold item was loaded into an ordinary vehicle.
    #[error("cold item '{0}' cannot travel in an ordinary vehicle")]
    ColdItemRejected(String),

    /// A vehicle marker was not `>Ordinary` or `>Refrigerated`.
    #[error("unrecognized vehicle type '{0}'")]
    UnrecognizedVehicleType(String),

    /// A delivered item is not in the store inventory.
    #[error("delivered item '{0}' is not in the store inventory")]
    UnknownItem(String),

    /// Capital would drop below zero.
    #[error("capital cannot go negative (would be {0:.2})")]
    NegativeCapital(f64),

    /// A single reorder does not fit in one vehicle of its own type.
    #[error("reorder of {amount} '{item}' exceeds vehicle capacity {capacity}")]
    ReorderExceedsCapacity {
        item: String,
        amount: u32,
        capacity: u32,
    },
}

/// Which record grammar a document was checked against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecordKind {
    Catalog,
    Sales,
    Manifest,
}

impl core::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            RecordKind::Catalog => "catalog",
            RecordKind::Sales => "sales",
            RecordKind::Manifest => "manifest",
        };
        f.write_str(name)
    }
}

/// Record format failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormatError {
    /// The document does not match its grammar.
    #[error("document is not a well-formed {0} record")]
    PatternMismatch(RecordKind),

    /// Reading or writing the document failed.
    #[error("io failure: {0}")]
    Io(String),

    /// Nothing to export.
    #[error("cannot export an empty manifest")]
    EmptyExport,

    /// The document matched its grammar but a field could not be interpreted.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl FormatError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }
}

impl From<std::io::Error> for FormatError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

/// Umbrella error for operations that cross families (codec entry points,
/// planning, whole transactions).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    #[error(transparent)]
    Stock(#[from] StockError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn umbrella_wraps_each_family() {
        let e: InventoryError = StockError::NoColdItems.into();
        assert_eq!(e, InventoryError::Stock(StockError::NoColdItems));

        let e: InventoryError = FormatError::EmptyExport.into();
        assert_eq!(e.to_string(), "cannot export an empty manifest");
    }

    #[test]
    fn io_errors_keep_their_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "items.csv missing");
        let e = FormatError::from(io);
        assert_eq!(e, FormatError::Io("items.csv missing".to_string()));
    }

    #[test]
    fn pattern_mismatch_names_the_grammar() {
        let e = FormatError::PatternMismatch(RecordKind::Sales);
        assert_eq!(e.to_string(), "document is not a well-formed sales record");
    }
}
