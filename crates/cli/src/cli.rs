use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};

use stockroom_observability::LogFormat;
use stockroom_store::{DryGoods, OversizePolicy, PlannerConfig};

use crate::config;

/// Runs a store's record files through the inventory: catalog first, then
/// deliveries, then sales, and optionally writes the next delivery manifest.
#[derive(Parser, Debug, Clone)]
#[command(name = "stockroom", version, about)]
pub(crate) struct Args {
    /// Store name
    #[arg(long, env = config::ENV_STORE_NAME, default_value = config::DEFAULT_STORE_NAME)]
    pub(crate) name: String,

    /// Starting capital
    #[arg(long, env = config::ENV_CAPITAL, default_value = config::DEFAULT_CAPITAL)]
    pub(crate) capital: f64,

    /// Log output: json, pretty or compact
    #[arg(long, env = config::ENV_LOG_FORMAT, default_value = config::DEFAULT_LOG_FORMAT)]
    pub(crate) log_format: LogFormat,

    /// Item catalog (`name,cost,price,reorderPoint,reorderAmount[,temperature]`)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,

    /// Delivery manifest to apply; repeatable, applied in order
    #[arg(long = "manifest")]
    pub(crate) manifests: Vec<PathBuf>,

    /// Sales log to apply; repeatable, applied in order after deliveries
    #[arg(long = "sales")]
    pub(crate) sales: Vec<PathBuf>,

    /// Write the next delivery manifest here
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,

    /// Where dry goods may ride
    #[arg(long, value_enum, default_value_t = DryGoodsArg::Share)]
    pub(crate) dry_goods: DryGoodsArg,

    /// Split reorders larger than one vehicle instead of refusing them
    #[arg(long)]
    pub(crate) split_oversize: bool,

    /// Print the final store state as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DryGoodsArg {
    /// Dry reorders may fill a partly loaded refrigerated vehicle
    Share,
    /// Dry reorders always travel in ordinary vehicles
    Separate,
}

impl Args {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("--name is empty");
        }
        if !self.capital.is_finite() || self.capital < 0.0 {
            bail!("--capital must be a non-negative amount (got: {})", self.capital);
        }
        if self.catalog.is_none() && (!self.manifests.is_empty() || !self.sales.is_empty()) {
            bail!("--manifest and --sales need a --catalog to resolve item names");
        }
        Ok(())
    }

    pub(crate) fn planner_config(&self) -> PlannerConfig {
        let dry_goods = match self.dry_goods {
            DryGoodsArg::Share => DryGoods::Share,
            DryGoodsArg::Separate => DryGoods::Separate,
        };
        let oversize = if self.split_oversize {
            OversizePolicy::Split
        } else {
            OversizePolicy::Reject
        };
        PlannerConfig::default()
            .with_dry_goods(dry_goods)
            .with_oversize(oversize)
    }
}
