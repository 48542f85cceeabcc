mod adapter;
mod casts;
mod values;

pub use adapter::SqliteAdapter;

use snowbdd_core::{ConnectionConfig, Result, WarehouseAdapter};

pub fn connect(config: &ConnectionConfig) -> Result<Box<dyn WarehouseAdapter>> {
    Ok(Box::new(SqliteAdapter::connect(config)?))
}
