mod adapter;
mod cell;
mod compare;
mod config;
mod ddl;
mod error;
mod ident;
mod stub;
mod table;
mod types;
mod value;

pub use adapter::WarehouseAdapter;
pub use cell::{NULL_SENTINEL, decode_cell, parse_datetime, parse_literal};
pub use compare::assert_table_eq;
pub use config::{AssertOptions, ConnectionConfig};
pub use ddl::{create_table_sql, insert_sql, sql_literal};
pub use error::{
    AssertionError, DecodeError, Error, ExecutionError, Result, ScenarioError, TableError,
};
pub use ident::{QualifiedTableName, quote_ident};
pub use stub::stub_sql_functions;
pub use table::{ColumnSpec, Table, parse_table};
pub use types::{ColumnType, ValueKind, lookup_type, resolve_type};
pub use value::Value;
