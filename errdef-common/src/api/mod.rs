//! Machine-facing descriptions of the error wire format.

pub mod schema;

pub use schema::{
    ErrorCatalog, ErrorCodeEntry, export_schemas, generate_error_catalog,
    generate_error_value_schema,
};
