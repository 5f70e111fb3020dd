//! User-defined custom fields attached to CRM records.
//!
//! Raw JSON values are checked against their field definitions and mapped
//! to one typed variant per field type.

pub mod error;
pub mod value;

pub use error::FieldError;
pub use value::{FieldDefinition, FieldType, FieldValue, parse_fields};
