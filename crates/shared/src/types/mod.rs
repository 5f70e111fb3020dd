//! Common types used across the workspace.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::{AmountInput, format_amount, parse_amount};
pub use pagination::{PageMeta, PageRequest, PageResponse};
