//! Transformation module.
//!
//! - Mapping: column projection and renaming
//! - Dates: creation timestamp normalization
//! - Rules: requestor and description normalization
//! - Pipeline: the steps in order

pub mod dates;
pub mod mapping;
pub mod pipeline;
pub mod rules;

pub use dates::{normalize_dates, parse_created};
pub use mapping::{project_and_rename, FieldMapping, FIELD_MAPPING};
pub use pipeline::*;
pub use rules::{coalesce_requestor, set_row_key, substitute_description_for_curation};
