pub mod validation;

pub use validation::{check_required_fields, MissingField};
