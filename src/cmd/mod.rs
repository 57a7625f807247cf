pub mod analyze;
pub mod search;
pub mod validate;
