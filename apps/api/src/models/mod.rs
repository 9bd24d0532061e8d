pub mod market;
pub mod records;
