pub mod bounds;
pub mod lots;
