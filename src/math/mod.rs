//! Mathematical utilities shared by both generation stages

/// Seeded deterministic random source
pub mod random;
