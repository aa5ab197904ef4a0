//! Port definitions (hexagonal architecture boundary).

pub mod outbound;
