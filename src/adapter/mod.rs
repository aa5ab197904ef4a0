//! Adapters on both sides of the port boundary.

pub mod inbound;
pub mod outbound;
