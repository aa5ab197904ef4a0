//! Outbound adapters: concrete implementations of the outbound ports.

pub mod http;
pub mod shell;
