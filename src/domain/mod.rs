//! Host-independent domain types.
//!
//! Nothing in this module performs I/O. The outcome model describes how a
//! provisioning run is reported; the retry policy describes how bounded
//! polling loops behave.

pub mod outcome;
pub mod retry;
