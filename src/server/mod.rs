//! TCP listener and per-connection task fan-out.

pub mod listener;
