//! Backend side of the UI bridge: queued commands and the worker runtime.

pub mod commands;
pub mod runtime;
