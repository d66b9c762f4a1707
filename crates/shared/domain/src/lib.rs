//! # Domain Models
//!
//! Pure data shared by the kernel, the feature crates and the shell. Only `serde` and
//! `strum` are allowed here: no I/O, no async, no logic beyond defaults and accessors.

pub mod config;
pub mod dashboard;
pub mod settings;
