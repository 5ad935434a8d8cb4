//! Support utilities shared across the crate.

pub mod files;
