//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for the asset origin and mail delivery.

pub mod assets;
pub mod mail;
