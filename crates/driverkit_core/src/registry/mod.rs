//! Host extension-registry boundary.
//!
//! This module defines the read-only declaration records the manifest layer
//! consumes and the narrow provider capability it queries. Nothing here owns
//! host data; records are value snapshots of what the host declared.

pub mod element;
pub mod provider;
