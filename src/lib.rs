//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`client-core`, `service-shims`). Host applications can
//! depend on `msc-workspace` and enable the documented features without
//! needing to wire each crate individually: `client` pulls in the safe client
//! over the native media service, `shims` additionally pulls in the hermetic
//! in-memory service implementation for tests and demos.

#[cfg(feature = "client")]
pub use client_core as client;

#[cfg(feature = "shims")]
pub use service_shims as shims;
