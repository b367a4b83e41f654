//! Analytical power models for DDR5 memory devices and modules.
//!
//! The library estimates steady-state average power from JEDEC-style
//! datasheet parameters (IDD/IPP currents, voltages, timings) and a
//! workload activity profile. It provides:
//!
//! - [`core_model::CorePowerModel`]: per-component core die power breakdown,
//! - [`dimm::DimmPowerModel`]: module-level aggregation (chip count,
//!   interface and regulation overhead, optional RCD),
//! - [`presets::PresetCatalog`]: a read-only catalog of device presets,
//! - [`document`]: parsing and validation of externally supplied
//!   device specification and workload documents.
//!
//! The models are duty-cycle approximations, not cycle-accurate
//! simulations: command scheduling, bank conflicts and thermal effects
//! are out of scope.

pub mod core_model;
pub mod dimm;
pub mod document;
pub mod error;
pub mod presets;
pub mod report;
pub mod spec;
pub mod workload;

#[cfg(test)]
mod tests;
