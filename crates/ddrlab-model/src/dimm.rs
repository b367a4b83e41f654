//! Module-level power aggregation.

use serde::Serialize;

use crate::core_model::PowerResult;
use crate::spec::{ArchitectureSpec, DeviceSpec};

/// Module-level aggregation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DimmConfig {
    /// Interface power as a fraction of module core power at 50% activity.
    pub interface_fraction: f64,
    /// Voltage regulation loss as a fraction of module core power.
    pub overhead_fraction: f64,
    /// Register clock driver power in W, applied to registered modules.
    pub rcd_power_w: f64,
    /// Whether the module is registered (RDIMM).
    pub registered: bool,
    /// Total module capacity in GB used for chip count inference.
    /// When absent the chip count is derived from die density and rank count.
    pub module_capacity_gb: Option<f64>,
}

impl Default for DimmConfig {
    fn default() -> Self {
        Self {
            interface_fraction: 0.12,
            overhead_fraction: 0.04,
            rcd_power_w: 0.075,
            registered: false,
            module_capacity_gb: None,
        }
    }
}

/// Module-level power breakdown in W.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimmPowerResult {
    /// Core power breakdown of a single chip.
    pub chip_power: PowerResult,
    /// Number of DRAM chips on the module.
    pub chip_count: u32,
    /// Core power of all chips.
    pub core_w: f64,
    /// I/O interface power.
    pub interface_w: f64,
    /// Voltage regulation overhead.
    pub overhead_w: f64,
    /// Register clock driver power, present only for registered modules.
    pub rcd_w: Option<f64>,
    /// Module total, `core + interface + overhead (+ rcd)`.
    pub total_w: f64,
}

/// Aggregates per-chip core power to module level.
#[derive(Debug, Clone, Default)]
pub struct DimmPowerModel;

impl DimmPowerModel {
    /// Creates the DIMM power model.
    pub fn new() -> Self {
        Self {}
    }

    /// Infers the DRAM chip count from the module density.
    ///
    /// DDR5 modules are populated in discrete tiers, so this is a lookup
    /// table over density breakpoints rather than a continuous formula:
    /// up to 128 Gbit one 8-chip rank suffices, up to 256 Gbit x8 devices
    /// are doubled to 16 chips, beyond that one chip per 16 Gbit.
    pub fn chip_count(&self, arch: &ArchitectureSpec, module_capacity_gb: Option<f64>) -> u32 {
        let density_gbit = match module_capacity_gb {
            Some(capacity_gb) => capacity_gb * 8.,
            None => arch.chip_density_gbit() * arch.num_ranks as f64,
        };
        if density_gbit <= 128. {
            8
        } else if density_gbit <= 256. {
            if arch.width == 8 {
                16
            } else {
                8
            }
        } else {
            (density_gbit / 16.).ceil() as u32
        }
    }

    /// Returns the module power breakdown for the given per-chip result.
    pub fn compute(&self, chip_power: &PowerResult, spec: &DeviceSpec, config: &DimmConfig) -> DimmPowerResult {
        let chip_count = self.chip_count(&spec.architecture, config.module_capacity_gb);
        let core_w = chip_power.total_w * chip_count as f64;

        // Interface power scales with bus activity; an idle bus still burns
        // half of the nominal interface budget on clocking and termination.
        let activity = if chip_power.total_w > 0. {
            (chip_power.read_w + chip_power.write_w) / chip_power.total_w
        } else {
            0.5
        };
        let interface_w = core_w * config.interface_fraction * (0.5 + activity);

        let overhead_w = core_w * config.overhead_fraction;
        let rcd_w = if config.registered { Some(config.rcd_power_w) } else { None };

        let total_w = core_w + interface_w + overhead_w + rcd_w.unwrap_or(0.);

        DimmPowerResult {
            chip_power: chip_power.clone(),
            chip_count,
            core_w,
            interface_w,
            overhead_w,
            rcd_w,
            total_w,
        }
    }
}
