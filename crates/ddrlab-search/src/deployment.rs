//! Server memory configuration search.
//!
//! Enumerates preset x DIMM-count combinations, filters them against the
//! deployment requirements and ranks the feasible ones.

use log::debug;
use serde::Serialize;

use ddrlab_model::core_model::CorePowerModel;
use ddrlab_model::dimm::{DimmConfig, DimmPowerModel};
use ddrlab_model::presets::PresetCatalog;
use ddrlab_model::workload::WorkloadKind;

use crate::error::SearchError;

/// Deployment constraints for one server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerRequirements {
    /// Memory power budget per server in W.
    pub power_budget_w: f64,
    /// Minimum module data rate in MT/s.
    pub min_data_rate_mts: f64,
    /// Minimum total memory capacity in GB.
    pub min_capacity_gb: f64,
    /// Workload profile used for power estimation.
    pub workload: WorkloadKind,
    /// Number of DIMM slots available.
    pub max_dimm_slots: u32,
}

/// One feasible server memory configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfiguration {
    /// Catalog preset name.
    pub preset: String,
    pub dimm_count: u32,
    /// Power of a single module in W.
    pub dimm_power_w: f64,
    /// Power of all modules in W.
    pub server_power_w: f64,
    pub total_capacity_gb: f64,
    pub data_rate_mts: f64,
    /// Memory channels used, assuming up to two DIMMs per channel.
    pub channels: u32,
    pub dimms_per_channel: u32,
    pub power_ok: bool,
    pub performance_ok: bool,
    pub capacity_ok: bool,
    /// Ranking score, higher is better.
    pub score: f64,
}

/// Returns all feasible configurations sorted best-first.
///
/// A configuration is feasible iff it stays within the power budget while
/// meeting the data rate and capacity requirements. The score rewards power
/// headroom and performance surplus and mildly penalizes capacity overshoot,
/// so the cheapest sufficient configuration ranks first.
pub fn find_server_configurations(
    catalog: &PresetCatalog,
    requirements: &ServerRequirements,
    dimm_config: &DimmConfig,
) -> Result<Vec<ServerConfiguration>, SearchError> {
    let core_model = CorePowerModel::new();
    let dimm_model = DimmPowerModel::new();
    let workload = requirements.workload.profile();

    let mut feasible = Vec::new();
    for preset in catalog.presets() {
        let chip_power = core_model.compute(&preset.spec, &workload)?;
        if chip_power.has_negative() {
            debug!("preset {}: implausible power result, skipping", preset.name);
            continue;
        }
        let config = DimmConfig {
            module_capacity_gb: Some(preset.capacity_gb),
            ..dimm_config.clone()
        };
        let dimm = dimm_model.compute(&chip_power, &preset.spec, &config);
        let data_rate_mts = preset.spec.data_rate_mts();

        for dimm_count in 1..=requirements.max_dimm_slots {
            let server_power_w = dimm.total_w * dimm_count as f64;
            let total_capacity_gb = preset.capacity_gb * dimm_count as f64;

            let power_ok = server_power_w <= requirements.power_budget_w;
            let performance_ok = data_rate_mts >= requirements.min_data_rate_mts;
            let capacity_ok = total_capacity_gb >= requirements.min_capacity_gb;
            if !(power_ok && performance_ok && capacity_ok) {
                continue;
            }

            let channels = (dimm_count + 1) / 2;
            let dimms_per_channel = (dimm_count + channels - 1) / channels;

            feasible.push(ServerConfiguration {
                preset: preset.name.clone(),
                dimm_count,
                dimm_power_w: dimm.total_w,
                server_power_w,
                total_capacity_gb,
                data_rate_mts,
                channels,
                dimms_per_channel,
                power_ok,
                performance_ok,
                capacity_ok,
                score: score(requirements, server_power_w, data_rate_mts, total_capacity_gb),
            });
        }
    }

    if feasible.is_empty() {
        return Err(SearchError::NoFeasibleConfiguration {
            details: format!(
                "budget {} W, min rate {} MT/s, min capacity {} GB, up to {} slots",
                requirements.power_budget_w,
                requirements.min_data_rate_mts,
                requirements.min_capacity_gb,
                requirements.max_dimm_slots
            ),
        });
    }

    // Stable sort keeps the first-seen configuration on score ties.
    feasible.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(feasible)
}

fn score(requirements: &ServerRequirements, power_w: f64, data_rate_mts: f64, capacity_gb: f64) -> f64 {
    let headroom = if requirements.power_budget_w > 0. {
        (requirements.power_budget_w - power_w) / requirements.power_budget_w
    } else {
        0.
    };
    let perf_surplus = if requirements.min_data_rate_mts > 0. {
        (data_rate_mts - requirements.min_data_rate_mts) / requirements.min_data_rate_mts
    } else {
        0.
    };
    let capacity_overshoot = if requirements.min_capacity_gb > 0. {
        (capacity_gb - requirements.min_capacity_gb) / requirements.min_capacity_gb
    } else {
        0.
    };
    0.5 * headroom + 0.3 * perf_surplus - 0.05 * capacity_overshoot
}
