//! Text rendering of power results.

use std::fmt::Write;

use crate::core_model::PowerResult;
use crate::dimm::DimmPowerResult;
use crate::spec::DeviceSpec;

/// Formats a power value with an auto-selected unit scale.
///
/// Values of 1 W and above are rendered in W, smaller values in mW.
pub fn format_power(watts: f64) -> String {
    if watts >= 1. {
        format!("{:.3} W", watts)
    } else {
        format!("{:.1} mW", watts * 1000.)
    }
}

/// Renders the core die power breakdown for one device.
pub fn core_report(spec: &DeviceSpec, power: &PowerResult) -> String {
    let mut out = String::new();
    let arch = &spec.architecture;
    writeln!(out, "==== Core Power Report: {} ====", spec.id).unwrap();
    writeln!(out, "Device width: x{}", arch.width).unwrap();
    writeln!(out, "Banks: {}  |  Bank groups: {}", arch.num_banks, arch.num_bank_groups).unwrap();
    writeln!(out, "Rows: {}  |  Columns: {}", arch.num_rows, arch.num_columns).unwrap();
    writeln!(out, "Data rate: {:.0} MT/s", spec.data_rate_mts()).unwrap();
    writeln!(out).unwrap();
    for (name, value) in [
        ("P_PRE_STBY", power.pre_stby_w),
        ("P_ACT_STBY", power.act_stby_w),
        ("P_ACT_PRE", power.act_pre_w),
        ("P_RD", power.read_w),
        ("P_WR", power.write_w),
        ("P_REF", power.refresh_w),
        ("P_VDD", power.vdd_w),
        ("P_VPP", power.vpp_w),
        ("P_total", power.total_w),
    ] {
        writeln!(out, "{:12}: {}", name, format_power(value)).unwrap();
    }
    out
}

/// Renders the module-level power breakdown.
pub fn dimm_report(spec: &DeviceSpec, dimm: &DimmPowerResult) -> String {
    let mut out = String::new();
    writeln!(out, "==== DIMM Power Report: {} ====", spec.id).unwrap();
    writeln!(out, "Chips: {}  |  Ranks: {}", dimm.chip_count, spec.architecture.num_ranks).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "{:12}: {}", "P_core", format_power(dimm.core_w)).unwrap();
    writeln!(out, "{:12}: {}", "P_interface", format_power(dimm.interface_w)).unwrap();
    writeln!(out, "{:12}: {}", "P_overhead", format_power(dimm.overhead_w)).unwrap();
    if let Some(rcd_w) = dimm.rcd_w {
        writeln!(out, "{:12}: {}", "P_rcd", format_power(rcd_w)).unwrap();
    }
    writeln!(out, "{:12}: {}", "P_total", format_power(dimm.total_w)).unwrap();
    out
}
