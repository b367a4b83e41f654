use approx::assert_abs_diff_eq;

use crate::core_model::CorePowerModel;
use crate::dimm::{DimmConfig, DimmPowerModel};
use crate::document::{parse_memspec, parse_workload};
use crate::error::ModelError;
use crate::presets::PresetCatalog;
use crate::report::format_power;
use crate::spec::{ArchitectureSpec, DeviceSpec, PowerSpec, TimingSpec};
use crate::workload::{Workload, WorkloadKind};

fn test_spec() -> DeviceSpec {
    DeviceSpec {
        id: "test-device".to_string(),
        architecture: ArchitectureSpec {
            width: 8,
            num_banks: 32,
            num_bank_groups: 8,
            num_ranks: 1,
            num_columns: 1024,
            num_rows: 65536,
            burst_length: 16,
            data_rate: 2,
        },
        power: PowerSpec {
            vdd: 1.0,
            vpp: 1.8,
            vddq: 1.1,
            idd0: 300.,
            idd2n: 100.,
            idd3n: 200.,
            idd4r: 400.,
            idd4w: 350.,
            idd5b: 450.,
            idd6n: 30.,
            idd2p: 50.,
            idd3p: 100.,
            ipp0: 10.,
            ipp2n: 2.,
            ipp3n: 3.,
            ipp4r: 3.,
            ipp4w: 3.,
            ipp5b: 30.,
            ipp6n: 2.,
            ipp2p: 1.5,
            ipp3p: 2.,
        },
        timing: TimingSpec {
            tck_ns: 0.5,
            ras: 60,
            rcd: 30,
            rp: 30,
            rfc1: 400,
            rfc2: 200,
            rfcsb: 160,
            refi: 8000,
        },
    }
}

fn test_workload() -> Workload {
    Workload {
        bank_pre_pct: 50.,
        cke_lo_pre_pct: 0.,
        cke_lo_act_pct: 0.,
        page_hit_pct: 60.,
        read_pct: 30.,
        write_pct: 20.,
        trrd_sch_ns: 90.,
    }
}

#[test]
fn core_breakdown_matches_hand_computation() {
    let power = CorePowerModel::new().compute(&test_spec(), &test_workload()).unwrap();

    // Standby levels: vdd * idd2n / idd3n without power-down blending.
    assert_abs_diff_eq!(power.pre_stby_w, 0.1, epsilon = 1e-9);
    assert_abs_diff_eq!(power.act_stby_w, 0.2, epsilon = 1e-9);

    // Refresh duty: (400 * 0.5) / (8000 * 0.5) = 0.05.
    assert_abs_diff_eq!(power.refresh_w, 0.0125 + 1.8 * 0.027 * 0.05, epsilon = 1e-9);

    assert_abs_diff_eq!(power.read_w, 0.06, epsilon = 1e-9);
    assert_abs_diff_eq!(power.write_w, 0.03, epsilon = 1e-9);

    // Row cycle 45 ns over 90 ns scheduled delay; tRAS window 30 ns.
    assert_abs_diff_eq!(power.act_pre_w, 0.2 * 0.5 + 1.8 * 0.008 / 3., epsilon = 1e-9);

    assert_abs_diff_eq!(power.vdd_w, 0.15 + 0.06 + 0.03 + 0.0125 + 0.1, epsilon = 1e-9);
    assert_abs_diff_eq!(power.vpp_w, 1.8 * 0.027 * 0.05 + 1.8 * 0.008 / 3., epsilon = 1e-9);
}

#[test]
fn rail_totals_sum_to_grand_total() {
    let model = CorePowerModel::new();
    let power = model.compute(&test_spec(), &test_workload()).unwrap();
    assert_abs_diff_eq!(power.total_w, power.vdd_w + power.vpp_w, epsilon = 1e-4);

    for preset in PresetCatalog::default_catalog().presets() {
        for kind in [
            WorkloadKind::Idle,
            WorkloadKind::Balanced,
            WorkloadKind::ReadHeavy,
            WorkloadKind::WriteHeavy,
        ] {
            let power = model.compute(&preset.spec, &kind.profile()).unwrap();
            assert_abs_diff_eq!(power.total_w, power.vdd_w + power.vpp_w, epsilon = 1e-4);
            assert!(!power.has_negative(), "implausible preset {}", preset.name);
        }
    }
}

#[test]
fn cke_low_blending_uses_power_down_currents() {
    let mut workload = test_workload();
    workload.cke_lo_pre_pct = 100.;
    workload.cke_lo_act_pct = 100.;
    let power = CorePowerModel::new().compute(&test_spec(), &workload).unwrap();
    // Fully powered down: standby levels fall to the idd2p/idd3p currents.
    assert_abs_diff_eq!(power.pre_stby_w, 0.05, epsilon = 1e-9);
    assert_abs_diff_eq!(power.act_stby_w, 0.1, epsilon = 1e-9);
}

#[test]
fn act_pre_duty_saturates_at_one() {
    let model = CorePowerModel::new();
    let mut workload = test_workload();

    // 10 ns is shorter than both the 45 ns row cycle and the 30 ns tRAS,
    // so both duty cycles clamp to 1.
    workload.trrd_sch_ns = 10.;
    let saturated = model.compute(&test_spec(), &workload).unwrap();
    assert_abs_diff_eq!(saturated.act_pre_w, 0.2 + 1.8 * 0.008, epsilon = 1e-9);

    // Driving activations even faster changes nothing.
    workload.trrd_sch_ns = 5.;
    let faster = model.compute(&test_spec(), &workload).unwrap();
    assert_abs_diff_eq!(faster.act_pre_w, saturated.act_pre_w, epsilon = 1e-12);
}

#[test]
fn read_activity_increases_only_read_power() {
    let model = CorePowerModel::new();
    let base = model.compute(&test_spec(), &test_workload()).unwrap();

    let mut workload = test_workload();
    workload.read_pct = 40.;
    let bumped = model.compute(&test_spec(), &workload).unwrap();

    assert!(bumped.read_w > base.read_w);
    assert_eq!(bumped.write_w, base.write_w);
    assert_eq!(bumped.act_pre_w, base.act_pre_w);
    assert_eq!(bumped.refresh_w, base.refresh_w);
    assert_eq!(bumped.pre_stby_w, base.pre_stby_w);
    assert_eq!(bumped.act_stby_w, base.act_stby_w);
    assert_eq!(bumped.vpp_w, base.vpp_w);
}

#[test]
fn write_activity_increases_only_write_power() {
    let model = CorePowerModel::new();
    let base = model.compute(&test_spec(), &test_workload()).unwrap();

    let mut workload = test_workload();
    workload.write_pct = 35.;
    let bumped = model.compute(&test_spec(), &workload).unwrap();

    assert!(bumped.write_w > base.write_w);
    assert_eq!(bumped.read_w, base.read_w);
    assert_eq!(bumped.act_pre_w, base.act_pre_w);
    assert_eq!(bumped.refresh_w, base.refresh_w);
    assert_eq!(bumped.vpp_w, base.vpp_w);
}

#[test]
fn zero_refresh_interval_is_rejected() {
    let mut spec = test_spec();
    spec.timing.refi = 0;
    let result = CorePowerModel::new().compute(&spec, &test_workload());
    assert_eq!(
        result.unwrap_err(),
        ModelError::NonPositiveTiming {
            field: "REFI".to_string(),
            value: 0.,
        }
    );
}

#[test]
fn zero_row_delay_is_rejected() {
    let mut workload = test_workload();
    workload.trrd_sch_ns = 0.;
    let result = CorePowerModel::new().compute(&test_spec(), &workload);
    assert_eq!(
        result.unwrap_err(),
        ModelError::NonPositiveTiming {
            field: "tRRDsch".to_string(),
            value: 0.,
        }
    );
}

#[test]
fn negative_components_are_flagged_not_clamped() {
    let mut spec = test_spec();
    // Read burst current below active standby produces negative read power.
    spec.power.idd4r = 50.;
    let power = CorePowerModel::new().compute(&spec, &test_workload()).unwrap();
    assert!(power.read_w < 0.);
    assert!(power.has_negative());
}

#[test]
fn chip_count_follows_density_tiers() {
    let model = DimmPowerModel::new();
    let arch = ArchitectureSpec {
        width: 8,
        num_banks: 16,
        num_bank_groups: 8,
        num_ranks: 1,
        num_columns: 1024,
        num_rows: 65536,
        burst_length: 16,
        data_rate: 2,
    };

    // 16 GB module = 128 Gbit.
    assert_eq!(model.chip_count(&arch, Some(16.)), 8);
    // 32 GB module = 256 Gbit, x8 devices double up.
    assert_eq!(model.chip_count(&arch, Some(32.)), 16);
    // Same density on a x4 device stays at 8 chips.
    let x4 = ArchitectureSpec { width: 4, ..arch.clone() };
    assert_eq!(model.chip_count(&x4, Some(32.)), 8);
    // 64 GB module = 512 Gbit: one chip per 16 Gbit.
    assert_eq!(model.chip_count(&arch, Some(64.)), 32);

    // Without a module capacity the die density (8 Gbit) times rank count is used.
    assert_eq!(model.chip_count(&arch, None), 8);
}

#[test]
fn dimm_components_sum_to_total() {
    let chip_power = CorePowerModel::new().compute(&test_spec(), &test_workload()).unwrap();
    let model = DimmPowerModel::new();

    let config = DimmConfig {
        module_capacity_gb: Some(16.),
        ..DimmConfig::default()
    };
    let dimm = model.compute(&chip_power, &test_spec(), &config);
    assert_eq!(dimm.chip_count, 8);
    assert!(dimm.rcd_w.is_none());
    assert_abs_diff_eq!(
        dimm.total_w,
        dimm.core_w + dimm.interface_w + dimm.overhead_w,
        epsilon = 1e-3
    );
    assert!(dimm.total_w > chip_power.total_w);

    let registered = DimmConfig {
        registered: true,
        module_capacity_gb: Some(16.),
        ..DimmConfig::default()
    };
    let rdimm = model.compute(&chip_power, &test_spec(), &registered);
    assert_eq!(rdimm.rcd_w, Some(0.075));
    assert_abs_diff_eq!(rdimm.total_w, dimm.total_w + 0.075, epsilon = 1e-9);
}

#[test]
fn interface_power_tracks_bus_activity() {
    let model = DimmPowerModel::new();
    let config = DimmConfig::default();
    let spec = test_spec();

    let busy = CorePowerModel::new().compute(&spec, &test_workload()).unwrap();
    let idle = CorePowerModel::new().compute(&spec, &WorkloadKind::Idle.profile()).unwrap();

    let busy_dimm = model.compute(&busy, &spec, &config);
    let idle_dimm = model.compute(&idle, &spec, &config);
    assert!(busy_dimm.interface_w / busy_dimm.core_w > idle_dimm.interface_w / idle_dimm.core_w);
}

#[test]
fn power_formatting_switches_unit_at_one_watt() {
    assert_eq!(format_power(1.0), "1.000 W");
    assert_eq!(format_power(0.5), "500.0 mW");
    assert_eq!(format_power(2.3456), "2.346 W");
    assert_eq!(format_power(0.0751), "75.1 mW");
}

#[test]
fn default_catalog_is_valid() {
    let catalog = PresetCatalog::default_catalog();
    assert_eq!(catalog.len(), 4);
    assert!(catalog.get("micron-16gb-4800").is_some());
    assert!(catalog.get("unknown").is_none());
    for preset in catalog.presets() {
        preset.spec.validate().unwrap();
        assert!(preset.spec.data_rate_mts() >= 4800. - 1.);
    }
}

const MEMSPEC_JSON: &str = r#"{
    "memspec": {
        "memoryId": "MT60B2G8",
        "memoryType": "DDR5",
        "memarchitecturespec": {
            "width": 8, "nbrOfBanks": 32, "nbrOfBankGroups": 8, "nbrOfRanks": 1,
            "nbrOfColumns": 1024, "nbrOfRows": 65536, "burstLength": 16, "dataRate": 2
        },
        "mempowerspec": {
            "vdd": 1.1, "vpp": 1.8, "vddq": 1.1,
            "idd0": 0.135, "idd2n": 0.062, "idd3n": 0.088, "idd4r": 382.0,
            "idd4w": 350.0, "idd5b": 0.277, "idd6n": 0.030, "idd2p": 0.044, "idd3p": 0.064,
            "ipp0": 0.0055, "ipp2n": 0.0022, "ipp3n": 0.0028, "ipp4r": 0.0032,
            "ipp4w": 0.0032, "ipp5b": 0.027, "ipp6n": 0.0018, "ipp2p": 0.0015, "ipp3p": 0.0018
        },
        "memtimingspec": {
            "tCK": 4.1666e-10, "RAS": 76, "RCD": 38, "RP": 38,
            "RFC1": 708, "RFC2": 384, "RFCsb": 312, "REFI": 9360
        }
    }
}"#;

#[test]
fn memspec_document_normalizes_units() {
    let spec = parse_memspec(MEMSPEC_JSON).unwrap();
    assert_eq!(spec.id, "MT60B2G8");
    // Sub-1 values are treated as A and converted to mA.
    assert_abs_diff_eq!(spec.power.idd0, 135., epsilon = 1e-9);
    assert_abs_diff_eq!(spec.power.ipp5b, 27., epsilon = 1e-9);
    // Values already in mA pass through.
    assert_abs_diff_eq!(spec.power.idd4r, 382., epsilon = 1e-9);
    assert_abs_diff_eq!(spec.timing.tck_ns, 0.41666, epsilon = 1e-6);
}

#[test]
fn workload_document_reports_missing_field() {
    let workload = parse_workload(
        r#"{"BNK_PRE_percent": 30.0, "CKE_LO_PRE_percent": 5.0, "CKE_LO_ACT_percent": 0.0,
            "RDsch_percent": 25.0, "WRsch_percent": 25.0, "tRRDsch_ns": 60.0}"#,
    )
    .unwrap();
    assert_eq!(workload.page_hit_pct, 0.);

    let missing = parse_workload(
        r#"{"BNK_PRE_percent": 30.0, "CKE_LO_PRE_percent": 5.0, "CKE_LO_ACT_percent": 0.0,
            "RDsch_percent": 25.0, "tRRDsch_ns": 60.0}"#,
    );
    assert_eq!(missing.unwrap_err(), ModelError::MissingField("WRsch_percent".to_string()));
}

#[test]
fn out_of_bounds_voltage_is_rejected() {
    let mut spec = test_spec();
    spec.power.vpp = 2.5;
    assert!(matches!(spec.validate(), Err(ModelError::InvalidValue { field, .. }) if field == "vpp"));
}
