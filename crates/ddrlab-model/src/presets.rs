//! Read-only catalog of device presets.

use crate::spec::{ArchitectureSpec, DeviceSpec, PowerSpec, TimingSpec};

/// Named catalog entry wrapping one device specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Catalog key, e.g. "micron-16gb-4800".
    pub name: String,
    pub manufacturer: String,
    /// Module capacity in GB.
    pub capacity_gb: f64,
    /// Speed grade label, e.g. "DDR5-4800".
    pub speed: String,
    pub spec: DeviceSpec,
}

/// Read-only table of device presets.
///
/// The catalog is constructed explicitly and passed to the search
/// components, so alternate catalogs can be substituted in experiments
/// and tests.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Creates a catalog from the given presets.
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// Returns all presets in catalog order.
    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Returns the preset with the given name.
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Builds the catalog of typical DDR5 modules shipped with the library.
    ///
    /// Currents are representative datasheet values in mA; timings are the
    /// JEDEC cycle counts for each speed grade.
    pub fn default_catalog() -> Self {
        Self::new(vec![
            Preset {
                name: "micron-16gb-4800".to_string(),
                manufacturer: "Micron".to_string(),
                capacity_gb: 16.,
                speed: "DDR5-4800".to_string(),
                spec: DeviceSpec {
                    id: "MT60B2G8-4800".to_string(),
                    architecture: x8_die(65536),
                    power: PowerSpec {
                        idd0: 135.,
                        idd4r: 382.,
                        idd4w: 350.,
                        idd5b: 277.,
                        ..base_currents()
                    },
                    timing: timing_4800(),
                },
            },
            Preset {
                name: "micron-32gb-5600".to_string(),
                manufacturer: "Micron".to_string(),
                capacity_gb: 32.,
                speed: "DDR5-5600".to_string(),
                spec: DeviceSpec {
                    id: "MT60B2G8-5600".to_string(),
                    architecture: ArchitectureSpec {
                        num_ranks: 2,
                        ..x8_die(65536)
                    },
                    power: PowerSpec {
                        idd0: 142.,
                        idd3n: 94.,
                        idd4r: 420.,
                        idd4w: 388.,
                        idd5b: 289.,
                        ..base_currents()
                    },
                    timing: timing_5600(),
                },
            },
            Preset {
                name: "samsung-32gb-6400".to_string(),
                manufacturer: "Samsung".to_string(),
                capacity_gb: 32.,
                speed: "DDR5-6400".to_string(),
                spec: DeviceSpec {
                    id: "K4RAH086VB-6400".to_string(),
                    architecture: ArchitectureSpec {
                        num_ranks: 2,
                        ..x8_die(65536)
                    },
                    power: PowerSpec {
                        idd0: 150.,
                        idd2n: 66.,
                        idd3n: 98.,
                        idd4r: 455.,
                        idd4w: 415.,
                        idd5b: 301.,
                        ..base_currents()
                    },
                    timing: timing_6400(),
                },
            },
            Preset {
                name: "skhynix-64gb-5600".to_string(),
                manufacturer: "SK hynix".to_string(),
                capacity_gb: 64.,
                speed: "DDR5-5600".to_string(),
                spec: DeviceSpec {
                    id: "HMCG94AGBRA-5600".to_string(),
                    architecture: ArchitectureSpec {
                        num_ranks: 2,
                        ..x8_die(131072)
                    },
                    power: PowerSpec {
                        idd0: 148.,
                        idd3n: 96.,
                        idd4r: 428.,
                        idd4w: 396.,
                        idd5b: 320.,
                        ipp5b: 31.,
                        ..base_currents()
                    },
                    timing: TimingSpec {
                        // 32 Gbit dies refresh longer: tRFC1 = 410 ns.
                        rfc1: 1148,
                        ..timing_5600()
                    },
                },
            },
        ])
    }
}

fn x8_die(num_rows: u32) -> ArchitectureSpec {
    ArchitectureSpec {
        width: 8,
        num_banks: 32,
        num_bank_groups: 8,
        num_ranks: 1,
        num_columns: 1024,
        num_rows,
        burst_length: 16,
        data_rate: 2,
    }
}

fn base_currents() -> PowerSpec {
    PowerSpec {
        vdd: 1.1,
        vpp: 1.8,
        vddq: 1.1,
        idd0: 135.,
        idd2n: 62.,
        idd3n: 88.,
        idd4r: 382.,
        idd4w: 350.,
        idd5b: 277.,
        idd6n: 30.,
        idd2p: 44.,
        idd3p: 64.,
        ipp0: 5.5,
        ipp2n: 2.2,
        ipp3n: 2.8,
        ipp4r: 3.2,
        ipp4w: 3.2,
        ipp5b: 27.,
        ipp6n: 1.8,
        ipp2p: 1.5,
        ipp3p: 1.8,
    }
}

fn timing_4800() -> TimingSpec {
    TimingSpec {
        tck_ns: 1. / 2.4,
        ras: 76,
        rcd: 38,
        rp: 38,
        rfc1: 708,
        rfc2: 384,
        rfcsb: 312,
        refi: 9360,
    }
}

fn timing_5600() -> TimingSpec {
    TimingSpec {
        tck_ns: 1. / 2.8,
        ras: 90,
        rcd: 46,
        rp: 46,
        rfc1: 826,
        rfc2: 448,
        rfcsb: 364,
        refi: 10920,
    }
}

fn timing_6400() -> TimingSpec {
    TimingSpec {
        tck_ns: 1. / 3.2,
        ras: 102,
        rcd: 52,
        rp: 52,
        rfc1: 944,
        rfc2: 512,
        rfcsb: 416,
        refi: 12480,
    }
}
