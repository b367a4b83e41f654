use std::io::Write;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use serde::Serialize;

use ddrlab_model::core_model::{CorePowerModel, PowerResult};
use ddrlab_model::dimm::{DimmConfig, DimmPowerModel, DimmPowerResult};
use ddrlab_model::document::{parse_memspec, parse_workload};
use ddrlab_model::report::{core_report, dimm_report};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Computes DDR5 core and DIMM power from memspec and workload documents
struct Args {
    /// Path to JSON file with device specification
    #[arg(short, long)]
    memspec: PathBuf,

    /// Path to JSON file with workload profile
    #[arg(short, long)]
    workload: PathBuf,

    /// Module capacity in GB used for chip count inference
    #[arg(long)]
    capacity: Option<f64>,

    /// Model a registered DIMM (adds RCD power)
    #[arg(long)]
    registered: bool,

    /// Path to produced JSON file with power results
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct Results {
    core: PowerResult,
    dimm: DimmPowerResult,
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let memspec_json = std::fs::read_to_string(&args.memspec)?;
    let workload_json = std::fs::read_to_string(&args.workload)?;

    let spec = parse_memspec(&memspec_json).unwrap_or_else(|e| {
        eprintln!("Invalid memspec document: {}", e);
        exit(1);
    });
    let workload = parse_workload(&workload_json).unwrap_or_else(|e| {
        eprintln!("Invalid workload document: {}", e);
        exit(1);
    });

    let core = CorePowerModel::new().compute(&spec, &workload).unwrap_or_else(|e| {
        eprintln!("Power model error: {}", e);
        exit(1);
    });
    let dimm_config = DimmConfig {
        registered: args.registered,
        module_capacity_gb: args.capacity,
        ..DimmConfig::default()
    };
    let dimm = DimmPowerModel::new().compute(&core, &spec, &dimm_config);

    print!("{}", core_report(&spec, &core));
    println!();
    print!("{}", dimm_report(&spec, &dimm));

    if let Some(output) = args.output {
        let results = Results { core, dimm };
        std::fs::File::create(output)?.write_all(serde_json::to_string_pretty(&results).unwrap().as_bytes())?;
    }
    Ok(())
}
