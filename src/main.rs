//! ALU Testbench CLI.
//!
//! The main executable for the testbench. It handles command-line argument
//! parsing, logger initialization, and runs one verification session against
//! the behavioral ALU model.
//!
//! # Exit Status
//!
//! * `0`: the run completed without finding a unique bug.
//! * `1`: the harness itself failed (configuration, runtime, coverage export).
//! * `2`: the run finished and at least one unique bug was found.

use clap::Parser;
use env_logger::Env;
use std::process;

extern crate alu_testbench;

use alu_testbench::common::HarnessResult;
use alu_testbench::config::Config;
use alu_testbench::sim::{self, Environment};
use alu_testbench::soc::{AluModel, Fault, SignalBus};
use alu_testbench::stats::RunReport;

/// Command-line arguments for the ALU testbench.
///
/// Every flag overrides the matching value of the configuration file, which
/// in turn overrides the built-in defaults.
#[derive(Parser, Debug)]
#[command(author, version, about = "4-bit ALU Verification Testbench")]
struct Args {
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(short = 'n', long)]
    iterations: Option<u64>,

    /// Logical run budget in ns.
    #[arg(short, long)]
    budget: Option<u64>,

    #[arg(long, value_name = "PATH")]
    coverage_out: Option<String>,

    #[arg(long, conflicts_with = "coverage_out")]
    no_coverage: bool,

    /// Injects a fault into the ALU model; repeatable.
    #[arg(long, value_name = "A,B,OP,OUT[,C]")]
    fault: Vec<Fault>,

    /// Logs every pipeline hand-off at info level.
    #[arg(short, long)]
    trace: bool,
}

/// Main entry point for the ALU testbench.
///
/// # Behavior
///
/// 1. **Configuration**: Loads the TOML file if given and applies CLI overrides.
/// 2. **Logging**: Initializes `env_logger` at the configured level unless
///    `RUST_LOG` is set.
/// 3. **Run**: Attaches the ALU model to a signal bus and runs the pipeline
///    for the configured budget.
/// 4. **Teardown**: Prints the run report and exits with the status above.
fn main() {
    let args = Args::parse();

    let code = match run(args) {
        Ok(report) if report.unique_bug_count() > 0 => 2,
        Ok(_) => 0,
        Err(e) => {
            eprintln!("\n[!] FATAL: {}", e);
            1
        }
    };
    process::exit(code);
}

fn run(args: Args) -> HarnessResult<RunReport> {
    let config = load_config(args)?;
    config.validate()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(config.general.log_level.as_str()))
        .format_timestamp(None)
        .init();

    let bus = SignalBus::new(AluModel::with_faults(config.dut.faults.clone()));
    print_config(&config, &bus);

    let env = Environment::new(config, bus)?;
    if let Some(seed) = env.seed() {
        println!("[*] Seed {}", seed);
    }

    let report = sim::run(env)?;
    report.print();
    if !report.completed() {
        println!(
            "\n[!] Budget expired after {}/{} transactions",
            report.counts.scored, report.iterations
        );
    }
    Ok(report)
}

fn load_config(args: Args) -> HarnessResult<Config> {
    let mut config = match args.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if args.seed.is_some() {
        config.general.seed = args.seed;
    }
    if let Some(iterations) = args.iterations {
        config.general.iterations = iterations;
    }
    if let Some(budget) = args.budget {
        config.general.run_budget = budget;
    }
    if args.trace {
        config.general.trace_transactions = true;
    }
    if args.no_coverage {
        config.coverage.export_path = None;
    } else if args.coverage_out.is_some() {
        config.coverage.export_path = args.coverage_out;
    }
    config.dut.faults.extend(args.fault);
    Ok(config)
}

fn print_config(config: &Config, bus: &SignalBus) {
    println!("Global Configuration");
    println!("--------------------");
    println!("General:");
    println!("  Device:             {}", bus.device_name());
    println!("  Iterations:         {}", config.general.iterations);
    println!("  Run Budget:         {} ns", config.general.run_budget);
    println!("  Trace Transactions: {}", config.general.trace_transactions);
    println!("  Log Level:          {}", config.general.log_level);
    println!("Timing:");
    println!("  Generator:          {} ns", config.timing.generator);
    println!("  Driver:             {} ns", config.timing.driver);
    println!("  Monitor:            {} ns", config.timing.monitor);
    println!("  Scoreboard:         {} ns", config.timing.scoreboard);
    println!("Pipeline:");
    println!("  Mailbox Capacity:   {}", config.pipeline.mailbox_capacity);
    println!("Coverage:");
    match config.coverage.export_path {
        Some(ref path) => println!("  Export:             {}", path),
        None => println!("  Export:             Disabled"),
    }
    println!("DUT Faults:");
    if config.dut.faults.is_empty() {
        println!("  (none)");
    }
    for fault in &config.dut.faults {
        println!("  {}", fault);
    }
    println!("--------------------");
}
