// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line front end: validate one job, or generate a covering job list.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use job_coverage::config::RunConfig;
use job_coverage::filter::{typecheck_row, FilterChain};
use job_coverage::generator::generate_with_config;
use job_coverage::logging;
use job_coverage::model::{Parameter, ParameterValue, ParameterValueTuple};
use job_coverage::oracle::get_expected_parameter_value_pairs;
use job_coverage::verify::verify;
use job_coverage::version::Version;
use job_coverage::versions::{get_parameter_value_matrix, is_supported_version};
use job_coverage::CoverageError;

/// Pairwise build-matrix generation and validation
#[derive(Parser)]
#[command(name = "job-coverage")]
#[command(version)]
struct Cli {
    /// Log debug events (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one combination against every filter stage
    Validate(ValidateArgs),
    /// Generate a pairwise covering combination list
    Generate(GenerateArgs),
}

fn parse_compiler(input: &str) -> Result<ParameterValue, CoverageError> {
    input.parse()
}

fn invalid(input: &str) -> CoverageError {
    CoverageError::InvalidVersion {
        input: input.to_string(),
    }
}

/// ON or OFF, nothing else.
fn parse_toggle(input: &str) -> Result<Version, CoverageError> {
    let version = Version::parse_setting(input)?;
    if version.is_off() || version == Version::on() {
        Ok(version)
    } else {
        Err(invalid(input))
    }
}

/// A CUDA SDK version or OFF.
fn parse_sdk(input: &str) -> Result<Version, CoverageError> {
    if input.trim().eq_ignore_ascii_case("on") {
        return Err(invalid(input));
    }
    Version::parse_setting(input)
}

fn parse_version(input: &str) -> Result<Version, CoverageError> {
    Version::parse(input)
}

#[derive(Args)]
struct ValidateArgs {
    /// Host compiler as NAME@VERSION, e.g. gcc@12
    #[arg(long, value_name = "NAME@VERSION", value_parser = parse_compiler)]
    host_compiler: Option<ParameterValue>,

    /// Device compiler as NAME@VERSION, e.g. nvcc@12.0
    #[arg(long, value_name = "NAME@VERSION", value_parser = parse_compiler)]
    device_compiler: Option<ParameterValue>,

    /// ALPAKA_ACC_CPU_B_SEQ_T_SEQ_ENABLE
    #[arg(long, value_name = "ON|OFF", value_parser = parse_toggle)]
    cpu_serial: Option<Version>,

    /// ALPAKA_ACC_CPU_B_SEQ_T_THREADS_ENABLE
    #[arg(long, value_name = "ON|OFF", value_parser = parse_toggle)]
    cpu_threads: Option<Version>,

    /// ALPAKA_ACC_CPU_B_TBB_T_SEQ_ENABLE
    #[arg(long, value_name = "ON|OFF", value_parser = parse_toggle)]
    cpu_tbb: Option<Version>,

    /// ALPAKA_ACC_CPU_B_OMP2_T_SEQ_ENABLE
    #[arg(long, value_name = "ON|OFF", value_parser = parse_toggle)]
    cpu_omp2_blocks: Option<Version>,

    /// ALPAKA_ACC_CPU_B_SEQ_T_OMP2_ENABLE
    #[arg(long, value_name = "ON|OFF", value_parser = parse_toggle)]
    cpu_omp2_threads: Option<Version>,

    /// ALPAKA_ACC_GPU_CUDA_ENABLE: a CUDA SDK version or OFF
    #[arg(long, value_name = "VERSION|OFF", value_parser = parse_sdk)]
    cuda: Option<Version>,

    /// ALPAKA_ACC_GPU_HIP_ENABLE
    #[arg(long, value_name = "ON|OFF", value_parser = parse_toggle)]
    hip: Option<Version>,

    /// ALPAKA_ACC_SYCL_ENABLE
    #[arg(long, value_name = "ON|OFF", value_parser = parse_toggle)]
    sycl: Option<Version>,

    #[arg(long, value_parser = parse_version)]
    ubuntu: Option<Version>,

    #[arg(long, value_parser = parse_version)]
    cmake: Option<Version>,

    #[arg(long, value_parser = parse_version)]
    boost: Option<Version>,

    /// C++ standard, e.g. 20
    #[arg(long, value_parser = parse_version)]
    cxx: Option<Version>,
}

impl ValidateArgs {
    /// The row in matrix parameter order.
    fn row(&self) -> ParameterValueTuple {
        let mut row = ParameterValueTuple::new();
        for (parameter, value) in [
            (Parameter::HostCompiler, &self.host_compiler),
            (Parameter::DeviceCompiler, &self.device_compiler),
        ] {
            if let Some(value) = value {
                row.insert(parameter, value.clone());
            }
        }
        for (parameter, version) in [
            (Parameter::CpuSerial, &self.cpu_serial),
            (Parameter::CpuThreads, &self.cpu_threads),
            (Parameter::CpuTbb, &self.cpu_tbb),
            (Parameter::CpuOmp2Blocks, &self.cpu_omp2_blocks),
            (Parameter::CpuOmp2Threads, &self.cpu_omp2_threads),
            (Parameter::GpuCuda, &self.cuda),
            (Parameter::GpuHip, &self.hip),
            (Parameter::Sycl, &self.sycl),
            (Parameter::Ubuntu, &self.ubuntu),
            (Parameter::Cmake, &self.cmake),
            (Parameter::Boost, &self.boost),
            (Parameter::CxxStandard, &self.cxx),
        ] {
            if let Some(version) = version {
                row.insert(parameter, ParameterValue::of(parameter, version.clone()));
            }
        }
        row
    }
}

#[derive(Args)]
struct GenerateArgs {
    /// Run configuration (JSON)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the combination list as JSON
    #[arg(long)]
    json: bool,

    /// Check the list against the expected pairs
    #[arg(long)]
    verify: bool,

    /// With --verify, also fail on pairs that were not expected
    #[arg(long, requires = "verify")]
    strict: bool,
}

fn validate(args: &ValidateArgs) -> Result<ExitCode> {
    let row = args.row();
    typecheck_row(&row).context("malformed combination")?;

    for (parameter, value) in row.iter() {
        let name = value.name.as_str();
        match is_supported_version(name, &value.version) {
            Ok(true) => {}
            Ok(false) => warn!(%parameter, %value, "version is not in the known version list"),
            Err(err) => warn!(%parameter, %value, error = %err, "cannot check version"),
        }
    }

    let chain = FilterChain::new();
    let mut passed = true;
    for outcome in chain.evaluate(&row) {
        match &outcome.reason {
            None => println!("{}: pass", outcome.stage),
            Some(reason) => println!("{}: fail: {reason}", outcome.stage),
        }
        passed &= outcome.passed;
    }
    println!("{}", if passed { "valid" } else { "invalid" });
    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn generate(args: &GenerateArgs) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => RunConfig::default(),
    };
    let mut matrix = get_parameter_value_matrix();
    config
        .apply_extra_versions(&mut matrix)
        .context("applying extra versions")?;

    let generation = generate_with_config(&matrix, None, &config.generator);
    if args.json {
        let json = serde_json::to_string_pretty(&generation.combinations)
            .context("serializing combinations")?;
        println!("{json}");
    } else {
        print!("{}", config.format.combination_list(&generation.combinations));
    }
    info!(statistics = %generation.statistics, "search statistics");

    if !args.verify {
        return Ok(ExitCode::SUCCESS);
    }
    let expected =
        get_expected_parameter_value_pairs(&matrix).context("computing expected pairs")?;
    let report = verify(&generation.combinations, &expected.kept, args.strict);
    eprintln!("{report}");
    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match &cli.command {
        Commands::Validate(args) => validate(args),
        Commands::Generate(args) => generate(args),
    }
}
