//! CLI interface for hook generation

use clap::{Arg, ArgAction, ArgMatches, Command};
use hooks_core::{CodegenConfig, Error, Result};
use std::path::PathBuf;

use crate::preflight::ensure_supported_toolchain;
use crate::runner::{run, RunSummary};

/// Build the CLI command for hook generation
pub fn build_generate_command() -> Command {
    Command::new("generate")
        .about("Generate React query/mutation hooks from contract ABIs")
        .arg(
            Arg::new("inputs")
                .help("ABI artifact files or directories")
                .required(true)
                .num_args(1..)
                .value_name("PATH"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file (.toml or .json)")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("input-dir")
                .long("input-dir")
                .help("Directory generated paths are made relative to")
                .value_name("PATH"),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .help("Output directory for generated code")
                .value_name("PATH"),
        )
        .arg(
            Arg::new("factory-module")
                .long("factory-module")
                .help("Module the contract factories are imported from")
                .value_name("MODULE"),
        )
        .arg(
            Arg::new("always-generate-overloads")
                .long("always-generate-overloads")
                .help("Also emit signature-keyed hooks for functions that are not overloaded")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-structs")
                .long("no-structs")
                .help("Render tuples as positional tuple types")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force-static-calls")
                .long("force-static-calls")
                .help("Generate query hooks for every function")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("factory-barrels")
                .long("factory-barrels")
                .help("Also emit barrel files for the factories directory")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Preview generated code without writing files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("skip-version-check")
                .long("skip-version-check")
                .help("Do not check the installed TypeScript version")
                .action(ArgAction::SetTrue),
        )
}

/// Build the CLI command for the toolchain check
pub fn build_check_toolchain_command() -> Command {
    Command::new("check-toolchain").about("Check that the installed TypeScript compiler is recent enough")
}

/// Resolve the run configuration: file, then environment, then flags
pub fn config_from_matches(matches: &ArgMatches) -> Result<CodegenConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => CodegenConfig::load_from_file(path)?,
        None => CodegenConfig::default(),
    };
    config.apply_environment_overrides()?;

    if let Some(input_dir) = matches.get_one::<String>("input-dir") {
        config.input_dir = PathBuf::from(input_dir);
    }
    if let Some(out_dir) = matches.get_one::<String>("out-dir") {
        config.out_dir = Some(PathBuf::from(out_dir));
    }
    if let Some(module) = matches.get_one::<String>("factory-module") {
        config.factory_module = module.clone();
    }
    if matches.get_flag("always-generate-overloads") {
        config.flags.always_generate_overloads = true;
    }
    if matches.get_flag("no-structs") {
        config.flags.use_structs = false;
    }
    if matches.get_flag("force-static-calls") {
        config.flags.force_static_calls = true;
    }
    if matches.get_flag("factory-barrels") {
        config.flags.factory_barrels = true;
    }
    if matches.get_flag("dry-run") {
        config.dry_run = true;
    }
    if matches.get_flag("skip-version-check") {
        config.skip_version_check = true;
    }

    config.validate()?;
    Ok(config)
}

/// Handle the generate command
pub async fn handle_generate_command(matches: &ArgMatches) -> Result<RunSummary> {
    let inputs: Vec<PathBuf> = matches
        .get_many::<String>("inputs")
        .ok_or_else(|| Error::config("At least one input path is required"))?
        .map(PathBuf::from)
        .collect();

    let config = config_from_matches(matches)?;

    if !config.skip_version_check {
        ensure_supported_toolchain().await?;
    }

    if config.dry_run {
        println!("🔍 Performing dry run - no files will be written");
    }

    let out_dir = config.out_dir();
    let summary = run(config, &inputs).await?;

    println!(
        "✅ Generated {} files from {} inputs ({} skipped)",
        summary.written, summary.processed, summary.skipped
    );
    println!("📁 Generated files are located in: {}", out_dir.display());

    Ok(summary)
}

/// Handle the check-toolchain command
pub async fn handle_check_toolchain_command(_matches: &ArgMatches) -> Result<()> {
    ensure_supported_toolchain().await?;
    println!("✅ TypeScript toolchain is supported");
    Ok(())
}
