/// typechain-hooks main entry point
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use hooks_core::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;

use hooks_codegen::cli::{
    build_check_toolchain_command, build_generate_command, handle_check_toolchain_command,
    handle_generate_command,
};

fn build_cli() -> Command {
    Command::new("typechain-hooks")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates React query/mutation hooks from smart-contract ABIs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(build_generate_command())
        .subcommand(build_check_toolchain_command())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let result = match matches.subcommand() {
        Some(("generate", sub_matches)) => handle_generate_command(sub_matches).await.map(|_| ()),
        Some(("check-toolchain", sub_matches)) => handle_check_toolchain_command(sub_matches).await,
        _ => anyhow::bail!("No command given, see --help"),
    };

    if let Err(err) = result {
        if matches!(err, Error::UnsupportedToolchain { .. }) {
            error!("{}, aborting before generation", err);
        } else {
            error!(error = %err, "command failed");
        }
        return Err(err.into());
    }

    Ok(())
}
