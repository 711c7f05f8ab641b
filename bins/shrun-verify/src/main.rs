use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use shrun_process::{ShellConfig, ShellRunner};

mod verify;

/// Shell-status harness: verifies ShellRunner against the platform's system(3)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Commands to verify; with none given, runs the built-in scenarios
    commands: Vec<String>,

    /// Shell executable used by the runner
    #[arg(long, value_name = "PATH")]
    shell: Option<std::path::PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logging(args.debug)?;

    if let Err(e) = shrun_resource_limits::suppress_core_dumps() {
        error!("Failed to disable core dumps: {}", e);
    }

    let mut config = ShellConfig::default();
    if let Some(shell) = args.shell {
        config.shell_path = shell;
    }
    let runner = ShellRunner::with_config(config);

    let mismatches = if args.commands.is_empty() {
        verify::run_builtin_scenarios(&runner)
    } else {
        args.commands
            .iter()
            .filter(|command| !verify::verify(&runner, Some(command.as_str())))
            .count()
    };

    if mismatches > 0 {
        error!("{} scenario(s) diverged from the reference call", mismatches);
    } else {
        info!("All scenarios matched the reference call");
    }

    Ok(())
}

fn initialize_logging(debug: bool) -> Result<()> {
    let level = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
