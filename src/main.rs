//! opconsole - demo host process embedding the console.

mod cli;

use std::time::Instant;

use cli::Cli;
use opconsole::config::Config;
use opconsole::{logging, Console, ConsoleOutput, Result};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init_stderr_logging();

    match run().await {
        Ok(exit_on_stop) => {
            if exit_on_stop {
                std::process::exit(0);
            }
        }
        Err(e) => {
            error!("{}: {}", e.category(), e);
            std::process::exit(1);
        }
    }
}

/// Runs the console; returns whether the process should exit once it stops.
async fn run() -> Result<bool> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut settings = Config::load_from_file(&config_path)?.console;
    cli.apply(&mut settings);

    let output = ConsoleOutput::stdout();
    let console = Console::builder()
        .settings(&settings)
        .output(output.clone())
        .build();
    register_demo_commands(&console, &output);

    let handle = console.start()?;
    handle.wait().await?;

    if !settings.exit_on_stop {
        info!("Console stopped; waiting for Ctrl+C");
        tokio::signal::ctrl_c().await?;
    }

    Ok(settings.exit_on_stop)
}

/// Commands an embedding application would typically provide.
fn register_demo_commands(console: &Console, output: &ConsoleOutput) {
    let echo_output = output.clone();
    console.register("echo", move |args| {
        echo_output.println(&args.join(" "));
        Ok(())
    });

    let started = Instant::now();
    let uptime_output = output.clone();
    console.register("uptime", move |_| {
        uptime_output.println(&format!("{}s", started.elapsed().as_secs()));
        Ok(())
    });
}
