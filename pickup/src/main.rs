//! Request elevated behavior control, wait to be picked up, pulse the wheels
//!
//! Usage: `pickup-wait [SERIAL]` or `pickup-wait --serial SERIAL`
//!
//! The serial falls back to `ANKI_ROBOT_SERIAL`. The bundled simulated robot
//! reports a pickup on the probe given by `PICKUP_SIM_PICKUP_AFTER` (never
//! when unset).

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use pickup::{program, CancelToken, Outcome, PickupProgram, ProgramConfig};
use pickup_robot::SimulatedConnector;

const ENV_SIM_PICKUP_AFTER: &str = "PICKUP_SIM_PICKUP_AFTER";

/// Wait for the robot to be picked up, then pulse its wheels
#[derive(Debug, Parser)]
#[command(name = "pickup-wait", version)]
struct Args {
    /// Robot serial (defaults to ANKI_ROBOT_SERIAL)
    #[arg(value_name = "SERIAL")]
    serial: Option<String>,

    /// Robot serial
    #[arg(short = 's', long = "serial", value_name = "SERIAL", conflicts_with = "serial")]
    serial_flag: Option<String>,
}

impl Args {
    fn serial(self) -> Option<String> {
        self.serial.or(self.serial_flag)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { program::ERROR_EXIT_CODE } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (config, connector) = match setup(args) {
        Ok(setup) => setup,
        Err(err) => {
            eprintln!("{:#}", err);
            return ExitCode::from(program::ERROR_EXIT_CODE);
        }
    };

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => cancel.cancel(),
                Err(err) => warn!("Failed to listen for Ctrl+C: {}", err),
            }
        });
    }

    let mut pickup = PickupProgram::new(config);
    let result = pickup.run(&connector, &cancel).await;

    let code = program::exit_code(&result);

    match result {
        Ok(Outcome::NotPickedUp) => println!("{}", Outcome::NotPickedUp),
        Ok(_) => {}
        Err(err) => {
            let err = anyhow::Error::new(err);
            error!("Run failed: {:#}", err);
        }
    }

    ExitCode::from(code)
}

fn setup(args: Args) -> anyhow::Result<(ProgramConfig, SimulatedConnector)> {
    let mut config = ProgramConfig::from_env().context("reading configuration from environment")?;

    if let Some(serial) = args.serial() {
        config = config.with_serial(serial);
    }

    let mut connector = SimulatedConnector::new();
    if let Ok(raw) = std::env::var(ENV_SIM_PICKUP_AFTER) {
        let probe: u32 = raw
            .trim()
            .parse()
            .with_context(|| format!("{}={:?} is not a probe count", ENV_SIM_PICKUP_AFTER, raw))?;
        connector = connector.with_pickup_after(probe);
    }

    Ok((config, connector))
}
