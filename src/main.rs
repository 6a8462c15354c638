/*!
 * Round-Robin Scheduler Simulator - Main Entry Point
 *
 * Loads the configuration, runs the simulation to completion and prints the
 * results report on stdout.
 */

use rr_scheduler_sim::{init_tracing, Lockstep, ReportFormat, RunMode, SimConfig, Simulation};
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();

    let config = SimConfig::load()?;
    info!(
        processes = config.processes,
        quantum = config.quantum,
        mode = ?config.mode,
        seed = ?config.seed,
        "Configuration loaded"
    );

    let report = match config.mode {
        RunMode::Realtime => Simulation::new(config.clone()).run().await?,
        RunMode::Lockstep => Lockstep::from_config(&config)?.run()?,
    };

    match config.report_format {
        ReportFormat::Text => println!("{}", report),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
