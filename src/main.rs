use anyhow::Result;
use std::io;
use tracing::{info, warn};

use container_probe::config::ProbeConfig;
use container_probe::idle::ShutdownSignal;
use container_probe::logging;
use container_probe::probe::Probe;
use container_probe::report::Invocation;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let invocation = Invocation::capture();
    let probe = Probe::new(ProbeConfig::default());

    // Listeners go in before anything is printed so an early SIGTERM still
    // ends the wait instead of killing the process.
    let shutdown = ShutdownSignal::register().unwrap_or_else(|e| {
        warn!("Could not install signal handlers, idling on timer only: {}", e);
        ShutdownSignal::disabled()
    });

    let outcome = probe
        .run(&mut io::stdout(), &mut io::stderr(), &invocation, shutdown.recv())
        .await?;
    info!("Probe finished: {:?}", outcome);

    Ok(())
}
