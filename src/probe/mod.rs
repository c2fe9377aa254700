use anyhow::{Context, Result};
use std::future::Future;
use std::io::Write;
use tracing::{debug, info};

use crate::config::ProbeConfig;
use crate::dump::{self, DumpOutcome};
use crate::idle::{self, Signal, WaitOutcome};
use crate::report::{self, Invocation};

pub struct Probe {
    config: ProbeConfig,
}

impl Probe {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn report<W: Write>(&self, out: &mut W, invocation: &Invocation) -> Result<()> {
        debug!(
            "Reporting {} args and {} env vars",
            invocation.args.len(),
            invocation.env.len()
        );

        report::write_banner(out, &self.config.banner)?;
        report::write_args(out, &invocation.args)?;
        report::write_env(out, &invocation.env)?;
        Ok(())
    }

    pub fn dump_files<W: Write>(&self, out: &mut W) -> Result<Vec<DumpOutcome>> {
        let mut outcomes = Vec::with_capacity(self.config.files.len());
        for target in &self.config.files {
            outcomes.push(dump::dump_file(out, target, self.config.max_line_len)?);
        }
        Ok(outcomes)
    }

    pub async fn idle<W, E, F>(&self, out: &mut W, err: &mut E, shutdown: F) -> Result<WaitOutcome>
    where
        W: Write,
        E: Write,
        F: Future<Output = Signal>,
    {
        writeln!(
            out,
            "\nSleeping for {} to keep the container alive...",
            idle::describe(self.config.idle)
        )?;
        out.flush().context("Failed to flush report")?;

        let outcome = idle::wait_for(self.config.idle, shutdown).await;
        match outcome {
            WaitOutcome::TimedOut => info!("Idle period elapsed"),
            WaitOutcome::Interrupted(signal) => {
                info!("Idle period interrupted by {}", signal);
                writeln!(err, "Sleep interrupted: {}", signal)?;
                err.flush()?;
            }
        }

        writeln!(out, "Done.")?;
        out.flush()?;
        Ok(outcome)
    }

    pub async fn run<W, E, F>(
        &self,
        out: &mut W,
        err: &mut E,
        invocation: &Invocation,
        shutdown: F,
    ) -> Result<WaitOutcome>
    where
        W: Write,
        E: Write,
        F: Future<Output = Signal>,
    {
        self.report(out, invocation)?;
        self.dump_files(out)?;
        self.idle(out, err, shutdown).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileTarget;
    use std::future;
    use std::time::Duration;

    fn quick_config() -> ProbeConfig {
        ProbeConfig {
            banner: "probe".to_string(),
            files: vec![FileTarget::new("Missing", "/nonexistent/container-probe/file")],
            idle: Duration::from_secs(60),
            max_line_len: 1024,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_run_leaves_stderr_empty() {
        let probe = Probe::new(quick_config());
        let mut out = Vec::new();
        let mut err = Vec::new();

        let outcome = probe
            .run(&mut out, &mut err, &Invocation::default(), future::pending())
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::TimedOut);
        assert!(err.is_empty());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("probe\n\nCommand Line Arguments:\n\nEnvironment Variables:\n"));
        assert!(text.contains("\nMissing (/nonexistent/container-probe/file):\nFailed to read /nonexistent/container-probe/file: "));
        assert!(text.ends_with("\nSleeping for 1 minute to keep the container alive...\nDone.\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn interrupted_run_reports_on_stderr() {
        let probe = Probe::new(quick_config());
        let mut out = Vec::new();
        let mut err = Vec::new();

        let outcome = probe
            .idle(&mut out, &mut err, async { Signal::Interrupt })
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::Interrupted(Signal::Interrupt));
        assert_eq!(String::from_utf8(err).unwrap(), "Sleep interrupted: interrupt\n");
        assert!(String::from_utf8(out).unwrap().ends_with("Done.\n"));
    }
}
