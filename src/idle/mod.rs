use std::fmt;
use std::future::{self, Future};
use std::io;
use std::time::Duration;
use tracing::debug;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Interrupt,
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Interrupt => write!(f, "interrupt"),
            Signal::Terminate => write!(f, "terminated"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    TimedOut,
    Interrupted(Signal),
}

// Listeners are live from construction, so a signal that lands before
// `recv` is polled is not lost.
pub struct ShutdownSignal {
    #[cfg(unix)]
    streams: Option<(tokio::signal::unix::Signal, tokio::signal::unix::Signal)>,
    #[cfg(not(unix))]
    enabled: bool,
}

impl ShutdownSignal {
    #[cfg(unix)]
    pub fn register() -> io::Result<Self> {
        let interrupt = signal(SignalKind::interrupt())?;
        let terminate = signal(SignalKind::terminate())?;
        debug!("Listening for SIGINT and SIGTERM");
        Ok(Self {
            streams: Some((interrupt, terminate)),
        })
    }

    #[cfg(not(unix))]
    pub fn register() -> io::Result<Self> {
        Ok(Self { enabled: true })
    }

    pub fn disabled() -> Self {
        Self {
            #[cfg(unix)]
            streams: None,
            #[cfg(not(unix))]
            enabled: false,
        }
    }

    #[cfg(unix)]
    pub async fn recv(self) -> Signal {
        let Some((mut interrupt, mut terminate)) = self.streams else {
            return future::pending().await;
        };

        tokio::select! {
            Some(()) = interrupt.recv() => Signal::Interrupt,
            Some(()) = terminate.recv() => Signal::Terminate,
            else => future::pending().await,
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(self) -> Signal {
        if self.enabled && tokio::signal::ctrl_c().await.is_ok() {
            return Signal::Interrupt;
        }
        future::pending().await
    }
}

// The timer is dropped on return. If both are ready, the signal wins.
pub async fn wait_for<F>(duration: Duration, shutdown: F) -> WaitOutcome
where
    F: Future<Output = Signal>,
{
    let timer = tokio::time::sleep(duration);

    tokio::select! {
        biased;
        signal = shutdown => WaitOutcome::Interrupted(signal),
        () = timer => WaitOutcome::TimedOut,
    }
}

pub fn describe(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (n, unit) = if secs >= 60 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else if secs > 0 && duration.subsec_nanos() == 0 {
        (secs, "second")
    } else {
        return format!("{} ms", duration.as_millis());
    };

    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}
