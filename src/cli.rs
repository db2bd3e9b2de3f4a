//! Shared setup for the command-line binaries.

use std::io::{self, IsTerminal};
use tracing::Subscriber;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Local wall-clock time at the start of every status line.
const STATUS_TIME_FORMAT: &str = "%H:%M:%S";

/// Install the stdout status-line logger.
///
/// Lines look like `10:42:07  INFO PDF loaded: /docs/scan.pdf`. `RUST_LOG`
/// overrides the level chosen by the flags. Colours are only emitted when
/// stdout is a terminal.
pub fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    status_subscriber(filter, io::stdout().is_terminal(), io::stdout).init();
}

fn status_subscriber<W>(
    filter: EnvFilter,
    ansi: bool,
    writer: W,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new(STATUS_TIME_FORMAT.to_string()))
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .finish()
}
