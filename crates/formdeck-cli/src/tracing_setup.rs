//! Tracing subscriber initialization for the formdeck binary.
//!
//! # Priority (highest to lowest)
//!
//! 1. `FORMDECK_LOG` env var
//! 2. `RUST_LOG` env var
//! 3. CLI flags (`-v` → debug, `-q` → error)
//! 4. Default level: `warn`

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Verbosity level derived from CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Verbose wins when both flags are set.
    pub(crate) const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub(crate) const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Install the global subscriber, logging to stderr.
///
/// Call once, before configuration is loaded.
pub(crate) fn init_subscriber(verbosity: Verbosity) {
    let filter = build_env_filter(verbosity);
    let use_ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(true);

    if verbosity == Verbosity::Verbose {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.with_timer(fmt::time::uptime()))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.without_time().compact())
            .init();
    }
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    // Unparseable FORMDECK_LOG falls through instead of failing.
    if let Some(filter) = std::env::var("FORMDECK_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(verbosity.default_level().as_str())
}
