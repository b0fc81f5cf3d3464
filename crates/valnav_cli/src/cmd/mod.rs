use std::sync::Once;

use serde::Serialize;

use crate::error::Result;

/// Pattern match command.
pub mod matches;
/// Deterministic path traversal command.
pub mod traverse;

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose` when set.
pub(crate) fn init_tracing(verbose: u8) {
	TRACING_INIT.call_once(|| {
		use tracing_subscriber::{EnvFilter, fmt, prelude::*};

		let default_level = match verbose {
			0 => "warn",
			1 => "debug",
			_ => "trace",
		};
		let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
		tracing_subscriber::registry()
			.with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
			.with(filter)
			.init();
	});
}

/// Print a payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}
