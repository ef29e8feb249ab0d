//! Logger

// Imports
use {
	std::{fs, io, path::Path, sync::Mutex},
	tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter},
};

/// Initializes the global logger.
///
/// Logs to stderr, filtered by `RUST_LOG` (defaulting to `info`).
/// If `log_file` is given, additionally logs to it, filtered by
/// `RUST_LOG_FILE`.
///
/// Afterwards, replays all messages buffered through [`pre_init`].
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let console_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr).with_filter(
		EnvFilter::builder()
			.with_default_directive(LevelFilter::INFO.into())
			.from_env_lossy(),
	);

	let file_layer = log_file.and_then(|path| {
		let file = fs::File::options()
			.create(true)
			.write(true)
			.append(log_file_append)
			.truncate(!log_file_append)
			.open(path);
		let file = match file {
			Ok(file) => file,
			Err(err) => {
				eprintln!("Unable to open log file {path:?}: {err}");
				return None;
			},
		};

		let layer = tracing_subscriber::fmt::layer()
			.with_writer(Mutex::new(file))
			.with_ansi(false)
			.with_filter(
				EnvFilter::builder()
					.with_default_directive(LevelFilter::DEBUG.into())
					.with_env_var("RUST_LOG_FILE")
					.from_env_lossy(),
			);
		Some(layer)
	});

	tracing_subscriber::registry().with(console_layer).with(file_layer).init();

	pre_init::flush();
}

/// Pre-initialization logging.
///
/// Buffers messages emitted before [`init`] installs the global
/// subscriber, then replays them once it does.
pub mod pre_init {
	// Imports
	use std::sync::Mutex;

	/// Buffered messages
	static MESSAGES: Mutex<Vec<String>> = Mutex::new(Vec::new());

	/// Buffers `msg` as a debug message
	pub fn debug(msg: String) {
		if let Ok(mut messages) = MESSAGES.lock() {
			messages.push(msg);
		}
	}

	/// Replays all buffered messages
	pub(super) fn flush() {
		if let Ok(mut messages) = MESSAGES.lock() {
			for msg in messages.drain(..) {
				tracing::debug!(target: "cachegeom_util::pre_init", "{msg}");
			}
		}
	}
}
