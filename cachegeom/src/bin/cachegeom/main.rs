//! Cache & paging geometry calculator (`cachegeom`)

// Modules
mod args;
mod report;

// Imports
use {
	self::args::Args,
	anyhow::Context,
	cachegeom::{Metrics, RawConfig, ReplacementPolicy},
	cachegeom_util::logger,
	clap::Parser,
	std::{fs, process::ExitCode},
};

fn main() -> Result<ExitCode, anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Validate the configuration
	let raw_config = RawConfig {
		cache_size_kb:      args.cache_size_kb,
		block_size_bytes:   args.block_size_bytes,
		associativity:      args.associativity,
		policy:             match args.policy {
			args::Policy::RoundRobin => ReplacementPolicy::RoundRobin,
			args::Policy::Random => ReplacementPolicy::Random,
		},
		physical_memory_mb: args.physical_memory_mb,
		os_memory_percent:  args.os_memory_percent,
		time_slice:         args.time_slice,
		traces:             args.trace_files,
	};
	let config = match raw_config.validate() {
		Ok(config) => config,
		Err(err) => {
			eprintln!("Error: {err}");
			eprintln!("Run with `--help` for usage");
			return Ok(ExitCode::FAILURE);
		},
	};
	tracing::debug!(target: "cachegeom::validate", ?config, "Validated configuration");

	// Derive the metrics
	let metrics = Metrics::derive(&config);
	tracing::debug!(target: "cachegeom::derive", ?metrics, "Derived metrics");

	// And report them
	report::print(&config, &metrics);

	if let Some(output_path) = &args.output_file {
		let output_file = fs::File::create(output_path).context("Unable to create output file")?;
		serde_json::to_writer_pretty(output_file, &report::Output {
			config:  &config,
			metrics: &metrics,
		})
		.context("Unable to write to output file")?;
	}

	Ok(ExitCode::SUCCESS)
}
