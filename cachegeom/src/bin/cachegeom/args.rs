//! Arguments

// Imports
use std::path::PathBuf;

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Cache size, in KB (power of two in [8, 8192])
	#[clap(short = 's')]
	pub cache_size_kb: u64,

	/// Block size, in bytes (8, 16, 32 or 64)
	#[clap(short = 'b')]
	pub block_size_bytes: u64,

	/// Associativity, in ways per row (1, 2, 4, 8 or 16)
	#[clap(short = 'a')]
	pub associativity: u64,

	/// Replacement policy
	#[clap(short = 'r', value_enum, ignore_case = true)]
	pub policy: Policy,

	/// Physical memory, in MB (power of two in [128, 4096])
	#[clap(short = 'p')]
	pub physical_memory_mb: u64,

	/// Instructions per time slice, or -1 for all
	#[clap(short = 'n', default_value_t = -1, allow_negative_numbers = true)]
	pub time_slice: i64,

	/// Percentage of physical memory used by the OS
	#[clap(short = 'u', allow_negative_numbers = true)]
	pub os_memory_percent: f64,

	/// Trace file (may be given up to 3 times)
	#[clap(short = 'f', required = true)]
	pub trace_files: Vec<String>,

	/// Output file for the results, as json
	#[clap(long = "output")]
	pub output_file: Option<PathBuf>,
}

/// Replacement policy argument
#[derive(Clone, Copy, Debug)]
#[derive(clap::ValueEnum)]
pub enum Policy {
	/// Round robin
	#[clap(name = "rr")]
	RoundRobin,

	/// Random
	#[clap(name = "rnd")]
	Random,
}
