//! Configuration

// Imports
use std::fmt;

/// Raw configuration, as tokenized by the front-end.
///
/// Carries no guarantees; [`validate`](Self::validate) turns it
/// into a [`Config`] or rejects it.
#[derive(Clone, Debug)]
pub struct RawConfig {
	/// Cache size (in KB)
	pub cache_size_kb: u64,

	/// Block size (in bytes)
	pub block_size_bytes: u64,

	/// Associativity (ways per row)
	pub associativity: u64,

	/// Replacement policy
	pub policy: ReplacementPolicy,

	/// Physical memory (in MB)
	pub physical_memory_mb: u64,

	/// Percentage of physical memory reserved for the OS
	pub os_memory_percent: f64,

	/// Instructions per time slice (`-1` for unbounded)
	pub time_slice: i64,

	/// Trace identifiers
	pub traces: Vec<String>,
}

impl RawConfig {
	/// Validates this configuration.
	///
	/// Rules are checked in a fixed order and the first violated
	/// rule is the one reported, so the error a user sees is
	/// deterministic even when several fields are invalid at once.
	pub fn validate(self) -> Result<Config, ValidationError> {
		if !(Config::MIN_CACHE_KB..=Config::MAX_CACHE_KB).contains(&self.cache_size_kb) ||
			!self.cache_size_kb.is_power_of_two()
		{
			return Err(ValidationError::CacheSize { kb: self.cache_size_kb });
		}

		if !matches!(self.block_size_bytes, 8 | 16 | 32 | 64) {
			return Err(ValidationError::BlockSize {
				bytes: self.block_size_bytes,
			});
		}

		if !matches!(self.associativity, 1 | 2 | 4 | 8 | 16) {
			return Err(ValidationError::Associativity {
				ways: self.associativity,
			});
		}

		if !(Config::MIN_PHYS_MB..=Config::MAX_PHYS_MB).contains(&self.physical_memory_mb) ||
			!self.physical_memory_mb.is_power_of_two()
		{
			return Err(ValidationError::PhysicalMemory {
				mb: self.physical_memory_mb,
			});
		}

		if !(0.0..=100.0).contains(&self.os_memory_percent) {
			return Err(ValidationError::OsPercent {
				percent: self.os_memory_percent,
			});
		}

		if self.time_slice != -1 && self.time_slice < 1 {
			return Err(ValidationError::TimeSlice { value: self.time_slice });
		}

		if !(1..=Config::MAX_TRACES).contains(&self.traces.len()) {
			return Err(ValidationError::TraceCount {
				count: self.traces.len(),
			});
		}

		// Geometry cross-checks: the row count must be integral and a power
		// of two for the index bit width to be well-defined.
		let total_blocks = self.cache_size_kb * 1024 / self.block_size_bytes;
		if total_blocks % self.associativity != 0 {
			return Err(ValidationError::NonIntegerRows {
				blocks: total_blocks,
				ways:   self.associativity,
			});
		}
		let total_rows = total_blocks / self.associativity;
		if !total_rows.is_power_of_two() {
			return Err(ValidationError::RowsNotPowerOfTwo { rows: total_rows });
		}

		Ok(Config {
			cache_size_kb:      self.cache_size_kb,
			block_size_bytes:   self.block_size_bytes,
			associativity:      self.associativity,
			policy:             self.policy,
			physical_memory_mb: self.physical_memory_mb,
			os_memory_percent:  self.os_memory_percent,
			time_slice:         self.time_slice,
			traces:             self.traces,
		})
	}
}

/// Validated configuration.
///
/// Only constructible through [`RawConfig::validate`], so a value of this
/// type always satisfies the preconditions of [`Metrics::derive`](crate::Metrics::derive).
#[derive(Clone, Debug)]
#[derive(serde::Serialize)]
pub struct Config {
	cache_size_kb:      u64,
	block_size_bytes:   u64,
	associativity:      u64,
	policy:             ReplacementPolicy,
	physical_memory_mb: u64,
	os_memory_percent:  f64,
	time_slice:         i64,
	traces:             Vec<String>,
}

impl Config {
	/// Maximum cache size (in KB)
	pub const MAX_CACHE_KB: u64 = 8192;
	/// Maximum physical memory (in MB)
	pub const MAX_PHYS_MB: u64 = 4096;
	/// Maximum number of trace identifiers
	pub const MAX_TRACES: usize = 3;
	/// Minimum cache size (in KB)
	pub const MIN_CACHE_KB: u64 = 8;
	/// Minimum physical memory (in MB)
	pub const MIN_PHYS_MB: u64 = 128;

	/// Cache size (in KB)
	pub fn cache_size_kb(&self) -> u64 {
		self.cache_size_kb
	}

	/// Block size (in bytes)
	pub fn block_size_bytes(&self) -> u64 {
		self.block_size_bytes
	}

	/// Associativity (ways per row)
	pub fn associativity(&self) -> u64 {
		self.associativity
	}

	/// Replacement policy
	pub fn policy(&self) -> ReplacementPolicy {
		self.policy
	}

	/// Physical memory (in MB)
	pub fn physical_memory_mb(&self) -> u64 {
		self.physical_memory_mb
	}

	/// Percentage of physical memory reserved for the OS
	pub fn os_memory_percent(&self) -> f64 {
		self.os_memory_percent
	}

	/// Instructions per time slice (`-1` for unbounded)
	pub fn time_slice(&self) -> i64 {
		self.time_slice
	}

	/// Trace identifiers
	pub fn traces(&self) -> &[String] {
		&self.traces
	}
}

/// Replacement policy.
///
/// Recorded for reporting only, the calculator never exercises it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[derive(serde::Serialize)]
pub enum ReplacementPolicy {
	RoundRobin,
	Random,
}

impl fmt::Display for ReplacementPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::RoundRobin => write!(f, "Round Robin"),
			Self::Random => write!(f, "Random"),
		}
	}
}

/// Configuration validation error
#[derive(Clone, PartialEq, Debug)]
#[derive(thiserror::Error)]
pub enum ValidationError {
	/// Cache size out of range or not a power of two
	#[error("cache size must be a power of two KB in [{}, {}], got {kb}", Config::MIN_CACHE_KB, Config::MAX_CACHE_KB)]
	CacheSize { kb: u64 },

	/// Block size not in the supported set
	#[error("block size must be 8, 16, 32 or 64 bytes, got {bytes}")]
	BlockSize { bytes: u64 },

	/// Associativity not in the supported set
	#[error("associativity must be 1, 2, 4, 8 or 16, got {ways}")]
	Associativity { ways: u64 },

	/// Physical memory out of range or not a power of two
	#[error("physical memory must be a power of two MB in [{}, {}], got {mb}", Config::MIN_PHYS_MB, Config::MAX_PHYS_MB)]
	PhysicalMemory { mb: u64 },

	/// OS memory percentage out of range
	#[error("os memory percentage must be within [0, 100], got {percent}")]
	OsPercent { percent: f64 },

	/// Time slice neither `-1` nor positive
	#[error("time slice must be -1 (unbounded) or >= 1, got {value}")]
	TimeSlice { value: i64 },

	/// Wrong number of trace identifiers
	#[error("expected 1 to {} trace identifiers, got {count}", Config::MAX_TRACES)]
	TraceCount { count: usize },

	/// Block count not divisible by the associativity
	#[error("total blocks ({blocks}) must be divisible by the associativity ({ways})")]
	NonIntegerRows { blocks: u64, ways: u64 },

	/// Row count not a power of two
	#[error("total rows ({rows}) must be a power of two")]
	RowsNotPowerOfTwo { rows: u64 },
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base_raw() -> RawConfig {
		RawConfig {
			cache_size_kb:      8,
			block_size_bytes:   8,
			associativity:      1,
			policy:             ReplacementPolicy::RoundRobin,
			physical_memory_mb: 128,
			os_memory_percent:  10.0,
			time_slice:         -1,
			traces:             vec!["t1".to_owned()],
		}
	}

	#[test]
	fn accepts_base_config() {
		let config = base_raw().validate().expect("Base config should be valid");
		assert_eq!(config.cache_size_kb(), 8);
		assert_eq!(config.traces(), ["t1".to_owned()]);
	}

	#[test]
	fn rejects_in_range_non_power_of_two_cache_sizes() {
		for kb in (8..=8192).filter(|kb: &u64| !kb.is_power_of_two()) {
			let res = RawConfig {
				cache_size_kb: kb,
				..base_raw()
			}
			.validate();
			assert_eq!(res.unwrap_err(), ValidationError::CacheSize { kb });
		}
	}

	#[test]
	fn accepts_all_power_of_two_cache_sizes() {
		for kb in (3..=13).map(|exp| 1_u64 << exp) {
			let res = RawConfig {
				cache_size_kb: kb,
				..base_raw()
			}
			.validate();
			assert!(res.is_ok(), "Cache size {kb} KB should be accepted");
		}
	}

	#[test]
	fn rejects_out_of_range_cache_sizes() {
		for kb in [0, 4, 16384] {
			let res = RawConfig {
				cache_size_kb: kb,
				..base_raw()
			}
			.validate();
			assert_eq!(res.unwrap_err(), ValidationError::CacheSize { kb });
		}
	}

	#[test]
	fn rejects_unsupported_block_sizes() {
		for bytes in [0, 7, 24, 128] {
			let res = RawConfig {
				block_size_bytes: bytes,
				..base_raw()
			}
			.validate();
			assert_eq!(res.unwrap_err(), ValidationError::BlockSize { bytes });
		}
	}

	#[test]
	fn rejects_unsupported_associativities() {
		for ways in [0, 3, 6, 32] {
			let res = RawConfig {
				associativity: ways,
				..base_raw()
			}
			.validate();
			assert_eq!(res.unwrap_err(), ValidationError::Associativity { ways });
		}
	}

	#[test]
	fn rejects_bad_physical_memory() {
		// 192 is in range but not a power of two
		for mb in [64, 192, 8192] {
			let res = RawConfig {
				physical_memory_mb: mb,
				..base_raw()
			}
			.validate();
			assert_eq!(res.unwrap_err(), ValidationError::PhysicalMemory { mb });
		}
	}

	#[test]
	fn rejects_out_of_range_os_percent() {
		for percent in [-0.5, 100.5] {
			let res = RawConfig {
				os_memory_percent: percent,
				..base_raw()
			}
			.validate();
			assert_eq!(res.unwrap_err(), ValidationError::OsPercent { percent });
		}
	}

	#[test]
	fn accepts_os_percent_bounds() {
		for percent in [0.0, 100.0] {
			let res = RawConfig {
				os_memory_percent: percent,
				..base_raw()
			}
			.validate();
			assert!(res.is_ok(), "OS percentage {percent} should be accepted");
		}
	}

	#[test]
	fn rejects_bad_time_slices() {
		for value in [0, -2, i64::MIN] {
			let res = RawConfig {
				time_slice: value,
				..base_raw()
			}
			.validate();
			assert_eq!(res.unwrap_err(), ValidationError::TimeSlice { value });
		}
	}

	#[test]
	fn accepts_unbounded_and_positive_time_slices() {
		for value in [-1, 1, 1_000_000] {
			let res = RawConfig {
				time_slice: value,
				..base_raw()
			}
			.validate();
			assert!(res.is_ok(), "Time slice {value} should be accepted");
		}
	}

	#[test]
	fn rejects_bad_trace_counts() {
		let res = RawConfig {
			traces: vec![],
			..base_raw()
		}
		.validate();
		assert_eq!(res.unwrap_err(), ValidationError::TraceCount { count: 0 });

		let res = RawConfig {
			traces: vec!["t1".to_owned(), "t2".to_owned(), "t3".to_owned(), "t4".to_owned()],
			..base_raw()
		}
		.validate();
		assert_eq!(res.unwrap_err(), ValidationError::TraceCount { count: 4 });
	}

	#[test]
	fn reports_first_violated_rule() {
		// Both the cache size and the associativity are invalid, but the
		// cache size rule runs first.
		let res = RawConfig {
			cache_size_kb: 7,
			associativity: 3,
			..base_raw()
		}
		.validate();
		assert_eq!(res.unwrap_err(), ValidationError::CacheSize { kb: 7 });
	}

	#[test]
	fn associativity_rule_precedes_row_divisibility() {
		// Associativity 3 would also make the row count non-integral, but
		// it must be reported as an associativity error.
		let res = RawConfig {
			associativity: 3,
			..base_raw()
		}
		.validate();
		assert_eq!(res.unwrap_err(), ValidationError::Associativity { ways: 3 });
	}

	#[test]
	fn accepted_configs_have_power_of_two_rows() {
		for cache_exp in 3..=13 {
			for block in [8, 16, 32, 64] {
				for ways in [1, 2, 4, 8, 16] {
					let cache_size_kb = 1_u64 << cache_exp;
					let config = RawConfig {
						cache_size_kb,
						block_size_bytes: block,
						associativity: ways,
						..base_raw()
					}
					.validate()
					.expect("Geometry should be valid");

					let rows = cache_size_kb * 1024 / block / ways;
					assert!(rows.is_power_of_two(), "{cache_size_kb} KB / {block} B / {ways}-way");
					assert_eq!(config.associativity(), ways);
				}
			}
		}
	}
}
