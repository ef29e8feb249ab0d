//! Cache & paging geometry calculator (`cachegeom`)

// Modules
pub mod config;
pub mod metrics;

// Exports
pub use self::{
	config::{Config, RawConfig, ReplacementPolicy, ValidationError},
	metrics::Metrics,
};
