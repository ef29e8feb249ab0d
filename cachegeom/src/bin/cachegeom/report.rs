//! Report

// Imports
use {
	cachegeom::{metrics, Config, Metrics},
	itertools::Itertools,
};

/// Json output for `--output`
#[derive(Debug)]
#[derive(serde::Serialize)]
pub struct Output<'a> {
	pub config:  &'a Config,
	pub metrics: &'a Metrics,
}

/// Prints the full report to stdout
pub fn print(config: &Config, metrics: &Metrics) {
	println!("Trace file(s): {}", config.traces().iter().join(", "));
	println!();

	println!("***** Cache Input Parameters *****");
	println!("Cache size: {} KB", config.cache_size_kb());
	println!("Block size: {} bytes", config.block_size_bytes());
	println!("Associativity: {}", config.associativity());
	println!("Replacement policy: {}", config.policy());
	println!("Physical memory: {} MB", config.physical_memory_mb());
	println!("Percent memory used by system: {:.1}%", config.os_memory_percent());
	match config.time_slice() {
		-1 => println!("Instructions / time slice: All"),
		n => println!("Instructions / time slice: {n}"),
	}
	println!();

	println!("***** Cache Calculated Values *****");
	println!("Total # blocks: {}", metrics.total_blocks);
	println!("Tag size: {} bits", metrics.tag_bits);
	println!("Index size: {} bits", metrics.index_bits);
	println!("Block offset size: {} bits", metrics.block_offset_bits);
	println!("Total # rows: {}", metrics.total_rows);
	println!("Overhead size: {} bytes", metrics.overhead_bytes);
	println!(
		"Implementation memory size: {:.2} KB ({} bytes)",
		metrics.impl_kb, metrics.impl_mem_bytes
	);
	println!("Cost: ${:.2} @ ${:.2} per KB", metrics.cost_usd, metrics::COST_PER_KB_USD);
	println!();

	println!("***** Physical Memory Calculated Values *****");
	println!("Number of physical pages: {}", metrics.phys_pages);
	println!("Number of pages for system: {}", metrics.sys_pages);
	println!(
		"Size of page table entry: {} bits (1 valid, {} for phys page)",
		metrics.pte_bits,
		metrics.pte_bits - 1
	);
	println!("Total RAM for page table(s): {} bytes", metrics.page_table_bytes);
}
