//! Derived metrics

// Imports
use crate::Config;

/// Page size used for the physical paging calculations (in bytes)
pub const PAGE_SIZE_BYTES: u64 = 4096;

/// Implementation cost per KB of memory (in USD)
pub const COST_PER_KB_USD: f64 = 0.07;

/// Virtual page table entries per process (512K, independent of physical memory)
pub const VIRTUAL_ENTRIES_PER_PROCESS: u64 = 512 * 1024;

/// Metrics derived from a validated [`Config`].
///
/// Cache geometry, metadata overhead and paging quantities, all closed-form.
#[derive(Clone, PartialEq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Metrics {
	/// Cache capacity (in blocks)
	pub total_blocks: u64,

	/// Tag width of a physical address (in bits)
	pub tag_bits: u32,

	/// Index width of a physical address (in bits)
	pub index_bits: u32,

	/// Block offset width of a physical address (in bits)
	pub block_offset_bits: u32,

	/// Cache capacity (in rows)
	pub total_rows: u64,

	/// Tag and valid-bit metadata, rounded up to whole bytes
	pub overhead_bytes: u64,

	/// Data plus overhead (in bytes)
	pub impl_mem_bytes: u64,

	/// Data plus overhead (in KB)
	pub impl_kb: f64,

	/// Implementation cost (in USD)
	pub cost_usd: f64,

	/// Physical pages
	pub phys_pages: u64,

	/// Physical pages reserved for the OS
	pub sys_pages: u64,

	/// Page table entry width (in bits)
	pub pte_bits: u32,

	/// Page table memory across all traces, rounded up to whole bytes
	pub page_table_bytes: u64,
}

impl Metrics {
	/// Derives all metrics from `config`.
	///
	/// Always succeeds: validation already excluded every arithmetic
	/// edge case this pipeline relies on.
	#[must_use]
	pub fn derive(config: &Config) -> Self {
		// Core sizes
		let cache_bytes = config.cache_size_kb() * 1024;
		let total_blocks = cache_bytes / config.block_size_bytes();
		let total_rows = total_blocks / config.associativity();

		// Address decomposition, based on the physical address size.
		// All `ilog2`s are exact: validation guarantees powers of two.
		let phys_bytes = config.physical_memory_mb() * 1024 * 1024;
		let phys_addr_bits = phys_bytes.ilog2();
		let block_offset_bits = config.block_size_bytes().ilog2();
		let index_bits = total_rows.ilog2();
		assert!(
			phys_addr_bits >= index_bits + block_offset_bits,
			"validated config yielded negative tag bits (phys {phys_addr_bits}, index {index_bits}, offset \
			 {block_offset_bits})",
		);
		let tag_bits = phys_addr_bits - index_bits - block_offset_bits;

		// Overhead and implementation size: 1 valid bit + tag per way
		let per_way_bits = 1 + u64::from(tag_bits);
		let overhead_bits = total_rows * config.associativity() * per_way_bits;
		let overhead_bytes = overhead_bits.div_ceil(8);

		let impl_mem_bytes = cache_bytes + overhead_bytes;
		let impl_kb = impl_mem_bytes as f64 / 1024.0;
		let cost_usd = impl_kb * COST_PER_KB_USD;

		// Physical memory and paging
		let phys_pages = phys_bytes / PAGE_SIZE_BYTES;
		let sys_pages = (config.os_memory_percent() / 100.0 * phys_pages as f64).round() as u64;

		// PTE: 1 valid bit + enough bits to index every physical page
		let pte_bits = 1 + phys_pages.ilog2();
		let page_table_bits = VIRTUAL_ENTRIES_PER_PROCESS * config.traces().len() as u64 * u64::from(pte_bits);
		let page_table_bytes = page_table_bits.div_ceil(8);

		Self {
			total_blocks,
			tag_bits,
			index_bits,
			block_offset_bits,
			total_rows,
			overhead_bytes,
			impl_mem_bytes,
			impl_kb,
			cost_usd,
			phys_pages,
			sys_pages,
			pte_bits,
			page_table_bytes,
		}
	}
}
