pub mod enrichment;
pub mod optimization;
