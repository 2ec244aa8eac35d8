pub mod assembler;

// Re-export key components
pub use assembler::SnapshotAssembler;
