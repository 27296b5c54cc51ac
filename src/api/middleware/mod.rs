pub mod compression;
pub mod tracing;
