pub mod file_repository;
pub mod index;
pub mod memory_repository;
pub mod pg_repository;

pub use file_repository::FileUrlRepository;
pub use memory_repository::MemoryUrlRepository;
pub use pg_repository::PgUrlRepository;
