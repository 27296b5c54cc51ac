pub mod url_repository;

pub use url_repository::{CreateOutcome, UrlRepository};

#[cfg(test)]
pub use url_repository::MockUrlRepository;
