#![allow(dead_code)]

use std::sync::Arc;

use snaplink::application::services::UrlService;
use snaplink::domain::repositories::UrlRepository;
use snaplink::infrastructure::persistence::MemoryUrlRepository;
use snaplink::state::AppState;

pub const BASE_URL: &str = "https://sn.test";

/// Builds an [`AppState`] over a fresh in-memory store.
pub fn create_test_state() -> AppState {
    create_test_state_with(Arc::new(MemoryUrlRepository::new()))
}

/// Builds an [`AppState`] over the given repository.
pub fn create_test_state_with(repository: Arc<dyn UrlRepository>) -> AppState {
    AppState::new(Arc::new(UrlService::new(repository, BASE_URL)))
}

/// Strips the test base URL prefix from a composed short URL.
pub fn code_of(short_url: &str) -> &str {
    short_url
        .strip_prefix(&format!("{BASE_URL}/"))
        .unwrap_or_else(|| panic!("unexpected short URL: {short_url}"))
}
