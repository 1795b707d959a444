//! Small shared UI types

use std::time::Instant;

/// A temporary UI message shown to the user (e.g. success/error notifications)
#[derive(Clone)]
pub struct FlashMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

impl FlashMessage {
    pub fn new(text: String, is_error: bool) -> Self {
        Self {
            text,
            is_error,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self, seconds: u64) -> bool {
        self.created.elapsed().as_secs() >= seconds
    }
}
