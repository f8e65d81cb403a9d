//! Multipart boundary tokens.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Source of multipart boundary tokens.
pub trait BoundaryGenerator: Send + Sync {
    /// A fresh token for one message.
    fn boundary(&self) -> String;
}

/// Random alphanumeric boundary, fresh per call.
#[derive(Debug, Clone)]
pub struct RandomBoundary {
    len: usize,
}

impl RandomBoundary {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Default for RandomBoundary {
    fn default() -> Self {
        Self::new(24)
    }
}

impl BoundaryGenerator for RandomBoundary {
    fn boundary(&self) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.len)
            .map(char::from)
            .collect();
        format!("boundary_{suffix}")
    }
}

/// Always returns the same token. For deterministic output in tests.
#[derive(Debug, Clone)]
pub struct FixedBoundary(pub String);

impl BoundaryGenerator for FixedBoundary {
    fn boundary(&self) -> String {
        self.0.clone()
    }
}
