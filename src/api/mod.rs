//! Remote performance-management data source
//!
//! The export workflow only talks to [`ReviewSource`]; [`LatticeClient`] is the
//! HTTP implementation used by the binary.

mod client;
#[cfg(test)]
pub mod fake;
mod types;

pub use client::LatticeClient;
pub use types::*;

use crate::error::ApiError;
use async_trait::async_trait;

/// Read-only view of the review data the exporter needs.
///
/// Each call is a single attempt; callers decide whether an error is fatal.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// The user the API key belongs to
    async fn current_user(&self) -> Result<User, ApiError>;

    /// Users reporting to `manager`
    async fn list_reports(&self, manager: &User) -> Result<Vec<User>, ApiError>;

    async fn list_review_cycles(&self) -> Result<Vec<ReviewCycle>, ApiError>;

    async fn list_reviewees(&self, cycle: &ReviewCycle) -> Result<Vec<Reviewee>, ApiError>;

    /// Reviews written about one reviewee, capped at `limit` records
    async fn list_reviews(
        &self,
        reviews_url: &str,
        limit: usize,
    ) -> Result<Vec<ReviewRecord>, ApiError>;

    async fn question(&self, id: &str) -> Result<Question, ApiError>;

    async fn user(&self, id: &str) -> Result<User, ApiError>;
}
