use super::classify::ReviewGroups;
use super::sanitize::single_line;
use crate::api::ReviewSource;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Heading used when a question cannot be resolved
pub const QUESTION_PLACEHOLDER: &str = "Question";

/// Attribution used when a reviewer cannot be resolved
pub const REVIEWER_PLACEHOLDER: &str = "Unknown";

/// Question headings and reviewer names resolved for one render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lookups {
    headings: HashMap<String, String>,
    reviewers: HashMap<String, String>,
}

impl Lookups {
    pub fn insert_heading(&mut self, question_id: &str, heading: impl Into<String>) {
        self.headings.insert(question_id.to_string(), heading.into());
    }

    pub fn insert_reviewer(&mut self, user_id: &str, name: impl Into<String>) {
        self.reviewers.insert(user_id.to_string(), name.into());
    }

    pub fn heading(&self, question_id: &str) -> &str {
        self.headings
            .get(question_id)
            .map(String::as_str)
            .unwrap_or(QUESTION_PLACEHOLDER)
    }

    pub fn reviewer(&self, user_id: Option<&str>) -> &str {
        user_id
            .and_then(|id| self.reviewers.get(id))
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(REVIEWER_PLACEHOLDER)
    }
}

/// Resolve every question and peer reviewer referenced by `groups`.
///
/// Each distinct ID is fetched once. Failed lookups are left out so the
/// renderer falls back to the placeholders.
pub async fn resolve_lookups<S>(source: &S, groups: &ReviewGroups) -> Lookups
where
    S: ReviewSource + ?Sized,
{
    let mut lookups = Lookups::default();
    let mut seen_questions = HashSet::new();
    let mut seen_reviewers = HashSet::new();

    let question_ids = groups
        .peer
        .question_ids()
        .chain(groups.self_review.question_ids());
    for question_id in question_ids {
        if !seen_questions.insert(question_id) {
            continue;
        }
        match source.question(question_id).await {
            Ok(question) => lookups.insert_heading(question_id, single_line(&question.body)),
            Err(e) => debug!("question {} lookup failed: {}", question_id, e),
        }
    }

    for reviewer_id in groups.peer.records().filter_map(|r| r.reviewer_id()) {
        if !seen_reviewers.insert(reviewer_id) {
            continue;
        }
        match source.user(reviewer_id).await {
            Ok(user) => lookups.insert_reviewer(reviewer_id, user.name),
            Err(e) => debug!("reviewer {} lookup failed: {}", reviewer_id, e),
        }
    }

    lookups
}
