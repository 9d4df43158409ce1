//! In-memory [`ReviewSource`] for tests

use super::{
    ListRef, ObjectRef, Question, Response, ReviewCycle, ReviewRecord, ReviewSource, ReviewType,
    Reviewee, User,
};
use crate::error::ApiError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        body: format!("{} not found", what),
    }
}

/// A record with a comment and no reviewer, id `{question}-{comment}`
pub fn record(kind: ReviewType, question: &str, comment: &str) -> ReviewRecord {
    ReviewRecord {
        id: format!("{}-{}", question, comment),
        review_type: kind,
        question: ObjectRef {
            id: question.to_string(),
        },
        reviewer: None,
        response: Some(Response {
            comment: Some(comment.to_string()),
            ..Response::default()
        }),
    }
}

#[derive(Default)]
pub struct FakeSource {
    pub me: User,
    pub reports: Vec<User>,
    pub cycles: Vec<ReviewCycle>,
    pub reviewees: HashMap<String, Vec<Reviewee>>,
    pub failing_cycles: HashSet<String>,
    pub reviews: HashMap<String, Vec<ReviewRecord>>,
    pub questions: HashMap<String, String>,
    pub users: HashMap<String, String>,
    pub fail_cycles_list: bool,
    pub question_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
}

impl FakeSource {
    pub fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            ..User::default()
        }
    }

    pub fn cycle(id: &str, name: &str) -> ReviewCycle {
        ReviewCycle {
            id: id.to_string(),
            name: name.to_string(),
            reviewees: ListRef {
                object: "list".to_string(),
                url: format!("/v1/reviewCycle/{}/reviewees", id),
            },
        }
    }

    pub fn reviewee(id: &str, user_id: &str) -> Reviewee {
        Reviewee {
            id: id.to_string(),
            user: ObjectRef {
                id: user_id.to_string(),
            },
            reviews: ListRef {
                object: "list".to_string(),
                url: format!("/v1/reviewee/{}/reviews", id),
            },
        }
    }
}

#[async_trait]
impl ReviewSource for FakeSource {
    async fn current_user(&self) -> Result<User, ApiError> {
        Ok(self.me.clone())
    }

    async fn list_reports(&self, _manager: &User) -> Result<Vec<User>, ApiError> {
        Ok(self.reports.clone())
    }

    async fn list_review_cycles(&self) -> Result<Vec<ReviewCycle>, ApiError> {
        if self.fail_cycles_list {
            return Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(self.cycles.clone())
    }

    async fn list_reviewees(&self, cycle: &ReviewCycle) -> Result<Vec<Reviewee>, ApiError> {
        if self.failing_cycles.contains(&cycle.id) {
            return Err(ApiError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self.reviewees.get(&cycle.id).cloned().unwrap_or_default())
    }

    async fn list_reviews(
        &self,
        reviews_url: &str,
        limit: usize,
    ) -> Result<Vec<ReviewRecord>, ApiError> {
        let records = self
            .reviews
            .get(reviews_url)
            .ok_or_else(|| not_found(reviews_url))?;
        Ok(records.iter().take(limit).cloned().collect())
    }

    async fn question(&self, id: &str) -> Result<Question, ApiError> {
        self.question_calls.fetch_add(1, Ordering::SeqCst);
        self.questions
            .get(id)
            .map(|body| Question {
                id: id.to_string(),
                body: body.clone(),
            })
            .ok_or_else(|| not_found(id))
    }

    async fn user(&self, id: &str) -> Result<User, ApiError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .get(id)
            .map(|name| FakeSource::user(id, name))
            .ok_or_else(|| not_found(id))
    }
}
