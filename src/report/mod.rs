//! Review aggregation and Markdown rendering
//!
//! Raw review records flow through:
//! classify → filter (peer only) → resolve lookups → render (sanitize, mask)
//! and the result is named by [`output_file_name`].

mod classify;
mod filename;
mod filter;
mod lookup;
mod mask;
mod render;
mod sanitize;

use crate::api::{ReviewRecord, ReviewSource};
use classify::classify;
use filename::output_file_name;
use filter::filter_peer;
use lookup::resolve_lookups;
use render::{render_document, RenderInput};
use tracing::debug;

/// A rendered report, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub file_name: String,
    /// Human-readable title, `{subject} ({cycle})`
    pub title: String,
    pub markdown: String,
}

/// Run the full pipeline for one subject and cycle
pub async fn build_document<S>(
    source: &S,
    subject: &str,
    cycle: &str,
    records: Vec<ReviewRecord>,
    censor: bool,
) -> Document
where
    S: ReviewSource + ?Sized,
{
    let total = records.len();
    let groups = filter_peer(classify(records));
    debug!(
        "{} records -> {} peer questions, {} self questions",
        total,
        groups.peer.len(),
        groups.self_review.len()
    );
    if groups.peer.is_empty() {
        debug!("no peer feedback with content");
    }

    let lookups = resolve_lookups(source, &groups).await;
    let markdown = render_document(&RenderInput {
        subject,
        cycle,
        groups: &groups,
        lookups: &lookups,
        censor,
    });

    Document {
        file_name: output_file_name(subject, cycle),
        title: format!("{} ({})", subject, cycle),
        markdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeSource;
    use crate::api::{ObjectRef, Response, ReviewType};

    fn review(kind: ReviewType, question: &str, reviewer: &str, comment: &str) -> ReviewRecord {
        ReviewRecord {
            id: format!("{}-{}", question, reviewer),
            review_type: kind,
            question: ObjectRef {
                id: question.to_string(),
            },
            reviewer: Some(ObjectRef {
                id: reviewer.to_string(),
            }),
            response: Some(Response {
                comment: Some(comment.to_string()),
                ..Response::default()
            }),
        }
    }

    #[tokio::test]
    async fn test_ada_lovelace_scenario() {
        let mut source = FakeSource::default();
        source
            .questions
            .insert("q1".to_string(), "What should Ada keep doing?".to_string());
        source.users.insert("u2".to_string(), "Charles Babbage".to_string());

        let records = vec![
            review(ReviewType::Peer, "q1", "u2", "Brilliant notes on the engine."),
            review(ReviewType::SelfReview, "q1", "u1", "Published the first program."),
        ];

        let doc = build_document(&source, "Ada Lovelace", "2024 H1", records, false).await;

        assert_eq!(doc.file_name, "ada_lovelace_2024_h1.md");
        assert_eq!(doc.title, "Ada Lovelace (2024 H1)");
        assert_eq!(
            doc.markdown.matches("### What should Ada keep doing?").count(),
            2
        );
        let (peer, own) = doc.markdown.split_once("## Self Review").unwrap();
        assert!(peer.contains("## Peer Feedback"));
        assert!(peer.contains("Charles Babbage:\n\n> Brilliant notes on the engine.\n"));
        assert!(own.contains("> Published the first program.\n"));
        assert!(!own.contains("Ada Lovelace:"));
    }

    #[tokio::test]
    async fn test_empty_peer_records_do_not_create_headings() {
        let source = FakeSource::default();
        let records = vec![review(ReviewType::Peer, "q1", "u2", "   ")];

        let doc = build_document(&source, "Ada Lovelace", "2024 H1", records, false).await;

        assert!(!doc.markdown.contains("###"));
    }
}
