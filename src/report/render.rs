use super::classify::ReviewGroups;
use super::lookup::Lookups;
use super::mask::mask;
use super::sanitize::sanitize;
use crate::api::{Response, ReviewRecord};

/// Quote shown when a record has no usable text
pub const NO_COMMENT: &str = "(no comment)";

pub struct RenderInput<'a> {
    pub subject: &'a str,
    pub cycle: &'a str,
    /// Peer records must already have passed the content filter
    pub groups: &'a ReviewGroups,
    pub lookups: &'a Lookups,
    pub censor: bool,
}

/// Render the Markdown report.
///
/// Sections and questions appear in the order recorded in `groups`, so the same
/// input always yields the same bytes.
pub fn render_document(input: &RenderInput<'_>) -> String {
    let mut content = String::new();

    content.push_str(&format!("# {} ({})\n\n", input.subject, input.cycle));

    content.push_str("## Peer Feedback\n\n");
    for (question_id, records) in input.groups.peer.iter() {
        content.push_str(&format!("### {}\n\n", input.lookups.heading(question_id)));
        for record in records {
            let name = mask(input.lookups.reviewer(record.reviewer_id()), input.censor);
            match record.response.as_ref().and_then(score) {
                Some(score) => content.push_str(&format!(
                    "{} (score: {}):\n\n",
                    name,
                    mask(&score, input.censor)
                )),
                None => content.push_str(&format!("{}:\n\n", name)),
            }
            push_quote(&mut content, record, input.censor);
        }
    }

    content.push_str("---\n\n");

    content.push_str("## Self Review\n\n");
    for (question_id, records) in input.groups.self_review.iter() {
        content.push_str(&format!("### {}\n\n", input.lookups.heading(question_id)));
        for record in records {
            push_quote(&mut content, record, input.censor);
        }
    }

    content
}

/// Rating label verbatim if present, else the numeric rating with two decimals
fn score(response: &Response) -> Option<String> {
    response
        .rating_string
        .as_deref()
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .or_else(|| response.rating.map(|rating| format!("{:.2}", rating)))
}

/// Trimmed comment, else the chosen options joined with ", "
fn quote_text(record: &ReviewRecord) -> String {
    let Some(response) = &record.response else {
        return String::new();
    };

    match response.comment.as_deref().map(str::trim) {
        Some(comment) if !comment.is_empty() => sanitize(comment),
        _ if !response.choices.is_empty() => sanitize(&response.choices.join(", ")),
        _ => String::new(),
    }
}

fn push_quote(content: &mut String, record: &ReviewRecord, censor: bool) {
    let mut quote = quote_text(record);
    if quote.trim().is_empty() {
        quote = NO_COMMENT.to_string();
    }

    for line in mask(&quote, censor).split('\n') {
        content.push_str(&format!("> {}\n", line));
    }
    content.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::record;
    use crate::api::{ObjectRef, ReviewType};
    use crate::report::classify::classify;
    use crate::report::filter::filter_peer;

    fn peer(question: &str, reviewer: &str, response: Response) -> ReviewRecord {
        let mut r = record(ReviewType::Peer, question, "");
        r.reviewer = Some(ObjectRef {
            id: reviewer.to_string(),
        });
        r.response = Some(response);
        r
    }

    fn sample_groups() -> ReviewGroups {
        let mut own = record(ReviewType::SelfReview, "Q1", "I led the <b>migration</b>.");
        own.reviewer = Some(ObjectRef {
            id: "ada".to_string(),
        });
        let mut empty_self = record(ReviewType::SelfReview, "Q2", "");
        empty_self.response = None;

        filter_peer(classify(vec![
            peer(
                "Q1",
                "bob",
                Response {
                    comment: Some("  Great partner.<br>Very calm.  ".to_string()),
                    rating: Some(4.0),
                    ..Response::default()
                },
            ),
            own,
            peer(
                "Q2",
                "carol",
                Response {
                    choices: vec!["Agree".to_string(), "Often".to_string()],
                    rating_string: Some("Exceeds".to_string()),
                    rating: Some(3.0),
                    ..Response::default()
                },
            ),
            peer(
                "Q1",
                "ghost",
                Response {
                    rating: Some(2.5),
                    ..Response::default()
                },
            ),
            empty_self,
        ]))
    }

    fn sample_lookups() -> Lookups {
        let mut lookups = Lookups::default();
        lookups.insert_heading("Q1", "What went well?");
        lookups.insert_reviewer("bob", "Bob Smith");
        lookups.insert_reviewer("carol", "Carol Jones");
        lookups
    }

    #[test]
    fn test_render_structure() {
        let groups = sample_groups();
        let lookups = sample_lookups();

        let doc = render_document(&RenderInput {
            subject: "Ada Lovelace",
            cycle: "2024 H1",
            groups: &groups,
            lookups: &lookups,
            censor: false,
        });

        let expected = "\
# Ada Lovelace (2024 H1)

## Peer Feedback

### What went well?

Bob Smith (score: 4.00):

> Great partner.
> Very calm.

Unknown (score: 2.50):

> (no comment)

### Question

Carol Jones (score: Exceeds):

> Agree, Often

---

## Self Review

### What went well?

> I led the migration.

### Question

> (no comment)

";
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_score_prefers_non_empty_label() {
        let label = Response {
            rating_string: Some("Meets".to_string()),
            rating: Some(3.0),
            ..Response::default()
        };
        let empty_label = Response {
            rating_string: Some(String::new()),
            rating: Some(3.0),
            ..Response::default()
        };
        let neither = Response {
            rating_string: Some(String::new()),
            ..Response::default()
        };

        assert_eq!(score(&label).as_deref(), Some("Meets"));
        assert_eq!(score(&empty_label).as_deref(), Some("3.00"));
        assert_eq!(score(&neither), None);
    }

    #[test]
    fn test_render_is_deterministic() {
        let groups = sample_groups();
        let lookups = sample_lookups();
        let input = RenderInput {
            subject: "Ada Lovelace",
            cycle: "2024 H1",
            groups: &groups,
            lookups: &lookups,
            censor: true,
        };

        assert_eq!(render_document(&input), render_document(&input));
    }

    #[test]
    fn test_censor_masks_names_scores_and_quotes_only() {
        let groups = sample_groups();
        let lookups = sample_lookups();

        let doc = render_document(&RenderInput {
            subject: "Ada Lovelace",
            cycle: "2024 H1",
            groups: &groups,
            lookups: &lookups,
            censor: true,
        });

        assert!(doc.starts_with("# Ada Lovelace (2024 H1)\n\n## Peer Feedback\n\n### What went well?\n"));
        assert!(doc.contains("▒▒▒ ▒▒▒▒▒ (score: ▒▒▒▒):\n\n> ▒▒▒▒▒ ▒▒▒▒▒▒▒▒\n> ▒▒▒▒ ▒▒▒▒▒\n"));
        assert!(doc.contains("## Self Review\n\n### What went well?\n\n> ▒ ▒▒▒ ▒▒▒ ▒▒▒▒▒▒▒▒▒▒\n"));
        assert!(!doc.contains("Bob"));
        assert!(!doc.contains("(no comment)"));
    }

    #[test]
    fn test_empty_sections_still_rendered() {
        let groups = ReviewGroups::default();
        let lookups = Lookups::default();

        let doc = render_document(&RenderInput {
            subject: "Ada",
            cycle: "C",
            groups: &groups,
            lookups: &lookups,
            censor: false,
        });

        assert_eq!(doc, "# Ada (C)\n\n## Peer Feedback\n\n---\n\n## Self Review\n\n");
    }
}
