use super::{EligibleCycle, FetchOutput, FetchRequest};
use crate::api::{ReviewRecord, ReviewSource, User};
use crate::error::WorkflowError;
use futures::stream::{self, StreamExt};
use tracing::debug;

/// Reviewee lookups in flight at once while scanning cycles
const CYCLE_SCAN_CONCURRENCY: usize = 4;

/// Direct reports of the user owning the API key, sorted by name
pub async fn fetch_reports<S>(source: &S) -> Result<Vec<User>, WorkflowError>
where
    S: ReviewSource + ?Sized,
{
    let me = source
        .current_user()
        .await
        .map_err(|source| WorkflowError::Fetch {
            stage: "current user",
            source,
        })?;
    debug!("current user: {} ({})", me.name, me.id);

    let mut reports = source
        .list_reports(&me)
        .await
        .map_err(|source| WorkflowError::Fetch {
            stage: "direct reports",
            source,
        })?;
    reports.sort_by_key(|u| u.name.to_lowercase());
    Ok(reports)
}

/// Cycles in which `subject` is a reviewee, sorted by name.
///
/// Failing to list cycles is fatal. A cycle whose reviewees cannot be listed
/// is left out.
pub async fn fetch_eligible_cycles<S>(
    source: &S,
    subject: &User,
) -> Result<Vec<EligibleCycle>, WorkflowError>
where
    S: ReviewSource + ?Sized,
{
    let cycles = source
        .list_review_cycles()
        .await
        .map_err(|source| WorkflowError::Fetch {
            stage: "review cycles",
            source,
        })?;
    debug!("scanning {} review cycles for {}", cycles.len(), subject.id);

    let mut eligible: Vec<EligibleCycle> = stream::iter(cycles)
        .map(|cycle| async move {
            match source.list_reviewees(&cycle).await {
                Ok(reviewees) => reviewees
                    .into_iter()
                    .find(|r| r.user.id == subject.id)
                    .map(|r| EligibleCycle {
                        reviews_url: r.reviews.url,
                        cycle,
                    }),
                Err(e) => {
                    // The TUI owns the terminal during this scan
                    debug!("skipping cycle '{}': {}", cycle.name, e);
                    None
                }
            }
        })
        .buffered(CYCLE_SCAN_CONCURRENCY)
        .filter_map(|found| async move { found })
        .collect()
        .await;

    eligible.sort_by_key(|c| c.name().to_lowercase());
    Ok(eligible)
}

/// Review records for the chosen cycle
pub async fn fetch_reviews<S>(
    source: &S,
    cycle: &EligibleCycle,
    limit: usize,
) -> Result<Vec<ReviewRecord>, WorkflowError>
where
    S: ReviewSource + ?Sized,
{
    let records = source
        .list_reviews(&cycle.reviews_url, limit)
        .await
        .map_err(|source| WorkflowError::Fetch {
            stage: "reviews",
            source,
        })?;
    debug!("fetched {} review records", records.len());
    Ok(records)
}

/// Perform the work behind a [`FetchRequest`]
pub async fn run_fetch<S>(source: &S, request: FetchRequest) -> Result<FetchOutput, WorkflowError>
where
    S: ReviewSource + ?Sized,
{
    match request {
        FetchRequest::Reports => fetch_reports(source).await.map(FetchOutput::Reports),
        FetchRequest::EligibleCycles { subject } => fetch_eligible_cycles(source, &subject)
            .await
            .map(FetchOutput::Cycles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{record, FakeSource};
    use crate::api::ReviewType;

    fn source_with_cycles() -> FakeSource {
        let mut source = FakeSource {
            me: FakeSource::user("me", "Manager"),
            reports: vec![
                FakeSource::user("u2", "zed"),
                FakeSource::user("u1", "Ada"),
            ],
            cycles: vec![
                FakeSource::cycle("c1", "b cycle"),
                FakeSource::cycle("c2", "Broken"),
                FakeSource::cycle("c3", "A cycle"),
                FakeSource::cycle("c4", "Other people"),
            ],
            ..FakeSource::default()
        };
        source.reviewees.insert(
            "c1".to_string(),
            vec![FakeSource::reviewee("r9", "u9"), FakeSource::reviewee("r1", "u1")],
        );
        source
            .reviewees
            .insert("c3".to_string(), vec![FakeSource::reviewee("r3", "u1")]);
        source
            .reviewees
            .insert("c4".to_string(), vec![FakeSource::reviewee("r4", "u2")]);
        source.failing_cycles.insert("c2".to_string());
        source
    }

    #[tokio::test]
    async fn test_fetch_reports_sorted() {
        let source = source_with_cycles();

        let reports = fetch_reports(&source).await.unwrap();

        let names: Vec<_> = reports.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "zed"]);
    }

    #[tokio::test]
    async fn test_eligible_cycles_skip_failures_and_strangers() {
        let source = source_with_cycles();
        let subject = FakeSource::user("u1", "Ada");

        let cycles = fetch_eligible_cycles(&source, &subject).await.unwrap();

        let names: Vec<_> = cycles.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["A cycle", "b cycle"]);
        assert_eq!(cycles[1].reviews_url, "/v1/reviewee/r1/reviews");
    }

    #[tokio::test]
    async fn test_cycle_list_failure_is_fatal() {
        let source = FakeSource {
            fail_cycles_list: true,
            ..FakeSource::default()
        };

        let err = fetch_eligible_cycles(&source, &FakeSource::user("u1", "Ada"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("review cycles"));
    }

    #[tokio::test]
    async fn test_fetch_reviews_respects_limit() {
        let mut source = FakeSource::default();
        source.reviews.insert(
            "/v1/reviewee/r1/reviews".to_string(),
            vec![
                record(ReviewType::Peer, "q1", "a"),
                record(ReviewType::Peer, "q1", "b"),
                record(ReviewType::Peer, "q2", "c"),
            ],
        );
        let cycle = EligibleCycle {
            cycle: FakeSource::cycle("c1", "H1"),
            reviews_url: "/v1/reviewee/r1/reviews".to_string(),
        };

        let records = fetch_reviews(&source, &cycle, 2).await.unwrap();

        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_run_fetch_dispatches_by_request() {
        let source = source_with_cycles();

        let output = run_fetch(
            &source,
            FetchRequest::EligibleCycles {
                subject: FakeSource::user("u2", "zed"),
            },
        )
        .await
        .unwrap();

        match output {
            FetchOutput::Cycles(cycles) => {
                assert_eq!(cycles.len(), 1);
                assert_eq!(cycles[0].name(), "Other people");
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }
}
