//! Two-stage selection workflow: pick a report, then one of their review cycles.
//!
//! [`Workflow`] is a pure state machine. A driver (the TUI) feeds it fetch
//! results, spinner ticks and list input, and performs the [`Effect`]s it asks
//! for. States:
//!
//! ```text
//! Idle -> Fetching(Subject) -> Listing(Subject) -> Fetching(Cycle) -> Listing(Cycle) -> Complete
//!                                    |                                     |
//!                                    +-> Aborted / NoSelection             +-> Aborted / NoSelection
//! ```
//!
//! Confirming a list entry is the "selected" transition: the choice is recorded
//! and the next stage's fetch starts in the same step.

mod fetch;
mod picker;

pub use fetch::{fetch_reviews, run_fetch};
pub use picker::{ListInput, Picker, Spinner};

use crate::api::{ReviewCycle, User};
use crate::error::WorkflowError;

/// Which picker a fetch or list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Subject,
    Cycle,
}

impl Stage {
    pub fn title(self) -> &'static str {
        match self {
            Stage::Subject => "Select a user",
            Stage::Cycle => "Select a cycle",
        }
    }
}

/// A cycle in which the chosen subject is a reviewee
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleCycle {
    pub cycle: ReviewCycle,
    /// Where the subject's reviews for this cycle live
    pub reviews_url: String,
}

impl EligibleCycle {
    pub fn name(&self) -> &str {
        &self.cycle.name
    }
}

/// Background work the driver must run for the current `Fetching` state
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Reports,
    EligibleCycles { subject: User },
}

impl FetchRequest {
    pub fn stage(&self) -> Stage {
        match self {
            FetchRequest::Reports => Stage::Subject,
            FetchRequest::EligibleCycles { .. } => Stage::Cycle,
        }
    }

    pub fn label(&self) -> String {
        match self {
            FetchRequest::Reports => "Loading direct reports".to_string(),
            FetchRequest::EligibleCycles { subject } => {
                format!("Loading review cycles for {}", subject.name)
            }
        }
    }
}

/// Successful result of a [`FetchRequest`]
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutput {
    Reports(Vec<User>),
    Cycles(Vec<EligibleCycle>),
}

/// What the driver should do next
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run this fetch in the background and report back via `complete_fetch`
    Fetch(FetchRequest),
    /// Wait for list input
    AwaitInput,
    /// The workflow reached a terminal state
    Finish,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub subject: User,
    pub cycle: EligibleCycle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Fetching { stage: Stage, spinner: Spinner },
    Listing { stage: Stage, picker: Picker },
    Complete(Selection),
    Aborted,
    /// An empty list was confirmed
    NoSelection { stage: Stage },
    Failed,
}

/// How a finished workflow ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Complete(Selection),
    Aborted,
    NoSelection(Stage),
}

pub struct Workflow {
    phase: Phase,
    reports: Vec<User>,
    cycles: Vec<EligibleCycle>,
    subject: Option<User>,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            reports: Vec::new(),
            cycles: Vec::new(),
            subject: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Idle -> Fetching(Subject)
    pub fn start(&mut self) -> Effect {
        match self.phase {
            Phase::Idle => self.begin_fetch(FetchRequest::Reports),
            _ => Effect::AwaitInput,
        }
    }

    /// Advance the progress indicator while fetching
    pub fn tick(&mut self) {
        if let Phase::Fetching { spinner, .. } = &mut self.phase {
            spinner.advance();
        }
    }

    /// Progress indicator of the current fetch
    pub fn spinner(&self) -> Option<&Spinner> {
        match &self.phase {
            Phase::Fetching { spinner, .. } => Some(spinner),
            _ => None,
        }
    }

    /// Fetching -> Listing on success; any error ends the workflow
    pub fn complete_fetch(
        &mut self,
        result: Result<FetchOutput, WorkflowError>,
    ) -> Result<Effect, WorkflowError> {
        let Phase::Fetching { stage, .. } = self.phase else {
            return Ok(Effect::AwaitInput);
        };

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                self.phase = Phase::Failed;
                return Err(e);
            }
        };

        let labels: Vec<String> = match (stage, output) {
            (Stage::Subject, FetchOutput::Reports(mut reports)) => {
                reports.sort_by_key(|u| u.name.to_lowercase());
                let labels = reports.iter().map(|u| u.name.clone()).collect();
                self.reports = reports;
                labels
            }
            (Stage::Cycle, FetchOutput::Cycles(mut cycles)) => {
                cycles.sort_by_key(|c| c.name().to_lowercase());
                let labels = cycles.iter().map(|c| c.name().to_string()).collect();
                self.cycles = cycles;
                labels
            }
            (stage, _) => {
                // A mismatched output means the driver ran the wrong request
                self.phase = Phase::Failed;
                return Err(WorkflowError::UnexpectedOutput(stage.title()));
            }
        };

        self.phase = Phase::Listing {
            stage,
            picker: Picker::new(stage.title(), labels),
        };
        Ok(Effect::AwaitInput)
    }

    /// Handle list navigation, confirmation or abort
    pub fn input(&mut self, input: ListInput) -> Effect {
        let Phase::Listing { stage, picker } = &mut self.phase else {
            return Effect::AwaitInput;
        };
        let stage = *stage;

        match input {
            ListInput::Up => {
                picker.move_up();
                Effect::AwaitInput
            }
            ListInput::Down => {
                picker.move_down();
                Effect::AwaitInput
            }
            ListInput::Abort => {
                self.phase = Phase::Aborted;
                Effect::Finish
            }
            ListInput::Confirm => match picker.selected() {
                None => {
                    self.phase = Phase::NoSelection { stage };
                    Effect::Finish
                }
                Some(index) => self.select(stage, index),
            },
        }
    }

    /// Terminal outcome, if the workflow has finished without error
    pub fn outcome(&self) -> Option<Outcome> {
        match &self.phase {
            Phase::Complete(selection) => Some(Outcome::Complete(selection.clone())),
            Phase::Aborted => Some(Outcome::Aborted),
            Phase::NoSelection { stage } => Some(Outcome::NoSelection(*stage)),
            _ => None,
        }
    }

    fn select(&mut self, stage: Stage, index: usize) -> Effect {
        match stage {
            Stage::Subject => match self.reports.get(index).cloned() {
                Some(subject) => {
                    self.subject = Some(subject.clone());
                    self.begin_fetch(FetchRequest::EligibleCycles { subject })
                }
                None => {
                    self.phase = Phase::NoSelection { stage };
                    Effect::Finish
                }
            },
            Stage::Cycle => match (self.subject.clone(), self.cycles.get(index).cloned()) {
                (Some(subject), Some(cycle)) => {
                    self.phase = Phase::Complete(Selection { subject, cycle });
                    Effect::Finish
                }
                _ => {
                    self.phase = Phase::NoSelection { stage };
                    Effect::Finish
                }
            },
        }
    }

    fn begin_fetch(&mut self, request: FetchRequest) -> Effect {
        self.phase = Phase::Fetching {
            stage: request.stage(),
            spinner: Spinner::new(request.label()),
        };
        Effect::Fetch(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeSource;
    use crate::error::ApiError;

    fn eligible(id: &str, name: &str) -> EligibleCycle {
        EligibleCycle {
            cycle: FakeSource::cycle(id, name),
            reviews_url: format!("/v1/reviewee/{}/reviews", id),
        }
    }

    fn listing_labels(workflow: &Workflow) -> Vec<String> {
        match workflow.phase() {
            Phase::Listing { picker, .. } => picker.items().to_vec(),
            other => panic!("expected listing, got {:?}", other),
        }
    }

    #[test]
    fn test_happy_path() {
        let mut workflow = Workflow::new();
        assert_eq!(workflow.start(), Effect::Fetch(FetchRequest::Reports));

        let reports = vec![
            FakeSource::user("u2", "bob Builder"),
            FakeSource::user("u1", "Ada Lovelace"),
            FakeSource::user("u3", "Carol"),
        ];
        let effect = workflow
            .complete_fetch(Ok(FetchOutput::Reports(reports)))
            .unwrap();
        assert_eq!(effect, Effect::AwaitInput);
        assert_eq!(listing_labels(&workflow), vec!["Ada Lovelace", "bob Builder", "Carol"]);

        workflow.input(ListInput::Down);
        let effect = workflow.input(ListInput::Confirm);
        let subject = FakeSource::user("u2", "bob Builder");
        assert_eq!(
            effect,
            Effect::Fetch(FetchRequest::EligibleCycles {
                subject: subject.clone()
            })
        );

        workflow
            .complete_fetch(Ok(FetchOutput::Cycles(vec![
                eligible("c2", "2024 H2"),
                eligible("c1", "2024 h1"),
            ])))
            .unwrap();
        assert_eq!(listing_labels(&workflow), vec!["2024 h1", "2024 H2"]);

        assert_eq!(workflow.input(ListInput::Confirm), Effect::Finish);
        assert_eq!(
            workflow.outcome(),
            Some(Outcome::Complete(Selection {
                subject,
                cycle: eligible("c1", "2024 h1"),
            }))
        );
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut workflow = Workflow::new();
        workflow.start();
        workflow
            .complete_fetch(Ok(FetchOutput::Reports(vec![
                FakeSource::user("u1", "A"),
                FakeSource::user("u2", "B"),
            ])))
            .unwrap();

        workflow.input(ListInput::Up);
        workflow.input(ListInput::Down);
        workflow.input(ListInput::Down);
        workflow.input(ListInput::Down);

        match workflow.phase() {
            Phase::Listing { picker, .. } => assert_eq!(picker.cursor(), 1),
            other => panic!("expected listing, got {:?}", other),
        }
    }

    #[test]
    fn test_abort_from_listing() {
        let mut workflow = Workflow::new();
        workflow.start();
        workflow
            .complete_fetch(Ok(FetchOutput::Reports(vec![FakeSource::user("u1", "A")])))
            .unwrap();

        assert_eq!(workflow.input(ListInput::Abort), Effect::Finish);
        assert_eq!(workflow.outcome(), Some(Outcome::Aborted));
    }

    #[test]
    fn test_confirm_on_empty_list_is_no_selection() {
        let mut workflow = Workflow::new();
        workflow.start();
        workflow
            .complete_fetch(Ok(FetchOutput::Reports(Vec::new())))
            .unwrap();

        assert_eq!(workflow.input(ListInput::Down), Effect::AwaitInput);
        assert_eq!(workflow.input(ListInput::Confirm), Effect::Finish);
        assert_eq!(workflow.outcome(), Some(Outcome::NoSelection(Stage::Subject)));
    }

    #[test]
    fn test_fetch_error_is_fatal() {
        let mut workflow = Workflow::new();
        workflow.start();

        let err = workflow
            .complete_fetch(Err(WorkflowError::Fetch {
                stage: "direct reports",
                source: ApiError::EmptyApiKey,
            }))
            .unwrap_err();

        assert!(err.to_string().contains("direct reports"));
        assert_eq!(workflow.phase(), &Phase::Failed);
        assert_eq!(workflow.outcome(), None);
    }

    #[test]
    fn test_input_ignored_while_fetching() {
        let mut workflow = Workflow::new();
        workflow.start();

        assert_eq!(workflow.input(ListInput::Confirm), Effect::AwaitInput);
        assert_eq!(workflow.input(ListInput::Abort), Effect::AwaitInput);
        assert!(matches!(workflow.phase(), Phase::Fetching { .. }));
    }

    #[test]
    fn test_tick_advances_spinner() {
        let mut workflow = Workflow::new();
        workflow.start();
        let before = workflow.spinner().unwrap().glyph();

        workflow.tick();

        assert_ne!(workflow.spinner().unwrap().glyph(), before);
        assert_eq!(workflow.spinner().unwrap().label(), "Loading direct reports");
    }

    #[test]
    fn test_mismatched_output_fails() {
        let mut workflow = Workflow::new();
        workflow.start();

        let result = workflow.complete_fetch(Ok(FetchOutput::Cycles(Vec::new())));

        assert!(result.is_err());
        assert_eq!(workflow.phase(), &Phase::Failed);
    }
}
