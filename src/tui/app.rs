//! Terminal driver for the selection workflow and the steps after it

use std::future::Future;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::ReviewSource;
use crate::error::WorkflowError;
use crate::workflow::{run_fetch, Effect, FetchOutput, ListInput, Outcome, Spinner, Workflow};

use super::views::{draw_screen, Screen};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Owns the terminal for the interactive part of a run.
///
/// Raw mode and the alternate screen are active from [`Tui::enter`] until
/// [`Tui::finish`]; a panic hook restores the terminal if something blows up
/// in between.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventStream,
    completed: Vec<String>,
    panic_guard: PanicHookGuard,
}

/// Chains `on_panic` in front of the current panic hook until restored
struct PanicHookGuard {
    restore: Box<dyn FnOnce() + Send>,
}

impl PanicHookGuard {
    fn install(on_panic: impl Fn() + Send + Sync + 'static) -> Self {
        let previous = Arc::new(std::panic::take_hook());
        let chained = Arc::clone(&previous);
        std::panic::set_hook(Box::new(move |info| {
            on_panic();
            (**chained)(info);
        }));

        let restore = Box::new(move || {
            // Dropping our hook releases its handle on `previous`
            drop(std::panic::take_hook());
            match Arc::try_unwrap(previous) {
                Ok(hook) => std::panic::set_hook(hook),
                Err(shared) => std::panic::set_hook(Box::new(move |info| (**shared)(info))),
            }
        });
        Self { restore }
    }

    fn restore(self) {
        (self.restore)();
    }
}

impl Tui {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let panic_guard = PanicHookGuard::install(|| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        });

        Ok(Self {
            terminal,
            events: EventStream::new(),
            completed: Vec::new(),
            panic_guard,
        })
    }

    /// Drive the selection workflow to a terminal state
    pub async fn run_workflow(
        &mut self,
        source: Arc<dyn ReviewSource>,
    ) -> Result<Outcome, WorkflowError> {
        let mut workflow = Workflow::new();
        let mut effect = workflow.start();

        loop {
            match effect {
                Effect::Fetch(request) => {
                    let label = request.label();
                    let source = Arc::clone(&source);
                    let handle =
                        tokio::spawn(async move { run_fetch(source.as_ref(), request).await });
                    let result = self.await_fetch(&mut workflow, handle).await;
                    if let Ok(output) = &result {
                        self.completed.push(done_label(&label, output));
                    }
                    effect = workflow.complete_fetch(result)?;
                }
                Effect::AwaitInput => {
                    draw(
                        &mut self.terminal,
                        Screen::Workflow {
                            workflow: &workflow,
                            completed: &self.completed,
                        },
                    )?;
                    match self.next_input().await? {
                        Some(input) => effect = workflow.input(input),
                        None => effect = Effect::AwaitInput,
                    }
                }
                Effect::Finish => break,
            }
        }

        match workflow.outcome() {
            Some(outcome) => {
                if let Outcome::Complete(selection) = &outcome {
                    self.completed.push(format!(
                        "Selected {} / {}",
                        selection.subject.name,
                        selection.cycle.name()
                    ));
                }
                Ok(outcome)
            }
            None => Err(WorkflowError::UnexpectedOutput("workflow")),
        }
    }

    /// Run `task` in the background behind a progress indicator
    pub async fn run_step<T, E, F>(&mut self, label: &str, task: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<WorkflowError> + Send + 'static,
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let mut spinner = Spinner::new(label);
        let mut handle = tokio::spawn(task);
        let mut tick = tokio::time::interval(TICK_INTERVAL);

        let result = loop {
            draw(
                &mut self.terminal,
                Screen::Progress {
                    spinner: &spinner,
                    completed: &self.completed,
                },
            )
            .map_err(WorkflowError::from)?;

            tokio::select! {
                joined = &mut handle => break joined.map_err(WorkflowError::from)?,
                _ = tick.tick() => spinner.advance(),
                Some(event) = self.events.next() => {
                    // Keys pressed while busy are discarded
                    event.map_err(WorkflowError::from)?;
                }
            }
        };

        if result.is_ok() {
            self.completed.push(label.to_string());
        }
        result
    }

    /// Restore the terminal and the previous panic hook, and hand back the
    /// completed step labels
    pub fn finish(mut self) -> io::Result<Vec<String>> {
        self.panic_guard.restore();
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(self.completed)
    }

    async fn await_fetch(
        &mut self,
        workflow: &mut Workflow,
        mut handle: JoinHandle<Result<FetchOutput, WorkflowError>>,
    ) -> Result<FetchOutput, WorkflowError> {
        let mut tick = tokio::time::interval(TICK_INTERVAL);

        loop {
            draw(
                &mut self.terminal,
                Screen::Workflow {
                    workflow,
                    completed: &self.completed,
                },
            )?;

            tokio::select! {
                joined = &mut handle => return joined?,
                _ = tick.tick() => workflow.tick(),
                Some(event) = self.events.next() => {
                    event?;
                }
            }
        }
    }

    /// Wait for the next key that means something to a list picker
    async fn next_input(&mut self) -> Result<Option<ListInput>, WorkflowError> {
        loop {
            match self.events.next().await {
                Some(Ok(Event::Key(key))) => {
                    if let Some(input) = map_key(key) {
                        return Ok(Some(input));
                    }
                }
                Some(Ok(Event::Resize(..))) => return Ok(None),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => {
                    debug!("terminal event stream closed");
                    return Ok(Some(ListInput::Abort));
                }
            }
        }
    }
}

fn draw(terminal: &mut Terminal<CrosstermBackend<Stdout>>, screen: Screen<'_>) -> io::Result<()> {
    terminal.draw(|frame| draw_screen(frame, &screen))?;
    Ok(())
}

fn done_label(label: &str, output: &FetchOutput) -> String {
    let count = match output {
        FetchOutput::Reports(reports) => reports.len(),
        FetchOutput::Cycles(cycles) => cycles.len(),
    };
    format!("{} ({} found)", label, count)
}

fn map_key(key: KeyEvent) -> Option<ListInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(ListInput::Abort),
        KeyCode::Char('q') | KeyCode::Esc => Some(ListInput::Abort),
        KeyCode::Up | KeyCode::Char('k') => Some(ListInput::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(ListInput::Down),
        KeyCode::Enter => Some(ListInput::Confirm),
        _ => None,
    }
}
