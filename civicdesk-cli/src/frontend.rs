use civicdesk_core::category::Category;
use civicdesk_core::field::DraftField;
use civicdesk_core::phase::ConversationPhase;
use civicdesk_core::types::{Role, SessionToken, Turn};
use civicdesk_engine::machine::{IgnoreReason, InputView, MachineSnapshot, PresentedInput, StepOutcome};
use civicdesk_engine::session::IntakeSession;
use tokio::task::JoinHandle;

pub const HELP: &str = "\
Commands:
  /reset          start a new complaint
  /free <text>    skip the form and type freely
  /email <addr>   attach a contact email
  /phone <number> attach a contact phone number
  /help           show this help
  /quit           exit";

const COMPLETED_HINT: &str = "Your complaint has been submitted. Type /reset to file another one.";
const WAITING_HINT: &str = "(still waiting for the assistant; type /reset to start over)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Reset,
    Free(String),
    Draft(DraftField, String),
    Input(String),
}

/// `/name` or `/name <arg>`, but not `/names`.
fn argument<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then(|| rest.trim())
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();
    match trimmed {
        "/quit" | "/exit" => return Command::Quit,
        "/help" => return Command::Help,
        "/reset" | "/new" => return Command::Reset,
        _ => {}
    }
    if let Some(text) = argument(trimmed, "/free") {
        return Command::Free(text.to_string());
    }
    if let Some(email) = argument(trimmed, "/email") {
        return Command::Draft(DraftField::ContactEmail, email.to_string());
    }
    if let Some(phone) = argument(trimmed, "/phone") {
        return Command::Draft(DraftField::ContactPhone, phone.to_string());
    }
    Command::Input(line.to_string())
}

/// Accepts a 1-based index, a short id (`road`) or the full wire value.
pub fn pick_category(input: &str) -> Option<Category> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| Category::ALL.get(i).copied());
    }
    Category::from_id(input).or_else(|| Category::from_value(input))
}

fn render_turn(turn: &Turn) {
    let who = match turn.role {
        Role::Assistant if turn.is_completion() => "assistant ✓",
        Role::Assistant => "assistant",
        Role::User => "you",
    };
    println!("[{who}] {}", turn.content);
}

fn render_prompt(view: &InputView) {
    if view.busy {
        println!("(waiting for the assistant...)");
        return;
    }
    match &view.input {
        PresentedInput::CategoryButtons(categories) => {
            for (i, c) in categories.iter().enumerate() {
                println!("  {}. {} - {}", i + 1, c.title(), c.description());
            }
            println!("Pick a category (number or name):");
        }
        PresentedInput::FieldForm { field, .. } => {
            println!(
                "{} ({}, at least {} characters) [{}]",
                field.prompt_title(),
                field.placeholder(),
                field.min_len(),
                field.submit_label()
            );
        }
        PresentedInput::FreeTextBox => println!("Type your response:"),
        PresentedInput::CompletedBanner => println!("{COMPLETED_HINT}"),
    }
}

pub fn explain(outcome: StepOutcome) {
    match outcome {
        StepOutcome::ValidationRejected(field) => println!(
            "(too short: {} needs at least {} characters)",
            field.as_str(),
            field.min_len()
        ),
        StepOutcome::Ignored(IgnoreReason::WrongPhase(ConversationPhase::Completed)) => {
            println!("{COMPLETED_HINT}")
        }
        StepOutcome::Ignored(IgnoreReason::WrongPhase(ConversationPhase::CategorySelection)) => {
            println!("(pick a category first)")
        }
        StepOutcome::Ignored(IgnoreReason::Busy) => println!("{WAITING_HINT}"),
        StepOutcome::Ignored(reason) => log::debug!("input ignored: {reason:?}"),
        _ => {}
    }
}

/// Tracks which turns of which session are already on screen.
#[derive(Debug, Default)]
struct RenderCursor {
    token: Option<SessionToken>,
    shown: usize,
}

impl RenderCursor {
    /// Returns whether the session was replaced since the last call, and the
    /// turns not printed yet.
    fn advance<'a>(&mut self, snap: &'a MachineSnapshot) -> (bool, &'a [Turn]) {
        let turns = snap.transcript.turns();
        let mut restarted = false;
        if self.token.as_ref() != Some(&snap.session.token) {
            restarted = self.token.is_some();
            self.token = Some(snap.session.token.clone());
            self.shown = 0;
        }
        let fresh = &turns[self.shown.min(turns.len())..];
        self.shown = turns.len();
        (restarted, fresh)
    }
}

pub enum Flow {
    Continue,
    Quit,
}

/// Terminal front end. At most one session action runs at a time, on its
/// own task, so commands keep being read while a request is pending.
pub struct Frontend {
    session: IntakeSession,
    pending: Option<JoinHandle<Option<StepOutcome>>>,
    cursor: RenderCursor,
}

impl Frontend {
    pub fn new(session: IntakeSession) -> Self {
        Self {
            session,
            pending: None,
            cursor: RenderCursor::default(),
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    pub async fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => return Flow::Quit,
            Command::Help => println!("{HELP}"),
            Command::Reset => {
                // The reply of an aborted request would be discarded as stale.
                if let Some(pending) = self.pending.take() {
                    pending.abort();
                }
                let _ = self.session.reset().await;
            }
            Command::Draft(key, value) => {
                println!("({} saved)", key.label().to_lowercase());
                self.session.set_draft(key, value).await;
            }
            Command::Free(_) | Command::Input(_) if self.is_waiting() => {
                println!("{WAITING_HINT}")
            }
            Command::Free(text) => {
                let session = self.session.clone();
                self.pending = Some(tokio::spawn(async move {
                    Some(session.send_free_text(&text).await)
                }));
            }
            Command::Input(line) => {
                let session = self.session.clone();
                self.pending = Some(tokio::spawn(async move {
                    handle_input(&session, &line).await
                }));
            }
        }
        Flow::Continue
    }

    /// Resolves when the pending action finishes; never resolves when idle.
    /// Dropping the future leaves the action pending.
    pub async fn next_outcome(&mut self) -> Option<StepOutcome> {
        let Some(pending) = self.pending.as_mut() else {
            return std::future::pending().await;
        };
        let joined = pending.await;
        self.pending = None;
        match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("session action failed: {e}");
                None
            }
        }
    }

    /// Prints new turns and the current prompt. A replaced session is
    /// printed from its greeting on.
    pub async fn render(&mut self) {
        let snap = self.session.snapshot().await;
        let (restarted, fresh) = self.cursor.advance(&snap);
        if restarted {
            println!("---- new complaint ----");
        }
        for turn in fresh {
            render_turn(turn);
        }
        render_prompt(&self.session.view().await);
    }
}

async fn handle_input(session: &IntakeSession, line: &str) -> Option<StepOutcome> {
    let outcome = match session.view().await.input {
        PresentedInput::CategoryButtons(_) => {
            let Some(category) = pick_category(line) else {
                println!("(unknown category; try 1-4)");
                return None;
            };
            session.select_category(category).await
        }
        PresentedInput::FieldForm { field, .. } => {
            session.set_draft(field, line).await;
            session.submit_current_field().await
        }
        PresentedInput::FreeTextBox => session.send_free_text(line).await,
        PresentedInput::CompletedBanner => {
            println!("{COMPLETED_HINT}");
            return None;
        }
    };
    Some(outcome)
}
