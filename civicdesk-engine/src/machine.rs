//! The intake conversation state machine.
//!
//! Phases run CategorySelection -> StructuredField(description) ->
//! StructuredField(location) -> StructuredField(contactName) -> FreeText,
//! and any reply recognized as a completion jumps to Completed.
//!
//! The machine does no I/O. Every user action is split in two: `begin_*`
//! checks the gates, records the user turn and hands back a
//! [`PendingRequest`]; [`ConversationMachine::finish`] applies whatever the
//! remote call produced. At most one request is pending at a time, and a
//! request started before a reset is recognized by its token and dropped.

use civicdesk_core::category::Category;
use civicdesk_core::completion::is_completion;
use civicdesk_core::field::{ComplaintDraft, DraftField, FieldName, validate};
use civicdesk_core::phase::ConversationPhase;
use civicdesk_core::texts::{
    APOLOGY_RETRY, APOLOGY_RETRY_OR_RESTART, INITIAL_GREETING, RESET_GREETING,
};
use civicdesk_core::transcript::TranscriptLog;
use civicdesk_core::types::{Session, SessionToken, Turn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    Category(Category),
    Field(FieldName),
    FreeText,
}

impl RequestKind {
    fn apology(self) -> &'static str {
        match self {
            RequestKind::Field(_) => APOLOGY_RETRY,
            RequestKind::Category(_) | RequestKind::FreeText => APOLOGY_RETRY_OR_RESTART,
        }
    }
}

/// An outbound message the caller must deliver and then pass back to
/// [`ConversationMachine::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub token: SessionToken,
    pub kind: RequestKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Another request is still in flight.
    Busy,
    /// The action does not apply to the current phase (including Completed).
    WrongPhase(ConversationPhase),
    /// Free text was empty after trimming.
    EmptyMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The reply was applied; this is the phase after it.
    Advanced(ConversationPhase),
    /// Nothing happened: no turn, no request.
    Ignored(IgnoreReason),
    /// The value failed its local check. Nothing was recorded or sent.
    ValidationRejected(FieldName),
    /// The call failed; an apology turn was added and the phase is unchanged.
    TransportFailed(ConversationPhase),
    /// The reply belongs to a session that has since been reset. Dropped.
    StaleReply,
}

/// Result of a `begin_*` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Start {
    Send(PendingRequest),
    Skip(StepOutcome),
}

/// What the front end should offer next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentedInput {
    CategoryButtons(&'static [Category]),
    FieldForm {
        field: FieldName,
        value: String,
        can_submit: bool,
    },
    FreeTextBox,
    CompletedBanner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub input: PresentedInput,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub session: Session,
    pub phase: ConversationPhase,
    pub transcript: TranscriptLog,
    pub draft: ComplaintDraft,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    token: SessionToken,
    kind: RequestKind,
}

#[derive(Debug, Clone)]
pub struct ConversationMachine {
    session: Session,
    phase: ConversationPhase,
    transcript: TranscriptLog,
    draft: ComplaintDraft,
    in_flight: Option<InFlight>,
}

impl Default for ConversationMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationMachine {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            phase: ConversationPhase::CategorySelection,
            transcript: TranscriptLog::with_greeting(INITIAL_GREETING),
            draft: ComplaintDraft::default(),
            in_flight: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> &SessionToken {
        &self.session.token
    }

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    pub fn transcript(&self) -> &TranscriptLog {
        &self.transcript
    }

    pub fn draft(&self) -> &ComplaintDraft {
        &self.draft
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            session: self.session.clone(),
            phase: self.phase,
            transcript: self.transcript.clone(),
            draft: self.draft.clone(),
            busy: self.is_busy(),
        }
    }

    pub fn presented_input(&self) -> InputView {
        let busy = self.is_busy();
        let input = match self.phase {
            ConversationPhase::CategorySelection => PresentedInput::CategoryButtons(&Category::ALL),
            ConversationPhase::StructuredField(field) => {
                let value = self.draft.get(field).to_string();
                let can_submit = !busy && validate(field, &value);
                PresentedInput::FieldForm {
                    field,
                    value,
                    can_submit,
                }
            }
            ConversationPhase::FreeText => PresentedInput::FreeTextBox,
            ConversationPhase::Completed => PresentedInput::CompletedBanner,
        };
        InputView { input, busy }
    }

    /// Updates a draft slot. Never sends anything.
    pub fn set_draft(&mut self, key: impl Into<DraftField>, value: impl Into<String>) {
        self.draft.set(key, value);
    }

    pub fn begin_category(&mut self, category: Category) -> Start {
        if let Some(skip) = self.gate(|phase| phase == ConversationPhase::CategorySelection) {
            return Start::Skip(skip);
        }

        let message = category.value().to_string();
        self.transcript.push(Turn::user(message.clone()));
        self.dispatch(RequestKind::Category(category), message)
    }

    /// Submits `value` for `field`. The user turn reads `<label>: <value>`;
    /// the raw value is what gets sent.
    pub fn begin_field(&mut self, field: FieldName, value: &str) -> Start {
        if let Some(skip) = self.gate(|phase| phase == ConversationPhase::StructuredField(field)) {
            return Start::Skip(skip);
        }
        if !validate(field, value) {
            log::debug!("field {field} rejected locally");
            return Start::Skip(StepOutcome::ValidationRejected(field));
        }

        self.transcript
            .push(Turn::user(format!("{}: {}", field.turn_label(), value)));
        self.dispatch(RequestKind::Field(field), value.to_string())
    }

    /// Submits whatever the draft holds for the active field.
    pub fn begin_current_field(&mut self) -> Start {
        match self.phase.field() {
            Some(field) => {
                let value = self.draft.get(field).to_string();
                self.begin_field(field, &value)
            }
            None => Start::Skip(self.busy_or(IgnoreReason::WrongPhase(self.phase))),
        }
    }

    /// Free text is accepted in FreeText, and in a structured phase where it
    /// bypasses the remaining field prompts.
    pub fn begin_free_text(&mut self, text: &str) -> Start {
        let allowed = |phase: ConversationPhase| {
            matches!(
                phase,
                ConversationPhase::FreeText | ConversationPhase::StructuredField(_)
            )
        };
        if let Some(skip) = self.gate(allowed) {
            return Start::Skip(skip);
        }

        let text = text.trim();
        if text.is_empty() {
            return Start::Skip(StepOutcome::Ignored(IgnoreReason::EmptyMessage));
        }

        self.transcript.push(Turn::user(text));
        self.dispatch(RequestKind::FreeText, text.to_string())
    }

    /// Applies the result of a request started by a `begin_*` call.
    pub fn finish(&mut self, pending: PendingRequest, reply: anyhow::Result<String>) -> StepOutcome {
        let expected = InFlight {
            token: pending.token.clone(),
            kind: pending.kind,
        };
        if pending.token != self.session.token || self.in_flight.as_ref() != Some(&expected) {
            log::info!(
                "discarding stale reply for session {} (current {})",
                pending.token.short(),
                self.session.token.short()
            );
            return StepOutcome::StaleReply;
        }
        self.in_flight = None;

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!(
                    "{} request failed in {}: {e:#}",
                    kind_label(pending.kind),
                    self.phase
                );
                self.transcript.push(Turn::assistant(pending.kind.apology()));
                return StepOutcome::TransportFailed(self.phase);
            }
        };

        let completed = is_completion(&reply);
        self.transcript.push(Turn::assistant(reply));

        let next = match pending.kind {
            RequestKind::Category(_) => ConversationPhase::StructuredField(FieldName::first()),
            RequestKind::Field(field) => {
                self.draft.clear(field);
                if completed {
                    ConversationPhase::Completed
                } else {
                    field
                        .next()
                        .map(ConversationPhase::StructuredField)
                        .unwrap_or(ConversationPhase::FreeText)
                }
            }
            RequestKind::FreeText => {
                if completed {
                    ConversationPhase::Completed
                } else {
                    ConversationPhase::FreeText
                }
            }
        };

        self.set_phase(next);
        StepOutcome::Advanced(next)
    }

    /// Starts a fresh session from any phase, even with a request in flight.
    /// Returns the token that was retired.
    pub fn reset(&mut self) -> SessionToken {
        let retired = std::mem::replace(&mut self.session, Session::new());
        self.transcript = TranscriptLog::with_greeting(RESET_GREETING);
        self.draft = ComplaintDraft::default();
        self.in_flight = None;
        self.set_phase(ConversationPhase::CategorySelection);

        log::info!(
            "session reset: {} -> {}",
            retired.token.short(),
            self.session.token.short()
        );
        retired.token
    }

    fn gate(&self, allowed: impl Fn(ConversationPhase) -> bool) -> Option<StepOutcome> {
        if self.is_busy() {
            return Some(StepOutcome::Ignored(IgnoreReason::Busy));
        }
        if self.phase.is_terminal() || !allowed(self.phase) {
            return Some(StepOutcome::Ignored(IgnoreReason::WrongPhase(self.phase)));
        }
        None
    }

    fn busy_or(&self, reason: IgnoreReason) -> StepOutcome {
        if self.is_busy() {
            StepOutcome::Ignored(IgnoreReason::Busy)
        } else {
            StepOutcome::Ignored(reason)
        }
    }

    fn dispatch(&mut self, kind: RequestKind, message: String) -> Start {
        let token = self.session.token.clone();
        self.in_flight = Some(InFlight {
            token: token.clone(),
            kind,
        });
        log::debug!(
            "{} request started (session {}, {} bytes)",
            kind_label(kind),
            token.short(),
            message.len()
        );
        Start::Send(PendingRequest {
            token,
            kind,
            message,
        })
    }

    fn set_phase(&mut self, next: ConversationPhase) {
        if self.phase != next {
            log::info!("intake phase: {} -> {}", self.phase, next);
            self.phase = next;
        }
    }
}

fn kind_label(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Category(_) => "category",
        RequestKind::Field(_) => "field",
        RequestKind::FreeText => "free-text",
    }
}
