use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use civicdesk_core::category::Category;
use civicdesk_core::field::{DraftField, FieldName};

use crate::machine::{ConversationMachine, InputView, MachineSnapshot, Start, StepOutcome};
use crate::traits::RemoteChat;

/// One complaint conversation bound to a remote assistant.
///
/// Cloning shares the same session. The machine lock is never held across a
/// network call, so `reset` and `snapshot` stay responsive while a request
/// is pending; the machine's in-flight slot is what keeps actions serial.
#[derive(Clone)]
pub struct IntakeSession {
    machine: Arc<Mutex<ConversationMachine>>,
    remote: Arc<dyn RemoteChat>,
}

impl IntakeSession {
    pub fn new(remote: Arc<dyn RemoteChat>) -> Self {
        Self {
            machine: Arc::new(Mutex::new(ConversationMachine::new())),
            remote,
        }
    }

    pub async fn select_category(&self, category: Category) -> StepOutcome {
        let start = self.machine.lock().await.begin_category(category);
        self.drive(start).await
    }

    pub async fn submit_field(&self, field: FieldName, value: &str) -> StepOutcome {
        let start = self.machine.lock().await.begin_field(field, value);
        self.drive(start).await
    }

    /// Submits the draft value of whichever field is currently prompted.
    pub async fn submit_current_field(&self) -> StepOutcome {
        let start = self.machine.lock().await.begin_current_field();
        self.drive(start).await
    }

    pub async fn send_free_text(&self, text: &str) -> StepOutcome {
        let start = self.machine.lock().await.begin_free_text(text);
        self.drive(start).await
    }

    pub async fn set_draft(&self, key: impl Into<DraftField>, value: impl Into<String>) {
        self.machine.lock().await.set_draft(key, value);
    }

    /// Resets locally right away, then tells the service in the background.
    ///
    /// The returned handle resolves once the remote reset call is done; its
    /// outcome is only logged. Dropping the handle does not cancel the call.
    pub async fn reset(&self) -> JoinHandle<()> {
        self.machine.lock().await.reset();

        let remote = Arc::clone(&self.remote);
        tokio::spawn(async move {
            if let Err(e) = remote.reset().await {
                log::warn!("remote reset failed (ignored): {e:#}");
            }
        })
    }

    pub async fn snapshot(&self) -> MachineSnapshot {
        self.machine.lock().await.snapshot()
    }

    pub async fn view(&self) -> InputView {
        self.machine.lock().await.presented_input()
    }

    async fn drive(&self, start: Start) -> StepOutcome {
        let pending = match start {
            Start::Send(pending) => pending,
            Start::Skip(outcome) => {
                log::debug!("action skipped: {outcome:?}");
                return outcome;
            }
        };

        let reply = self.remote.send(&pending.message, &pending.token).await;

        let outcome = self.machine.lock().await.finish(pending, reply);
        log::debug!("action finished: {outcome:?}");
        outcome
    }
}
