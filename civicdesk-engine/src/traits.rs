use async_trait::async_trait;
use civicdesk_core::types::SessionToken;

/// The complaint-intake assistant, seen from the client.
///
/// Its reasoning is opaque: a message goes in, a reply string comes out.
#[async_trait]
pub trait RemoteChat: Send + Sync {
    /// Sends one user message tagged with the session it belongs to.
    /// Any transport problem or non-success status is an `Err`.
    async fn send(&self, message: &str, session: &SessionToken) -> anyhow::Result<String>;

    /// Asks the service to drop its conversation state. The outcome is
    /// only logged by callers.
    async fn reset(&self) -> anyhow::Result<()>;
}
