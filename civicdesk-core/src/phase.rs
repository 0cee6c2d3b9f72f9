use crate::field::FieldName;
use serde::{Deserialize, Serialize};

/// Which input the conversation is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "field", rename_all = "snake_case")]
pub enum ConversationPhase {
    CategorySelection,
    StructuredField(FieldName),
    FreeText,
    /// Terminal until reset.
    Completed,
}

impl ConversationPhase {
    pub fn label(self) -> &'static str {
        match self {
            ConversationPhase::CategorySelection => "category_selection",
            ConversationPhase::StructuredField(_) => "structured_field",
            ConversationPhase::FreeText => "free_text",
            ConversationPhase::Completed => "completed",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ConversationPhase::Completed
    }

    pub fn field(self) -> Option<FieldName> {
        match self {
            ConversationPhase::StructuredField(f) => Some(f),
            _ => None,
        }
    }
}

impl Default for ConversationPhase {
    fn default() -> Self {
        Self::CategorySelection
    }
}

impl std::fmt::Display for ConversationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationPhase::StructuredField(field) => write!(f, "structured_field({field})"),
            other => f.write_str(other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_completed_is_terminal() {
        assert!(ConversationPhase::Completed.is_terminal());
        assert!(!ConversationPhase::FreeText.is_terminal());
        assert!(!ConversationPhase::default().is_terminal());
    }

    #[test]
    fn field_is_set_for_structured_phases_only() {
        assert_eq!(
            ConversationPhase::StructuredField(FieldName::Location).field(),
            Some(FieldName::Location)
        );
        assert_eq!(ConversationPhase::FreeText.field(), None);
        assert_eq!(
            ConversationPhase::StructuredField(FieldName::ContactName).to_string(),
            "structured_field(contactName)"
        );
    }
}
