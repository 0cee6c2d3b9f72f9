use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Correlation key sent as `session_id` with every chat request.
///
/// This is not a credential; it only has to be unique within the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(pub String);

impl SessionToken {
    const SUFFIX_LEN: usize = 9;

    /// `session_<unix ms>_<random suffix>`.
    pub fn new() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!(
            "session_{}_{}",
            unix_ms_now(),
            &suffix[..Self::SUFFIX_LEN]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for log lines.
    pub fn short(&self) -> &str {
        let s = self.as_str();
        match s.char_indices().nth(24) {
            Some((idx, _)) => &s[..idx],
            None => s,
        }
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The one live conversation of a client instance. Replaced wholesale on reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: SessionToken,
    pub created_at_unix_ms: i64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            token: SessionToken::new(),
            created_at_unix_ms: unix_ms_now(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Whether rendering should style this turn as the "complaint submitted" reply.
    /// User turns never qualify, whatever they contain.
    pub fn is_completion(&self) -> bool {
        self.role == Role::Assistant && crate::completion::is_completion(&self.content)
    }
}

pub fn unix_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().try_into().unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn token_has_expected_shape() {
        let t = SessionToken::new();
        let parts: Vec<&str> = t.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn tokens_do_not_repeat() {
        let tokens: HashSet<SessionToken> = (0..1_000).map(|_| SessionToken::new()).collect();
        assert_eq!(tokens.len(), 1_000);
    }

    #[test]
    fn user_turn_is_never_a_completion() {
        let text = "Thank you! Your complaint has been recorded and submitted. We will look into this issue and get back to you soon.";
        assert!(!Turn::user(text).is_completion());
        assert!(Turn::assistant(text).is_completion());
    }

    #[test]
    fn short_token_is_a_prefix() {
        let t = SessionToken::new();
        assert!(t.as_str().starts_with(t.short()));
        assert_eq!(SessionToken("abc".into()).short(), "abc");
    }
}
