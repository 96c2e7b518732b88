use std::fmt;

use uuid::Uuid;

/// Opaque session credential. Every meal operation is scoped by one.
///
/// Only presence is checked when a token comes in from a request, so a token
/// that no user holds is still a valid (empty) scope.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mints a fresh, globally unique token.
    pub fn issue() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accepts whatever the client presented as long as it is non-empty.
    pub fn from_presented(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix safe to put in logs.
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(8).collect();
        format!("{prefix}…")
    }
}

// Debug goes through `#[instrument]`, keep the full value out of it.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&self.redacted()).finish()
    }
}
