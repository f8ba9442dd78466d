//! Agent login.
//!
//! Back-office commands take an [`AgentSession`] so they cannot run without
//! a successful login. Public commands (flight lookup, status) do not.

use tracing::debug;

use crate::config::AgentConfig;
use crate::error::{Error, Result};

/// Proof that an agent logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSession {
    username: String,
}

impl AgentSession {
    /// Check credentials against the configured agent account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if either value does not match.
    pub fn login(account: &AgentConfig, username: &str, password: &str) -> Result<Self> {
        if username == account.username && password == account.password {
            debug!("Agent {username} logged in");
            Ok(Self {
                username: username.to_string(),
            })
        } else {
            debug!("Rejected login for {username:?}");
            Err(Error::InvalidCredentials)
        }
    }

    /// Name the agent logged in with.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_account() {
        let session = AgentSession::login(&AgentConfig::default(), "admin", "admin").unwrap();
        assert_eq!(session.username(), "admin");
    }

    #[test]
    fn test_wrong_password() {
        let err = AgentSession::login(&AgentConfig::default(), "admin", "hunter2").unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
    }

    #[test]
    fn test_wrong_username() {
        assert!(AgentSession::login(&AgentConfig::default(), "Admin", "admin").is_err());
        assert!(AgentSession::login(&AgentConfig::default(), "", "").is_err());
    }

    #[test]
    fn test_configured_account() {
        let account = AgentConfig {
            username: "desk".to_string(),
            password: "s3cret".to_string(),
        };
        assert!(AgentSession::login(&account, "desk", "s3cret").is_ok());
        assert!(AgentSession::login(&account, "admin", "admin").is_err());
    }
}
