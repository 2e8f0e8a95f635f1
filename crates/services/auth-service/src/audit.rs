//! Audit events emitted by the auth service.
//!
//! The service never logs through a global; it receives an [`AuditLog`] at
//! construction and reports every authentication-relevant outcome to it.

use tracing::{error, info, warn};

use domain::UserId;

/// Operation an audit event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Authenticate,
    ProfileLookup,
    PasswordChange,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Authenticate => "authenticate",
            AuditAction::ProfileLookup => "profile_lookup",
            AuditAction::PasswordChange => "password_change",
        }
    }
}

/// How the operation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
    Succeeded,
    /// Business rule rejection (bad password, inactive account...)
    Rejected { reason: String },
    /// Store or hashing failure
    Failed { error: String },
}

/// A structured audit record. Never carries passwords or hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub outcome: AuditOutcome,
    pub account: Option<String>,
    pub user_id: Option<UserId>,
}

impl AuditEvent {
    pub fn succeeded(action: AuditAction) -> Self {
        Self::new(action, AuditOutcome::Succeeded)
    }

    pub fn rejected(action: AuditAction, reason: impl ToString) -> Self {
        Self::new(
            action,
            AuditOutcome::Rejected {
                reason: reason.to_string(),
            },
        )
    }

    pub fn failed(action: AuditAction, error: impl ToString) -> Self {
        Self::new(
            action,
            AuditOutcome::Failed {
                error: error.to_string(),
            },
        )
    }

    fn new(action: AuditAction, outcome: AuditOutcome) -> Self {
        Self {
            action,
            outcome,
            account: None,
            user_id: None,
        }
    }

    pub fn account(mut self, account: &str) -> Self {
        self.account = Some(account.to_string());
        self
    }

    pub fn user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Sink for audit events.
pub trait AuditLog: Send + Sync {
    fn record(&self, event: &AuditEvent);
}

/// Writes audit events as `tracing` events on the `audit` target.
///
/// Successes log at `info`, rejections at `warn`, failures at `error`.
/// `account` and `user_id` are recorded only when the event carries them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAudit;

impl AuditLog for TracingAudit {
    fn record(&self, event: &AuditEvent) {
        let action = event.action.as_str();
        let account = event.account.as_deref();
        let user_id = event.user_id;

        match &event.outcome {
            AuditOutcome::Succeeded => {
                info!(target: "audit", action, account, user_id, "succeeded")
            }
            AuditOutcome::Rejected { reason } => {
                warn!(target: "audit", action, account, user_id, reason = %reason, "rejected")
            }
            AuditOutcome::Failed { error } => {
                error!(target: "audit", action, account, user_id, error = %error, "failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_builder_sets_fields() {
        let event = AuditEvent::rejected(AuditAction::Authenticate, "user is not active")
            .account("alice")
            .user(2);

        assert_eq!(event.action, AuditAction::Authenticate);
        assert_eq!(event.account.as_deref(), Some("alice"));
        assert_eq!(event.user_id, Some(2));
        assert_eq!(
            event.outcome,
            AuditOutcome::Rejected {
                reason: "user is not active".to_string()
            }
        );
    }

    #[test]
    fn test_tracing_audit_accepts_every_outcome() {
        let audit = TracingAudit;
        audit.record(&AuditEvent::succeeded(AuditAction::PasswordChange).user(1));
        audit.record(&AuditEvent::failed(AuditAction::ProfileLookup, "db down").user(1));
    }

    /// Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(event: &AuditEvent) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || TracingAudit.record(event));

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_absent_user_is_not_logged() {
        let output = capture(
            &AuditEvent::rejected(AuditAction::Authenticate, "user not found").account("nobody"),
        );

        assert!(output.contains("audit"));
        assert!(output.contains("nobody"));
        assert!(!output.contains("user_id"));
    }

    #[test]
    fn test_absent_account_is_not_logged() {
        let output = capture(&AuditEvent::succeeded(AuditAction::ProfileLookup).user(7));

        assert!(output.contains("user_id=7"));
        assert!(!output.contains("account"));
    }
}
