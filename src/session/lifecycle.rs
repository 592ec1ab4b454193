use crate::api::error::{ApiError, FailureKind};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed { kind: FailureKind, message: String },
}

/// Progress of one user-triggered action (analyze, chat send, ...).
///
/// The in-flight flag is advisory: views disable their trigger while it is
/// set, but `begin` does not refuse a second start.
#[derive(Debug, Clone, Default)]
pub struct RequestLifecycle {
    phase: RequestPhase,
}

impl RequestLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &RequestPhase {
        &self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == RequestPhase::InFlight
    }

    /// Marks the action as started and drops any earlier error.
    pub fn begin(&mut self) {
        self.phase = RequestPhase::InFlight;
    }

    pub fn succeed(&mut self) {
        self.phase = RequestPhase::Succeeded;
    }

    pub fn fail(&mut self, error: &ApiError) {
        self.phase = RequestPhase::Failed {
            kind: error.kind(),
            message: error.to_string(),
        };
    }

    /// A trigger refused before anything was sent.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.phase = RequestPhase::Failed {
            kind: FailureKind::Validation,
            message: message.into(),
        };
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            RequestPhase::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_clears_previous_error() {
        let mut lifecycle = RequestLifecycle::new();
        lifecycle.fail(&ApiError::Transport("refused".into()));
        assert_eq!(lifecycle.error(), Some("refused"));

        lifecycle.begin();
        assert!(lifecycle.is_in_flight());
        assert_eq!(lifecycle.error(), None);
    }

    #[test]
    fn failures_keep_their_kind() {
        let mut lifecycle = RequestLifecycle::new();
        lifecycle.begin();
        lifecycle.fail(&ApiError::application(None));
        assert_eq!(
            lifecycle.phase(),
            &RequestPhase::Failed { kind: FailureKind::Application, message: "Unknown error.".into() }
        );
        assert!(!lifecycle.is_in_flight());

        lifecycle.reject("Please upload an image before analyzing.");
        assert!(matches!(lifecycle.phase(), RequestPhase::Failed { kind: FailureKind::Validation, .. }));
    }
}
