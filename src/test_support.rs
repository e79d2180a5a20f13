//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::{AuthMethod, AuthOutcome, AuthenticationProvider};
use crate::core::reference::ReferenceData;
use crate::core::state::App;

/// Answers attempts from a script, then succeeds once the script runs out.
/// Never sleeps.
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<AuthOutcome>>,
    attempts: AtomicUsize,
}

impl ScriptedProvider {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthenticationProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn attempt(&self, _method: AuthMethod) -> AuthOutcome {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(AuthOutcome::Succeeded)
    }
}

pub fn scripted_provider(outcomes: Vec<AuthOutcome>) -> Arc<ScriptedProvider> {
    Arc::new(ScriptedProvider {
        outcomes: Mutex::new(outcomes.into()),
        attempts: AtomicUsize::new(0),
    })
}

/// Creates a test App on the welcome screen with gating on and the
/// embedded sample data.
pub fn test_app() -> App {
    App::new(
        scripted_provider(Vec::new()),
        ReferenceData::embedded().unwrap(),
    )
    .unwrap()
}
