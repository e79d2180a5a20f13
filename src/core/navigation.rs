//! # Navigation
//!
//! Decides, for every requested screen change, whether the biometric gate
//! has to be passed first, and replays the original target once it clears.
//!
//! ```text
//!   request_navigate(sendMoney)            resolve_authentication(true)
//! dashboard ──────────────────▶ biometricAuth ──────────────────▶ sendMoney
//!                               pending = sendMoney      │
//!                                                        │ resolve_authentication(false)
//!                                                        ▼
//!                                                    dashboard
//! ```
//!
//! Every transition issues a new [`NavTicket`]. Work that completes later
//! (authentication, transfer confirmation) carries the ticket it was started
//! under and is dropped if the user has navigated since.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::screen::{FALLBACK_SCREEN, ScreenId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("unknown screen: {0}")]
    UnknownScreen(String),
    #[error("no authentication in progress (current screen: {current})")]
    NotAuthenticating { current: ScreenId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current: ScreenId,
    /// Only `Some` while `current == BiometricAuth`.
    pub pending_target: Option<ScreenId>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current: ScreenId::Welcome,
            pending_target: None,
        }
    }
}

/// Identifies the navigation state a delayed completion was scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavTicket(u64);

/// Where a declined or cancelled authentication sends the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Always the dashboard.
    #[default]
    Fallback,
    /// The screen the gated request was made from.
    ReturnToOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Arrived(ScreenId),
    /// Sent through the biometric gate; the target is held as pending.
    Redirected { target: ScreenId },
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthResolution {
    pub landed_on: ScreenId,
    /// Set only on success; the caller shows the confirmation exactly once.
    pub confirmed: bool,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    state: NavigationState,
    gating_enabled: bool,
    cancel_policy: CancelPolicy,
    /// Screen the last gated request came from, used by `ReturnToOrigin`.
    origin: Option<ScreenId>,
    ticket: u64,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(true, CancelPolicy::default())
    }
}

impl NavigationController {
    pub fn new(gating_enabled: bool, cancel_policy: CancelPolicy) -> Self {
        Self {
            state: NavigationState::default(),
            gating_enabled,
            cancel_policy,
            origin: None,
            ticket: 0,
        }
    }

    /// Start somewhere other than the welcome screen. A sensitive start
    /// screen still goes through the gate.
    pub fn starting_at(mut self, screen: ScreenId) -> Self {
        if screen != ScreenId::Welcome {
            self.request_navigate(screen);
        }
        self
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current(&self) -> ScreenId {
        self.state.current
    }

    pub fn pending_target(&self) -> Option<ScreenId> {
        self.state.pending_target
    }

    pub fn gating_enabled(&self) -> bool {
        self.gating_enabled
    }

    pub fn cancel_policy(&self) -> CancelPolicy {
        self.cancel_policy
    }

    pub fn ticket(&self) -> NavTicket {
        NavTicket(self.ticket)
    }

    /// True if nothing has navigated since `ticket` was issued.
    pub fn is_current(&self, ticket: NavTicket) -> bool {
        ticket.0 == self.ticket
    }

    pub fn request_navigate(&mut self, target: ScreenId) -> NavOutcome {
        let from = self.state.current;

        if target == ScreenId::BiometricAuth && from == ScreenId::BiometricAuth {
            debug!("Already on the biometric gate, ignoring");
            return NavOutcome::Unchanged;
        }

        if target.is_sensitive() && self.gating_enabled && from != ScreenId::BiometricAuth {
            info!("Navigation {} -> {} gated, redirecting to biometricAuth", from, target);
            self.origin = Some(from);
            self.transition(ScreenId::BiometricAuth, Some(target));
            return NavOutcome::Redirected { target };
        }

        info!("Navigation {} -> {}", from, target);
        self.origin = None;
        self.transition(target, None);
        NavOutcome::Arrived(target)
    }

    pub fn request_navigate_named(&mut self, name: &str) -> Result<NavOutcome, NavigationError> {
        let target: ScreenId = name.parse()?;
        Ok(self.request_navigate(target))
    }

    pub fn resolve_authentication(
        &mut self,
        succeeded: bool,
    ) -> Result<AuthResolution, NavigationError> {
        let current = self.state.current;
        if current != ScreenId::BiometricAuth {
            return Err(NavigationError::NotAuthenticating { current });
        }

        let origin = self.origin.take();
        let landed_on = if succeeded {
            self.state.pending_target.unwrap_or(FALLBACK_SCREEN)
        } else {
            match self.cancel_policy {
                CancelPolicy::Fallback => FALLBACK_SCREEN,
                CancelPolicy::ReturnToOrigin => origin
                    .filter(|screen| *screen != ScreenId::BiometricAuth)
                    .unwrap_or(FALLBACK_SCREEN),
            }
        };

        info!(
            "Authentication {} (pending: {:?}), landing on {}",
            if succeeded { "succeeded" } else { "declined" },
            self.state.pending_target,
            landed_on
        );
        self.transition(landed_on, None);

        Ok(AuthResolution {
            landed_on,
            confirmed: succeeded,
        })
    }

    pub fn set_gating_enabled(&mut self, enabled: bool) {
        info!("Biometric gating {}", if enabled { "enabled" } else { "disabled" });
        self.gating_enabled = enabled;
    }

    fn transition(&mut self, current: ScreenId, pending_target: Option<ScreenId>) {
        self.state = NavigationState {
            current,
            pending_target,
        };
        self.ticket += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(screen: ScreenId) -> NavigationController {
        let mut nav = NavigationController::new(false, CancelPolicy::Fallback);
        nav.request_navigate(screen);
        nav.set_gating_enabled(true);
        nav
    }

    #[test]
    fn test_starts_on_welcome() {
        let nav = NavigationController::default();
        assert_eq!(nav.state(), NavigationState::default());
        assert_eq!(nav.current(), ScreenId::Welcome);
        assert!(nav.pending_target().is_none());
    }

    #[test]
    fn test_non_sensitive_targets_arrive_immediately() {
        for from in ScreenId::ALL
            .into_iter()
            .filter(|s| *s != ScreenId::BiometricAuth)
        {
            for target in ScreenId::ALL.into_iter().filter(|s| !s.is_sensitive()) {
                let mut nav = on(from);
                let outcome = nav.request_navigate(target);
                assert_eq!(outcome, NavOutcome::Arrived(target), "{from} -> {target}");
                assert_eq!(nav.current(), target);
                assert!(nav.pending_target().is_none());
            }
        }
    }

    #[test]
    fn test_sensitive_targets_are_gated_then_replayed() {
        for target in [ScreenId::SendMoney, ScreenId::Profile, ScreenId::Transactions] {
            let mut nav = on(ScreenId::Dashboard);
            assert_eq!(nav.request_navigate(target), NavOutcome::Redirected { target });
            assert_eq!(nav.current(), ScreenId::BiometricAuth);
            assert_eq!(nav.pending_target(), Some(target));

            let resolution = nav.resolve_authentication(true).unwrap();
            assert_eq!(resolution.landed_on, target);
            assert!(resolution.confirmed);
            assert_eq!(nav.current(), target);
            assert!(nav.pending_target().is_none());
        }
    }

    #[test]
    fn test_dashboard_to_send_money_scenario() {
        let mut nav = on(ScreenId::Dashboard);
        nav.request_navigate_named("sendMoney").unwrap();
        assert_eq!(nav.current().name(), "biometricAuth");
        assert_eq!(nav.pending_target().map(ScreenId::name), Some("sendMoney"));
        nav.resolve_authentication(true).unwrap();
        assert_eq!(nav.current().name(), "sendMoney");
    }

    #[test]
    fn test_gating_disabled_goes_straight_through() {
        let mut nav = NavigationController::new(false, CancelPolicy::Fallback);
        assert_eq!(
            nav.request_navigate(ScreenId::Profile),
            NavOutcome::Arrived(ScreenId::Profile)
        );
        assert_eq!(nav.current(), ScreenId::Profile);
    }

    #[test]
    fn test_decline_always_falls_back_and_clears_pending() {
        for target in [ScreenId::SendMoney, ScreenId::Profile, ScreenId::Transactions] {
            let mut nav = on(ScreenId::Wallet);
            nav.request_navigate(target);
            let resolution = nav.resolve_authentication(false).unwrap();
            assert_eq!(resolution.landed_on, ScreenId::Dashboard);
            assert!(!resolution.confirmed);
            assert_eq!(nav.current(), ScreenId::Dashboard);
            assert!(nav.pending_target().is_none());
        }
    }

    #[test]
    fn test_decline_with_return_to_origin() {
        let mut nav = NavigationController::new(true, CancelPolicy::ReturnToOrigin);
        nav.request_navigate(ScreenId::Wallet);
        nav.request_navigate(ScreenId::SendMoney);
        let resolution = nav.resolve_authentication(false).unwrap();
        assert_eq!(resolution.landed_on, ScreenId::Wallet);
    }

    #[test]
    fn test_return_to_origin_without_origin_falls_back() {
        let mut nav = NavigationController::new(true, CancelPolicy::ReturnToOrigin);
        nav.request_navigate(ScreenId::BiometricAuth);
        let resolution = nav.resolve_authentication(false).unwrap();
        assert_eq!(resolution.landed_on, ScreenId::Dashboard);
    }

    #[test]
    fn test_success_without_pending_goes_to_dashboard() {
        let mut nav = NavigationController::default();
        nav.request_navigate(ScreenId::BiometricAuth);
        assert!(nav.pending_target().is_none());
        let resolution = nav.resolve_authentication(true).unwrap();
        assert_eq!(resolution.landed_on, ScreenId::Dashboard);
        assert!(resolution.confirmed);
    }

    #[test]
    fn test_requesting_gate_while_on_gate_is_a_no_op() {
        let mut nav = on(ScreenId::Dashboard);
        nav.request_navigate(ScreenId::SendMoney);
        let ticket = nav.ticket();
        assert_eq!(nav.request_navigate(ScreenId::BiometricAuth), NavOutcome::Unchanged);
        assert_eq!(nav.current(), ScreenId::BiometricAuth);
        assert_eq!(nav.pending_target(), Some(ScreenId::SendMoney));
        assert!(nav.is_current(ticket));
    }

    #[test]
    fn test_gate_never_gates_into_itself() {
        let mut nav = on(ScreenId::Dashboard);
        nav.request_navigate(ScreenId::Profile);
        // Leaving the gate towards a sensitive screen is a single direct hop.
        assert_eq!(
            nav.request_navigate(ScreenId::Transactions),
            NavOutcome::Arrived(ScreenId::Transactions)
        );
        assert_eq!(nav.current(), ScreenId::Transactions);
        assert!(nav.pending_target().is_none());
    }

    #[test]
    fn test_resolve_outside_gate_is_rejected() {
        let mut nav = on(ScreenId::Dashboard);
        let err = nav.resolve_authentication(true).unwrap_err();
        assert_eq!(
            err,
            NavigationError::NotAuthenticating {
                current: ScreenId::Dashboard
            }
        );
        assert_eq!(nav.current(), ScreenId::Dashboard);
    }

    #[test]
    fn test_unknown_named_target_leaves_state_alone() {
        let mut nav = on(ScreenId::Insights);
        let ticket = nav.ticket();
        assert!(nav.request_navigate_named("login").is_err());
        assert_eq!(nav.current(), ScreenId::Insights);
        assert!(nav.is_current(ticket));
    }

    #[test]
    fn test_every_transition_invalidates_old_tickets() {
        let mut nav = on(ScreenId::Dashboard);
        let before = nav.ticket();
        nav.request_navigate(ScreenId::Insights);
        assert!(!nav.is_current(before));
        let mid = nav.ticket();
        nav.request_navigate(ScreenId::Wallet);
        assert!(!nav.is_current(mid));
        assert!(nav.ticket() > mid);
    }

    #[test]
    fn test_gating_toggle_applies_to_next_request_only() {
        let mut nav = on(ScreenId::Dashboard);
        nav.request_navigate(ScreenId::SendMoney);
        nav.set_gating_enabled(false);
        // In-flight gate still resolves to the stored target.
        assert_eq!(nav.pending_target(), Some(ScreenId::SendMoney));
        nav.resolve_authentication(true).unwrap();
        assert_eq!(nav.current(), ScreenId::SendMoney);
        nav.request_navigate(ScreenId::Dashboard);
        assert_eq!(
            nav.request_navigate(ScreenId::Profile),
            NavOutcome::Arrived(ScreenId::Profile)
        );
    }

    #[test]
    fn test_starting_at_sensitive_screen_goes_through_gate() {
        let nav = NavigationController::default().starting_at(ScreenId::Profile);
        assert_eq!(nav.current(), ScreenId::BiometricAuth);
        assert_eq!(nav.pending_target(), Some(ScreenId::Profile));
    }
}
