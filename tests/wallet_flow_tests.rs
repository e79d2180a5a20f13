use std::sync::Arc;
use std::time::Duration;

use munir::auth::{AuthMethod, AuthOutcome, AuthenticationProvider, SimulatedBiometrics};
use munir::core::config::ResolvedConfig;
use munir::core::navigation::{CancelPolicy, NavTicket};
use munir::core::reference::ReferenceData;
use munir::core::screen::ScreenId;
use munir::core::state::Handoff;
use munir::core::{Action, App, Effect, update};
use rust_decimal::Decimal;
use tokio_test::{assert_pending, assert_ready, task};

// ============================================================================
// Helper Functions
// ============================================================================

/// App on the welcome screen with gating on and a simulated sensor.
fn create_test_app(config: &ResolvedConfig) -> App {
    let provider: Arc<dyn AuthenticationProvider> =
        Arc::new(SimulatedBiometrics::new(config.auth_delay));
    App::with_reference(provider, ReferenceData::embedded().unwrap(), config).unwrap()
}

fn expect_authenticate(effect: Effect) -> (NavTicket, AuthMethod) {
    match effect {
        Effect::Authenticate { ticket, method } => (ticket, method),
        other => panic!("expected Authenticate, got {other:?}"),
    }
}

fn expect_transfer(effect: Effect) -> (NavTicket, Duration) {
    match effect {
        Effect::ScheduleTransfer { ticket, delay } => (ticket, delay),
        other => panic!("expected ScheduleTransfer, got {other:?}"),
    }
}

/// Runs the scan the way the event loop would and feeds the result back.
async fn scan(app: &mut App) -> Effect {
    let (ticket, method) = expect_authenticate(update(app, Action::BeginAuthentication));
    let outcome = app.provider.attempt(method).await;
    update(app, Action::AuthenticationFinished { ticket, outcome })
}

// ============================================================================
// Gated Send Flow
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_send_to_contact_through_gate() {
    let mut app = create_test_app(&ResolvedConfig::default());
    assert_eq!(app.current_screen(), ScreenId::Welcome);

    update(&mut app, Action::Navigate(ScreenId::Dashboard));
    update(
        &mut app,
        Action::NavigateWith(ScreenId::SendMoney, Handoff::Contact(1)),
    );
    assert_eq!(app.current_screen(), ScreenId::BiometricAuth);
    assert_eq!(app.navigation.pending_target(), Some(ScreenId::SendMoney));

    assert_eq!(scan(&mut app).await, Effect::None);
    assert_eq!(app.current_screen(), ScreenId::SendMoney);
    assert_eq!(app.recipient, Some(1));

    let before = app.balance(app.wallet_currency).unwrap();
    let (ticket, delay) = expect_transfer(update(&mut app, Action::SendMoney));
    assert_eq!(delay, Duration::from_millis(2000));
    assert!(app.transfer_in_flight());

    tokio::time::sleep(delay).await;
    update(&mut app, Action::TransferSettled { ticket });

    assert_eq!(app.current_screen(), ScreenId::PaymentSuccess);
    assert_eq!(
        app.balance(app.wallet_currency).unwrap(),
        before - Decimal::new(10000, 2)
    );
    let toast = app.toast.as_ref().unwrap();
    assert!(toast.message.starts_with("$100.00"));
    assert!(toast.message.ends_with("sent successfully!"));
}

#[tokio::test(start_paused = true)]
async fn test_scan_takes_configured_delay() {
    let config = ResolvedConfig {
        auth_delay: Duration::from_millis(1500),
        ..ResolvedConfig::default()
    };
    let mut app = create_test_app(&config);
    update(&mut app, Action::Navigate(ScreenId::Profile));
    let (_, method) = expect_authenticate(update(&mut app, Action::BeginAuthentication));

    let provider = app.provider.clone();
    let mut attempt = task::spawn(async move { provider.attempt(method).await });
    assert_pending!(attempt.poll());

    tokio::time::advance(Duration::from_millis(1499)).await;
    assert_pending!(attempt.poll());

    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(assert_ready!(attempt.poll()), AuthOutcome::Succeeded);
}

// ============================================================================
// Stale Completions
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_late_scan_after_cancel_is_ignored() {
    let mut app = create_test_app(&ResolvedConfig::default());
    update(&mut app, Action::Navigate(ScreenId::Transactions));
    let (ticket, method) = expect_authenticate(update(&mut app, Action::BeginAuthentication));

    assert_eq!(
        update(&mut app, Action::CancelAuthentication),
        Effect::AbortPending
    );
    assert_eq!(app.current_screen(), ScreenId::Dashboard);

    let outcome = app.provider.attempt(method).await;
    update(&mut app, Action::AuthenticationFinished { ticket, outcome });
    assert_eq!(app.current_screen(), ScreenId::Dashboard);
}

#[tokio::test(start_paused = true)]
async fn test_leaving_send_screen_drops_transfer() {
    let config = ResolvedConfig {
        biometric_gating: false,
        ..ResolvedConfig::default()
    };
    let mut app = create_test_app(&config);
    update(&mut app, Action::Navigate(ScreenId::SendMoney));
    let before = app.wallet_balance();
    let (ticket, delay) = expect_transfer(update(&mut app, Action::SendMoney));

    assert_eq!(
        update(&mut app, Action::Navigate(ScreenId::Wallet)),
        Effect::AbortPending
    );
    tokio::time::sleep(delay).await;
    update(&mut app, Action::TransferSettled { ticket });

    assert_eq!(app.current_screen(), ScreenId::Wallet);
    assert_eq!(app.wallet_balance(), before);
    assert!(app.completed_transfer.is_none());
}

// ============================================================================
// Cancel Policy
// ============================================================================

#[test]
fn test_cancel_returns_to_origin_when_configured() {
    let config = ResolvedConfig {
        cancel_policy: CancelPolicy::ReturnToOrigin,
        start_screen: ScreenId::Wallet,
        ..ResolvedConfig::default()
    };
    let mut app = create_test_app(&config);
    update(&mut app, Action::Navigate(ScreenId::Profile));
    assert_eq!(app.current_screen(), ScreenId::BiometricAuth);

    update(&mut app, Action::CancelAuthentication);
    assert_eq!(app.current_screen(), ScreenId::Wallet);
}
