//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background Work
//!
//! The core never waits. When `update()` returns `Effect::Authenticate` or
//! `Effect::ScheduleTransfer`, the loop spawns a tokio task that posts one
//! action back over an mpsc channel. Abort handles are kept so that leaving
//! a screen (`Effect::AbortPending`) or quitting stops the task; a completion
//! that slips through anyway carries a stale ticket and is ignored by the core.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (scan, transfer or toast on screen): polls every ~80ms so
//!   completions and toast expiry show up promptly.
//! - **Idle**: sleeps up to 500ms, redraws on events and when the session
//!   clock in the title bar moves to the next second.

mod component;
mod components;
mod event;
mod input;
mod screens;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::auth::{AuthMethod, AuthenticationProvider, SimulatedBiometrics};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::navigation::NavTicket;
use crate::core::screen::ScreenId;
use crate::core::state::{App, Toast};
use crate::tui::event::{poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// Cursor of whichever list the current screen shows.
    pub selected: usize,
    screen: ScreenId,
    /// Serial of the toast on screen and when it first appeared.
    toast_seen: Option<(u64, Instant)>,
    /// Start of the session shown in the title bar.
    started: Instant,
    /// Whole seconds the clock showed on the last tick.
    shown_secs: u64,
}

impl TuiState {
    pub fn new(screen: ScreenId) -> Self {
        Self {
            selected: 0,
            screen,
            toast_seen: None,
            started: Instant::now(),
            shown_secs: 0,
        }
    }

    pub fn session_elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    /// True when the session clock shows a different second than last time.
    pub fn clock_ticked(&mut self, now: Instant) -> bool {
        let secs = self.session_elapsed(now).as_secs();
        if secs == self.shown_secs {
            return false;
        }
        self.shown_secs = secs;
        true
    }

    /// Resets the list cursor whenever the screen changes.
    pub fn sync_screen(&mut self, screen: ScreenId) {
        if screen != self.screen {
            self.screen = screen;
            self.selected = 0;
        }
    }

    /// True once `toast` has been on screen for `duration`. A toast with a
    /// new serial restarts the clock.
    pub fn toast_expired(&mut self, toast: Option<&Toast>, now: Instant, duration: Duration) -> bool {
        let Some(toast) = toast else {
            self.toast_seen = None;
            return false;
        };
        match self.toast_seen {
            Some((serial, since)) if serial == toast.serial => now.duration_since(since) >= duration,
            _ => {
                self.toast_seen = Some((toast.serial, now));
                false
            }
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Harmlessly ignored by terminals without the Kitty protocol
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Show);
    }
}

/// Build the authentication provider for a resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn AuthenticationProvider> {
    Arc::new(SimulatedBiometrics::new(config.auth_delay))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    info!("Using {} authentication provider", provider.name());
    let mut app = App::from_config(provider, &config).map_err(std::io::Error::other)?;
    let mut tui = TuiState::new(app.current_screen());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Abort handles for in-flight scans and transfers
    let mut active_abort_handles: Vec<AbortHandle> = Vec::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        tui.sync_screen(app.current_screen());

        let now = Instant::now();
        if tui.toast_expired(app.toast.as_ref(), now, app.toast_duration) {
            update(&mut app, Action::DismissToast);
            needs_redraw = true;
        }
        if tui.clock_ticked(now) {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &tui))?;
            needs_redraw = false;
        }

        let busy = app.auth_in_progress() || app.transfer_in_flight() || app.toast.is_some();
        let timeout = if busy {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            tui.sync_screen(app.current_screen());
            if let Some(action) = input::route(&event, &app, &mut tui) {
                let effect = update(&mut app, action);
                should_quit |= dispatch(effect, &app, &tx, &mut active_abort_handles);
            }
            if should_quit {
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (auth results, settled transfers)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            should_quit |= dispatch(effect, &app, &tx, &mut active_abort_handles);
        }

        if should_quit {
            break;
        }
    }

    for handle in active_abort_handles.drain(..) {
        handle.abort();
    }
    info!("Munir shutting down on {}", app.current_screen());

    ratatui::restore();
    Ok(())
}

/// Starts whatever background work an effect asks for. Returns true on quit.
fn dispatch(
    effect: Effect,
    app: &App,
    tx: &mpsc::Sender<Action>,
    handles: &mut Vec<AbortHandle>,
) -> bool {
    handles.retain(|h| !h.is_finished());
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::Authenticate { ticket, method } => {
            handles.push(spawn_authentication(
                app.provider.clone(),
                ticket,
                method,
                tx.clone(),
            ));
        }
        Effect::ScheduleTransfer { ticket, delay } => {
            handles.push(spawn_transfer(ticket, delay, tx.clone()));
        }
        Effect::AbortPending => {
            info!("Aborting {} background task(s)", handles.len());
            for handle in handles.drain(..) {
                handle.abort();
            }
        }
    }
    false
}

fn spawn_authentication(
    provider: Arc<dyn AuthenticationProvider>,
    ticket: NavTicket,
    method: AuthMethod,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning {} attempt on {}", method, provider.name());
    tokio::spawn(async move {
        let outcome = provider.attempt(method).await;
        if tx
            .send(Action::AuthenticationFinished { ticket, outcome })
            .is_err()
        {
            warn!("Failed to send authentication result: receiver dropped");
        }
    })
    .abort_handle()
}

fn spawn_transfer(ticket: NavTicket, delay: Duration, tx: mpsc::Sender<Action>) -> AbortHandle {
    info!("Spawning transfer confirmation ({}ms)", delay.as_millis());
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if tx.send(Action::TransferSettled { ticket }).is_err() {
            warn!("Failed to send transfer confirmation: receiver dropped");
        }
    })
    .abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthOutcome;
    use crate::core::navigation::NavigationController;
    use crate::core::state::ToastKind;
    use crate::test_support::{scripted_provider, test_app};

    fn toast(serial: u64) -> Toast {
        Toast {
            serial,
            message: "hi".to_string(),
            kind: ToastKind::Info,
        }
    }

    #[test]
    fn test_cursor_resets_on_screen_change() {
        let mut tui = TuiState::new(ScreenId::Wallet);
        tui.selected = 2;
        tui.sync_screen(ScreenId::Wallet);
        assert_eq!(tui.selected, 2);
        tui.sync_screen(ScreenId::Budget);
        assert_eq!(tui.selected, 0);
    }

    #[test]
    fn test_session_clock_ticks_once_per_second() {
        let mut tui = TuiState::new(ScreenId::Dashboard);
        let start = tui.started;

        assert!(!tui.clock_ticked(start + Duration::from_millis(400)));
        assert!(tui.clock_ticked(start + Duration::from_millis(1000)));
        assert!(!tui.clock_ticked(start + Duration::from_millis(1900)));
        assert!(tui.clock_ticked(start + Duration::from_secs(65)));
        assert_eq!(
            tui.session_elapsed(start + Duration::from_secs(65)),
            Duration::from_secs(65)
        );
    }

    #[test]
    fn test_toast_expiry() {
        let mut tui = TuiState::new(ScreenId::Dashboard);
        let start = Instant::now();
        let duration = Duration::from_millis(3000);
        let first = toast(1);

        assert!(!tui.toast_expired(Some(&first), start, duration));
        assert!(!tui.toast_expired(Some(&first), start + Duration::from_millis(2999), duration));
        assert!(tui.toast_expired(Some(&first), start + duration, duration));

        // A replacement toast gets its own full duration.
        let second = toast(2);
        assert!(!tui.toast_expired(Some(&second), start + duration, duration));
        assert!(!tui.toast_expired(None, start + duration, duration));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transfer_task_reports_after_delay() {
        let ticket = NavigationController::default().ticket();
        let (tx, rx) = mpsc::channel();
        spawn_transfer(ticket, Duration::from_millis(2000), tx);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().unwrap(), Action::TransferSettled { ticket });
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_transfer_never_reports() {
        let ticket = NavigationController::default().ticket();
        let (tx, rx) = mpsc::channel();
        let handle = spawn_transfer(ticket, Duration::from_millis(2000), tx);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_authentication_task_forwards_outcome() {
        let provider = scripted_provider(vec![AuthOutcome::Declined]);
        let ticket = NavigationController::default().ticket();
        let (tx, rx) = mpsc::channel();
        let handle = spawn_authentication(provider.clone(), ticket, AuthMethod::Face, tx);

        while !handle.is_finished() {
            tokio::task::yield_now().await;
        }
        assert_eq!(
            rx.try_recv().unwrap(),
            Action::AuthenticationFinished {
                ticket,
                outcome: AuthOutcome::Declined,
            }
        );
        assert_eq!(provider.attempts(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_abort_pending_clears_handles() {
        let app = test_app();
        let (tx, _rx) = mpsc::channel();
        let mut handles = Vec::new();
        let ticket = app.navigation.ticket();

        assert!(!dispatch(
            Effect::ScheduleTransfer {
                ticket,
                delay: Duration::from_secs(60),
            },
            &app,
            &tx,
            &mut handles,
        ));
        assert_eq!(handles.len(), 1);

        assert!(!dispatch(Effect::AbortPending, &app, &tx, &mut handles));
        assert!(handles.is_empty());
        assert!(dispatch(Effect::Quit, &app, &tx, &mut handles));
    }
}
