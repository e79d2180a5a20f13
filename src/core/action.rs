//! # Actions
//!
//! Everything that can happen in Munir becomes an `Action`.
//! User picks a screen? That's `Action::Navigate(screen)`.
//! Biometric scan comes back? That's `Action::AuthenticationFinished`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing any I/O the
//! presentation layer has to start. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Delayed completions carry the [`NavTicket`] they were started under.
//! Anything that arrives after the user has moved on is dropped.

use std::time::Duration;

use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::auth::{AuthMethod, AuthOutcome, AuthSession};
use crate::core::conversion::{CurrencyCode, accepts_amount_input, format_money, parse_amount};
use crate::core::navigation::{NavOutcome, NavTicket};
use crate::core::reference::{ContactId, FundingSourceId};
use crate::core::screen::ScreenId;
use crate::core::state::{App, ContactTab, Handoff, PendingTransfer, ToastKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(ScreenId),
    /// Navigate and hand the destination a typed payload.
    NavigateWith(ScreenId, Handoff),
    SetGatingEnabled(bool),
    SetAuthMethod(AuthMethod),
    ToggleAuthMethod,
    BeginAuthentication,
    AuthenticationFinished {
        ticket: NavTicket,
        outcome: AuthOutcome,
    },
    CancelAuthentication,
    SubmitAmount(String),
    SelectSourceCurrency(CurrencyCode),
    SelectRecipientCurrency(CurrencyCode),
    SelectWalletCurrency(CurrencyCode),
    SelectFundingSource(FundingSourceId),
    SelectContactTab(ContactTab),
    SendMoney,
    TransferSettled {
        ticket: NavTicket,
    },
    SetBudget {
        category: String,
        amount: Decimal,
    },
    DismissToast,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Run one attempt on the provider, then send `AuthenticationFinished`.
    Authenticate { ticket: NavTicket, method: AuthMethod },
    /// Wait `delay`, then send `TransferSettled`.
    ScheduleTransfer { ticket: NavTicket, delay: Duration },
    /// In-flight work was abandoned; abort its tasks.
    AbortPending,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Navigate(target) => navigate(app, target, None),
        Action::NavigateWith(target, handoff) => navigate(app, target, Some(handoff)),
        Action::SetGatingEnabled(enabled) => {
            app.navigation.set_gating_enabled(enabled);
            let message = if enabled {
                "Biometric authentication enabled"
            } else {
                "Biometric authentication disabled"
            };
            app.show_toast(ToastKind::Info, message);
            Effect::None
        }
        Action::SetAuthMethod(method) => set_auth_method(app, method),
        Action::ToggleAuthMethod => {
            let method = app.auth_method.toggled();
            set_auth_method(app, method)
        }
        Action::BeginAuthentication => begin_authentication(app),
        Action::AuthenticationFinished { ticket, outcome } => {
            if !app.navigation.is_current(ticket) || !app.auth_in_progress() {
                warn!("Discarding stale authentication result ({:?})", outcome);
                return Effect::None;
            }
            resolve_gate(app, outcome.succeeded(), "Biometric authentication failed");
            Effect::None
        }
        Action::CancelAuthentication => {
            if app.current_screen() != ScreenId::BiometricAuth {
                warn!("CancelAuthentication outside the biometric gate");
                return Effect::None;
            }
            let was_running = app.auth_in_progress();
            resolve_gate(app, false, "Authentication cancelled");
            if was_running {
                Effect::AbortPending
            } else {
                Effect::None
            }
        }
        Action::SubmitAmount(input) => {
            if accepts_amount_input(&input) {
                app.amount_input = input;
            } else {
                debug!("Rejected amount input {:?}", input);
            }
            Effect::None
        }
        Action::SelectSourceCurrency(currency) => {
            app.source_currency = currency;
            Effect::None
        }
        Action::SelectRecipientCurrency(currency) => {
            app.recipient_currency = currency;
            Effect::None
        }
        Action::SelectWalletCurrency(currency) => {
            if app.balance(currency).is_some() {
                app.wallet_currency = currency;
            } else {
                warn!("No {} wallet to activate", currency);
                app.show_toast(ToastKind::Warning, format!("No {currency} wallet"));
            }
            Effect::None
        }
        Action::SelectFundingSource(id) => {
            match app.reference.funding_source(id) {
                Some(source) => {
                    info!("Funding source set to {} {}", source.name, source.account_number);
                    let message = format!("Paying from {} {}", source.name, source.account_number);
                    app.funding_source = Some(id);
                    app.show_toast(ToastKind::Info, message);
                }
                None => {
                    warn!("Unknown funding source {}", id);
                    app.show_toast(ToastKind::Warning, "Funding source not found");
                }
            }
            Effect::None
        }
        Action::SelectContactTab(tab) => {
            app.contact_tab = tab;
            Effect::None
        }
        Action::SendMoney => send_money(app),
        Action::TransferSettled { ticket } => settle_transfer(app, ticket),
        Action::SetBudget { category, amount } => {
            match app.budget.set_budget(&category, amount) {
                Ok(()) => {
                    info!("Budget for {} set to {}", category, amount);
                    app.show_toast(
                        ToastKind::Info,
                        format!(
                            "Budget for {} set to {}",
                            category,
                            format_money(amount, CurrencyCode::USD)
                        ),
                    );
                }
                Err(e) => {
                    warn!("Rejected budget edit: {}", e);
                    app.show_toast(ToastKind::Warning, e.to_string());
                }
            }
            Effect::None
        }
        Action::DismissToast => {
            app.toast = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Toast text for a settled send: `$100.00 (₹8312.00) sent successfully!`.
pub fn sent_message(transfer: &PendingTransfer) -> String {
    let sent = format_money(transfer.amount, transfer.from);
    if transfer.from == transfer.to {
        format!("{sent} sent successfully!")
    } else {
        format!(
            "{sent} ({}) sent successfully!",
            format_money(transfer.converted, transfer.to)
        )
    }
}

fn navigate(app: &mut App, target: ScreenId, handoff: Option<Handoff>) -> Effect {
    let had_work = app.auth_in_progress() || app.transfer_in_flight();
    if app.navigation.request_navigate(target) == NavOutcome::Unchanged {
        return Effect::None;
    }
    app.handoff = handoff;
    after_transition(app);

    if had_work {
        info!("Navigating to {} abandoned work in flight", target);
        Effect::AbortPending
    } else {
        Effect::None
    }
}

/// Brings per-screen state in line with wherever navigation just landed.
fn after_transition(app: &mut App) {
    app.pending_transfer = None;
    let current = app.current_screen();
    if current == ScreenId::BiometricAuth {
        app.auth_session = Some(AuthSession::new(app.auth_method));
    } else {
        app.auth_session = None;
        apply_handoff(app, current);
    }
}

fn apply_handoff(app: &mut App, landed_on: ScreenId) {
    let Some(handoff) = app.handoff.take() else {
        return;
    };
    match (landed_on, handoff) {
        (ScreenId::SendMoney, Handoff::Contact(id)) => select_recipient(app, id),
        (ScreenId::SendMoney, Handoff::RepeatPayment { contact, amount }) => {
            select_recipient(app, contact);
            app.amount_input = amount.abs().round_dp(2).to_string();
        }
        (ScreenId::TransactionDetail, Handoff::Transaction(id)) => {
            if app.reference.transaction(id).is_some() {
                app.selected_transaction = Some(id);
            } else {
                warn!("Handoff names unknown transaction {}", id);
                app.show_toast(ToastKind::Warning, "Transaction not found");
            }
        }
        (screen, handoff) => debug!("Dropping {:?} handoff on {}", handoff, screen),
    }
}

fn select_recipient(app: &mut App, id: ContactId) {
    match app.reference.contact(id) {
        Some(contact) => {
            app.recipient_currency = contact.currency;
            app.recipient = Some(id);
        }
        None => {
            warn!("Handoff names unknown contact {}", id);
            app.show_toast(ToastKind::Warning, "Contact not found");
        }
    }
}

fn set_auth_method(app: &mut App, method: AuthMethod) -> Effect {
    if app.auth_in_progress() {
        debug!("Ignoring auth method change during a scan");
        return Effect::None;
    }
    app.auth_method = method;
    if let Some(session) = app.auth_session.as_mut() {
        session.method = method;
    }
    Effect::None
}

fn begin_authentication(app: &mut App) -> Effect {
    let ticket = app.navigation.ticket();
    let current = app.navigation.current();
    let Some(session) = app.auth_session.as_mut() else {
        warn!("BeginAuthentication outside the biometric gate (on {})", current);
        return Effect::None;
    };
    if session.in_progress {
        debug!("Authentication already in progress, ignoring");
        return Effect::None;
    }
    session.in_progress = true;
    info!("Starting {} authentication", session.method);
    Effect::Authenticate {
        ticket,
        method: session.method,
    }
}

fn resolve_gate(app: &mut App, succeeded: bool, failure_message: &str) {
    match app.navigation.resolve_authentication(succeeded) {
        Ok(resolution) => {
            after_transition(app);
            if resolution.confirmed {
                app.show_toast(ToastKind::Success, "Biometric authentication successful");
            } else {
                app.show_toast(ToastKind::Warning, failure_message);
            }
        }
        Err(e) => warn!("Could not resolve authentication: {}", e),
    }
}

fn send_money(app: &mut App) -> Effect {
    if app.current_screen() != ScreenId::SendMoney {
        warn!("SendMoney outside the send screen (on {})", app.current_screen());
        return Effect::None;
    }
    if app.transfer_in_flight() {
        debug!("Transfer already in flight, ignoring");
        return Effect::None;
    }

    let Some(amount) = parse_amount(&app.amount_input).filter(|a| !a.is_zero()) else {
        app.show_toast(ToastKind::Warning, "Enter a valid amount");
        return Effect::None;
    };

    let (from, to, wallet) = (app.source_currency, app.recipient_currency, app.wallet_currency);
    let priced = app.engine.convert(amount, from, to).and_then(|sent| {
        let debit = app.engine.convert(amount, from, wallet)?;
        Ok((sent.converted_amount, debit.converted_amount))
    });
    let (converted, debit) = match priced {
        Ok(pair) => pair,
        Err(e) => {
            warn!("Could not price transfer: {}", e);
            app.show_toast(ToastKind::Warning, e.to_string());
            return Effect::None;
        }
    };

    if debit > app.wallet_balance() {
        app.show_toast(
            ToastKind::Warning,
            format!("Insufficient {wallet} balance"),
        );
        return Effect::None;
    }

    let ticket = app.navigation.ticket();
    info!("Scheduling transfer of {} {} -> {} {}", amount, from, converted, to);
    app.pending_transfer = Some(PendingTransfer {
        amount,
        from,
        to,
        converted,
        recipient: app.recipient,
        debit,
        wallet,
        funding_source: app.funding_source,
        ticket,
    });
    Effect::ScheduleTransfer {
        ticket,
        delay: app.transfer_delay,
    }
}

fn settle_transfer(app: &mut App, ticket: NavTicket) -> Effect {
    let matches = app
        .pending_transfer
        .as_ref()
        .is_some_and(|p| p.ticket == ticket);
    if !matches || !app.navigation.is_current(ticket) {
        warn!("Discarding stale transfer confirmation");
        return Effect::None;
    }
    let Some(transfer) = app.pending_transfer.take() else {
        return Effect::None;
    };

    if let Some(wallet) = app
        .balances
        .iter_mut()
        .find(|b| b.currency == transfer.wallet)
    {
        wallet.balance -= transfer.debit;
    }

    let message = sent_message(&transfer);
    info!("{}", message);
    app.completed_transfer = Some(transfer);
    navigate(app, ScreenId::PaymentSuccess, None);
    app.show_toast(ToastKind::Success, message);
    Effect::None
}
