//! # Key Routing
//!
//! Turns a `TuiEvent` into the `Action` it means on the current screen.
//! List cursors are presentation state and are moved here directly; every
//! other change goes back to the core as an action.
//!
//! Global keys (outside the welcome screen and the biometric gate):
//!
//! ```text
//! Tab / Shift+Tab   cycle the bottom navigation tabs
//! d w s i b t p f g dashboard, wallet, send, insights, budget,
//!                   transactions, profile, funding sources, security
//! Esc               back
//! q                 quit
//! ```

use rust_decimal::Decimal;

use crate::core::action::Action;
use crate::core::screen::ScreenId;
use crate::core::state::{App, Handoff};
use crate::tui::TuiState;
use crate::tui::components::bottom_nav;
use crate::tui::event::TuiEvent;

/// Step used by `+`/`-` on the budget screen.
const BUDGET_STEP: Decimal = Decimal::TEN;

pub fn route(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    match app.current_screen() {
        ScreenId::Welcome => match event {
            TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(Action::Navigate(ScreenId::Dashboard)),
            TuiEvent::InputChar('q') | TuiEvent::Escape => Some(Action::Quit),
            _ => None,
        },
        ScreenId::BiometricAuth => match event {
            TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(Action::BeginAuthentication),
            TuiEvent::InputChar('m') => Some(Action::ToggleAuthMethod),
            TuiEvent::Escape => Some(Action::CancelAuthentication),
            _ => None,
        },
        screen => screen_keys(screen, event, app, tui).or_else(|| global_keys(screen, event)),
    }
}

fn screen_keys(
    screen: ScreenId,
    event: &TuiEvent,
    app: &App,
    tui: &mut TuiState,
) -> Option<Action> {
    match screen {
        ScreenId::Dashboard => {
            let contacts: Vec<_> = app.visible_contacts().iter().map(|c| c.id).collect();
            match event {
                TuiEvent::Submit => contacts
                    .get(tui.selected)
                    .map(|id| Action::NavigateWith(ScreenId::SendMoney, Handoff::Contact(*id))),
                TuiEvent::CursorLeft | TuiEvent::CursorRight => {
                    tui.selected = 0;
                    Some(Action::SelectContactTab(app.contact_tab.toggled()))
                }
                _ => move_cursor(tui, event, contacts.len()),
            }
        }
        ScreenId::SendMoney => match event {
            TuiEvent::InputChar(c) if c.is_ascii_digit() || *c == '.' => {
                let mut input = app.amount_input.clone();
                input.push(*c);
                Some(Action::SubmitAmount(input))
            }
            TuiEvent::Backspace => {
                let mut input = app.amount_input.clone();
                input.pop();
                Some(Action::SubmitAmount(input))
            }
            TuiEvent::CursorLeft => Some(Action::SelectSourceCurrency(app.source_currency.prev())),
            TuiEvent::CursorRight => Some(Action::SelectSourceCurrency(app.source_currency.next())),
            TuiEvent::CursorUp => {
                Some(Action::SelectRecipientCurrency(app.recipient_currency.prev()))
            }
            TuiEvent::CursorDown => {
                Some(Action::SelectRecipientCurrency(app.recipient_currency.next()))
            }
            TuiEvent::Submit => Some(Action::SendMoney),
            _ => None,
        },
        ScreenId::PaymentSuccess => match event {
            TuiEvent::Submit => Some(Action::Navigate(ScreenId::Dashboard)),
            _ => None,
        },
        ScreenId::Transactions => {
            let count = app.reference.transactions.len();
            match event {
                TuiEvent::Submit => app.reference.transactions.get(tui.selected).map(|t| {
                    Action::NavigateWith(ScreenId::TransactionDetail, Handoff::Transaction(t.id))
                }),
                _ => move_cursor(tui, event, count),
            }
        }
        ScreenId::TransactionDetail => match event {
            TuiEvent::InputChar('r') => {
                let transaction = app.selected_transaction()?;
                let contact = transaction.contact_id?;
                Some(Action::NavigateWith(
                    ScreenId::SendMoney,
                    Handoff::RepeatPayment {
                        contact,
                        amount: transaction.amount.abs(),
                    },
                ))
            }
            TuiEvent::Escape => Some(Action::Navigate(ScreenId::Transactions)),
            _ => None,
        },
        ScreenId::Wallet => match event {
            TuiEvent::Submit => app
                .balances
                .get(tui.selected)
                .map(|b| Action::SelectWalletCurrency(b.currency)),
            _ => move_cursor(tui, event, app.balances.len()),
        },
        ScreenId::Budget => {
            let categories = app.budget.categories();
            let step = match event {
                TuiEvent::InputChar('+') | TuiEvent::InputChar('=') => BUDGET_STEP,
                TuiEvent::InputChar('-') => -BUDGET_STEP,
                _ => return move_cursor(tui, event, categories.len()),
            };
            let category = categories.get(tui.selected)?;
            Some(Action::SetBudget {
                category: category.name.clone(),
                amount: category.budgeted.checked_add(step)?,
            })
        }
        ScreenId::FundingSources => match event {
            TuiEvent::Submit => app
                .reference
                .funding_sources
                .get(tui.selected)
                .map(|source| Action::SelectFundingSource(source.id)),
            _ => move_cursor(tui, event, app.reference.funding_sources.len()),
        },
        ScreenId::SecuritySettings => match event {
            TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(Action::SetGatingEnabled(
                !app.navigation.gating_enabled(),
            )),
            TuiEvent::InputChar('m') => Some(Action::ToggleAuthMethod),
            _ => None,
        },
        _ => None,
    }
}

fn global_keys(screen: ScreenId, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::NextTab => Some(Action::Navigate(bottom_nav::next_tab(screen))),
        TuiEvent::PrevTab => Some(Action::Navigate(bottom_nav::prev_tab(screen))),
        TuiEvent::Escape if screen != ScreenId::Dashboard => {
            Some(Action::Navigate(ScreenId::Dashboard))
        }
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar(c) => shortcut(*c).map(Action::Navigate),
        _ => None,
    }
}

fn shortcut(c: char) -> Option<ScreenId> {
    match c {
        'd' => Some(ScreenId::Dashboard),
        'w' => Some(ScreenId::Wallet),
        's' => Some(ScreenId::SendMoney),
        'i' => Some(ScreenId::Insights),
        'b' => Some(ScreenId::Budget),
        't' => Some(ScreenId::Transactions),
        'p' => Some(ScreenId::Profile),
        'f' => Some(ScreenId::FundingSources),
        'g' => Some(ScreenId::SecuritySettings),
        _ => None,
    }
}

/// Moves the list cursor; never produces an action.
fn move_cursor(tui: &mut TuiState, event: &TuiEvent, len: usize) -> Option<Action> {
    match event {
        TuiEvent::CursorUp => tui.selected = tui.selected.saturating_sub(1),
        TuiEvent::CursorDown if len > 0 => tui.selected = (tui.selected + 1).min(len - 1),
        _ => {}
    }
    None
}
