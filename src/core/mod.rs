//! # Core Application Logic
//!
//! This module contains Munir's wallet logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`screen`]: The closed set of screens and which of them are gated
//! - [`navigation`]: Screen changes and the biometric gate
//! - [`conversion`]: Currency codes, rate table and conversion
//! - [`budget`]: Per-category spend status and budget totals
//! - [`reference`]: Embedded sample data
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Layered configuration

pub mod action;
pub mod budget;
pub mod config;
pub mod conversion;
pub mod navigation;
pub mod reference;
pub mod screen;
pub mod state;

pub use action::{Action, Effect, update};
pub use state::App;
