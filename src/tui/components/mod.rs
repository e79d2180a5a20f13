//! # TUI Components
//!
//! Reusable pieces of chrome drawn around (or over) the active screen.
//! Screen bodies live in `tui::screens`; everything here is shared.
//!
//! ## Component Architecture
//!
//! All components are stateless and props-based: they receive the data they
//! show as struct fields and never reach into `App` themselves.
//! - `TitleBar`: Top status line with screen title, session clock, lock marker and activity
//! - `BottomNav`: Tab strip for the five primary screens
//! - `ToastView`: Transient notification floating over the bottom edge
//!
//! **Example:**
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! TitleBar::new(screen, session, gating_enabled, activity).render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! TitleBar::render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── title_bar.rs   (Top status bar)
//! ├── bottom_nav.rs  (Tab strip + tab cycling)
//! └── toast.rs       (Notification overlay)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod bottom_nav;
pub use bottom_nav::BottomNav;

mod toast;
pub use toast::ToastView;
