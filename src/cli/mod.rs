//! Interactive menu
//!
//! This module contains the numbered menu the user drives the tracker with:
//! command parsing in `menu` and the line-oriented session loop in `session`.

pub mod menu;
pub mod session;

// Re-export main types
pub use menu::{greeting, MenuCommand, MENU_TEXT};
pub use session::MenuSession;
