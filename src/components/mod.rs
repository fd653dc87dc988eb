//! UI components built with Leptos.
//!
//! - [`Shell`] - Sidebar, header and the content region (main entry point)
//! - [`builders`] - Stat cards, tables, badges, modals and other shared fragments
//! - [`icons`] - Centralized icon definitions (change theme here)
//! - [`notifications`] - Toast host fed by the shared notification queue
//! - [`pages`] - One screen per feature module

pub mod builders;
pub mod icons;
pub mod notifications;
pub mod pages;
pub mod shell;

pub use builders::BootScreen;
pub use notifications::NotificationHost;
pub use shell::Shell;
