//! Core logic for the admin portal, independent of any view.
//!
//! This module provides:
//! - [`Gateway`] normalizing remote calls into [`Envelope`]s, and [`AdminApi`] on top
//! - [`Coordinator`] owning navigation and the active content region
//! - [`load_with_fallback`] implementing the remote-or-placeholder contract
//! - [`NotificationQueue`] and [`OptimisticList`] for UI-side state

pub mod api;
pub mod error;
pub mod gateway;
pub mod loader;
pub mod navigation;
pub mod notifications;
pub mod optimistic;
pub mod realtime;
pub mod session;
pub mod validation;

pub use api::{AdminApi, Page};
pub use gateway::{Call, Envelope, Gateway, Method, Transport, UploadFile};
pub use loader::{DataSource, Fallback, Loaded, load_with_fallback};
pub use navigation::{Coordinator, NavigationState, PageKey, RegionContent, RenderTicket};
pub use notifications::{Notification, NotificationKind, NotificationQueue};
pub use optimistic::{Keyed, OpId, OptimisticList};
pub use realtime::RealtimeHistory;
pub use session::{BootPhase, Session, load_session};

#[cfg(any(test, feature = "mock"))]
pub use gateway::MockTransport;
