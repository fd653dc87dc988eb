//! Root application module.
//!
//! Contains the App component, the [`AppContext`] every component reads, and
//! the orchestration that ties navigation, module loading and notifications
//! together.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_use::use_media_query;
use wasm_bindgen_futures::spawn_local;

use crate::components::{BootScreen, NotificationHost, Shell};
use crate::config::{MOBILE_MEDIA_QUERY, NOTIFICATION_TTL_MS};
use crate::core::error::BootError;
use crate::core::{
    AdminApi, BootPhase, Coordinator, Gateway, Loaded, NotificationKind, NotificationQueue,
    PageKey, RenderTicket, load_session,
};
use crate::modules::{self, LoadOptions, ModuleData};
use crate::utils::{BrowserTransport, TaskHandle, dom};

/// What the content region renders.
pub type PageContent = Loaded<ModuleData>;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Constructed once in [`App`] and provided at the root; components read it
/// with `expect_context::<AppContext>()`. All fields are signals or stored
/// values, so the struct is `Copy`.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Backend access, present once boot has acquired a transport.
    pub api: StoredValue<Option<AdminApi>>,
    pub boot: RwSignal<BootPhase>,
    /// Current page, sidebar state and the active content region.
    pub coordinator: RwSignal<Coordinator<PageContent>>,
    pub notifications: RwSignal<NotificationQueue>,
    pub load_options: RwSignal<LoadOptions>,
    pub is_mobile: Signal<bool>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            api: StoredValue::new(None),
            boot: RwSignal::new(BootPhase::Starting),
            coordinator: RwSignal::new(Coordinator::new()),
            notifications: RwSignal::new(NotificationQueue::new()),
            load_options: RwSignal::new(LoadOptions::default()),
            is_mobile: use_media_query(MOBILE_MEDIA_QUERY.to_string()),
        }
    }

    pub fn api(&self) -> Option<AdminApi> {
        self.api.get_value()
    }

    /// Run the boot sequence: acquire the gateway, then load the session.
    ///
    /// Session loading cannot fail; only a missing browser environment can
    /// put boot into the failed state.
    pub fn start_boot(self) {
        self.boot.set(BootPhase::Starting);
        spawn_local(async move {
            let transport = match BrowserTransport::acquire() {
                Ok(transport) => transport,
                Err(e) => {
                    let err = BootError::from(e);
                    tracing::error!(error = %err, "boot failed");
                    self.boot.set(BootPhase::Failed(err.to_string()));
                    return;
                }
            };
            let api = AdminApi::new(Gateway::new(Arc::new(transport)));
            self.api.set_value(Some(api.clone()));

            let session = load_session(&api).await;
            tracing::info!("boot complete");
            self.boot.set(BootPhase::Ready(session));
        });
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn current_page(&self) -> PageKey {
        self.coordinator.with(|c| c.current_page())
    }

    /// Make `page` current and render it. Re-navigating re-renders.
    pub fn navigate(&self, page: PageKey) {
        let is_mobile = self.is_mobile.get_untracked();
        tracing::debug!(page = page.key(), "navigate");
        if let Some(ticket) = self
            .coordinator
            .try_update(|c| c.navigate(page, is_mobile))
            .flatten()
        {
            self.render(ticket);
        }
    }

    /// Re-render the current page from scratch.
    pub fn retry(&self) {
        if let Some(ticket) = self.coordinator.try_update(|c| c.retry()).flatten() {
            self.render(ticket);
        }
    }

    pub fn toggle_sidebar(&self) {
        let is_mobile = self.is_mobile.get_untracked();
        self.coordinator.update(|c| c.nav_mut().toggle_sidebar(is_mobile));
    }

    fn render(&self, ticket: RenderTicket) {
        let Some(api) = self.api() else {
            tracing::warn!(page = ticket.page.key(), "render requested before boot");
            return;
        };
        let ctx = *self;
        let options = self.load_options.get_untracked();
        spawn_local(async move {
            let result = modules::load(ticket.page, &api, options).await;
            let failure = result.as_ref().err().map(|e| e.to_string());
            let committed = ctx
                .coordinator
                .try_update(|c| c.commit(ticket, result.map_err(|e| e.to_string())))
                .unwrap_or(false);
            if committed && let Some(message) = failure {
                ctx.notify(
                    format!("Failed to load {}: {}", ticket.page.key(), message),
                    NotificationKind::Error,
                );
            }
        });
    }

    // ------------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------------

    /// Show a notification with the default lifetime.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) {
        self.notify_for(message, kind, NOTIFICATION_TTL_MS);
    }

    /// Show a notification for `ttl_ms`; `ttl_ms <= 0` keeps it until dismissed.
    pub fn notify_for(&self, message: impl Into<String>, kind: NotificationKind, ttl_ms: i64) {
        let now = dom::now_ms();
        self.notifications.update(|q| {
            q.enqueue(message, kind, ttl_ms, now);
        });
        if ttl_ms > 0 {
            let queue = self.notifications;
            TaskHandle::after(ttl_ms as u32, move || {
                queue.try_update(|q| q.expire(dom::now_ms()));
            })
            .detach();
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.notifications.update(|q| {
            q.dismiss(id);
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// App
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Starting,
    Ready,
    Failed,
}

/// Root application component.
///
/// - Creates and provides the [`AppContext`]
/// - Starts the boot sequence
/// - Switches between the boot screen, the boot error screen and the shell
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);
    ctx.start_boot();

    // Crossing into the mobile layout closes the sidebar overlay
    Effect::new(move |_| {
        let mobile = ctx.is_mobile.get();
        ctx.coordinator.update(|c| c.nav_mut().on_viewport_change(mobile));
    });

    let stage = Memo::new(move |_| {
        ctx.boot.with(|b| match b {
            BootPhase::Starting => Stage::Starting,
            BootPhase::Ready(_) => Stage::Ready,
            BootPhase::Failed(_) => Stage::Failed,
        })
    });

    view! {
        <ErrorBoundary
            fallback=|errors| {
                let message = errors
                    .get()
                    .into_iter()
                    .map(|(_, e)| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                view! {
                    <BootScreen
                        title="Something went wrong"
                        message=message
                        on_retry=Callback::new(move |_: ()| {
                            if let Some(window) = dom::window() {
                                let _ = window.location().reload();
                            }
                        })
                        retry_label="Reload Page"
                    />
                }
            }
        >
            {move || match stage.get() {
                Stage::Ready => view! { <Shell /> }.into_any(),
                Stage::Failed => {
                    let message = ctx
                        .boot
                        .with_untracked(|b| match b {
                            BootPhase::Failed(msg) => msg.clone(),
                            _ => String::new(),
                        });
                    view! {
                        <BootScreen
                            title="Unable to start the admin portal"
                            message=message
                            on_retry=Callback::new(move |_: ()| ctx.start_boot())
                            retry_label="Retry"
                        />
                    }
                    .into_any()
                }
                Stage::Starting => view! {
                    <BootScreen title="Loading admin portal..." message=String::new() />
                }
                .into_any(),
            }}
        </ErrorBoundary>
        <NotificationHost />
    }
}
