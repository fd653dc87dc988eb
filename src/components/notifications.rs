//! Toast notifications rendered from the shared queue.
//!
//! The stylesheet is injected into `<head>` the first time a host mounts and
//! reused afterwards.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::NOTIFICATION_STYLE_ID;
use crate::core::Notification;
use crate::utils::dom;

const NOTIFICATION_CSS: &str = r#"
.notification-container {
    position: fixed;
    top: 20px;
    right: 20px;
    z-index: 10000;
    display: flex;
    flex-direction: column;
    gap: 10px;
    max-width: 400px;
}
.notification {
    display: flex;
    align-items: center;
    gap: 8px;
    padding: 12px 16px;
    background: white;
    border-radius: 8px;
    border-left: 4px solid var(--info, #3b82f6);
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
    animation: notification-slide-in 0.3s ease-out;
}
.notification-success { border-left-color: var(--success, #10b981); }
.notification-error { border-left-color: var(--error, #ef4444); }
.notification-warning { border-left-color: var(--warning, #f59e0b); }
.notification-info { border-left-color: var(--info, #3b82f6); }
.notification-message {
    flex: 1;
    font-size: 14px;
    color: var(--text, #374151);
}
.notification-close {
    display: flex;
    align-items: center;
    justify-content: center;
    width: 20px;
    height: 20px;
    padding: 0;
    border: none;
    background: none;
    color: var(--text-muted, #9ca3af);
    cursor: pointer;
}
@keyframes notification-slide-in {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
"#;

#[component]
pub fn NotificationHost() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    if dom::inject_style_once(NOTIFICATION_STYLE_ID, NOTIFICATION_CSS) {
        tracing::debug!("notification styles injected");
    }

    view! {
        <div class="notification-container" aria-live="polite">
            <For
                each=move || ctx.notifications.with(|q| q.records().to_vec())
                key=|n| n.id
                children=move |n| view! { <Toast notification=n /> }
            />
        </div>
    }
}

#[component]
fn Toast(notification: Notification) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let id = notification.id;
    let class = format!("notification notification-{}", notification.kind.as_str());

    view! {
        <div class=class role="alert">
            <Icon icon=ic::notification(notification.kind) />
            <span class="notification-message">{notification.message}</span>
            <button
                class="notification-close"
                title="Dismiss"
                on:click=move |_| ctx.dismiss(id)
            >
                <Icon icon=ic::CLOSE />
            </button>
        </div>
    }
}
