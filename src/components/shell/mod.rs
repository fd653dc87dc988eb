//! Application shell: sidebar, header and the single content region.
//!
//! The shell is mounted once boot is ready. It owns the content region: the
//! region registers itself with the coordinator when it mounts, which
//! triggers the first navigation, and unregisters on cleanup so in-flight
//! loads cannot write into a region that no longer exists.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::{AppContext, PageContent};
use crate::components::builders::{Badge, ErrorState, Spinner, Tone};
use crate::components::icons as ic;
use crate::components::pages;
use crate::config::{APP_NAME, APP_VERSION};
use crate::core::error::ModuleError;
use crate::core::navigation::ActiveRegion;
use crate::core::{PageKey, RegionContent};
use crate::models::SystemStatus;

stylance::import_crate_style!(css, "src/components/shell/shell.module.css");

#[component]
pub fn Shell() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let nav = Memo::new(move |_| ctx.coordinator.with(|c| *c.nav()));

    let layout_class = move || {
        let nav = nav.get();
        let mut class = css::layout.to_string();
        if nav.sidebar_collapsed {
            class.push(' ');
            class.push_str(css::collapsed);
        }
        if nav.sidebar_open {
            class.push(' ');
            class.push_str(css::sidebarOpen);
        }
        class
    };

    view! {
        <div class=layout_class>
            <Sidebar />
            <div
                class=css::overlay
                on:click=move |_| ctx.coordinator.update(|c| c.nav_mut().sidebar_open = false)
            ></div>
            <div class=css::main>
                <Header />
                <PageRegion />
            </div>
        </div>
    }
}

// ============================================================================
// Sidebar
// ============================================================================

#[component]
fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let current = Memo::new(move |_| ctx.coordinator.with(|c| c.current_page()));

    view! {
        <aside class=css::sidebar>
            <div class=css::brand>
                <span class=css::brandMark>"AL"</span>
                <span class=css::brandName>{APP_NAME}</span>
            </div>
            <nav class=css::menu>
                {PageKey::ALL
                    .into_iter()
                    .map(|page| {
                        let class = move || {
                            if current.get() == page {
                                format!("{} {}", css::menuItem, css::menuItemActive)
                            } else {
                                css::menuItem.to_string()
                            }
                        };
                        view! {
                            <button
                                class=class
                                title=page.nav_label()
                                data-page=page.key()
                                on:click=move |_| ctx.navigate(page)
                            >
                                <Icon icon=ic::page(page) />
                                <span class=css::menuLabel>{page.nav_label()}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class=css::sidebarFooter>{format!("v{}", APP_VERSION)}</div>
        </aside>
    }
}

// ============================================================================
// Header
// ============================================================================

/// Badge tone for the system status indicator.
pub(crate) fn status_tone(status: SystemStatus) -> Tone {
    match status {
        SystemStatus::Operational => Tone::Success,
        SystemStatus::Degraded | SystemStatus::Maintenance => Tone::Warning,
        SystemStatus::Down => Tone::Danger,
        SystemStatus::Unknown => Tone::Neutral,
    }
}

#[component]
fn Header() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let title = Memo::new(move |_| ctx.coordinator.with(|c| c.current_page().title()));
    let session = Memo::new(move |_| ctx.boot.with(|b| b.session().cloned()));

    let admin = move || {
        session.get().map(|s| {
            view! {
                <div class=css::admin>
                    <span class=css::avatar>{s.admin.avatar_text()}</span>
                    <div class=css::adminText>
                        <span class=css::adminName>{s.admin.name.clone()}</span>
                        <span class=css::adminRole>{s.admin.role.clone()}</span>
                    </div>
                </div>
            }
        })
    };
    let status = move || {
        session.get().map(|s| {
            let tone = status_tone(s.system_status);
            view! {
                <span class=css::status title="System status">
                    <Badge text=s.system_status.label() tone=tone />
                </span>
            }
        })
    };

    view! {
        <header class=css::header>
            <button
                class=css::menuToggle
                title="Toggle sidebar"
                on:click=move |_| ctx.toggle_sidebar()
            >
                <Icon icon=ic::MENU />
            </button>
            <h1 class=css::title>{title}</h1>
            <div class=css::headerRight>
                {status}
                {admin}
            </div>
        </header>
    }
}

// ============================================================================
// Content region
// ============================================================================

#[component]
fn PageRegion() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    ctx.coordinator.update(|c| c.mount_region());
    ctx.navigate(ctx.coordinator.with_untracked(|c| c.current_page()));
    on_cleanup(move || {
        ctx.coordinator.try_update(|c| c.unmount_region());
    });

    let region = Memo::new(move |_| ctx.coordinator.with(|c| c.region().cloned()));

    view! {
        <main class=css::content>
            <ErrorBoundary
                fallback=move |errors| {
                    let message = errors
                        .get()
                        .into_iter()
                        .map(|(_, e)| e.to_string())
                        .collect::<Vec<_>>()
                        .join("; ");
                    view! {
                        <ErrorState
                            message=message
                            on_retry=Callback::new(move |_: ()| ctx.retry())
                        />
                    }
                }
            >
                {move || region.get().map(render_region)}
            </ErrorBoundary>
        </main>
    }
}

fn render_region(region: ActiveRegion<PageContent>) -> Result<AnyView, ModuleError> {
    match region.content {
        RegionContent::Loading => Ok(view! { <Spinner /> }.into_any()),
        RegionContent::Failed(message) => Err(ModuleError::Render(message)),
        RegionContent::Ready(loaded) => {
            let sample = loaded.source.is_placeholder();
            Ok(view! {
                {sample.then(|| view! {
                    <div class=css::sampleNotice>
                        <Badge text="Sample data" tone=Tone::Warning />
                        <span>"The backend is unreachable; showing built-in sample data."</span>
                    </div>
                })}
                {pages::render(loaded.data)}
            }
            .into_any())
        }
    }
}
