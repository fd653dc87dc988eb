//! Dashboard: headline numbers, live activity and platform health.
//!
//! While mounted the page polls the realtime endpoint. The poll handle lives
//! in the page's scope and is cancelled on cleanup, so navigating away stops
//! the timer.

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use super::{PageHeader, css};
use crate::app::AppContext;
use crate::components::builders::{
    ActionButton, Badge, DataTable, IconButton, ProgressBar, StatCard, Tone,
};
use crate::components::icons as ic;
use crate::config::REALTIME_REFRESH_MS;
use crate::core::{BootPhase, NotificationKind, RealtimeHistory};
use crate::models::{DashboardData, ExportFormat, ExportKind, HealthStatus};
use crate::utils::format::format_number;
use crate::utils::{TaskHandle, dom};

#[component]
pub fn DashboardPage(data: DashboardData) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let data = RwSignal::new(data);
    let history = RwSignal::new(RealtimeHistory::default());

    let poll = StoredValue::new_local(Some(TaskHandle::every(REALTIME_REFRESH_MS, move || {
        poll_realtime(ctx, data, history)
    })));
    on_cleanup(move || {
        poll.try_update_value(|handle| {
            if let Some(mut handle) = handle.take() {
                handle.cancel();
            }
        });
    });

    let refresh = Callback::new(move |_: ()| refresh(ctx, data));
    let export = Callback::new(move |_: ()| export_report(ctx));

    let trends = data.with_untracked(|d| d.trends.clone());
    let overview = move |f: fn(&DashboardData) -> String| Signal::derive(move || data.with(f));

    view! {
        <PageHeader
            title="Dashboard Overview"
            subtitle="Welcome back! Here's what's happening with AgenticLearn today."
        >
            <ActionButton label="Refresh" icon=ic::REFRESH on_click=refresh />
            <ActionButton label="Export Report" icon=ic::DOWNLOAD on_click=export primary=true />
        </PageHeader>

        <div class=css::statsGrid>
            <StatCard
                label="Total Users"
                value=overview(|d| format_number(d.overview.total_users))
                icon=ic::USERS
                trend=(trends.user_growth.value, trends.user_growth.direction)
            />
            <StatCard
                label="Active Users"
                value=overview(|d| format_number(d.overview.active_users))
                icon=ic::ACTIVITY
                trend=(trends.engagement.value, trends.engagement.direction)
            />
            <StatCard
                label="Total Courses"
                value=overview(|d| format_number(d.overview.total_courses))
                icon=ic::COURSES
                detail=data.with_untracked(|d| format!("{} active", d.overview.active_courses))
                trend=(trends.performance.value, trends.performance.direction)
            />
            <StatCard
                label="System Uptime"
                value=overview(|d| d.overview.system_uptime.clone())
                icon=ic::SUCCESS
                detail=data.with_untracked(|d| d.overview.carbon_footprint.clone())
                trend=(trends.efficiency.value, trends.efficiency.direction)
            />
        </div>

        <div class=css::grid2>
            <LiveActivity history=history />
            <SystemHealthPanel data=data />
        </div>

        <div class=css::grid2>
            <RecentActivity data=data />
            <TopCourses data=data />
        </div>

        <Alerts data=data />
    }
}

fn poll_realtime(ctx: AppContext, data: RwSignal<DashboardData>, history: RwSignal<RealtimeHistory>) {
    let Some(api) = ctx.api() else {
        return;
    };
    spawn_local(async move {
        match api.realtime_stats().await.into_result() {
            Ok(stats) => {
                data.try_update(|d| d.apply_realtime(&stats));
                history.try_update(|h| h.record(&stats, dom::now_ms()));
                if let Some(status) = stats.system_status {
                    ctx.boot.try_update(|boot| {
                        if let BootPhase::Ready(session) = boot {
                            session.system_status = status;
                        }
                    });
                }
            }
            Err(reason) => tracing::debug!(%reason, "realtime poll failed"),
        }
    });
}

fn refresh(ctx: AppContext, data: RwSignal<DashboardData>) {
    let Some(api) = ctx.api() else {
        return;
    };
    ctx.notify("Refreshing dashboard data...", NotificationKind::Info);
    spawn_local(async move {
        match api.dashboard().await.into_result() {
            Ok(fresh) => {
                data.try_set(fresh);
                ctx.notify("Dashboard data refreshed", NotificationKind::Success);
            }
            Err(reason) => {
                tracing::warn!(%reason, "dashboard refresh failed");
                ctx.notify(
                    format!("Failed to refresh dashboard: {}", reason),
                    NotificationKind::Warning,
                );
            }
        }
    });
}

fn export_report(ctx: AppContext) {
    let Some(api) = ctx.api() else {
        return;
    };
    ctx.notify("Generating dashboard report...", NotificationKind::Info);
    spawn_local(async move {
        match api
            .export(ExportKind::Dashboard, ExportFormat::Pdf, &[])
            .await
            .into_optional()
        {
            Ok(receipt) => {
                ctx.notify("Dashboard report exported successfully", NotificationKind::Success);
                if let Some(url) = receipt.and_then(|r| r.download_url) {
                    dom::open_in_new_tab(&url);
                }
            }
            Err(reason) => ctx.notify(
                format!("Failed to export report: {}", reason),
                NotificationKind::Error,
            ),
        }
    });
}

fn health_tone(status: HealthStatus) -> Tone {
    match status {
        HealthStatus::Excellent | HealthStatus::Good => Tone::Success,
        HealthStatus::Warning => Tone::Warning,
        HealthStatus::Critical => Tone::Danger,
    }
}

#[component]
fn LiveActivity(history: RwSignal<RealtimeHistory>) -> impl IntoView {
    let latest = move || {
        history.with(|h| match h.latest() {
            Some(sample) => format_number(sample.active_users),
            None => "Waiting for first sample".to_string(),
        })
    };
    let delta = move || {
        history.with(|h| h.delta()).map(|d| {
            let (text, tone) = if d >= 0 {
                (format!("+{}", d), Tone::Success)
            } else {
                (d.to_string(), Tone::Danger)
            };
            view! { <Badge text=text tone=tone /> }
        })
    };
    let bars = move || {
        history
            .with(|h| h.normalized())
            .into_iter()
            .map(|height| {
                let style = format!("height: {:.0}%", height * 100.0);
                view! { <div class=css::trendBar style=style></div> }
            })
            .collect_view()
    };

    view! {
        <section class=css::panel>
            <div class=css::panelHeader>
                <h3 class=css::panelTitle>"Live Activity"</h3>
                {delta}
            </div>
            <p class=css::muted>"Active users: " {latest}</p>
            <div class=css::trendStrip>{bars}</div>
        </section>
    }
}

#[component]
fn SystemHealthPanel(data: RwSignal<DashboardData>) -> impl IntoView {
    let rows = move || {
        data.with(|d| d.system_health.readings())
            .into_iter()
            .map(|(label, reading)| {
                view! {
                    <div class=css::healthRow>
                        <span class=css::healthLabel>{label}</span>
                        <ProgressBar value=f64::from(reading.value) tone=health_tone(reading.status) />
                        <Badge text=format!("{}%", reading.value) tone=health_tone(reading.status) />
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <section class=css::panel>
            <h3 class=css::panelTitle>"System Health"</h3>
            <div>{rows}</div>
        </section>
    }
}

#[component]
fn RecentActivity(data: RwSignal<DashboardData>) -> impl IntoView {
    let items = move || {
        data.with(|d| d.recent_activity.clone())
            .into_iter()
            .map(|a| {
                view! {
                    <li class=css::listItem data-kind=a.kind>
                        <span class=css::listIcon>{a.icon}</span>
                        <div class=css::listBody>
                            <span>{a.message}</span>
                            <span class=css::muted>{a.timestamp}</span>
                        </div>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <section class=css::panel>
            <h3 class=css::panelTitle>"Recent Activity"</h3>
            <ul class=css::list>{items}</ul>
        </section>
    }
}

#[component]
fn TopCourses(data: RwSignal<DashboardData>) -> impl IntoView {
    let rows = move || {
        data.with(|d| d.top_courses.clone())
            .into_iter()
            .map(|c| {
                view! {
                    <tr>
                        <td>{c.name}</td>
                        <td>{format_number(c.students)}</td>
                        <td><ProgressBar value=f64::from(c.completion) tone=Tone::Info show_label=true /></td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class=css::panel>
            <h3 class=css::panelTitle>"Top Courses"</h3>
            <DataTable headers=vec!["Course", "Students", "Completion"]>{rows}</DataTable>
        </section>
    }
}

#[component]
fn Alerts(data: RwSignal<DashboardData>) -> impl IntoView {
    let items = move || {
        data.with(|d| d.alerts.clone())
            .into_iter()
            .enumerate()
            .map(|(index, alert)| {
                let class = match alert.kind.as_str() {
                    "warning" => format!("{} {}", css::alert, css::alertWarning),
                    "error" | "critical" => format!("{} {}", css::alert, css::alertError),
                    _ => css::alert.to_string(),
                };
                let icon = match alert.kind.as_str() {
                    "warning" => ic::WARNING,
                    "error" | "critical" => ic::ERROR,
                    _ => ic::INFO,
                };
                view! {
                    <div class=class>
                        <Icon icon=icon />
                        <div class=css::alertBody>
                            <strong>{alert.title}</strong>
                            <span>{alert.message}</span>
                            <div class=css::muted>{alert.timestamp}</div>
                        </div>
                        <IconButton
                            title="Dismiss"
                            icon=ic::CLOSE
                            on_click=Callback::new(move |_: ()| {
                                data.update(|d| {
                                    if index < d.alerts.len() {
                                        d.alerts.remove(index);
                                    }
                                })
                            })
                        />
                    </div>
                }
            })
            .collect_view()
    };
    let empty = move || data.with(|d| d.alerts.is_empty());

    view! {
        <section class=css::panel>
            <h3 class=css::panelTitle>"System Alerts"</h3>
            <Show
                when=move || !empty()
                fallback=|| view! { <p class=css::muted>"No active alerts"</p> }
            >
                <div class=css::list>{items}</div>
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_tone() {
        assert_eq!(health_tone(HealthStatus::Excellent), Tone::Success);
        assert_eq!(health_tone(HealthStatus::Warning), Tone::Warning);
        assert_eq!(health_tone(HealthStatus::Critical), Tone::Danger);
    }
}
