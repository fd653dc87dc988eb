//! Analytics and reports.
//!
//! Changing the timeframe reloads the dataset and swaps only the inner
//! content; the header, selector and tabs stay mounted. Each reload takes a
//! generation number and a result that is no longer current is dropped.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::{PageHeader, css, run_export};
use crate::app::AppContext;
use crate::components::builders::{
    ActionButton, Badge, DataTable, EmptyState, ProgressBar, Spinner, StatCard, SubViewTabs, Tone,
};
use crate::components::icons as ic;
use crate::core::navigation::Generation;
use crate::core::{NotificationKind, PageKey, load_with_fallback};
use crate::models::{
    AnalyticsData, AnalyticsView, DailyCount, ExportFormat, ExportKind, ReportKind, Timeframe,
    ViewState, humanize_key, trend_peak,
};
use crate::utils::dom;
use crate::utils::format::{
    DateStyle, format_change, format_currency, format_date, format_number, format_percent,
};

#[component]
pub fn AnalyticsPage(data: AnalyticsData) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let data = RwSignal::new(data);
    let timeframe = RwSignal::new(ctx.load_options.with_untracked(|o| o.timeframe));
    let view_state = RwSignal::new(ViewState::<AnalyticsView>::default());
    let generation = RwSignal::new(Generation::default());
    let current = Memo::new(move |_| view_state.with(|s| s.current));
    let is_loading = Memo::new(move |_| view_state.with(|s| s.is_loading));

    let change_timeframe = move |tf: Timeframe| {
        if timeframe.get_untracked() == tf {
            return;
        }
        timeframe.set(tf);
        ctx.load_options.update(|o| o.timeframe = tf);
        reload(ctx, tf, data, generation, view_state);
    };

    let export = Callback::new(move |_: ()| {
        let tf = timeframe.get_untracked();
        run_export(
            ctx,
            ExportKind::Analytics,
            ExportFormat::Excel,
            vec![("timeframe".to_string(), tf.as_str().to_string())],
            "analytics",
        );
    });
    let report = Callback::new(move |_: ()| {
        generate_report(ctx, ReportKind::Comprehensive, timeframe.get_untracked())
    });

    let content = move || {
        if is_loading.get() {
            return view! { <Spinner label="Updating analytics..." /> }.into_any();
        }
        match current.get() {
            AnalyticsView::Overview => view! { <OverviewView data=data /> }.into_any(),
            AnalyticsView::Users => view! { <UsersView data=data /> }.into_any(),
            AnalyticsView::Courses => view! { <CoursesView data=data /> }.into_any(),
            AnalyticsView::Performance => view! { <PerformanceView data=data /> }.into_any(),
            AnalyticsView::Learning => view! { <LearningView data=data /> }.into_any(),
            AnalyticsView::Reports => view! { <ReportsView data=data timeframe=timeframe /> }.into_any(),
        }
    };

    view! {
        <PageHeader title="Analytics & Reports" subtitle="Platform usage, learning outcomes and system performance.">
            <select
                class=css::select
                on:change=move |ev| {
                    if let Some(tf) = Timeframe::parse(&event_target_value(&ev)) {
                        change_timeframe(tf);
                    }
                }
            >
                {Timeframe::ALL
                    .into_iter()
                    .map(|tf| view! {
                        <option value=tf.as_str() selected=move || timeframe.get() == tf>{tf.label()}</option>
                    })
                    .collect_view()}
            </select>
            <ActionButton label="Export" icon=ic::DOWNLOAD on_click=export />
            <ActionButton label="Generate Report" icon=ic::ANALYTICS on_click=report primary=true />
        </PageHeader>
        <SubViewTabs state=view_state />
        {content}
    }
}

fn reload(
    ctx: AppContext,
    timeframe: Timeframe,
    data: RwSignal<AnalyticsData>,
    generation: RwSignal<Generation>,
    view_state: RwSignal<ViewState<AnalyticsView>>,
) {
    let Some(api) = ctx.api() else {
        return;
    };
    let Some(ticket) = generation.try_update(|g| g.next()) else {
        return;
    };
    ctx.notify(
        format!("Updating analytics for {}...", timeframe.label()),
        NotificationKind::Info,
    );
    view_state.update(|s| s.is_loading = true);
    spawn_local(async move {
        let result = load_with_fallback(PageKey::Analytics, api.analytics(timeframe)).await;
        if !generation.try_with_untracked(|g| g.is_current(ticket)).unwrap_or(false) {
            tracing::debug!(timeframe = timeframe.as_str(), "dropping superseded analytics load");
            return;
        }
        view_state.try_update(|s| s.is_loading = false);
        match result {
            Ok(loaded) => {
                data.try_set(loaded.data);
                ctx.notify("Analytics updated successfully", NotificationKind::Success);
            }
            Err(e) => ctx.notify(
                format!("Failed to update analytics: {}", e),
                NotificationKind::Error,
            ),
        }
    });
}

fn generate_report(ctx: AppContext, kind: ReportKind, timeframe: Timeframe) {
    let Some(api) = ctx.api() else {
        return;
    };
    let comprehensive = kind == ReportKind::Comprehensive;
    let start = if comprehensive {
        "Generating comprehensive report...".to_string()
    } else {
        format!("Generating {} report...", kind.label())
    };
    ctx.notify(start, NotificationKind::Info);
    spawn_local(async move {
        match api
            .generate_report(kind, timeframe, ExportFormat::Pdf)
            .await
            .into_optional()
        {
            Ok(receipt) => {
                let done = if comprehensive {
                    "Report generated successfully".to_string()
                } else {
                    format!("{} report generated successfully", kind.label())
                };
                ctx.notify(done, NotificationKind::Success);
                if let Some(url) = receipt.and_then(|r| r.download_url) {
                    dom::open_in_new_tab(&url);
                }
            }
            Err(reason) => {
                tracing::warn!(kind = kind.as_str(), %reason, "report generation failed");
                let fallback = if comprehensive {
                    "Report generation functionality coming soon"
                } else {
                    "Custom report generation functionality coming soon"
                };
                ctx.notify(fallback, NotificationKind::Info);
            }
        }
    });
}

/// Bar chart of a daily series, scaled to its peak.
#[component]
fn TrendChart(points: Vec<DailyCount>) -> impl IntoView {
    let peak = trend_peak(&points).max(1) as f64;
    let bars = points
        .into_iter()
        .map(|p| {
            let style = format!("height: {:.0}%", p.count as f64 / peak * 100.0);
            let title = format!("{}: {}", p.date, p.count);
            view! {
                <div class=css::chartColumn title=title>
                    <div class=css::chartBar style=style></div>
                    <span class=css::chartLabel>{format_date(&p.date, DateStyle::Short)}</span>
                </div>
            }
        })
        .collect_view();
    view! { <div class=css::chart>{bars}</div> }
}

fn key_value(label: impl Into<String>, value: String) -> impl IntoView {
    view! {
        <div class=css::keyValue>
            <span class=css::muted>{label.into()}</span>
            <strong>{value}</strong>
        </div>
    }
}

#[component]
fn OverviewView(data: RwSignal<AnalyticsData>) -> impl IntoView {
    move || {
        let o = data.with(|d| d.overview.clone());
        let growth = o.user_growth;
        view! {
            <div class=css::statsGrid>
                <StatCard
                    label="Total Users"
                    value=format_number(o.total_users)
                    icon=ic::USERS
                    detail=format!("{} new, {} growth", format_number(o.new_users), format_change(growth))
                />
                <StatCard label="Active Users" value=format_number(o.active_users) icon=ic::ACTIVITY />
                <StatCard
                    label="Course Completions"
                    value=format_number(o.course_completions)
                    icon=ic::SUCCESS
                    detail=format!("{} average completion", format_percent(o.avg_completion_rate))
                />
                <StatCard
                    label="Total Revenue"
                    value=format_currency(o.total_revenue)
                    icon=ic::TREND_UP
                />
                <StatCard
                    label="Active Courses"
                    value=format_number(o.active_courses)
                    icon=ic::COURSES
                    detail=format!("of {}", format_number(o.total_courses))
                />
                <StatCard label="System Uptime" value=format_percent(o.system_uptime) icon=ic::ADMIN />
                <StatCard
                    label="Avg Session"
                    value=format!("{:.1} min", o.avg_session_time)
                    icon=ic::ACTIVITY
                />
                <StatCard
                    label="Carbon Saved"
                    value=format!("{:.1} kg CO2", o.carbon_saved)
                    icon=ic::SUCCESS
                />
            </div>
        }
    }
}

#[component]
fn UsersView(data: RwSignal<AnalyticsData>) -> impl IntoView {
    move || {
        let u = data.with(|d| d.user_analytics.clone());
        let e = u.engagement_metrics;
        let locations = u
            .users_by_location
            .into_iter()
            .map(|l| view! {
                <tr>
                    <td>{l.country}</td>
                    <td>{format_number(l.users)}</td>
                    <td><ProgressBar value=l.percentage tone=Tone::Info show_label=true /></td>
                </tr>
            })
            .collect_view();
        view! {
            <div class=css::grid2>
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Registration Trend"</h3>
                    <TrendChart points=u.registration_trend />
                </section>
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Users by Role"</h3>
                    {key_value("Students", format_number(u.users_by_role.students))}
                    {key_value("Educators", format_number(u.users_by_role.educators))}
                    {key_value("Administrators", format_number(u.users_by_role.administrators))}
                </section>
            </div>
            <div class=css::grid2>
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Users by Location"</h3>
                    <DataTable headers=vec!["Country", "Users", "Share"]>{locations}</DataTable>
                </section>
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Engagement"</h3>
                    {key_value("Daily active", format_number(e.daily_active_users))}
                    {key_value("Weekly active", format_number(e.weekly_active_users))}
                    {key_value("Monthly active", format_number(e.monthly_active_users))}
                    {key_value("Sessions per user", format!("{:.1}", e.avg_sessions_per_user))}
                    {key_value("Time per session", format!("{:.1} min", e.avg_time_per_session))}
                    {key_value("Bounce rate", format_percent(e.bounce_rate))}
                </section>
            </div>
        }
    }
}

#[component]
fn CoursesView(data: RwSignal<AnalyticsData>) -> impl IntoView {
    move || {
        let c = data.with(|d| d.course_analytics.clone());
        let popular = c
            .popular_courses
            .into_iter()
            .map(|p| view! {
                <tr>
                    <td>{p.title}</td>
                    <td>{format_number(p.enrollments)}</td>
                    <td>{format_number(p.completions)}</td>
                    <td><ProgressBar value=p.completion_rate tone=Tone::Info show_label=true /></td>
                    <td>{format!("{:.1}", p.avg_rating)}</td>
                    <td>{format_currency(p.revenue)}</td>
                </tr>
            })
            .collect_view();
        let categories = c
            .category_performance
            .into_iter()
            .map(|p| view! {
                <tr>
                    <td>{p.category}</td>
                    <td>{p.courses}</td>
                    <td>{format_number(p.students)}</td>
                    <td><ProgressBar value=p.avg_completion tone=Tone::Success show_label=true /></td>
                </tr>
            })
            .collect_view();
        view! {
            <section class=css::panel>
                <h3 class=css::panelTitle>"Popular Courses"</h3>
                <DataTable headers=vec!["Course", "Enrollments", "Completions", "Completion", "Rating", "Revenue"]>
                    {popular}
                </DataTable>
            </section>
            <div class=css::grid2 style="margin-top: 1.5rem;">
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Category Performance"</h3>
                    <DataTable headers=vec!["Category", "Courses", "Students", "Avg Completion"]>
                        {categories}
                    </DataTable>
                </section>
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Enrollment Trend"</h3>
                    <TrendChart points=c.enrollment_trend />
                </section>
            </div>
        }
    }
}

#[component]
fn PerformanceView(data: RwSignal<AnalyticsData>) -> impl IntoView {
    move || {
        let p = data.with(|d| d.performance_metrics.clone());
        let resources = p
            .system_health
            .rows()
            .into_iter()
            .map(|(label, usage)| view! {
                <tr>
                    <td>{label}</td>
                    <td><ProgressBar value=usage.current show_label=true /></td>
                    <td>{format_percent(usage.avg)}</td>
                    <td>{format_percent(usage.max)}</td>
                </tr>
            })
            .collect_view();
        view! {
            <section class=css::panel>
                <h3 class=css::panelTitle>"Resource Usage"</h3>
                <DataTable headers=vec!["Resource", "Current", "Average", "Peak"]>{resources}</DataTable>
            </section>
            <div class=css::grid2 style="margin-top: 1.5rem;">
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Response Time"</h3>
                    {key_value("Average", format!("{:.0} ms", p.response_time.avg))}
                    {key_value("95th percentile", format!("{:.0} ms", p.response_time.p95))}
                    {key_value("99th percentile", format!("{:.0} ms", p.response_time.p99))}
                </section>
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Error Rates"</h3>
                    {key_value("Total", format!("{:.2}%", p.error_rates.total))}
                    {key_value("API", format!("{:.2}%", p.error_rates.api))}
                    {key_value("Frontend", format!("{:.2}%", p.error_rates.frontend))}
                </section>
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Carbon Footprint"</h3>
                    {key_value("Daily", format!("{:.2} kg CO2", p.carbon_footprint.daily))}
                    {key_value("Monthly", format!("{:.1} kg CO2", p.carbon_footprint.monthly))}
                    {key_value("Yearly", format!("{:.0} kg CO2", p.carbon_footprint.yearly))}
                    {key_value("Saved vs traditional", format_percent(p.carbon_footprint.saved_vs_traditional))}
                </section>
            </div>
        }
    }
}

#[component]
fn LearningView(data: RwSignal<AnalyticsData>) -> impl IntoView {
    move || {
        let l = data.with(|d| d.learning_analytics.clone());
        let rates = l.completion_rates;
        let bar = |label: &'static str, value: f64| view! {
            <div class=css::healthRow>
                <span class=css::healthLabel>{label}</span>
                <ProgressBar value=value tone=Tone::Info />
                <span class=css::muted>{format_percent(value)}</span>
            </div>
        };
        let paths = l
            .learning_paths
            .into_iter()
            .map(|p| view! {
                <tr>
                    <td>{p.path}</td>
                    <td>{format_number(p.students)}</td>
                    <td><ProgressBar value=p.completion tone=Tone::Success show_label=true /></td>
                </tr>
            })
            .collect_view();
        let skills = l
            .skill_progress
            .into_iter()
            .map(|(skill, value)| view! {
                <div class=css::healthRow>
                    <span class=css::healthLabel>{humanize_key(&skill)}</span>
                    <ProgressBar value=value tone=Tone::Info />
                    <span class=css::muted>{format_percent(value)}</span>
                </div>
            })
            .collect_view();
        view! {
            <div class=css::grid2>
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Completion Rates"</h3>
                    {bar("Overall", rates.overall)}
                    {bar("Beginner", rates.by_level.beginner)}
                    {bar("Intermediate", rates.by_level.intermediate)}
                    {bar("Advanced", rates.by_level.advanced)}
                    {bar("Short", rates.by_duration.short)}
                    {bar("Medium", rates.by_duration.medium)}
                    {bar("Long", rates.by_duration.long)}
                </section>
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Skill Progress"</h3>
                    {skills}
                </section>
            </div>
            <section class=css::panel>
                <h3 class=css::panelTitle>"Learning Paths"</h3>
                <DataTable headers=vec!["Path", "Students", "Completion"]>{paths}</DataTable>
            </section>
        }
    }
}

#[component]
fn ReportsView(data: RwSignal<AnalyticsData>, timeframe: RwSignal<Timeframe>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let generated = move || {
        let reports = data.with(|d| d.reports.generated.clone());
        if reports.is_empty() {
            return view! { <EmptyState message="No reports generated yet" /> }.into_any();
        }
        let rows = reports
            .into_iter()
            .map(|r| view! {
                <tr>
                    <td>{r.title}</td>
                    <td>{humanize_key(&r.kind)}</td>
                    <td>{format_date(&r.generated_date, DateStyle::Long)}</td>
                    <td><Badge text=r.format.to_uppercase() tone=Tone::Info /></td>
                    <td>{r.size}</td>
                </tr>
            })
            .collect_view();
        view! {
            <DataTable headers=vec!["Report", "Type", "Generated", "Format", "Size"]>{rows}</DataTable>
        }
        .into_any()
    };

    view! {
        <section class=css::panel>
            <div class=css::panelHeader>
                <h3 class=css::panelTitle>"Generate Report"</h3>
                <span class=css::muted>{move || timeframe.get().label()}</span>
            </div>
            <div class=css::actions>
                {ReportKind::ALL
                    .into_iter()
                    .map(|kind| {
                        let primary = kind == ReportKind::Comprehensive;
                        view! {
                            <ActionButton
                                label=kind.label()
                                icon=ic::ANALYTICS
                                primary=primary
                                on_click=Callback::new(move |_: ()| {
                                    generate_report(ctx, kind, timeframe.get_untracked())
                                })
                            />
                        }
                    })
                    .collect_view()}
            </div>
        </section>
        <section class=css::panel style="margin-top: 1.5rem;">
            <h3 class=css::panelTitle>"Generated Reports"</h3>
            {generated}
        </section>
    }
}
