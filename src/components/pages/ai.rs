//! AI model management and monitoring.

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use super::{PageHeader, css, parse_number, report_invalid, run_export};
use crate::app::AppContext;
use crate::components::builders::{
    ActionButton, Badge, DataTable, EmptyState, IconButton, Modal, ProgressBar, StatCard,
    SubViewTabs, Tone,
};
use crate::components::icons as ic;
use crate::core::NotificationKind;
use crate::core::validation::{self, MAX_TOKENS_RANGE, TEMPERATURE_RANGE};
use crate::models::{
    AiData, AiModel, AiView, ExportFormat, ExportKind, ModelConfig, ModelStatus, TrendDirection,
    ViewState, humanize_key,
};
use crate::utils::format::{
    DateStyle, format_change, format_currency, format_date, format_number, format_percent,
};

fn model_tone(status: ModelStatus) -> Tone {
    match status {
        ModelStatus::Active => Tone::Success,
        ModelStatus::Training => Tone::Info,
        ModelStatus::Inactive => Tone::Neutral,
    }
}

/// Cost change shown on the monthly cost card.
fn cost_trend(change: f64) -> (String, TrendDirection) {
    let direction = if change > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };
    (format_change(change), direction)
}

#[component]
pub fn AiPage(data: AiData) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let data = RwSignal::new(data);
    let view_state = RwSignal::new(ViewState::<AiView>::default());
    let configuring = RwSignal::new(None::<AiModel>);

    let stats = Memo::new(move |_| data.with(|d| d.stats()));
    let performance = data.with_untracked(|d| d.performance.clone());

    let export = Callback::new(move |_: ()| {
        run_export(ctx, ExportKind::AiModels, ExportFormat::Excel, Vec::new(), "AI")
    });
    let on_configure = Callback::new(move |model: AiModel| configuring.set(Some(model)));
    let on_monitor = Callback::new(move |model: AiModel| {
        ctx.notify(
            format!("Opening monitoring dashboard for {}...", model.name),
            NotificationKind::Info,
        );
        view_state.update(|s| {
            s.switch_view(AiView::Monitoring);
        });
    });

    let content = move || match view_state.with(|s| s.current) {
        AiView::Overview => view! { <OverviewView data=data /> }.into_any(),
        AiView::Models => {
            view! { <ModelsView data=data on_configure=on_configure on_monitor=on_monitor /> }
                .into_any()
        }
        AiView::Performance => view! { <PerformanceView data=data /> }.into_any(),
        AiView::Monitoring => view! { <MonitoringView data=data /> }.into_any(),
        AiView::Training => view! { <TrainingView data=data /> }.into_any(),
    };

    let config_modal = move || {
        configuring.get().map(|model| {
            view! {
                <ConfigEditor
                    model=model
                    on_close=Callback::new(move |_: ()| configuring.set(None))
                />
            }
        })
    };

    view! {
        <PageHeader title="AI Management" subtitle="Models, usage, monitoring and training.">
            <ActionButton label="Export" icon=ic::DOWNLOAD on_click=export />
        </PageHeader>

        <div class=css::statsGrid>
            <StatCard
                label="Active Models"
                value=Signal::derive(move || stats.with(|s| s.active_models.to_string()))
                icon=ic::AI
                detail=data.with_untracked(|d| format!("{} deployed", d.models.len()))
            />
            <StatCard
                label="Average Accuracy"
                value=Signal::derive(move || stats.with(|s| format_percent(s.average_accuracy)))
                icon=ic::SUCCESS
            />
            <StatCard
                label="Total Requests"
                value=format_number(performance.total_requests)
                icon=ic::ACTIVITY
                detail=format!("{} success rate", format_percent(performance.success_rate))
            />
            <StatCard
                label="Monthly Cost"
                value=format_currency(performance.total_cost)
                icon=ic::TREND_UP
                trend=cost_trend(performance.cost_trend)
            />
        </div>

        <SubViewTabs state=view_state />
        {content}
        {config_modal}
    }
}

#[component]
fn OverviewView(data: RwSignal<AiData>) -> impl IntoView {
    move || {
        let d = data.get();
        let peak = d.peak_daily_requests().max(1) as f64;
        let daily = d
            .usage
            .daily
            .into_iter()
            .map(|day| {
                let style = format!("height: {:.0}%", day.requests as f64 / peak * 100.0);
                let title = format!("{}: {}", day.date, format_number(day.requests));
                view! {
                    <div class=css::chartColumn title=title>
                        <div class=css::chartBar style=style></div>
                        <span class=css::chartLabel>{format_date(&day.date, DateStyle::Short)}</span>
                    </div>
                }
            })
            .collect_view();
        let by_model = d
            .usage
            .by_model
            .into_iter()
            .map(|(model, share)| view! {
                <div class=css::healthRow>
                    <span class=css::healthLabel>{humanize_key(&model)}</span>
                    <ProgressBar value=share tone=Tone::Info />
                    <span class=css::muted>{format_percent(share)}</span>
                </div>
            })
            .collect_view();
        view! {
            <div class=css::grid2>
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Daily Requests"</h3>
                    <div class=css::chart>{daily}</div>
                </section>
                <section class=css::panel>
                    <h3 class=css::panelTitle>"Usage by Model"</h3>
                    {by_model}
                </section>
            </div>
        }
    }
}

#[component]
fn ModelsView(
    data: RwSignal<AiData>,
    on_configure: Callback<AiModel>,
    on_monitor: Callback<AiModel>,
) -> impl IntoView {
    let cards = move || {
        data.with(|d| d.models.clone())
            .into_iter()
            .map(|model| {
                let for_config = model.clone();
                let for_monitor = model.clone();
                view! {
                    <article class=css::card>
                        <div class=css::cardHeader>
                            <span class=css::avatar><Icon icon=ic::AI /></span>
                            <div class=css::listBody>
                                <h4 class=css::cardTitle>{model.name.clone()}</h4>
                                <span class=css::muted>
                                    {format!("{} v{} by {}", model.kind, model.version, model.provider)}
                                </span>
                            </div>
                            <Badge text=model.status.as_str() tone=model_tone(model.status) />
                        </div>
                        <p class=css::muted>{model.description.clone()}</p>
                        <div class=css::cardMeta>
                            <span>{format!("{} accuracy", format_percent(model.accuracy))}</span>
                            <span>{format!("{} ms", model.response_time)}</span>
                            <span>{format!("{} params", model.parameters)}</span>
                            <span>{format!("${:.4}/request", model.cost_per_request)}</span>
                        </div>
                        <ProgressBar value=model.usage tone=Tone::Info show_label=true />
                        <div class=css::cardActions>
                            <IconButton
                                title="Configure"
                                icon=ic::EDIT
                                on_click=Callback::new(move |_: ()| on_configure.run(for_config.clone()))
                            />
                            <IconButton
                                title="Monitor"
                                icon=ic::ACTIVITY
                                on_click=Callback::new(move |_: ()| on_monitor.run(for_monitor.clone()))
                            />
                        </div>
                    </article>
                }
            })
            .collect_view()
    };
    view! { <div class=css::cardGrid>{cards}</div> }
}

#[component]
fn PerformanceView(data: RwSignal<AiData>) -> impl IntoView {
    move || {
        let d = data.get();
        let p = d.performance;
        let rows = d
            .models
            .into_iter()
            .map(|m| view! {
                <tr>
                    <td>{m.name}</td>
                    <td><ProgressBar value=m.accuracy tone=Tone::Success show_label=true /></td>
                    <td>{format!("{} ms", m.response_time)}</td>
                    <td>{format_percent(m.usage)}</td>
                    <td>{format!("${:.4}", m.cost_per_request)}</td>
                </tr>
            })
            .collect_view();
        view! {
            <div class=css::statsGrid>
                <StatCard label="Success Rate" value=format_percent(p.success_rate) icon=ic::SUCCESS />
                <StatCard label="Avg Response" value=format!("{} ms", p.avg_response_time) icon=ic::ACTIVITY />
                <StatCard label="Error Rate" value=format_percent(p.error_rate) icon=ic::WARNING />
                <StatCard label="Uptime" value=format_percent(p.uptime) icon=ic::ADMIN />
            </div>
            <section class=css::panel>
                <h3 class=css::panelTitle>"Per-model Performance"</h3>
                <DataTable headers=vec!["Model", "Accuracy", "Response", "Usage", "Cost"]>{rows}</DataTable>
            </section>
        }
    }
}

#[component]
fn MonitoringView(data: RwSignal<AiData>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let alerts = move || {
        let alerts = data.with(|d| d.monitoring.alerts.clone());
        if alerts.is_empty() {
            return view! { <EmptyState message="No active alerts" /> }.into_any();
        }
        alerts
            .into_iter()
            .map(|alert| {
                let (class, icon) = match alert.kind.as_str() {
                    "warning" => (format!("{} {}", css::alert, css::alertWarning), ic::WARNING),
                    "error" => (format!("{} {}", css::alert, css::alertError), ic::ERROR),
                    _ => (css::alert.to_string(), ic::INFO),
                };
                let id = alert.id.clone();
                view! {
                    <div class=class>
                        <Icon icon=icon />
                        <div class=css::alertBody>
                            <strong>{alert.model}</strong>
                            <span>{alert.message}</span>
                            <div class=css::muted>{format!("{} ({})", alert.timestamp, alert.status)}</div>
                        </div>
                        <IconButton
                            title="Dismiss"
                            icon=ic::CLOSE
                            on_click=Callback::new(move |_: ()| {
                                let removed = data.try_update(|d| d.dismiss_alert(&id)).unwrap_or(false);
                                if removed {
                                    ctx.notify("Alert dismissed", NotificationKind::Success);
                                }
                            })
                        />
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };
    let metrics = move || {
        let m = data.with(|d| d.monitoring.metrics.clone());
        [
            ("Bias", m.bias),
            ("Fairness", m.fairness),
            ("Explainability", m.explainability),
            ("Safety", m.safety),
        ]
        .into_iter()
        .map(|(label, value)| view! {
            <div class=css::healthRow>
                <span class=css::healthLabel>{label}</span>
                <ProgressBar value=value tone=Tone::Success />
                <span class=css::muted>{format_percent(value)}</span>
            </div>
        })
        .collect_view()
    };

    view! {
        <div class=css::grid2>
            <section class=css::panel>
                <h3 class=css::panelTitle>"Alerts"</h3>
                <div class=css::list>{alerts}</div>
            </section>
            <section class=css::panel>
                <h3 class=css::panelTitle>"Responsible AI"</h3>
                {metrics}
            </section>
        </div>
    }
}

#[component]
fn TrainingView(data: RwSignal<AiData>) -> impl IntoView {
    move || {
        let t = data.with(|d| d.training.clone());
        let active = if t.active_jobs.is_empty() {
            view! { <EmptyState message="No training jobs running" /> }.into_any()
        } else {
            let rows = t
                .active_jobs
                .into_iter()
                .map(|job| view! {
                    <tr>
                        <td>{job.model}</td>
                        <td>{humanize_key(&job.kind)}</td>
                        <td><ProgressBar value=f64::from(job.progress) tone=Tone::Info show_label=true /></td>
                        <td>{job.eta}</td>
                        <td>{format_date(&job.start_time, DateStyle::Time)}</td>
                    </tr>
                })
                .collect_view();
            view! {
                <DataTable headers=vec!["Model", "Type", "Progress", "ETA", "Started"]>{rows}</DataTable>
            }
            .into_any()
        };
        let completed = t
            .completed_jobs
            .into_iter()
            .map(|job| view! {
                <tr>
                    <td>{job.model}</td>
                    <td>{humanize_key(&job.kind)}</td>
                    <td>{format_date(&job.completed_time, DateStyle::Long)}</td>
                    <td>{job.duration}</td>
                    <td><Badge text=job.improvement tone=Tone::Success /></td>
                </tr>
            })
            .collect_view();
        view! {
            <section class=css::panel>
                <h3 class=css::panelTitle>"Active Jobs"</h3>
                {active}
            </section>
            <section class=css::panel style="margin-top: 1.5rem;">
                <h3 class=css::panelTitle>"Completed Jobs"</h3>
                <DataTable headers=vec!["Model", "Type", "Completed", "Duration", "Improvement"]>
                    {completed}
                </DataTable>
            </section>
        }
    }
}

#[component]
fn ConfigEditor(model: AiModel, on_close: Callback<()>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let defaults = ModelConfig::default();
    let temperature = RwSignal::new(defaults.temperature.to_string());
    let max_tokens = RwSignal::new(defaults.max_tokens.to_string());
    let error = RwSignal::new(None::<String>);
    let model = StoredValue::new(model);
    let title = model.with_value(|m| format!("Configure {}", m.name));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let config = ModelConfig {
            temperature: parse_number(&temperature.get_untracked()).unwrap_or(f64::NAN),
            max_tokens: parse_number(&max_tokens.get_untracked()).unwrap_or(0),
        };
        if let Err(e) = validation::validate_model_config(&config) {
            report_invalid(ctx, &e);
            error.set(Some(e.to_string()));
            return;
        }
        let Some(api) = ctx.api() else {
            return;
        };
        let model = model.get_value();
        on_close.run(());
        spawn_local(async move {
            match api.update_model_config(&model.id, &config).await.into_optional() {
                Ok(_) => ctx.notify(
                    format!("Configuration updated for {}", model.name),
                    NotificationKind::Success,
                ),
                Err(reason) => ctx.notify(
                    format!("Failed to update {}: {}", model.name, reason),
                    NotificationKind::Error,
                ),
            }
        });
    };

    view! {
        <Modal title=title on_close=on_close>
            <form class=css::form on:submit=submit>
                {move || error.get().map(|e| view! { <p class=css::formError>{e}</p> })}
                <div class=css::fieldRow>
                    <label class=css::field>
                        {format!("Temperature ({} - {})", TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1)}
                        <input class=css::input type="number" step="0.1" bind:value=temperature />
                    </label>
                    <label class=css::field>
                        {format!("Max tokens ({} - {})", MAX_TOKENS_RANGE.0, MAX_TOKENS_RANGE.1)}
                        <input class=css::input type="number" step="1" bind:value=max_tokens />
                    </label>
                </div>
                <div class=css::formActions>
                    <ActionButton label="Cancel" icon=ic::CLOSE on_click=on_close />
                    <button class=css::submit type="submit">"Apply"</button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_trend_direction() {
        assert_eq!(cost_trend(-12.5), ("-12.5%".to_string(), TrendDirection::Down));
        assert_eq!(cost_trend(3.0), ("+3.0%".to_string(), TrendDirection::Up));
    }

    #[test]
    fn test_model_tone() {
        assert_eq!(model_tone(ModelStatus::Active), Tone::Success);
        assert_eq!(model_tone(ModelStatus::Inactive), Tone::Neutral);
    }
}
