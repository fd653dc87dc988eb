//! System administration: status, settings, logs, backups and uploads.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::{PageHeader, css, parse_number, report_invalid};
use crate::app::AppContext;
use crate::components::builders::{
    ActionButton, Badge, DataTable, EmptyState, ProgressBar, StatCard, SubViewTabs, Tone,
};
use crate::components::icons as ic;
use crate::components::shell::status_tone;
use crate::core::NotificationKind;
use crate::core::validation::{self, MAX_UPLOAD_RANGE, SESSION_TIMEOUT_RANGE};
use crate::models::{AdminData, AdminView, LogLevel, SystemSettings, ViewState, filter_logs};
use crate::utils::format::{DateStyle, format_bytes, format_date, format_number, format_percent};
use crate::utils::read_file;

const UPLOAD_KIND: &str = "asset";

fn level_tone(level: LogLevel) -> Tone {
    match level {
        LogLevel::Error => Tone::Danger,
        LogLevel::Warn => Tone::Warning,
        LogLevel::Info => Tone::Info,
        LogLevel::Debug => Tone::Neutral,
    }
}

fn backup_tone(status: &str) -> Tone {
    match status {
        "completed" | "success" => Tone::Success,
        "running" | "pending" | "in_progress" => Tone::Info,
        "failed" | "error" => Tone::Danger,
        _ => Tone::Neutral,
    }
}

#[component]
pub fn AdminPage(data: AdminData) -> impl IntoView {
    let data = RwSignal::new(data);
    let view_state = RwSignal::new(ViewState::<AdminView>::default());

    let content = move || match view_state.with(|s| s.current) {
        AdminView::Settings => view! {
            <SettingsView data=data />
            <UploadPanel />
        }
        .into_any(),
        AdminView::Logs => view! { <LogsView data=data /> }.into_any(),
        AdminView::Backups => view! { <BackupsView data=data /> }.into_any(),
    };

    view! {
        <PageHeader title="System Administration" subtitle="Platform status, configuration and maintenance." />
        <StatusOverview data=data />
        <SubViewTabs state=view_state />
        {content}
    }
}

#[component]
fn StatusOverview(data: RwSignal<AdminData>) -> impl IntoView {
    let gauges = move || {
        data.with(|d| d.metrics.gauges())
            .into_iter()
            .map(|(label, value)| view! {
                <div class=css::healthRow>
                    <span class=css::healthLabel>{label}</span>
                    <ProgressBar value=value />
                    <span class=css::muted>{format_percent(value)}</span>
                </div>
            })
            .collect_view()
    };
    let status = move || {
        let status = data.with(|d| d.status);
        view! { <Badge text=status.label() tone=status_tone(status) /> }
    };

    view! {
        <div class=css::statsGrid>
            <StatCard
                label="Uptime"
                value=Signal::derive(move || data.with(|d| format_percent(d.metrics.uptime)))
                icon=ic::SUCCESS
            />
            <StatCard
                label="Active Connections"
                value=Signal::derive(move || data.with(|d| format_number(d.metrics.active_connections)))
                icon=ic::ACTIVITY
            />
            <StatCard
                label="Version"
                value=Signal::derive(move || data.with(|d| d.metrics.version.clone()))
                icon=ic::INFO
            />
        </div>
        <section class=css::panel style="margin-bottom: 1.5rem;">
            <div class=css::panelHeader>
                <h3 class=css::panelTitle>"System Status"</h3>
                {status}
            </div>
            {gauges}
        </section>
    }
}

#[component]
fn SettingsView(data: RwSignal<AdminData>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let initial = data.with_untracked(|d| d.settings.clone());

    let site_name = RwSignal::new(initial.site_name);
    let support_email = RwSignal::new(initial.support_email);
    let maintenance_mode = RwSignal::new(initial.maintenance_mode);
    let allow_registration = RwSignal::new(initial.allow_registration);
    let session_timeout = RwSignal::new(initial.session_timeout_minutes.to_string());
    let max_upload = RwSignal::new(initial.max_upload_mb.to_string());
    let default_language = RwSignal::new(initial.default_language);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let settings = SystemSettings {
            site_name: site_name.get_untracked().trim().to_string(),
            support_email: support_email.get_untracked().trim().to_string(),
            maintenance_mode: maintenance_mode.get_untracked(),
            allow_registration: allow_registration.get_untracked(),
            session_timeout_minutes: parse_number(&session_timeout.get_untracked()).unwrap_or(0),
            max_upload_mb: parse_number(&max_upload.get_untracked()).unwrap_or(0),
            default_language: default_language.get_untracked().trim().to_string(),
        };
        if let Err(e) = validation::validate_settings(&settings) {
            report_invalid(ctx, &e);
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);
        let Some(api) = ctx.api() else {
            return;
        };
        saving.set(true);
        spawn_local(async move {
            let result = api.update_settings(&settings).await.into_optional();
            saving.try_set(false);
            match result {
                Ok(saved) => {
                    data.try_update(|d| d.settings = saved.unwrap_or(settings));
                    ctx.notify("Settings saved successfully", NotificationKind::Success);
                }
                Err(reason) => {
                    tracing::warn!(%reason, "settings update failed");
                    ctx.notify(
                        format!("Failed to save settings: {}", reason),
                        NotificationKind::Error,
                    );
                }
            }
        });
    };

    view! {
        <section class=css::panel>
            <h3 class=css::panelTitle>"System Settings"</h3>
            <form class=css::form on:submit=submit>
                {move || error.get().map(|e| view! { <p class=css::formError>{e}</p> })}
                <div class=css::fieldRow>
                    <label class=css::field>
                        "Site name *"
                        <input class=css::input type="text" bind:value=site_name />
                    </label>
                    <label class=css::field>
                        "Support email *"
                        <input class=css::input type="email" bind:value=support_email />
                    </label>
                </div>
                <div class=css::fieldRow>
                    <label class=css::field>
                        {format!(
                            "Session timeout, minutes ({}-{})",
                            SESSION_TIMEOUT_RANGE.0,
                            SESSION_TIMEOUT_RANGE.1,
                        )}
                        <input class=css::input type="number" bind:value=session_timeout />
                    </label>
                    <label class=css::field>
                        {format!("Max upload, MB ({}-{})", MAX_UPLOAD_RANGE.0, MAX_UPLOAD_RANGE.1)}
                        <input class=css::input type="number" bind:value=max_upload />
                    </label>
                    <label class=css::field>
                        "Default language"
                        <input class=css::input type="text" bind:value=default_language />
                    </label>
                </div>
                <label class=css::checkbox>
                    <input type="checkbox" bind:checked=maintenance_mode />
                    "Maintenance mode"
                </label>
                <label class=css::checkbox>
                    <input type="checkbox" bind:checked=allow_registration />
                    "Allow new registrations"
                </label>
                <div class=css::formActions>
                    <button class=css::submit type="submit" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save Settings" }}
                    </button>
                </div>
            </form>
        </section>
    }
}

#[component]
fn UploadPanel() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let uploading = RwSignal::new(false);

    let on_change = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let Some(api) = ctx.api() else {
            return;
        };
        input.set_value("");
        uploading.set(true);
        ctx.notify(format!("Uploading {}...", file.name()), NotificationKind::Info);
        spawn_local(async move {
            let result = match read_file(&file).await {
                Ok(upload) => api.upload(upload, UPLOAD_KIND).await.into_optional(),
                Err(e) => Err(e.to_string()),
            };
            uploading.try_set(false);
            match result {
                Ok(receipt) => {
                    let location = receipt
                        .and_then(|r| r.url.or(r.file_id))
                        .unwrap_or_default();
                    tracing::info!(file = %file.name(), %location, "upload complete");
                    ctx.notify(
                        format!("{} uploaded successfully", file.name()),
                        NotificationKind::Success,
                    );
                }
                Err(reason) => ctx.notify(
                    format!("Failed to upload {}: {}", file.name(), reason),
                    NotificationKind::Error,
                ),
            }
        });
    };

    view! {
        <section class=css::panel style="margin-top: 1.5rem;">
            <div class=css::panelHeader>
                <h3 class=css::panelTitle>"File Upload"</h3>
                {move || uploading.get().then(|| view! { <Badge text="Uploading" tone=Tone::Info /> })}
            </div>
            <p class=css::muted>"Upload logos, documents and other platform assets."</p>
            <input class=css::input type="file" on:change=on_change disabled=move || uploading.get() />
        </section>
    }
}

#[component]
fn LogsView(data: RwSignal<AdminData>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let level = RwSignal::new(None::<LogLevel>);

    let change_level = move |next: Option<LogLevel>| {
        level.set(next);
        let Some(api) = ctx.api() else {
            return;
        };
        spawn_local(async move {
            match api.system_logs(next, None).await.into_result() {
                Ok(logs) => {
                    data.try_update(|d| d.logs = logs);
                }
                Err(reason) => tracing::debug!(%reason, "log refresh failed, filtering locally"),
            }
        });
    };

    let lines = move || {
        let logs = data.with(|d| {
            filter_logs(&d.logs, level.get())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        });
        if logs.is_empty() {
            return view! { <EmptyState message="No log entries at this level" /> }.into_any();
        }
        logs.into_iter()
            .map(|entry| view! {
                <div class=css::logLine>
                    <span>{format!(
                        "{} {}",
                        format_date(&entry.timestamp, DateStyle::Short),
                        format_date(&entry.timestamp, DateStyle::Time),
                    )}</span>
                    <span><Badge text=entry.level.as_str().to_uppercase() tone=level_tone(entry.level) /></span>
                    <span>{entry.source}</span>
                    <span>{entry.message}</span>
                </div>
            })
            .collect_view()
            .into_any()
    };

    view! {
        <section class=css::panel>
            <div class=css::panelHeader>
                <h3 class=css::panelTitle>"System Logs"</h3>
                <select
                    class=css::select
                    on:change=move |ev| change_level(LogLevel::parse(&event_target_value(&ev)))
                >
                    <option value="">"All levels"</option>
                    {LogLevel::ALL
                        .into_iter()
                        .map(|l| view! { <option value=l.as_str()>{format!("{} and above", l.as_str())}</option> })
                        .collect_view()}
                </select>
            </div>
            <div>{lines}</div>
        </section>
    }
}

#[component]
fn BackupsView(data: RwSignal<AdminData>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let running = RwSignal::new(false);

    let run_backup = Callback::new(move |_: ()| {
        if running.get_untracked() {
            return;
        }
        let Some(api) = ctx.api() else {
            return;
        };
        running.set(true);
        ctx.notify("Starting system backup...", NotificationKind::Info);
        spawn_local(async move {
            match api.run_backup().await.into_optional() {
                Ok(receipt) => {
                    let message = match receipt.and_then(|r| r.backup_id) {
                        Some(id) => format!("Backup {} started successfully", id),
                        None => "Backup started successfully".to_string(),
                    };
                    ctx.notify(message, NotificationKind::Success);
                    match api.backup_history().await.into_result() {
                        Ok(history) => {
                            data.try_update(|d| d.backups = history);
                        }
                        Err(reason) => tracing::warn!(%reason, "backup history refresh failed"),
                    }
                }
                Err(reason) => {
                    ctx.notify(format!("Backup failed: {}", reason), NotificationKind::Error)
                }
            }
            running.try_set(false);
        });
    });

    let table = move || {
        let backups = data.with(|d| d.backups.clone());
        if backups.is_empty() {
            return view! { <EmptyState message="No backups recorded" /> }.into_any();
        }
        let rows = backups
            .into_iter()
            .map(|b| {
                let tone = backup_tone(&b.status);
                view! {
                    <tr>
                        <td>{b.id}</td>
                        <td>{format_date(&b.created_at, DateStyle::Long)}</td>
                        <td>{humanize_kind(&b.kind)}</td>
                        <td>{format_bytes(b.size)}</td>
                        <td><Badge text=b.status tone=tone /></td>
                    </tr>
                }
            })
            .collect_view();
        view! {
            <DataTable headers=vec!["Backup", "Created", "Type", "Size", "Status"]>{rows}</DataTable>
        }
        .into_any()
    };

    view! {
        <section class=css::panel>
            <div class=css::panelHeader>
                <h3 class=css::panelTitle>"Backups"</h3>
                <ActionButton label="Run Backup" icon=ic::BACKUP on_click=run_backup primary=true />
            </div>
            {table}
        </section>
    }
}

fn humanize_kind(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_tone() {
        assert_eq!(backup_tone("completed"), Tone::Success);
        assert_eq!(backup_tone("failed"), Tone::Danger);
        assert_eq!(backup_tone("queued"), Tone::Neutral);
    }

    #[test]
    fn test_level_tone_orders_by_severity() {
        assert_eq!(level_tone(LogLevel::Error), Tone::Danger);
        assert_eq!(level_tone(LogLevel::Debug), Tone::Neutral);
    }
}
