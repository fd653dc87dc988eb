//! One view per page.
//!
//! [`render`] is the exhaustive dispatch from loaded module data to the page
//! component that shows it. Pages own their local state (sub-view, filters,
//! optimistic edits); the coordinator only decides which page's data is in
//! the region.

mod admin;
mod ai;
mod analytics;
mod courses;
mod dashboard;
mod users;

use std::future::Future;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::core::error::ValidationError;
use crate::core::{Keyed, NotificationKind, OpId, OptimisticList};
use crate::models::{ExportFormat, ExportKind};
use crate::modules::ModuleData;
use crate::utils::dom;

pub use admin::AdminPage;
pub use ai::AiPage;
pub use analytics::AnalyticsPage;
pub use courses::CoursesPage;
pub use dashboard::DashboardPage;
pub use users::UsersPage;

stylance::import_crate_style!(css, "src/components/pages/pages.module.css");

pub fn render(data: ModuleData) -> AnyView {
    match data {
        ModuleData::Dashboard(data) => view! { <DashboardPage data=data /> }.into_any(),
        ModuleData::Users(list) => view! { <UsersPage users=list.0 /> }.into_any(),
        ModuleData::Courses(list) => view! { <CoursesPage courses=list.0 /> }.into_any(),
        ModuleData::Analytics(data) => view! { <AnalyticsPage data=data /> }.into_any(),
        ModuleData::AiManagement(data) => view! { <AiPage data=data /> }.into_any(),
        ModuleData::Administration(data) => view! { <AdminPage data=data /> }.into_any(),
    }
}

/// Page title block with an action area on the right.
#[component]
fn PageHeader(
    title: &'static str,
    subtitle: &'static str,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class=css::pageHeader>
            <div>
                <h2 class=css::pageTitle>{title}</h2>
                <p class=css::pageSubtitle>{subtitle}</p>
            </div>
            <div class=css::actions>{children.map(|c| c())}</div>
        </div>
    }
}

/// Export `kind` and open the download link when the backend returns one.
///
/// `noun` names the data in notifications ("user", "course", ...).
pub(crate) fn run_export(
    ctx: AppContext,
    kind: ExportKind,
    format: ExportFormat,
    filters: Vec<(String, String)>,
    noun: &'static str,
) {
    let Some(api) = ctx.api() else {
        return;
    };
    ctx.notify(format!("Exporting {} data...", noun), NotificationKind::Info);
    spawn_local(async move {
        let pairs: Vec<(&str, &str)> = filters
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        match api.export(kind, format, &pairs).await.into_optional() {
            Ok(receipt) => {
                ctx.notify(
                    format!("{} data exported successfully", capitalize(noun)),
                    NotificationKind::Success,
                );
                if let Some(url) = receipt.and_then(|r| r.download_url) {
                    dom::open_in_new_tab(&url);
                }
            }
            Err(reason) => {
                tracing::warn!(kind = kind.as_str(), %reason, "export failed");
                ctx.notify("Export functionality coming soon", NotificationKind::Info);
            }
        }
    });
}

/// Settle an optimistic edit once the backend answers.
///
/// `request` resolves to the server's copy of the item (if it sent one) or
/// the failure reason. Success confirms `op` and shows `success`; failure
/// rolls the edit back and reports `failure` with the reason.
pub(crate) fn reconcile<T>(
    ctx: AppContext,
    list: RwSignal<OptimisticList<T>>,
    op: OpId,
    request: impl Future<Output = Result<Option<T>, String>> + 'static,
    success: String,
    failure: String,
) where
    T: Keyed + Clone + Send + Sync + 'static,
{
    spawn_local(async move {
        match request.await {
            Ok(server_item) => {
                list.try_update(|l| l.confirm(op, server_item));
                ctx.notify(success, NotificationKind::Success);
            }
            Err(reason) => {
                tracing::warn!(op, %reason, "mutation rejected, rolling back");
                list.try_update(|l| l.rollback(op));
                ctx.notify(format!("{}: {}", failure, reason), NotificationKind::Error);
            }
        }
    });
}

/// Surface a form validation failure.
fn report_invalid(ctx: AppContext, error: &ValidationError) {
    let message = match error {
        ValidationError::Missing(_) => "Please fill in all required fields".to_string(),
        other => other.to_string(),
    };
    ctx.notify(message, NotificationKind::Error);
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drop a filter pair whose value is empty.
fn filter_pair(key: &str, value: &str) -> Option<(String, String)> {
    (!value.is_empty()).then(|| (key.to_string(), value.to_string()))
}

/// Numeric form input; unparseable text becomes `None`.
fn parse_number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("user"), "User");
        assert_eq!(capitalize("AI"), "AI");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_filter_pair() {
        assert_eq!(filter_pair("role", ""), None);
        assert_eq!(
            filter_pair("role", "Student"),
            Some(("role".to_string(), "Student".to_string()))
        );
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<u32>(" 42 "), Some(42));
        assert_eq!(parse_number::<f64>("0.5"), Some(0.5));
        assert_eq!(parse_number::<u32>("abc"), None);
    }
}
