//! Shared view builders.
//!
//! Small stateless components every page composes: stat cards, tables,
//! modals, progress bars, badges and the loading/empty/error states.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::icons as ic;
use crate::models::{SubView, TrendDirection, ViewState};

stylance::import_crate_style!(css, "src/components/builders/builders.module.css");

/// Color of a badge or progress bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Self::Neutral => css::toneNeutral,
            Self::Info => css::toneInfo,
            Self::Success => css::toneSuccess,
            Self::Warning => css::toneWarning,
            Self::Danger => css::toneDanger,
        }
    }

    /// Tone for a 0-100 usage value where high is bad.
    pub fn for_load(percent: f64) -> Self {
        if percent >= 85.0 {
            Self::Danger
        } else if percent >= 70.0 {
            Self::Warning
        } else {
            Self::Success
        }
    }
}

/// Headline number with an optional trend.
#[component]
pub fn StatCard(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    icon: icondata::Icon,
    #[prop(optional, into)] detail: Option<String>,
    #[prop(optional)] trend: Option<(String, TrendDirection)>,
) -> impl IntoView {
    let trend = trend.map(|(text, direction)| {
        let (class, icon) = match direction {
            TrendDirection::Up => (css::trendUp, ic::TREND_UP),
            TrendDirection::Down => (css::trendDown, ic::TREND_DOWN),
        };
        view! {
            <span class=class>
                <Icon icon=icon />
                {text}
            </span>
        }
    });

    view! {
        <div class=css::statCard>
            <div class=css::statIcon><Icon icon=icon /></div>
            <div class=css::statBody>
                <span class=css::statLabel>{label}</span>
                <span class=css::statValue>{value}</span>
                {detail.map(|d| view! { <span class=css::statDetail>{d}</span> })}
                {trend}
            </div>
        </div>
    }
}

/// Table with a fixed header row; rows are passed as children.
#[component]
pub fn DataTable(headers: Vec<&'static str>, children: Children) -> impl IntoView {
    view! {
        <div class=css::tableWrap>
            <table class=css::table>
                <thead>
                    <tr>
                        {headers.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>{children()}</tbody>
            </table>
        </div>
    }
}

/// Overlay dialog. Clicking the backdrop or the close button calls `on_close`.
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let label = title.clone();
    view! {
        <div class=css::backdrop on:click=move |_| on_close.run(())>
            <div
                class=css::modal
                role="dialog"
                aria-label=label
                on:click=|ev| ev.stop_propagation()
            >
                <header class=css::modalHeader>
                    <h3>{title}</h3>
                    <button class=css::iconButton title="Close" on:click=move |_| on_close.run(())>
                        <Icon icon=ic::CLOSE />
                    </button>
                </header>
                <div class=css::modalBody>{children()}</div>
            </div>
        </div>
    }
}

/// Horizontal bar for a 0-100 value.
#[component]
pub fn ProgressBar(
    #[prop(into)] value: Signal<f64>,
    #[prop(optional)] tone: Option<Tone>,
    #[prop(optional)] show_label: bool,
) -> impl IntoView {
    let width = move || format!("width: {:.0}%", value.get().clamp(0.0, 100.0));
    let fill = move || {
        let tone = tone.unwrap_or_else(|| Tone::for_load(value.get()));
        format!("{} {}", css::progressFill, tone.class())
    };
    view! {
        <div class=css::progress>
            <div class=css::progressTrack>
                <div class=fill style=width></div>
            </div>
            {show_label.then(|| view! {
                <span class=css::progressLabel>{move || format!("{:.0}%", value.get())}</span>
            })}
        </div>
    }
}

#[component]
pub fn Badge(#[prop(into)] text: String, #[prop(optional)] tone: Tone) -> impl IntoView {
    view! { <span class=format!("{} {}", css::badge, tone.class())>{text}</span> }
}

#[component]
pub fn EmptyState(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class=css::empty>
            <Icon icon=ic::SEARCH />
            <p>{message}</p>
        </div>
    }
}

#[component]
pub fn Spinner(#[prop(default = "Loading...")] label: &'static str) -> impl IntoView {
    view! {
        <div class=css::spinnerWrap role="status">
            <div class=css::spinner></div>
            <span>{label}</span>
        </div>
    }
}

/// Failure with a retry action.
#[component]
pub fn ErrorState(#[prop(into)] message: String, on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class=css::errorState>
            <Icon icon=ic::WARNING />
            <h3>"Failed to load data"</h3>
            <p>{message}</p>
            <button class=css::primaryButton on:click=move |_| on_retry.run(())>
                <Icon icon=ic::REFRESH />
                "Retry"
            </button>
        </div>
    }
}

/// Full-screen state shown before the shell exists.
#[component]
pub fn BootScreen(
    title: &'static str,
    #[prop(into)] message: String,
    #[prop(optional)] on_retry: Option<Callback<()>>,
    #[prop(default = "Retry")] retry_label: &'static str,
) -> impl IntoView {
    let has_message = !message.is_empty();
    view! {
        <div class=css::bootScreen>
            {on_retry.is_none().then(|| view! { <div class=css::spinner></div> })}
            <h1>{title}</h1>
            {has_message.then(|| view! { <p>{message}</p> })}
            {on_retry.map(|cb| view! {
                <button class=css::primaryButton on:click=move |_| cb.run(())>
                    {retry_label}
                </button>
            })}
        </div>
    }
}

/// Tab strip selecting a module's sub-view.
#[component]
pub fn SubViewTabs<V: SubView>(state: RwSignal<ViewState<V>>) -> impl IntoView {
    view! {
        <nav class=css::tabs role="tablist">
            {V::ALL
                .iter()
                .copied()
                .map(|option| {
                    let class = move || {
                        if state.with(|s| s.is(option)) {
                            format!("{} {}", css::tab, css::tabActive)
                        } else {
                            css::tab.to_string()
                        }
                    };
                    view! {
                        <button
                            class=class
                            role="tab"
                            on:click=move |_| {
                                state.update(|s| {
                                    s.switch_view(option);
                                });
                            }
                        >
                            {option.label()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}

/// Toolbar button with an icon.
#[component]
pub fn ActionButton(
    label: &'static str,
    icon: icondata::Icon,
    on_click: Callback<()>,
    #[prop(optional)] primary: bool,
) -> impl IntoView {
    let class = if primary {
        css::primaryButton
    } else {
        css::secondaryButton
    };
    view! {
        <button class=class on:click=move |_| on_click.run(())>
            <Icon icon=icon />
            <span>{label}</span>
        </button>
    }
}

/// Small icon-only button, used in table rows and cards.
#[component]
pub fn IconButton(title: &'static str, icon: icondata::Icon, on_click: Callback<()>) -> impl IntoView {
    view! {
        <button class=css::iconButton title=title on:click=move |_| on_click.run(())>
            <Icon icon=icon />
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_tone_thresholds() {
        assert_eq!(Tone::for_load(12.0), Tone::Success);
        assert_eq!(Tone::for_load(70.0), Tone::Warning);
        assert_eq!(Tone::for_load(91.0), Tone::Danger);
    }
}
