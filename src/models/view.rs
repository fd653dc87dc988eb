//! Per-module sub-view selection.
//!
//! Each module owns one [`ViewState`]. Switching sub-view only swaps the
//! inner content region; the module header and controls stay mounted.

/// A module's selectable sub-views.
pub trait SubView: Copy + Eq + Default + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState<V> {
    pub current: V,
    /// Set while the module reloads its data; the inner region shows a spinner.
    pub is_loading: bool,
}

impl<V: SubView> Default for ViewState<V> {
    fn default() -> Self {
        Self {
            current: V::default(),
            is_loading: false,
        }
    }
}

impl<V: SubView> ViewState<V> {
    /// Select a sub-view. Returns whether the selection changed.
    pub fn switch_view(&mut self, view: V) -> bool {
        let changed = self.current != view;
        self.current = view;
        changed
    }

    pub fn is(&self, view: V) -> bool {
        self.current == view
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListView {
    #[default]
    Cards,
    Table,
}

impl SubView for ListView {
    const ALL: &'static [Self] = &[Self::Cards, Self::Table];

    fn label(self) -> &'static str {
        match self {
            Self::Cards => "Cards",
            Self::Table => "Table",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalyticsView {
    #[default]
    Overview,
    Users,
    Courses,
    Performance,
    Learning,
    Reports,
}

impl SubView for AnalyticsView {
    const ALL: &'static [Self] = &[
        Self::Overview,
        Self::Users,
        Self::Courses,
        Self::Performance,
        Self::Learning,
        Self::Reports,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Users => "Users",
            Self::Courses => "Courses",
            Self::Performance => "Performance",
            Self::Learning => "Learning",
            Self::Reports => "Reports",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AiView {
    #[default]
    Overview,
    Models,
    Performance,
    Monitoring,
    Training,
}

impl SubView for AiView {
    const ALL: &'static [Self] = &[
        Self::Overview,
        Self::Models,
        Self::Performance,
        Self::Monitoring,
        Self::Training,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Models => "Models",
            Self::Performance => "Performance",
            Self::Monitoring => "Monitoring",
            Self::Training => "Training",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminView {
    #[default]
    Settings,
    Logs,
    Backups,
}

impl SubView for AdminView {
    const ALL: &'static [Self] = &[Self::Settings, Self::Logs, Self::Backups];

    fn label(self) -> &'static str {
        match self {
            Self::Settings => "Settings",
            Self::Logs => "Logs",
            Self::Backups => "Backups",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_view_reports_change() {
        let mut state = ViewState::<AnalyticsView>::default();
        assert!(state.is(AnalyticsView::Overview));
        assert!(state.switch_view(AnalyticsView::Reports));
        assert!(!state.switch_view(AnalyticsView::Reports));
        assert!(state.is(AnalyticsView::Reports));
    }

    #[test]
    fn test_switch_view_keeps_loading_flag() {
        let mut state = ViewState::<AnalyticsView>::default();
        assert!(!state.is_loading);
        state.is_loading = true;
        state.switch_view(AnalyticsView::Users);
        assert!(state.is_loading);
        assert!(state.is(AnalyticsView::Users));
    }

    #[test]
    fn test_all_lists_default_first() {
        assert_eq!(ListView::ALL[0], ListView::default());
        assert_eq!(AiView::ALL[0], AiView::default());
        assert_eq!(AdminView::ALL[0], AdminView::default());
        assert_eq!(AnalyticsView::ALL.len(), 6);
    }
}
