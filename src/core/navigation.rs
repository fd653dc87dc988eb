//! Page registry and navigation state.
//!
//! The set of screens is closed: [`PageKey`] enumerates them and every
//! dispatch over pages is an exhaustive `match`. [`Coordinator`] owns the
//! single active content region and decides which load result may write
//! into it, using [`RenderTicket`]s so a slow response for a page the user
//! already left is dropped instead of overwriting the current page.

/// One navigable screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageKey {
    #[default]
    Dashboard,
    Users,
    Courses,
    Analytics,
    AiManagement,
    Administration,
}

impl PageKey {
    /// Registry order, which is also sidebar order.
    pub const ALL: [PageKey; 6] = [
        Self::Dashboard,
        Self::Users,
        Self::Courses,
        Self::Analytics,
        Self::AiManagement,
        Self::Administration,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Courses => "courses",
            Self::Analytics => "analytics",
            Self::AiManagement => "ai-management",
            Self::Administration => "administration",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Users => "User Management",
            Self::Courses => "Course Management",
            Self::Analytics => "Analytics & Reports",
            Self::AiManagement => "AI Management",
            Self::Administration => "System Administration",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Courses => "Courses",
            Self::Analytics => "Analytics",
            Self::AiManagement => "AI Management",
            Self::Administration => "Administration",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

// =============================================================================
// Sidebar / current page
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub current: PageKey,
    /// Desktop: sidebar shrunk to icons.
    pub sidebar_collapsed: bool,
    /// Mobile: sidebar shown as an overlay.
    pub sidebar_open: bool,
}

impl NavigationState {
    /// The menu button collapses the sidebar on desktop and opens the overlay on mobile.
    pub fn toggle_sidebar(&mut self, is_mobile: bool) {
        if is_mobile {
            self.sidebar_open = !self.sidebar_open;
        } else {
            self.sidebar_collapsed = !self.sidebar_collapsed;
        }
    }

    /// Crossing into the mobile layout always closes the overlay.
    pub fn on_viewport_change(&mut self, is_mobile: bool) {
        if is_mobile {
            self.sidebar_open = false;
        }
    }

    /// After picking a page on mobile the overlay closes.
    pub fn select(&mut self, page: PageKey, is_mobile: bool) {
        self.current = page;
        if is_mobile {
            self.sidebar_open = false;
        }
    }
}

// =============================================================================
// Render tickets
// =============================================================================

/// Identifies one render attempt. Only the current ticket may write the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTicket {
    pub page: PageKey,
    pub generation: u64,
}

/// Monotonic generation counter shared by anything that issues tickets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn current(self) -> u64 {
        self.0
    }

    pub fn is_current(self, generation: u64) -> bool {
        self.0 == generation
    }
}

/// What the active region currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionContent<C> {
    Loading,
    Ready(C),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRegion<C> {
    pub ticket: RenderTicket,
    pub content: RegionContent<C>,
}

/// Navigation plus ownership of the active content region.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinator<C> {
    nav: NavigationState,
    mounted: bool,
    region: Option<ActiveRegion<C>>,
    generation: Generation,
}

impl<C> Default for Coordinator<C> {
    fn default() -> Self {
        Self {
            nav: NavigationState::default(),
            mounted: false,
            region: None,
            generation: Generation::default(),
        }
    }
}

impl<C> Coordinator<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut NavigationState {
        &mut self.nav
    }

    pub fn current_page(&self) -> PageKey {
        self.nav.current
    }

    pub fn region(&self) -> Option<&ActiveRegion<C>> {
        self.region.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The shell's content region came into existence.
    pub fn mount_region(&mut self) {
        self.mounted = true;
    }

    /// The content region went away; any in-flight result becomes stale.
    pub fn unmount_region(&mut self) {
        self.mounted = false;
        self.region = None;
        self.generation.next();
    }

    /// Make `page` current and start rendering it.
    ///
    /// Returns `None` when there is no region to render into; the page is
    /// still recorded as current so the highlighted entry stays right.
    pub fn navigate(&mut self, page: PageKey, is_mobile: bool) -> Option<RenderTicket> {
        self.nav.select(page, is_mobile);
        self.begin_render(page)
    }

    /// Re-render the current page under a fresh ticket.
    pub fn retry(&mut self) -> Option<RenderTicket> {
        self.begin_render(self.nav.current)
    }

    fn begin_render(&mut self, page: PageKey) -> Option<RenderTicket> {
        let generation = self.generation.next();
        if !self.mounted {
            tracing::debug!(page = page.key(), "no content region, render skipped");
            return None;
        }
        let ticket = RenderTicket { page, generation };
        self.region = Some(ActiveRegion {
            ticket,
            content: RegionContent::Loading,
        });
        Some(ticket)
    }

    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.region.as_ref().is_some_and(|r| r.ticket == ticket)
    }

    /// Write a finished load into the region if `ticket` still owns it.
    ///
    /// Returns `false` (and leaves the region alone) for stale tickets.
    pub fn commit(&mut self, ticket: RenderTicket, result: Result<C, String>) -> bool {
        match self.region.as_mut() {
            Some(region) if region.ticket == ticket => {
                region.content = match result {
                    Ok(content) => RegionContent::Ready(content),
                    Err(message) => RegionContent::Failed(message),
                };
                true
            }
            _ => {
                tracing::debug!(
                    page = ticket.page.key(),
                    generation = ticket.generation,
                    "stale render result dropped"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted() -> Coordinator<&'static str> {
        let mut c = Coordinator::new();
        c.mount_region();
        c
    }

    #[test]
    fn test_page_keys_unique_and_round_trip() {
        for page in PageKey::ALL {
            assert_eq!(PageKey::from_key(page.key()), Some(page));
        }
        let mut keys: Vec<_> = PageKey::ALL.iter().map(|p| p.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), PageKey::ALL.len());
        assert_eq!(PageKey::from_key("settings"), None);
    }

    #[test]
    fn test_toggle_sidebar_desktop_and_mobile() {
        let mut nav = NavigationState::default();
        nav.toggle_sidebar(false);
        assert!(nav.sidebar_collapsed);
        assert!(!nav.sidebar_open);

        nav.toggle_sidebar(true);
        assert!(nav.sidebar_open);
        nav.on_viewport_change(true);
        assert!(!nav.sidebar_open);
        assert!(nav.sidebar_collapsed);

        nav.sidebar_open = true;
        nav.on_viewport_change(false);
        assert!(nav.sidebar_open);
    }

    #[test]
    fn test_navigate_sets_current_and_loading() {
        let mut c = mounted();
        let ticket = c.navigate(PageKey::Users, false).unwrap();
        assert_eq!(c.current_page(), PageKey::Users);
        assert_eq!(ticket.page, PageKey::Users);
        assert_eq!(c.region().map(|r| &r.content), Some(&RegionContent::Loading));
    }

    #[test]
    fn test_stale_result_not_written() {
        let mut c = mounted();
        let users = c.navigate(PageKey::Users, false).unwrap();
        let courses = c.navigate(PageKey::Courses, false).unwrap();

        assert!(c.commit(courses, Ok("courses")));
        assert!(!c.commit(users, Ok("users")));

        let region = c.region().unwrap();
        assert_eq!(region.ticket.page, PageKey::Courses);
        assert_eq!(region.content, RegionContent::Ready("courses"));
    }

    #[test]
    fn test_stale_result_before_current_resolves() {
        let mut c = mounted();
        let users = c.navigate(PageKey::Users, false).unwrap();
        let _courses = c.navigate(PageKey::Courses, false).unwrap();

        assert!(!c.commit(users, Ok("users")));
        assert_eq!(c.region().map(|r| &r.content), Some(&RegionContent::Loading));
    }

    #[test]
    fn test_renavigate_same_page_issues_new_ticket() {
        let mut c = mounted();
        let first = c.navigate(PageKey::Analytics, false).unwrap();
        let second = c.navigate(PageKey::Analytics, false).unwrap();
        assert_ne!(first, second);
        assert!(!c.commit(first, Ok("old")));
        assert!(c.commit(second, Ok("new")));
    }

    #[test]
    fn test_retry_supersedes_in_flight_load() {
        let mut c = mounted();
        let first = c.navigate(PageKey::Dashboard, false).unwrap();
        let retry = c.retry().unwrap();
        assert_eq!(retry.page, PageKey::Dashboard);
        assert!(!c.is_current(first));
        assert!(c.commit(retry, Err("boom".into())));
        assert_eq!(
            c.region().map(|r| &r.content),
            Some(&RegionContent::Failed("boom".into()))
        );
    }

    #[test]
    fn test_render_without_region_aborts() {
        let mut c: Coordinator<&str> = Coordinator::new();
        assert_eq!(c.navigate(PageKey::Courses, true), None);
        assert_eq!(c.current_page(), PageKey::Courses);
        assert!(c.region().is_none());
    }

    #[test]
    fn test_unmount_invalidates_tickets() {
        let mut c = mounted();
        let ticket = c.navigate(PageKey::Users, false).unwrap();
        c.unmount_region();
        assert!(!c.is_mounted());
        assert!(!c.commit(ticket, Ok("users")));

        c.mount_region();
        let again = c.retry().unwrap();
        assert_ne!(again, ticket);
    }

    #[test]
    fn test_generation_counter() {
        let mut g = Generation::default();
        let a = g.next();
        let b = g.next();
        assert!(b > a);
        assert!(g.is_current(b));
        assert!(!g.is_current(a));
        assert_eq!(g.current(), b);
    }
}
