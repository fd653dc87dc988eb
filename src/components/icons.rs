//! Centralized icon definitions.
//!
//! Maps semantic icon names to Bootstrap icons so components never name an
//! icon set directly.

use icondata::Icon;

use crate::core::NotificationKind;
use crate::core::PageKey;

mod bootstrap {
    pub use icondata::{
        BsActivity as Activity, BsArrowClockwise as Refresh, BsArrowDownRight as TrendDown,
        BsArrowUpRight as TrendUp, BsBarChartLine as Analytics, BsBook as Courses,
        BsCheckCircleFill as Success, BsCloudArrowUp as Upload, BsCpu as Ai,
        BsDatabase as Backup, BsDownload as Download, BsExclamationTriangleFill as Warning,
        BsEye as View, BsGear as Admin, BsGrid as Grid, BsInfoCircleFill as Info,
        BsList as Menu, BsListUl as List, BsPencil as Edit, BsPeople as Users,
        BsPlusLg as Plus, BsSearch as Search, BsSpeedometer2 as Dashboard, BsTrash as Delete,
        BsXCircleFill as Error, BsXLg as Close,
    };
}

macro_rules! icon {
    ($name:ident, $bs:ident) => {
        pub const $name: Icon = bootstrap::$bs;
    };
}

icon!(DASHBOARD, Dashboard);
icon!(USERS, Users);
icon!(COURSES, Courses);
icon!(ANALYTICS, Analytics);
icon!(AI, Ai);
icon!(ADMIN, Admin);
icon!(MENU, Menu);
icon!(REFRESH, Refresh);
icon!(DOWNLOAD, Download);
icon!(UPLOAD, Upload);
icon!(BACKUP, Backup);
icon!(PLUS, Plus);
icon!(EDIT, Edit);
icon!(DELETE, Delete);
icon!(VIEW, View);
icon!(SEARCH, Search);
icon!(CLOSE, Close);
icon!(GRID, Grid);
icon!(LIST, List);
icon!(ACTIVITY, Activity);
icon!(TREND_UP, TrendUp);
icon!(TREND_DOWN, TrendDown);
icon!(SUCCESS, Success);
icon!(INFO, Info);
icon!(WARNING, Warning);
icon!(ERROR, Error);

/// Sidebar icon for a page.
pub fn page(page: PageKey) -> Icon {
    match page {
        PageKey::Dashboard => DASHBOARD,
        PageKey::Users => USERS,
        PageKey::Courses => COURSES,
        PageKey::Analytics => ANALYTICS,
        PageKey::AiManagement => AI,
        PageKey::Administration => ADMIN,
    }
}

pub fn notification(kind: NotificationKind) -> Icon {
    match kind {
        NotificationKind::Info => INFO,
        NotificationKind::Success => SUCCESS,
        NotificationKind::Warning => WARNING,
        NotificationKind::Error => ERROR,
    }
}
