//! Formatting utilities for counts, dates, sizes, and other display values.

/// Format a count for compact display (e.g., "999", "1.5K", "2.5M").
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Format a byte count (e.g., "512 B", "1.2 GB").
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Format a percentage with one decimal (e.g., "84.3%").
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a signed percentage change (e.g., "+12.5%", "-12.3%").
pub fn format_change(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

/// Format a dollar amount with thousands separators (e.g., "$2,847.32").
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        cents % 100
    )
}

/// Up to two uppercase initials from a display name ("Sarah Johnson" -> "SJ").
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_alphabetic())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

// =============================================================================
// Dates
// =============================================================================

/// Display style for [`format_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "Jun 28"
    Short,
    /// "June 28, 2025"
    Long,
    /// "10:30"
    Time,
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar fields of an ISO-8601 timestamp, as written (no zone conversion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateParts {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

/// Format an ISO-8601 date or timestamp. Unparseable input is returned unchanged.
pub fn format_date(iso: &str, style: DateStyle) -> String {
    let Some(parts) = parse_iso(iso) else {
        return iso.to_string();
    };
    let month = MONTHS[(parts.month - 1) as usize];
    match style {
        DateStyle::Short => format!("{} {}", &month[..3], parts.day),
        DateStyle::Long => format!("{} {}, {}", month, parts.day, parts.year),
        DateStyle::Time => format!("{:02}:{:02}", parts.hour, parts.minute),
    }
}

fn parse_iso(s: &str) -> Option<DateParts> {
    let s = s.trim();
    let (date, time) = match s.split_once(['T', ' ']) {
        Some((d, t)) => (d, Some(t)),
        None => (s, None),
    };

    let mut fields = date.split('-');
    let year = parse_fixed(fields.next()?, 4)?;
    let month = parse_fixed(fields.next()?, 2)?;
    let day = parse_fixed(fields.next()?, 2)?;
    if fields.next().is_some() || !(1..=12).contains(&month) {
        return None;
    }
    if day == 0 || day > days_in_month(year, month) {
        return None;
    }

    let (hour, minute) = match time {
        None => (0, 0),
        Some(t) => {
            let hour = parse_fixed(t.get(0..2)?, 2)?;
            if t.get(2..3)? != ":" {
                return None;
            }
            let minute = parse_fixed(t.get(3..5)?, 2)?;
            if hour > 23 || minute > 59 {
                return None;
            }
            (hour, minute)
        }
    };

    Some(DateParts {
        year,
        month,
        day,
        hour,
        minute,
    })
}

fn parse_fixed(s: &str, len: usize) -> Option<u32> {
    if s.len() != len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Check if a year is a leap year.
fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.0K");
        assert_eq!(format_number(1500), "1.5K");
        assert_eq!(format_number(2_500_000), "2.5M");
        assert_eq!(format_number(1_247_893), "1.2M");
    }

    #[test]
    fn test_format_date_styles() {
        let ts = "2025-06-28T10:30:00Z";
        assert_eq!(format_date(ts, DateStyle::Short), "Jun 28");
        assert_eq!(format_date(ts, DateStyle::Long), "June 28, 2025");
        assert_eq!(format_date(ts, DateStyle::Time), "10:30");
        assert_eq!(format_date("2025-06-01", DateStyle::Short), "Jun 1");
        assert_eq!(format_date("2025-06-01", DateStyle::Time), "00:00");
    }

    #[test]
    fn test_format_date_unparseable_returned_unchanged() {
        for input in [
            "",
            "2 minutes ago",
            "2025-13-01",
            "2025-02-30T00:00:00Z",
            "2025-6-1",
            "2025-06-28T25:00",
        ] {
            assert_eq!(format_date(input, DateStyle::Long), input);
        }
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(format_date("2024-02-29", DateStyle::Long), "February 29, 2024");
        assert_eq!(format_date("2100-02-29", DateStyle::Long), "2100-02-29");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_288_490_189), "1.2 GB");
    }

    #[test]
    fn test_format_currency_and_percent() {
        assert_eq!(format_currency(2847.32), "$2,847.32");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567.00");
        assert_eq!(format_currency(-12.5), "-$12.50");
        assert_eq!(format_percent(84.34), "84.3%");
        assert_eq!(format_change(12.5), "+12.5%");
        assert_eq!(format_change(-12.3), "-12.3%");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Sarah Johnson"), "SJ");
        assert_eq!(initials("Dr. Michael Chen"), "DM");
        assert_eq!(initials("admin"), "A");
        assert_eq!(initials(""), "");
    }
}
