use chrono::{DateTime, NaiveDateTime, Utc};

/// Accepted reminder time formats, tried in order. The first match wins, so
/// `01/02/2025 10:00` is read day-first. Reordering changes how ambiguous input
/// is interpreted.
pub const TIME_FORMATS: [&str; 10] = [
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M",
    "%H:%M %d/%m/%Y",
    "%H:%M %m/%d/%Y",
    "%Y-%m-%d %I:%M%p",
    "%d/%m/%Y %I:%M%p",
    "%m/%d/%Y %I:%M%p",
    "%I:%M%p %d/%m/%Y",
    "%I:%M%p %m/%d/%Y",
];

/// Parses a wall-clock time and stamps it as UTC without converting it.
pub fn parse(text: &str) -> Option<DateTime<Utc>> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}
