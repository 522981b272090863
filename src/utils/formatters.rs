// Formatting utilities

use chrono::{DateTime, TimeZone};

/// Format a timestamp the way the roster header shows it (e.g., "19/10/2026, 18:05:09")
pub fn format_updated_at<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Channel mention markup (e.g., "<#123>")
pub fn channel_mention(channel_id: impl std::fmt::Display) -> String {
    format!("<#{}>", channel_id)
}
