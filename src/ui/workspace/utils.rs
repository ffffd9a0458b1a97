//! Workspace utility functions
//!
//! Contains helper functions used across workspace components

use crate::events::Origin;
use ratatui::prelude::Color;

/// Get a ratatui color for the origin of an event
pub fn get_origin_color(origin: &Origin) -> Color {
    match origin {
        Origin::Session => Color::Cyan,
        Origin::Sync => Color::Yellow,
        Origin::Write => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some((date_part, time_part)) = timestamp.split_once(' ') {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Parses a `#RRGGBB` category color. Anything else renders in gray.
pub fn parse_hex_color(hex: &str) -> Color {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return Color::Gray;
    }
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}

/// Formats an amount with thousands separators and two decimals.
pub fn format_money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{}{}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_timestamp_keeps_month_day_and_minutes() {
        assert_eq!(format_compact_timestamp("2026-10-19 08:30:12"), "10-19 08:30");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#3B82F6"), Color::Rgb(0x3B, 0x82, 0xF6));
        assert_eq!(parse_hex_color("red"), Color::Gray);
        assert_eq!(parse_hex_color("#GGGGGG"), Color::Gray);
    }

    #[test]
    fn money_is_grouped() {
        assert_eq!(format_money(1234567.5), "1,234,567.50");
        assert_eq!(format_money(950.0), "950.00");
        assert_eq!(format_money(-1200.0), "-1,200.00");
        assert_eq!(format_money(0.0), "0.00");
    }
}
