//! Display helpers shared by views

use chrono::{DateTime, NaiveDate, Utc};

/// First letter of the first two words, upper-cased
pub fn get_initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// `5-Mar-2024`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%-d-%b-%Y").to_string()
}

/// What [`date_formatter`] returns for text it cannot read
pub const INVALID_DATE: &str = "Invalid Date";

/// Normalize an RFC 3339 or plain `YYYY-MM-DD` string to `YYYY-MM-DD`
pub fn date_formatter(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d").to_string();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => INVALID_DATE.to_string(),
    }
}

/// `Good morning` before noon, `afternoon` until 18:00, `evening` after
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_get_initials() {
        assert_eq!(get_initials("Jane Mary Doe"), "JM");
        assert_eq!(get_initials("  ada   lovelace "), "AL");
        assert_eq!(get_initials("Prince"), "P");
        assert_eq!(get_initials(""), "");
        assert_eq!(get_initials("   "), "");
    }

    #[test]
    fn test_date_formatting() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap();
        assert_eq!(format_date(&date), "5-Mar-2024");

        assert_eq!(date_formatter("2024-03-05T08:30:00.000Z"), "2024-03-05");
        assert_eq!(date_formatter("2024-03-05"), "2024-03-05");
        assert_eq!(date_formatter("yesterday"), "Invalid Date");
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting(0), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(17), "Good afternoon");
        assert_eq!(greeting(18), "Good evening");
    }
}
