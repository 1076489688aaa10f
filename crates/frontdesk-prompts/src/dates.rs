//! Date helpers quoted into the prompt so the model does no calendar
//! arithmetic of its own.

use chrono::{Datelike, Days, NaiveDate};

/// Returns the day name ("Monday") for a date.
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Renders a date the way the agent speaks it: "Thursday, February 26, 2026".
pub fn readable_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {}, {}",
        date.format("%A"),
        date.format("%B"),
        date.day(),
        date.year()
    )
}

/// Returns the next Monday strictly after `date`.
///
/// When `date` is itself a Monday the following Monday is returned, so
/// "next week" never means the week already in progress.
pub fn next_monday(date: NaiveDate) -> NaiveDate {
    let days_ahead = 7 - u64::from(date.weekday().num_days_from_monday());
    date.checked_add_days(Days::new(days_ahead)).unwrap_or(date)
}

/// Time-of-day greeting for the given hour (0-23).
pub fn time_of_day_greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 17 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_name(date(2026, 2, 25)), "Wednesday");
        assert_eq!(weekday_name(date(2026, 3, 1)), "Sunday");
    }

    #[test]
    fn readable_date_has_no_zero_padding() {
        assert_eq!(readable_date(date(2026, 3, 1)), "Sunday, March 1, 2026");
        assert_eq!(
            readable_date(date(2026, 2, 26)),
            "Thursday, February 26, 2026"
        );
    }

    #[test]
    fn next_monday_from_midweek() {
        assert_eq!(next_monday(date(2026, 2, 25)), date(2026, 3, 2));
    }

    #[test]
    fn next_monday_from_monday_skips_a_week() {
        let monday = date(2026, 3, 2);
        assert_eq!(next_monday(monday), date(2026, 3, 9));
    }

    #[test]
    fn next_monday_from_sunday_is_tomorrow() {
        assert_eq!(next_monday(date(2026, 3, 1)), date(2026, 3, 2));
    }

    #[test]
    fn greetings_by_hour() {
        assert_eq!(time_of_day_greeting(8), "Good morning");
        assert_eq!(time_of_day_greeting(12), "Good afternoon");
        assert_eq!(time_of_day_greeting(16), "Good afternoon");
        assert_eq!(time_of_day_greeting(17), "Good evening");
        assert_eq!(time_of_day_greeting(23), "Good evening");
    }
}
