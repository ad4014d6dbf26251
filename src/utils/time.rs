use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const TIME_FORMATS: [&str; 4] = ["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Accepts 12-hour (`02:30 PM`) and 24-hour (`14:30`, `14:30:00`) clock times.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim().to_ascii_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&trimmed, fmt).ok())
}

pub fn combine_utc(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

pub fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
