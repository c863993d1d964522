//! Display formatting for the detail view.

use chrono::NaiveDate;

/// Shown in place of a missing poster.
pub const PLACEHOLDER_POSTER: &str = "/placeholder-movie.jpg";

/// Full image URL for `path` at the given TMDB size ("w500", "w1280", ...).
pub fn image_url(base: &str, size: &str, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    Some(format!("{}/{}{}", base.trim_end_matches('/'), size, path))
}

/// Like [`image_url`] but falls back to the placeholder poster.
pub fn poster_url(base: &str, size: &str, path: Option<&str>) -> String {
    image_url(base, size, path).unwrap_or_else(|| PLACEHOLDER_POSTER.to_string())
}

/// Vote average with one decimal ("8.4").
pub fn format_rating(vote_average: f32) -> String {
    format!("{:.1}", vote_average)
}

/// "2h 19m"; `None` when the runtime is unknown or zero.
pub fn format_runtime(minutes: Option<u32>) -> Option<String> {
    match minutes {
        Some(m) if m > 0 => Some(format!("{}h {}m", m / 60, m % 60)),
        _ => None,
    }
}

pub fn year_text(year: Option<u32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// "1999-10-15" -> "10/15/1999". Dates that don't parse are shown as given.
pub fn format_release_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(d) => d.format("%-m/%-d/%Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// 63000000 -> "63,000,000"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole-dollar amount; `None` when zero (unknown).
pub fn format_currency(amount: u64) -> Option<String> {
    (amount > 0).then(|| format!("${}", group_thousands(amount)))
}

pub fn format_vote_count(count: u32) -> String {
    format!("{} votes", group_thousands(u64::from(count)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://image.tmdb.org/t/p";

    #[test]
    fn test_image_urls() {
        assert_eq!(
            image_url(BASE, "w500", Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(image_url(BASE, "w500", Some("")), None);
        assert_eq!(image_url(BASE, "w500", None), None);
        assert_eq!(poster_url(BASE, "w500", None), PLACEHOLDER_POSTER);
        assert_eq!(
            poster_url("https://img.example/", "w185", Some("/x.jpg")),
            "https://img.example/w185/x.jpg"
        );
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(8.4), "8.4");
        assert_eq!(format_rating(7.0), "7.0");
        assert_eq!(format_rating(6.66), "6.7");
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(Some(139)).as_deref(), Some("2h 19m"));
        assert_eq!(format_runtime(Some(45)).as_deref(), Some("0h 45m"));
        assert_eq!(format_runtime(Some(0)), None);
        assert_eq!(format_runtime(None), None);
    }

    #[test]
    fn test_dates() {
        assert_eq!(format_release_date("1999-10-15"), "10/15/1999");
        assert_eq!(format_release_date("2024-01-05"), "1/5/2024");
        assert_eq!(format_release_date("someday"), "someday");
        assert_eq!(year_text(Some(1999)), "1999");
        assert_eq!(year_text(None), "N/A");
    }

    #[test]
    fn test_thousands_and_currency() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1234), "1,234");
        assert_eq!(group_thousands(63_000_000), "63,000,000");
        assert_eq!(format_currency(63_000_000).as_deref(), Some("$63,000,000"));
        assert_eq!(format_currency(0), None);
        assert_eq!(format_vote_count(26_280), "26,280 votes");
    }
}
