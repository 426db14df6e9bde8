use crate::api::ApiError;
use crate::ui::Page;
use comrak::plugins::syntect::SyntectAdapter;
use comrak::{ComrakOptions, ComrakPlugins, markdown_to_html_with_plugins};
use dioxus::prelude::*;
use once_cell::sync::Lazy;
use time::format_description::well_known::Rfc3339;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::FormatItem,
    macros::format_description,
};

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options
});

pub fn markdown_to_html(md: &str) -> String {
    let adapter = SyntectAdapter::new(Some("base16-ocean.dark"));
    let mut plugins = ComrakPlugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);
    markdown_to_html_with_plugins(md, &MARKDOWN_OPTIONS, &plugins)
}

pub const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

const SHORT_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:zero], [year]");

const NAIVE_TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

pub fn now_utc() -> OffsetDateTime {
    #[cfg(not(target_arch = "wasm32"))]
    {
        OffsetDateTime::now_utc()
    }
    #[cfg(target_arch = "wasm32")]
    {
        let nanos = (js_sys::Date::now() * 1_000_000.0) as i128;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

pub fn today() -> Date {
    let mut now = now_utc();
    if let Ok(offset) = UtcOffset::current_local_offset() {
        now = now.to_offset(offset);
    }
    now.date()
}

/// Backend timestamps arrive either RFC 3339 or as naive ISO (with or
/// without fractional seconds); naive values are taken as UTC.
pub fn parse_server_timestamp(raw: &str) -> Option<OffsetDateTime> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    let trimmed = raw.split('.').next().unwrap_or(raw);
    PrimitiveDateTime::parse(trimmed, NAIVE_TIMESTAMP_FORMAT)
        .ok()
        .map(|datetime| datetime.assume_utc())
}

pub fn format_message_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

pub fn format_short_date(date: Date) -> String {
    date.format(SHORT_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// "Just now" / "5m ago" / "3h ago" / "2d ago", falling back to the date for
/// anything older than a week.
pub fn relative_time(raw: &str) -> String {
    let Some(then) = parse_server_timestamp(raw) else {
        return String::new();
    };
    relative_from(then, now_utc())
}

pub fn relative_from(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let minutes = (now - then).whole_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }
    format_short_date(then.date())
}

/// Central 401 sink: the client has already dropped the token, this is the
/// navigation half of the invariant.
pub fn redirect_if_unauthorized(error: &ApiError, mut page: Signal<Page>) -> bool {
    if error.is_unauthorized() {
        page.set(Page::Login);
        return true;
    }
    false
}

#[component]
pub fn ErrorBanner(message: String) -> Element {
    rsx! {
        div { class: "error-banner", "{message}" }
    }
}

#[component]
pub fn Spinner() -> Element {
    rsx! {
        div { class: "spinner", aria_label: "Loading" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_naive_server_timestamps() {
        let parsed = parse_server_timestamp("2026-02-15T10:30:00").expect("should parse");
        assert_eq!(parsed, datetime!(2026-02-15 10:30:00 UTC));
    }

    #[test]
    fn parses_fractional_and_rfc3339_timestamps() {
        assert_eq!(
            parse_server_timestamp("2026-02-15T10:30:00.123456"),
            Some(datetime!(2026-02-15 10:30:00 UTC))
        );
        assert_eq!(
            parse_server_timestamp("2026-02-15T10:30:00Z"),
            Some(datetime!(2026-02-15 10:30:00 UTC))
        );
    }

    #[test]
    fn unparsable_timestamps_are_none() {
        assert_eq!(parse_server_timestamp(""), None);
        assert_eq!(parse_server_timestamp("02/15/2026"), None);
    }

    #[test]
    fn relative_time_buckets() {
        let now = datetime!(2026-02-15 12:00:00 UTC);
        assert_eq!(relative_from(datetime!(2026-02-15 11:59:40 UTC), now), "Just now");
        assert_eq!(relative_from(datetime!(2026-02-15 11:15:00 UTC), now), "45m ago");
        assert_eq!(relative_from(datetime!(2026-02-15 03:00:00 UTC), now), "9h ago");
        assert_eq!(relative_from(datetime!(2026-02-13 12:00:00 UTC), now), "2d ago");
        assert_eq!(relative_from(datetime!(2026-01-01 12:00:00 UTC), now), "Jan 01, 2026");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = datetime!(2026-02-15 12:00:00 UTC);
        assert_eq!(relative_from(datetime!(2026-02-15 12:05:00 UTC), now), "Just now");
    }
}
