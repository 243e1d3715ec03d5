//! Reply text formatting.

use chrono::{DateTime, Utc};

use crate::domain::entities::LinkRequest;

/// Formats a timestamp as `Mon 2 Jan 2006 15:04:05` (UTC).
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%a %-d %b %Y %H:%M:%S").to_string()
}

/// Formats the request history for the `/list` command (Telegram HTML).
pub fn format_requests(requests: &[LinkRequest]) -> String {
    requests
        .iter()
        .map(|request| {
            format!(
                "➡️ <a href=\"tg://user?id={id}\">{id}</a> requested {url} on {date}\n\n",
                id = request.telegram_id,
                url = request.url,
                date = format_date(&request.created_at),
            )
        })
        .collect()
}

/// Formats converted links, one arrow-prefixed line each.
pub fn format_links(urls: &[String]) -> String {
    urls.iter().map(|url| format!("➡️ {url}\n\n")).collect()
}
