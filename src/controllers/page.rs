//! Server-rendered view of a single song.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{db::Database, error::StoreError, models::song::Song};

pub async fn song_page(database: &Database, group: &str, song: &str) -> Response {
    match database.get_one(group, song).await {
        Ok(found) => Html(render_song(&found)).into_response(),
        Err(e) => {
            let status = e.status();
            let message = match e {
                StoreError::NotFound => format!("{} - {} is not in the library", group, song),
                _ => "The song library is unavailable".to_string(),
            };
            (status, Html(render_error(status, &message))).into_response()
        }
    }
}

fn render_song(song: &Song) -> String {
    let lyrics = song
        .text
        .lines()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br>\n");
    let link = if song.link.is_empty() {
        String::new()
    } else if is_web_link(&song.link) {
        format!(
            r#"<p class="link"><a href="{0}">{0}</a></p>"#,
            escape_html(&song.link)
        )
    } else {
        format!(r#"<p class="link">{}</p>"#, escape_html(&song.link))
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{group} - {title}</title>
</head>
<body>
    <h1>{title}</h1>
    <h2>{group}</h2>
    <p class="release-date">{release_date}</p>
    {link}
    <div class="lyrics">
{lyrics}
    </div>
</body>
</html>
"#,
        group = escape_html(&song.group),
        title = escape_html(&song.song),
        release_date = escape_html(&song.release_date),
    )
}

fn render_error(status: StatusCode, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>{status}</title></head>
<body><h1>{status}</h1><p>{message}</p></body>
</html>
"#,
        message = escape_html(message),
    )
}

/// Only http(s) links become anchors; `javascript:` and friends stay text.
fn is_web_link(link: &str) -> bool {
    let lower = link.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn renders_lyric_lines_and_link() {
        let song = Song {
            group: "AC/DC".to_string(),
            song: "T.N.T.".to_string(),
            release_date: "1975".to_string(),
            text: "\nOi\nOi <oi>".to_string(),
            link: "https://example.com/?a=1&b=2".to_string(),
        };
        let html = render_song(&song);
        assert!(html.contains("<title>AC/DC - T.N.T.</title>"));
        assert!(html.contains("<br>\nOi<br>\nOi &lt;oi&gt;"));
        assert!(html.contains(r#"href="https://example.com/?a=1&amp;b=2""#));
    }

    #[test]
    fn script_links_are_not_clickable() {
        for link in [
            "javascript:alert(document.cookie)",
            " JavaScript:alert(1)",
            "data:text/html,<script>alert(1)</script>",
        ] {
            let mut song = Song::new("a", "b", "");
            song.link = link.to_string();
            let html = render_song(&song);
            assert!(!html.contains("<a href"), "{link} rendered as anchor");
            assert!(html.contains(&format!(r#"<p class="link">{}</p>"#, escape_html(link))));
        }
    }

    #[test]
    fn web_link_scheme_is_case_insensitive() {
        assert!(is_web_link("HTTPS://example.com"));
        assert!(is_web_link("http://example.com"));
        assert!(!is_web_link("ftp://example.com"));
        assert!(!is_web_link("//example.com"));
    }

    #[test]
    fn omits_empty_link() {
        let html = render_song(&Song::new("a", "b", ""));
        assert!(!html.contains("<a href"));
    }
}
