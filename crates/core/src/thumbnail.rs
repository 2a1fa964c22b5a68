//! Thumbnail `<img>` tags for admin list and change screens.

use serde::Serialize;

/// Pixel dimensions of a rendered thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

/// Poster preview on the movie change screen.
pub const POSTER: ThumbnailSize = ThumbnailSize {
    width: 105,
    height: 100,
};

/// Still preview inside the movie's inline editor.
pub const STILL_INLINE: ThumbnailSize = ThumbnailSize {
    width: 110,
    height: 100,
};

/// Still preview on the still list screen.
pub const STILL_LIST: ThumbnailSize = ThumbnailSize {
    width: 70,
    height: 60,
};

/// Actor photo on the actor list screen.
pub const ACTOR: ThumbnailSize = ThumbnailSize {
    width: 70,
    height: 60,
};

/// Resolve a stored media path against the public media URL prefix.
///
/// Absolute URLs (`http://`, `https://`) are returned untouched.
pub fn media_url(prefix: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Render an `<img>` tag for `image_url` at the given size.
///
/// The URL is escaped for a double-quoted attribute so any stored path
/// produces a well-formed tag.
pub fn render_thumbnail(image_url: &str, width: u32, height: u32) -> String {
    let src = html_escape::encode_double_quoted_attribute(image_url);
    format!(r#"<img src="{src}" width="{width}" height="{height}">"#)
}

/// Render the thumbnail for an optional stored media path.
///
/// Missing or empty paths render as an empty string.
pub fn render_media_thumbnail(prefix: &str, path: Option<&str>, size: ThumbnailSize) -> String {
    match path {
        Some(p) if !p.trim().is_empty() => {
            render_thumbnail(&media_url(prefix, p), size.width, size.height)
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_path_and_dimensions() {
        assert_eq!(
            render_thumbnail("/media/movies/poster.jpg", 105, 100),
            r#"<img src="/media/movies/poster.jpg" width="105" height="100">"#
        );
    }

    #[test]
    fn escapes_quotes_and_ampersands() {
        let html = render_thumbnail(r#"/media/a "b" & c.png"#, 70, 60);
        assert!(html.contains("&quot;b&quot;"));
        assert!(html.contains("&amp; c.png"));
        assert!(html.starts_with(r#"<img src="/media/a "#));
        assert!(html.ends_with(r#" width="70" height="60">"#));
    }

    #[test]
    fn cannot_break_out_of_attribute() {
        let html = render_thumbnail(r#"x.png" onerror="alert(1)"#, 70, 60);
        assert!(!html.contains(r#"" onerror=""#));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn non_ascii_paths_pass_through() {
        let html = render_thumbnail("/media/кадры/сцена 1.jpg", 110, 100);
        assert!(html.contains("/media/кадры/сцена 1.jpg"));
    }

    #[test]
    fn media_url_joins_with_single_slash() {
        assert_eq!(media_url("/media/", "/actors/a.jpg"), "/media/actors/a.jpg");
        assert_eq!(media_url("/media", "actors/a.jpg"), "/media/actors/a.jpg");
        assert_eq!(
            media_url("/media/", "https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn missing_media_renders_empty() {
        assert_eq!(render_media_thumbnail("/media/", None, ACTOR), "");
        assert_eq!(render_media_thumbnail("/media/", Some("  "), ACTOR), "");
        assert_eq!(
            render_media_thumbnail("/media/", Some("shots/1.jpg"), STILL_INLINE),
            r#"<img src="/media/shots/1.jpg" width="110" height="100">"#
        );
    }
}
