//! HTML transcript table rendering
//!
//! Produces a table fragment a front end binds a click-to-seek handler to.
//! Each body row carries its interval as `data-start`/`data-end` attributes;
//! no script is embedded. Segment text is escaped, so text containing
//! HTML-significant characters cannot corrupt the table.

use timescribe_core::Segment;

/// Placeholder fragment when the transcript has no segments
pub const NO_SEGMENTS_HTML: &str = "No segments found";

/// Escape text for interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render segments as an HTML table fragment
///
/// Header row plus one body row per segment, in input order, times to two
/// decimal places.
pub fn render_table(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return NO_SEGMENTS_HTML.to_string();
    }

    let mut html = String::from(
        "<table class=\"transcript-table\">\n\
         <tr><th>Start (s)</th><th>End (s)</th><th>Segment</th></tr>\n",
    );

    for segment in segments {
        html.push_str(&format!(
            "<tr class=\"transcript-row\" data-start=\"{:.2}\" data-end=\"{:.2}\">\
             <td>{:.2}</td><td>{:.2}</td><td>{}</td></tr>\n",
            segment.start,
            segment.end,
            segment.start,
            segment.end,
            escape_html(&segment.text)
        ));
    }

    html.push_str("</table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str, start: f64, end: f64) -> Segment {
        Segment {
            text: text.to_string(),
            start,
            end,
        }
    }

    fn body_row_count(html: &str) -> usize {
        html.matches("<tr class=\"transcript-row\"").count()
    }

    #[test]
    fn test_escape_preserves_normal_text() {
        assert_eq!(escape_html("Hello, world!"), "Hello, world!");
        assert_eq!(escape_html("Testing 123"), "Testing 123");
    }

    #[test]
    fn test_escape_html_significant_chars() {
        assert_eq!(
            escape_html("<script>alert(\"x\")</script>"),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("it's"), "it&#39;s");
    }

    #[test]
    fn test_escape_unicode_preserved() {
        assert_eq!(escape_html("Hello 世界"), "Hello 世界");
    }

    #[test]
    fn test_empty_segments_render_placeholder() {
        assert_eq!(render_table(&[]), NO_SEGMENTS_HTML);
    }

    #[test]
    fn test_one_body_row_per_segment_in_order() {
        let segments = vec![
            segment("hello", 0.0, 1.2),
            segment("world", 1.2, 2.5),
            segment("!", 2.5, 2.6),
        ];
        let html = render_table(&segments);

        assert_eq!(body_row_count(&html), 3);
        // Order preserved
        let hello = html.find("hello").unwrap();
        let world = html.find("world").unwrap();
        let bang = html.find("<td>!</td>").unwrap();
        assert!(hello < world && world < bang);
    }

    #[test]
    fn test_times_have_two_decimals() {
        let html = render_table(&[segment("x", 1.5, 2.0)]);
        assert!(html.contains("<td>1.50</td><td>2.00</td>"));
    }

    #[test]
    fn test_rows_carry_seek_interval_as_data_attributes() {
        let html = render_table(&[segment("x", 1.2, 2.5)]);
        assert!(html.contains("data-start=\"1.20\""));
        assert!(html.contains("data-end=\"2.50\""));
        // No embedded script or inline handlers
        assert!(!html.contains("<script"));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn test_segment_text_is_escaped() {
        let html = render_table(&[segment("<b>bold</b> & \"quoted\"", 0.0, 1.0)]);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; &quot;quoted&quot;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_header_row_present() {
        let html = render_table(&[segment("x", 0.0, 1.0)]);
        assert!(html.contains("<th>Start (s)</th><th>End (s)</th><th>Segment</th>"));
    }
}
