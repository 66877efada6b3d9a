//! Shared URL/HTML string utilities.

/// Percent-encode a value the way JavaScript `encodeURIComponent` does:
/// ASCII alphanumerics and `-_.!~*'()` pass through, every other UTF-8
/// byte becomes `%XX`.
pub fn percent_encode(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for b in input.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => result.push(b as char),
            _ => result.push_str(&format!("%{:02X}", b)),
        }
    }
    result
}

/// Build `endpoint?q=<encoded query>`, appending with `&` when the endpoint
/// already carries a query string.
pub fn search_url(endpoint: &str, query: &str) -> String {
    let sep = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}q={}", endpoint, sep, percent_encode(query))
}

/// Escape text for interpolation into HTML element content or a quoted
/// attribute value.
pub fn escape_html(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_encode_space_and_ampersand() {
        assert_eq!(percent_encode("tom & jerry"), "tom%20%26%20jerry");
    }

    #[test]
    fn percent_encode_keeps_unreserved() {
        assert_eq!(percent_encode("Ocean's-11_(2001)!"), "Ocean's-11_(2001)!");
    }

    #[test]
    fn percent_encode_utf8() {
        assert_eq!(percent_encode("Amélie"), "Am%C3%A9lie");
    }

    #[test]
    fn search_url_appends_query() {
        assert_eq!(search_url("/search_movies", "big fish"), "/search_movies?q=big%20fish");
        assert_eq!(search_url("/search?lang=en", "up"), "/search?lang=en&q=up");
    }

    #[test]
    fn escape_html_special_chars() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }
}
