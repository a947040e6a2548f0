use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use v_htmlescape::escape;

/// Characters `encodeURI` leaves alone on top of ASCII alphanumerics
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Escape HTML following [OWASP](https://www.owasp.org/index.php/XSS_(Cross_Site_Scripting)_Prevention_Cheat_Sheet)
///
/// Escape the following characters with HTML entity encoding to prevent switching
/// into any execution context, such as script, style, or event handlers. Using
/// hex entities is recommended by OWASP. In addition to the 5 characters
/// significant in XML (&, <, >, ", '), the forward slash is included as it helps
/// to end an HTML entity.
///
/// ```text
/// & --> &amp;
/// < --> &lt;
/// > --> &gt;
/// " --> &quot;
/// ' --> &#x27;     &apos; is not recommended
/// / --> &#x2F;     forward slash is included as it helps end an HTML entity
/// ```
#[inline]
pub fn escape_html(input: &str) -> String {
    escape(input).to_string()
}

/// Percent-encodes a string the way `encodeURI` does: reserved URI characters
/// are kept, everything else outside of ASCII alphanumerics is encoded.
#[inline]
pub fn encode_uri(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}

/// Folds `\r\n` and lone `\r` into `\n`
pub fn normalize_newlines(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::{encode_uri, escape_html, normalize_newlines};

    #[test]
    fn test_escape_html() {
        let tests = vec![
            (r"", ""),
            (r"a&b", "a&amp;b"),
            (r"<a", "&lt;a"),
            (r">a", "&gt;a"),
            (r#"""#, "&quot;"),
            (r#"'"#, "&#x27;"),
            (r#"大阪"#, "大阪"),
        ];
        for (input, expected) in tests {
            assert_eq!(escape_html(input), expected);
        }
        // hex digits of the slash entity are not case sensitive
        assert_eq!(escape_html("</b>").to_lowercase(), "&lt;&#x2f;b&gt;");
        let empty = String::new();
        assert_eq!(escape_html(&empty), empty);
    }

    #[test]
    fn test_encode_uri() {
        let tests = vec![
            ("a b", "a%20b"),
            ("https://x.org/a?b=c&d=e#f", "https://x.org/a?b=c&d=e#f"),
            ("100%", "100%25"),
            ("<\"é\">", "%3C%22%C3%A9%22%3E"),
            ("-_.!~*'()", "-_.!~*'()"),
        ];
        for (input, expected) in tests {
            assert_eq!(encode_uri(input), expected);
        }
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert_eq!(normalize_newlines("\r\r\n"), "\n\n");
    }
}
