//! Markup stripping.
//!
//! Reduces an HTML-ish string to its plain text content: tags and
//! attributes are dropped, character references are decoded. Markup-
//! significant characters (`<`, `>`, `&`) stay entity-encoded in the
//! output, so it never parses as markup again and stripping an
//! already-stripped string is a no-op.

use std::borrow::Cow;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Strip all markup and attributes from a string, returning plain text.
///
/// ```
/// use pagemeta::strip_markup;
///
/// assert_eq!(strip_markup("<strong>Home</strong>"), "Home");
/// assert_eq!(strip_markup("a &#124; b"), "a | b");
/// // Encoded markup stays encoded instead of becoming live markup.
/// assert_eq!(strip_markup("&lt;b&gt;"), "&lt;b&gt;");
/// ```
#[must_use]
pub fn strip_markup(input: &str) -> String {
    if !input.contains(['<', '&']) {
        return input.to_owned();
    }

    // Stray `<` and `&` that do not open a tag or a character reference
    // would abort the parse, so encode them first.
    let wrapped = format!("<root>{}</root>", escape_stray_markup(input));

    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    let mut out = String::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => {
                if let Ok(text) = reader.decoder().decode(&e) {
                    out.push_str(&escape_text(&text));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Ok(entity) = reader.decoder().decode(&e) {
                    out.push_str(&decode_entity(&entity));
                }
            }
            Ok(Event::CData(e)) => {
                out.push_str(&escape_text(&String::from_utf8_lossy(&e)));
            }
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
        buf.clear();
    }

    out
}

/// Encode `<` and `&` characters that are not part of markup.
///
/// A `<` counts as markup when followed by a tag name, `/`, `!` or `?`.
/// An `&` counts as markup when it starts a well-formed character
/// reference (`&name;`, `&#123;` or `&#x7B;`).
fn escape_stray_markup(input: &str) -> Cow<'_, str> {
    if !input.char_indices().any(|(i, c)| is_stray(input, i, c)) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() + 8);
    for (i, c) in input.char_indices() {
        match c {
            '<' if is_stray(input, i, c) => escaped.push_str("&lt;"),
            '&' if is_stray(input, i, c) => escaped.push_str("&amp;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Whether the character at byte offset `i` needs encoding.
fn is_stray(input: &str, i: usize, c: char) -> bool {
    let rest = &input[i + c.len_utf8()..];
    match c {
        '<' => !rest
            .chars()
            .next()
            .is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?')),
        '&' => reference_len(rest).is_none(),
        _ => false,
    }
}

/// Length of a character reference body (`name;`, `#123;`, `#x7B;`)
/// starting at the beginning of `rest`, or `None` if it is not one.
fn reference_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let digits_end = |start: usize, is_digit: fn(&u8) -> bool| {
        let count = bytes[start..].iter().take_while(|b| is_digit(*b)).count();
        (count > 0 && bytes.get(start + count) == Some(&b';')).then_some(start + count + 1)
    };

    match *bytes.first()? {
        b'#' if matches!(bytes.get(1), Some(&(b'x' | b'X'))) => {
            digits_end(2, u8::is_ascii_hexdigit)
        }
        b'#' => digits_end(1, u8::is_ascii_digit),
        b if b.is_ascii_alphabetic() => {
            let count = bytes.iter().take_while(|b| b.is_ascii_alphanumeric()).count();
            (bytes.get(count) == Some(&b';')).then_some(count + 1)
        }
        _ => None,
    }
}

/// Re-encode markup-significant characters in emitted text.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Decode a character reference body to its text value.
///
/// References for `<`, `>` and `&` keep their canonical entity form so
/// the output cannot turn into live markup. Unknown named references
/// are preserved as written.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "&lt;".to_owned(),
        "gt" => "&gt;".to_owned(),
        "amp" => "&amp;".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32).map_or_else(
                || format!("&{entity};"),
                |c| match c {
                    '<' => "&lt;".to_owned(),
                    '>' => "&gt;".to_owned(),
                    '&' => "&amp;".to_owned(),
                    _ => c.to_string(),
                },
            )
        }
        _ => format!("&{entity};"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(strip_markup("Our home page description"), "Our home page description");
    }

    #[test]
    fn test_tags_removed() {
        assert_eq!(strip_markup("<strong>Home</strong>"), "Home");
        assert_eq!(
            strip_markup("Our <strong>home page</strong> description"),
            "Our home page description"
        );
    }

    #[test]
    fn test_nested_tags_removed() {
        assert_eq!(strip_markup("<p><em><b>deep</b></em> text</p>"), "deep text");
    }

    #[test]
    fn test_attributes_removed() {
        assert_eq!(
            strip_markup(r#"<a href="https://example.com" onclick="x()">link</a>"#),
            "link"
        );
    }

    #[test]
    fn test_self_closing_tags_removed() {
        assert_eq!(strip_markup("before<br />after"), "beforeafter");
    }

    #[test]
    fn test_comments_removed() {
        assert_eq!(strip_markup("a<!-- hidden -->b"), "ab");
    }

    #[test]
    fn test_numeric_references_decoded() {
        assert_eq!(strip_markup("&#124;"), "|");
        assert_eq!(strip_markup("&#x7C;"), "|");
    }

    #[test]
    fn test_numeric_markup_references_stay_encoded() {
        assert_eq!(strip_markup("&#60;b&#62;"), "&lt;b&gt;");
        assert_eq!(strip_markup("&#38;"), "&amp;");
    }

    #[test]
    fn test_named_markup_references_stay_encoded() {
        assert_eq!(strip_markup("&lt;not a tag&gt;"), "&lt;not a tag&gt;");
        assert_eq!(strip_markup("AT&amp;T"), "AT&amp;T");
    }

    #[test]
    fn test_quote_references_decoded() {
        assert_eq!(strip_markup("&apos;x&quot;"), "'x\"");
    }

    #[test]
    fn test_unknown_named_reference_preserved() {
        assert_eq!(strip_markup("&nbsp;"), "&nbsp;");
    }

    #[test]
    fn test_stray_characters_encoded() {
        assert_eq!(strip_markup("a < b"), "a &lt; b");
        assert_eq!(strip_markup("AT&T"), "AT&amp;T");
        assert_eq!(strip_markup("5 < 6 && 7 > 2"), "5 &lt; 6 &amp;&amp; 7 &gt; 2");
    }

    #[test]
    fn test_cdata_content_kept_encoded() {
        assert_eq!(strip_markup("<![CDATA[<b>raw]]>"), "&lt;b&gt;raw");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "plain",
            "<strong>Home</strong>",
            "&lt;b&gt;bold&lt;/b&gt;",
            "a < b",
            "AT&T",
            "&#124;",
            "&#60;script&#62;",
            "&nbsp;",
            "<![CDATA[<b>raw]]>",
            "<a href=\"x\">link</a> & more",
        ] {
            let once = strip_markup(input);
            assert_eq!(strip_markup(&once), once, "input: {input:?}");
        }
    }
}
