//! HTML to readable plain text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static COMMENTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());

static SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());

/// Paragraph-level closers leave a blank line behind.
static BLOCK_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(p|div|h[1-6])\s*>").unwrap());

/// Line-level closers (and `<br>` in any spelling) leave a newline.
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</(li|tr|br)\s*>").unwrap());

static LIST_ITEM_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li\b[^>]*>").unwrap());

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x0B\x0C\u{a0}]+").unwrap());

static LINE_EDGES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" *\n *").unwrap());

/// Convert an HTML fragment to plain text.
///
/// Drops `<style>`/`<script>` blocks, turns block and line closers into
/// newlines, marks list items with `- `, strips remaining tags, decodes
/// common entities, then collapses blank lines and horizontal whitespace.
pub fn html_to_text(html: &str) -> String {
    let text = html.replace("\r\n", "\n").replace('\r', "\n");
    let text = COMMENTS.replace_all(&text, "");
    let text = STYLE.replace_all(&text, "");
    let text = SCRIPT.replace_all(&text, "");
    let text = BLOCK_CLOSE.replace_all(&text, "\n\n");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = LIST_ITEM_OPEN.replace_all(&text, "- ");
    let text = ANY_TAG.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    let text = HORIZONTAL_SPACE.replace_all(&text, " ");
    let text = LINE_EDGES.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Decode named and numeric character references in a single pass.
/// Unknown names are left as written.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            let decoded = if let Some(hex) = name.strip_prefix("#x").or(name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().ok().and_then(char::from_u32)
            } else {
                named_entity(name)
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "nbsp" => ' ',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "rsquo" => '’',
        "lsquo" => '‘',
        "rdquo" => '”',
        "ldquo" => '“',
        "copy" => '©',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_keep_a_blank_line() {
        assert_eq!(html_to_text("<p>Hello</p><p>World</p>"), "Hello\n\nWorld");
    }

    #[test]
    fn nested_tags() {
        assert_eq!(
            html_to_text("<div><b>Bold</b> and <i>italic</i></div>"),
            "Bold and italic"
        );
    }

    #[test]
    fn attributes_are_stripped() {
        assert_eq!(
            html_to_text(r#"<a href="https://example.com">Link</a>"#),
            "Link"
        );
    }

    #[test]
    fn horizontal_whitespace_collapses() {
        assert_eq!(html_to_text("<p>  Hello \t  World  </p>"), "Hello World");
    }

    #[test]
    fn plain_text_passthrough() {
        assert_eq!(html_to_text("No HTML here"), "No HTML here");
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn style_and_script_removed_with_content() {
        let html = "<html><head><style type=\"text/css\">p { color: red; }</style>\
                    <SCRIPT>alert('x')</SCRIPT></head><body><p>Visible</p></body></html>";
        assert_eq!(html_to_text(html), "Visible");
    }

    #[test]
    fn line_breaks() {
        assert_eq!(html_to_text("one<br>two<br/>three<BR />four"), "one\ntwo\nthree\nfour");
    }

    #[test]
    fn list_items_get_markers() {
        assert_eq!(
            html_to_text("<ul><li>One</li><li class=\"x\">Two</li></ul>"),
            "- One\n- Two"
        );
    }

    #[test]
    fn headings_and_table_rows() {
        assert_eq!(
            html_to_text("<h1>Title</h1><table><tr><td>a</td></tr><tr><td>b</td></tr></table>"),
            "Title\n\na\nb"
        );
    }

    #[test]
    fn blank_line_runs_collapse() {
        assert_eq!(
            html_to_text("<div>A</div>\n  \n\n<div>B</div>"),
            "A\n\nB"
        );
    }

    #[test]
    fn comments_removed() {
        assert_eq!(html_to_text("a<!-- <p>hidden</p> -->b"), "ab");
    }

    #[test]
    fn entities_decoded() {
        assert_eq!(
            html_to_text("<p>Tom&nbsp;&amp;&nbsp;Jerry &lt;3 &#39;hi&#x27; &unknown;</p>"),
            "Tom & Jerry <3 'hi' &unknown;"
        );
    }

    #[test]
    fn entities_decode_once() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }
}
