//! HTML to plain text extraction

use scraper::{ElementRef, Html, Node, Selector};

/// Tags whose entire subtree is ignored
const SKIP_TAGS: [&str; 4] = ["script", "style", "noscript", "svg"];

/// Tags that end a line of text
const BLOCK_TAGS: [&str; 16] = [
    "p", "div", "br", "li", "tr", "h1", "h2", "h3", "h4", "h5", "h6", "section", "article",
    "header", "footer", "pre",
];

/// Extract readable text from HTML, stripping tags, scripts, and styles
///
/// Uses `<body>` when present, otherwise the whole document. Text of block
/// elements is separated by newlines; runs of whitespace are collapsed.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::new();
    collect_element_text(root, &mut raw);
    clean_whitespace(&raw)
}

/// Recursively append text from an element, skipping [`SKIP_TAGS`] subtrees
fn collect_element_text(element: ElementRef, out: &mut String) {
    let tag_name = element.value().name();
    if SKIP_TAGS.contains(&tag_name) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push(' ');
                    }
                    out.push_str(t);
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_element_text(child_el, out);
                }
            }
            _ => {}
        }
    }

    if BLOCK_TAGS.contains(&tag_name) && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Collapse whitespace runs, keeping at most one blank line
fn clean_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_whitespace = false;
    let mut newline_count = 0;

    for ch in text.chars() {
        if ch == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                // A space before a newline is noise
                if result.ends_with(' ') {
                    result.pop();
                }
                result.push('\n');
            }
            prev_was_whitespace = true;
        } else if ch.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
            }
            prev_was_whitespace = true;
        } else {
            result.push(ch);
            prev_was_whitespace = false;
            newline_count = 0;
        }
    }

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_basic() {
        let html = "<html><body><h1>Hello</h1><p>World</p></body></html>";
        assert_eq!(html_to_text(html), "Hello\nWorld");
    }

    #[test]
    fn test_html_to_text_strips_script_and_style() {
        let html = r#"
        <html><head><title>Ignored</title></head><body>
            <script>var x = 1;</script>
            <style>.foo { color: red; }</style>
            <p>Visible text</p>
            <noscript>No JS</noscript>
            <svg><text>chart</text></svg>
        </body></html>
        "#;
        let text = html_to_text(html);
        assert_eq!(text, "Visible text");
    }

    #[test]
    fn test_inline_elements_join_with_spaces() {
        let html = "<body><p>Example <b>Domain</b> text</p></body>";
        assert_eq!(html_to_text(html), "Example Domain text");
    }

    #[test]
    fn test_html_to_text_empty() {
        assert!(html_to_text("").trim().is_empty());
        assert!(html_to_text("<body><script>only()</script></body>").is_empty());
    }

    #[test]
    fn test_clean_whitespace() {
        assert_eq!(clean_whitespace("  hello   world  "), "hello world");
        assert_eq!(clean_whitespace("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(clean_whitespace("a \nb"), "a\nb");
    }
}
