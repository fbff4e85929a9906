//! Markdown-like text to HTML conversion for blog post bodies.
//!
//! Supports the small formatting subset the CMS editor produces: `#`/`##`/
//! `###` headings, `- ` bulleted lists, `**bold**`, `*italic*`, and
//! `[text](url)` links with http(s) targets. Everything else becomes
//! paragraphs, with single newlines rendered as line breaks. Source text is
//! HTML-escaped before any markup is applied.

pub fn render_html(input: &str) -> String {
    let escaped = escape_html(input);

    escaped
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_block(block: &str) -> String {
    let lines: Vec<&str> = block.lines().collect();

    if !lines.is_empty() && lines.iter().all(|l| l.starts_with("- ")) {
        let items: String = lines
            .iter()
            .map(|l| format!("<li>{}</li>", render_inline(&l[2..])))
            .collect();
        return format!("<ul>{items}</ul>");
    }

    if lines.len() == 1 {
        for (prefix, tag) in [("### ", "h3"), ("## ", "h2"), ("# ", "h1")] {
            if let Some(rest) = lines[0].strip_prefix(prefix) {
                return format!("<{tag}>{}</{tag}>", render_inline(rest));
            }
        }
    }

    let body = lines
        .iter()
        .map(|l| render_inline(l))
        .collect::<Vec<_>>()
        .join("<br />");
    format!("<p>{body}</p>")
}

fn render_inline(text: &str) -> String {
    let linked = replace_links(text);
    let bolded = replace_pairs(&linked, "**", "<strong>", "</strong>");
    replace_pairs(&bolded, "*", "<em>", "</em>")
}

/// Replaces delimiter pairs with open/close tags, leaving unmatched
/// delimiters untouched.
fn replace_pairs(s: &str, delim: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    loop {
        let Some(start) = rest.find(delim) else {
            out.push_str(rest);
            break;
        };
        let after = &rest[start + delim.len()..];
        match after.find(delim) {
            Some(end) if end > 0 => {
                out.push_str(&rest[..start]);
                out.push_str(open);
                out.push_str(&after[..end]);
                out.push_str(close);
                rest = &after[end + delim.len()..];
            }
            _ => {
                out.push_str(rest);
                break;
            }
        }
    }

    out
}

/// Converts `[text](url)` into anchors. Only http and https targets become
/// links; anything else stays literal text.
fn replace_links(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    loop {
        let Some(start) = rest.find('[') else {
            out.push_str(rest);
            break;
        };
        let tail = &rest[start..];
        let Some(mid) = tail.find("](") else {
            out.push_str(rest);
            break;
        };
        let after_mid = &tail[mid + 2..];
        let Some(end) = after_mid.find(')') else {
            out.push_str(rest);
            break;
        };

        let text = &tail[1..mid];
        let url = &after_mid[..end];

        out.push_str(&rest[..start]);
        if url.starts_with("http://") || url.starts_with("https://") {
            out.push_str(&format!("<a href=\"{url}\">{text}</a>"));
            rest = &after_mid[end + 1..];
        } else {
            out.push('[');
            rest = &tail[1..];
        }
    }

    out
}
