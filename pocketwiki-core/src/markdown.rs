//! Line-oriented Markdown to HTML conversion.
//!
//! This is deliberately not CommonMark. The converter supports the wiki's
//! historical subset: `#` headings, `*` list items, paragraphs, `**` bold
//! spans, and `[text](target)` links, with the original's edge-case
//! behavior preserved (greedy pairwise emphasis matching, first-`)`
//! stripping for targets with a literal parenthesis, only the first `*`
//! of a list line removed). Anything it cannot interpret passes through
//! as literal text; the function is total and never escapes content.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Bracketed span containing no `(`.
static LINK_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^(]+\]").unwrap());

/// Parenthesized span containing no space.
static LINK_TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^ ]+\)").unwrap());

/// An opening tag made of lowercase letters only. Note that `<h1>` does
/// not match; heading lines close an open list only when inline markup
/// injected a tag such as `<strong>` into them.
static OPEN_TAG: Lazy<Regex> = Lazy::new(|| Regex::new("<[a-z]+>").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Heading,
    ListItem,
    Paragraph,
    Break,
}

/// One input line after the per-line transform.
#[derive(Debug, Clone)]
struct RenderedLine {
    kind: LineKind,
    html: String,
}

/// Convert raw Markdown text to HTML.
///
/// Every input produces some output; malformed markup degrades to
/// literal passthrough. The function is pure and deterministic.
pub fn render(content: &str) -> String {
    let lines: Vec<RenderedLine> = content.split('\n').map(render_line).collect();
    wrap_lists(lines).concat()
}

/// Classify one line, wrap it in its tag, then apply inline emphasis and
/// link substitution to the tagged result.
fn render_line(line: &str) -> RenderedLine {
    let hashes = line.chars().take_while(|&c| c == '#').count();

    let (kind, tagged) = if hashes > 0 {
        // Every `#` in the line is stripped, not only the leading run;
        // the whitespace left behind by the marker run is trimmed.
        let stripped: String = line.chars().filter(|&c| c != '#' && c != '\r').collect();
        let inner = stripped.trim_start();
        (LineKind::Heading, format!("<h{hashes}>{inner}</h{hashes}>"))
    } else if line.starts_with('*') && !line.starts_with("**") {
        // A leading `**` is an emphasis marker, not a list bullet; those
        // lines fall through to the paragraph branch. For a list item,
        // exactly the first `*` is removed; a trailing `*` survives.
        let inner = line.replacen('*', "", 1).replace('\r', "");
        (LineKind::ListItem, format!("<li>{inner}</li>"))
    } else if line.chars().any(|c| c.is_ascii_alphanumeric() || c == '_') {
        (LineKind::Paragraph, format!("<p>{}</p>", line.replace('\r', "")))
    } else {
        (LineKind::Break, String::from("<br>"))
    };

    let html = apply_links(apply_emphasis(tagged));
    RenderedLine { kind, html }
}

/// Greedy pairwise `**` substitution: while at least two markers remain,
/// the first becomes `<strong>` and the next `</strong>`. An odd
/// leftover marker stays literal. Nested or unbalanced spans misbehave
/// on purpose; this matches the wiki's historical output.
fn apply_emphasis(mut line: String) -> String {
    while line.matches("**").count() > 1 {
        line = line.replacen("**", "<strong>", 1);
        line = line.replacen("**", "</strong>", 1);
    }
    line
}

/// Substitute `[text](target)` pairs with anchor tags.
///
/// Link texts and targets are collected once from the line, then every
/// (text, target) combination is checked against the current line: when
/// the target immediately follows the text, the first occurrence of the
/// pair is replaced. A target carrying more than one `)` loses its first
/// `)` before matching, so targets with one literal parenthesis resolve
/// to the shorter span.
fn apply_links(mut line: String) -> String {
    let texts: Vec<String> = LINK_TEXT
        .find_iter(&line)
        .map(|m| m.as_str().to_string())
        .collect();
    let targets: Vec<String> = LINK_TARGET
        .find_iter(&line)
        .map(|m| m.as_str().to_string())
        .collect();

    for text in &texts {
        let text_pattern = escape_delimiters(text);

        for target in &targets {
            let mut target = target.clone();
            if target.matches(')').count() > 1 {
                target = target.replacen(')', "", 1);
            }
            let target_pattern = escape_delimiters(&target);

            // A pattern the engine rejects (stray metacharacters in the
            // span) skips this pair; the text stays literal.
            let (Ok(text_re), Ok(target_re)) =
                (Regex::new(&text_pattern), Regex::new(&target_pattern))
            else {
                continue;
            };
            let (Some(text_match), Some(target_match)) =
                (text_re.find(&line), target_re.find(&line))
            else {
                continue;
            };
            if text_match.end() != target_match.start() {
                continue;
            }

            let label = text_match.as_str().replace(['[', ']'], "");
            let href = target_match.as_str().replace(['(', ')'], "");
            let pair_re = match Regex::new(&format!("{text_pattern}{target_pattern}")) {
                Ok(re) => re,
                Err(_) => continue,
            };
            let anchor = format!("<a href=\"{href}\">{label}</a>");
            line = pair_re.replace(&line, NoExpand(&anchor)).into_owned();
        }
    }
    line
}

/// Escape the four delimiter characters, leaving everything else raw.
fn escape_delimiters(span: &str) -> String {
    let mut out = String::with_capacity(span.len() + 4);
    for c in span.chars() {
        if matches!(c, '[' | ']' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Wrap contiguous runs of list items in `<ul>`/`</ul> ` marker lines.
///
/// A list-item record opens a list when none is open. A break record
/// never closes one. Any other record closes an open list only when its
/// rendered text contains an opening tag; the closing marker keeps its
/// historical trailing space.
fn wrap_lists(lines: Vec<RenderedLine>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len() + 2);
    let mut in_list = false;

    for line in lines {
        match line.kind {
            LineKind::ListItem => {
                if !in_list {
                    out.push(String::from("<ul>"));
                    in_list = true;
                }
            }
            LineKind::Break => {}
            LineKind::Heading | LineKind::Paragraph => {
                if in_list && OPEN_TAG.is_match(&line.html) {
                    out.push(String::from("</ul> "));
                    in_list = false;
                }
            }
        }
        out.push(line.html);
    }

    if in_list {
        out.push(String::from("</ul> "));
    }
    out
}
