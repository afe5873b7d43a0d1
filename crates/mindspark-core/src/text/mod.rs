//! Plain-text helpers for note cards: frontmatter handling, markdown
//! stripping, previews and display titles.

use regex::Regex;
use std::sync::OnceLock;

/// Preview shown for notes whose body is only a mermaid diagram
pub const DIAGRAM_NOTE_MARKER: &str = "(diagram note)";

/// Preview shown for notes whose body is only fenced code
pub const CODE_NOTE_MARKER: &str = "(code note)";

const FRONTMATTER_DELIMITER: &str = "---";

struct MarkdownPatterns {
    fenced_code: Regex,
    inline_code: Regex,
    image: Regex,
    link: Regex,
    heading: Regex,
    punctuation: Regex,
    whitespace: Regex,
}

static MARKDOWN: OnceLock<MarkdownPatterns> = OnceLock::new();
static LINE_BREAK: OnceLock<Regex> = OnceLock::new();
static TITLE_KEY: OnceLock<Regex> = OnceLock::new();
static MERMAID_FENCE: OnceLock<Regex> = OnceLock::new();

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

fn markdown_patterns() -> &'static MarkdownPatterns {
    MARKDOWN.get_or_init(|| MarkdownPatterns {
        fenced_code: compile(r"```[\s\S]*?```"),
        inline_code: compile(r"`([^`]+)`"),
        image: compile(r"!\[[^\]]*\]\([^)]*\)"),
        link: compile(r"\[([^\]]+)\]\([^)]*\)"),
        heading: compile(r"(?m)^\s{0,3}#{1,6}\s+"),
        punctuation: compile(r"[*_~>#-]"),
        whitespace: compile(r"\s+"),
    })
}

fn split_lines(content: &str) -> Vec<&str> {
    LINE_BREAK
        .get_or_init(|| compile(r"\r?\n"))
        .split(content)
        .collect()
}

/// `None` unless the first line is a delimiter; otherwise the index of the
/// closing delimiter line, if there is one.
fn frontmatter_bounds(lines: &[&str]) -> Option<Option<usize>> {
    if lines.first() != Some(&FRONTMATTER_DELIMITER) {
        return None;
    }
    Some(
        lines
            .iter()
            .skip(1)
            .position(|line| *line == FRONTMATTER_DELIMITER)
            .map(|offset| offset + 1),
    )
}

/// Remove a leading `---` frontmatter block.
///
/// Content without an opening delimiter line, or without a matching closing
/// line, is returned unchanged.
pub fn strip_frontmatter(content: &str) -> String {
    if !content.starts_with(FRONTMATTER_DELIMITER) {
        return content.to_string();
    }

    let lines = split_lines(content);
    match frontmatter_bounds(&lines) {
        Some(Some(closing)) => lines[closing + 1..].join("\n").trim_start().to_string(),
        _ => content.to_string(),
    }
}

/// Find the `title:` key inside the frontmatter block
pub fn parse_frontmatter_title(content: &str) -> Option<String> {
    if !content.starts_with(FRONTMATTER_DELIMITER) {
        return None;
    }

    let lines = split_lines(content);
    let closing = frontmatter_bounds(&lines)?;
    let end = closing.unwrap_or(lines.len());
    let title_key = TITLE_KEY.get_or_init(|| compile(r"(?i)^title\s*:\s*(.+)$"));

    let quotes: &[char] = &['\'', '"'];
    let title = lines[1..end].iter().find_map(|line| {
        let captures = title_key.captures(line)?;
        let value = captures[1].trim();
        let value = value.strip_prefix(quotes).unwrap_or(value);
        Some(value.strip_suffix(quotes).unwrap_or(value).to_string())
    })?;

    (!title.is_empty()).then_some(title)
}

/// Reduce markdown to a single line of plain text
pub fn strip_markdown(text: &str) -> String {
    let p = markdown_patterns();

    let text = p.fenced_code.replace_all(text, " ");
    let text = p.inline_code.replace_all(&text, "${1}");
    let text = p.image.replace_all(&text, " ");
    let text = p.link.replace_all(&text, "${1}");
    let text = p.heading.replace_all(&text, "");
    let text = p.punctuation.replace_all(&text, "");
    let text = text.replace('|', " ");
    let text = p.whitespace.replace_all(&text, " ");

    text.trim().to_string()
}

/// Build a plain-text preview of at most `max_length` characters plus an
/// ellipsis.
///
/// When stripping leaves nothing but the body still holds a fenced block, a
/// marker describing the note is returned instead of an empty string.
pub fn get_preview(content: &str, max_length: usize) -> String {
    let body = strip_frontmatter(content);
    let plain = strip_markdown(&body);

    if plain.is_empty() {
        let mermaid = MERMAID_FENCE.get_or_init(|| compile(r"(?i)```mermaid"));
        if mermaid.is_match(&body) {
            return DIAGRAM_NOTE_MARKER.to_string();
        }
        if body.contains("```") {
            return CODE_NOTE_MARKER.to_string();
        }
        return String::new();
    }

    if plain.chars().count() <= max_length {
        return plain;
    }

    let truncated: String = plain.chars().take(max_length).collect();
    format!("{}...", truncated.trim_end())
}

/// Pick the display title for a note.
///
/// The frontmatter title is preferred unless it merely repeats the first
/// non-blank line of the body, in which case the note's own name is used.
pub fn get_note_title(fallback_name: &str, content: &str) -> String {
    let Some(frontmatter_title) = parse_frontmatter_title(content) else {
        return fallback_name.to_string();
    };

    let body = strip_frontmatter(content);
    let first_line = split_lines(&body)
        .into_iter()
        .map(strip_markdown)
        .find(|line| !line.is_empty());

    if first_line.as_deref() == Some(frontmatter_title.as_str()) {
        return fallback_name.to_string();
    }

    frontmatter_title
}
