//! Line based renderer for the small markdown subset the assistant answers
//! with: `#` headings, `*`/`-` bullets, `**bold**` and plain paragraphs.
//!
//! Every line is handled on its own; there are no nested lists, quotes or
//! tables. Output goes through askama so text is always escaped.

use std::sync::LazyLock;

use regex::Regex;

static RE_BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading1,
    Heading2,
    Heading3,
    Bullet,
    Paragraph,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub strong: bool,
}

impl Span {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            strong: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub spans: Vec<Span>,
}

/// Splits `text` on `**bold**` pairs. An unmatched `**` stays literal.
fn inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for captures in RE_BOLD.captures_iter(text) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        if whole.start() > last {
            spans.push(Span::plain(&text[last..whole.start()]));
        }

        spans.push(Span {
            text: inner.as_str().to_owned(),
            strong: true,
        });
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::plain(&text[last..]));
    }

    spans
}

pub fn parse(text: &str) -> Vec<Block> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let heading = [
                ("### ", BlockKind::Heading3),
                ("## ", BlockKind::Heading2),
                ("# ", BlockKind::Heading1),
            ]
            .into_iter()
            .find_map(|(prefix, kind)| line.strip_prefix(prefix).map(|rest| (kind, rest)));

            if let Some((kind, rest)) = heading {
                return Block {
                    kind,
                    spans: vec![Span::plain(rest)],
                };
            }

            if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
                return Block {
                    kind: BlockKind::Bullet,
                    spans: inline(rest),
                };
            }

            Block {
                kind: BlockKind::Paragraph,
                spans: inline(line),
            }
        })
        .collect()
}

#[derive(askama::Template)]
#[template(path = "partials/markdown.html")]
struct MarkdownTemplate<'a> {
    blocks: &'a [Block],
}

/// Renders `text` to an escaped HTML fragment.
pub fn to_html(text: &str) -> Result<String, askama::Error> {
    let blocks = parse(text);

    askama::Template::render(&MarkdownTemplate { blocks: &blocks })
}
