//! Keyword highlighting for display.
//!
//! Every keyword is escaped and folded into one case-insensitive alternation,
//! so highlighting is a single left-to-right pass: a keyword is always literal
//! text, spans never nest, and no keyword re-wraps text already claimed by
//! another. When two keywords could match at the same position the longer one
//! wins (`fox` and `foxglove` against "Foxglove" mark the whole word).
//!
//! The result is structured ([`Highlighted`]): the untouched text plus the
//! byte ranges that matched. Presentation layers turn that into styled spans
//! or into marked-up text via [`Highlighted::render`].

use crate::error::SearchError;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

/// Open/close markers wrapped around each matched span by
/// [`Highlighted::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markup<'a> {
    pub open: &'a str,
    pub close: &'a str,
}

impl<'a> Markup<'a> {
    /// No markers; renders the plain text.
    pub const NONE: Markup<'static> = Markup { open: "", close: "" };
    /// Bold black on yellow for ANSI terminals.
    pub const ANSI: Markup<'static> = Markup {
        open: "\x1b[1;30;43m",
        close: "\x1b[0m",
    };

    pub const fn new(open: &'a str, close: &'a str) -> Self {
        Self { open, close }
    }
}

// ---------------------------------------------------------------------------
// Highlighter
// ---------------------------------------------------------------------------

/// Compiled highlighter for one keyword set. Build once per query and reuse
/// for every row.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, SearchError> {
        let mut literals: Vec<&str> = keywords
            .iter()
            .map(AsRef::as_ref)
            .filter(|k| !k.is_empty())
            .collect();
        if literals.is_empty() {
            return Ok(Self { pattern: None });
        }
        // Leftmost-first alternation: longest keyword first so it wins ties.
        literals.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        literals.dedup();

        let alternation = literals
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()?;
        Ok(Self { pattern: Some(pattern) })
    }

    /// Mark every keyword occurrence in `text`.
    pub fn highlight(&self, text: &str) -> Highlighted {
        let spans = match &self.pattern {
            Some(re) => re.find_iter(text).map(|m| m.range()).collect(),
            None => Vec::new(),
        };
        Highlighted {
            text: text.to_string(),
            spans,
        }
    }
}

/// One-shot convenience wrapper around [`Highlighter`].
pub fn highlight<S: AsRef<str>>(text: &str, keywords: &[S]) -> Result<Highlighted, SearchError> {
    Ok(Highlighter::new(keywords)?.highlight(text))
}

// ---------------------------------------------------------------------------
// Highlighted
// ---------------------------------------------------------------------------

/// Text plus the sorted, non-overlapping byte ranges that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    text: String,
    spans: Vec<Range<usize>>,
}

/// A contiguous piece of highlighted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

impl Highlighted {
    /// The original text, without markers.
    pub fn plain(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }

    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Matched substrings in their original casing.
    pub fn matched(&self) -> impl Iterator<Item = &str> {
        self.spans.iter().map(|r| &self.text[r.clone()])
    }

    /// Alternating plain/matched pieces covering the whole text. Empty
    /// pieces are omitted.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let mut out = Vec::with_capacity(self.spans.len() * 2 + 1);
        let mut pos = 0;
        for span in &self.spans {
            if span.start > pos {
                out.push(Segment { text: &self.text[pos..span.start], matched: false });
            }
            out.push(Segment { text: &self.text[span.clone()], matched: true });
            pos = span.end;
        }
        if pos < self.text.len() {
            out.push(Segment { text: &self.text[pos..], matched: false });
        }
        out
    }

    /// Wrap each matched span in `markup`.
    pub fn render(&self, markup: &Markup<'_>) -> String {
        let extra = self.spans.len() * (markup.open.len() + markup.close.len());
        let mut out = String::with_capacity(self.text.len() + extra);
        for seg in self.segments() {
            if seg.matched {
                out.push_str(markup.open);
                out.push_str(seg.text);
                out.push_str(markup.close);
            } else {
                out.push_str(seg.text);
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
