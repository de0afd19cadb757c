//! Core preview types.

/// The semantic type of a rendered line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Heading with level 1-6
    Heading(u8),
    /// Regular paragraph text
    Paragraph,
    /// Fenced or indented code block content
    CodeBlock,
    /// Block quote content
    BlockQuote,
    /// List item (bullet or ordered)
    ListItem,
    /// Horizontal rule
    HorizontalRule,
    /// Blank spacer line
    Empty,
}

/// Inline styling flags for a span of text within a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub link: bool,
}

impl InlineStyle {
    pub const fn is_plain(&self) -> bool {
        !self.emphasis && !self.strong && !self.strikethrough && !self.code && !self.link
    }
}

/// A styled run of text within a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// A single line of the rendered preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    content: String,
    line_type: LineType,
    spans: Option<Vec<InlineSpan>>,
}

impl RenderedLine {
    /// Create a line without inline spans.
    pub const fn new(content: String, line_type: LineType) -> Self {
        Self {
            content,
            line_type,
            spans: None,
        }
    }

    /// Create a line carrying styled inline spans.
    pub const fn with_spans(content: String, line_type: LineType, spans: Vec<InlineSpan>) -> Self {
        Self {
            content,
            line_type,
            spans: Some(spans),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn line_type(&self) -> &LineType {
        &self.line_type
    }

    pub fn spans(&self) -> Option<&[InlineSpan]> {
        self.spans.as_deref()
    }
}

/// The rendered preview: a derived, read-only projection of the raw text.
///
/// Recomputed wholesale on every buffer change; never incrementally
/// patched. Keeps the source it was rendered from so staleness is
/// checkable.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source text this preview was rendered from
    source: String,
    /// Rendered lines for display
    lines: Vec<RenderedLine>,
}

impl Document {
    /// Create an empty document.
    pub const fn empty() -> Self {
        Self {
            source: String::new(),
            lines: Vec::new(),
        }
    }

    /// Create a document from plain text, one verbatim line per source line.
    ///
    /// Used as the degraded fallback when markdown rendering fails.
    pub fn from_plain_text(source: &str) -> Self {
        let lines: Vec<RenderedLine> = source
            .lines()
            .map(|line| RenderedLine::new(line.to_string(), LineType::Paragraph))
            .collect();
        Self {
            source: source.to_string(),
            lines,
        }
    }

    pub(crate) const fn from_lines(source: String, lines: Vec<RenderedLine>) -> Self {
        Self { source, lines }
    }

    /// Total number of rendered lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a specific rendered line by index.
    pub fn line_at(&self, index: usize) -> Option<&RenderedLine> {
        self.lines.get(index)
    }

    /// Get lines from `offset` to `offset + count` for display.
    pub fn visible_lines(&self, offset: usize, count: usize) -> Vec<&RenderedLine> {
        self.lines.iter().skip(offset).take(count).collect()
    }

    /// The source text this preview was rendered from.
    pub fn source(&self) -> &str {
        &self.source
    }
}
