//! Markdown rendering with comrak.

use anyhow::Result;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};
use unicode_width::UnicodeWidthStr;

use super::types::{Document, InlineSpan, InlineStyle, LineType, RenderedLine};

/// Default layout width when the terminal size is not known yet.
const DEFAULT_WIDTH: u16 = 80;

impl Document {
    /// Render markdown source into a preview document.
    ///
    /// Never fails: input the markdown ruleset cannot handle is rendered
    /// verbatim as plain text instead.
    ///
    /// # Example
    ///
    /// ```
    /// use markpad::document::{Document, LineType};
    ///
    /// let doc = Document::render("# Hello\n\nWorld");
    /// assert!(doc.line_count() >= 2);
    /// assert_eq!(*doc.line_at(0).unwrap().line_type(), LineType::Heading(1));
    /// ```
    pub fn render(source: &str) -> Self {
        Self::render_with_layout(source, DEFAULT_WIDTH)
    }

    /// Render markdown source wrapped to a specific column width.
    pub fn render_with_layout(source: &str, width: u16) -> Self {
        match render_lines(source, width) {
            Ok(lines) => Self::from_lines(source.to_string(), lines),
            Err(err) => {
                tracing::warn!("markdown rendering failed, showing raw text: {err}");
                Self::from_plain_text(source)
            }
        }
    }
}

fn create_options() -> Options {
    let mut options = Options::default();

    // GFM extensions the preview understands
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    options
}

/// Render markdown source into styled lines wrapped to `width` columns.
fn render_lines(source: &str, width: u16) -> Result<Vec<RenderedLine>> {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, source, &options);

    let wrap_width = usize::from(width.max(1));
    let mut lines = Vec::new();
    for child in root.children() {
        process_block(child, &mut lines, wrap_width, 0);
    }

    // Drop trailing spacer lines so short documents stay short
    while lines
        .last()
        .is_some_and(|l| *l.line_type() == LineType::Empty)
    {
        lines.pop();
    }

    Ok(lines)
}

fn process_block<'a>(
    node: &'a AstNode<'a>,
    lines: &mut Vec<RenderedLine>,
    wrap_width: usize,
    indent: usize,
) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            let text = extract_text(node);
            ensure_trailing_empty_line(lines);
            let prefix = "#".repeat(usize::from(heading.level));
            lines.push(RenderedLine::new(
                format!("{prefix} {text}"),
                LineType::Heading(heading.level),
            ));
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::Paragraph => {
            let spans = collect_inline_spans(node);
            push_wrapped(lines, &spans, LineType::Paragraph, wrap_width, "", "");
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::CodeBlock(code) => {
            let pad = " ".repeat(indent);
            for line in code.literal.lines() {
                lines.push(RenderedLine::new(
                    format!("{pad}{line}"),
                    LineType::CodeBlock,
                ));
            }
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::BlockQuote => {
            for child in node.children() {
                match &child.data.borrow().value {
                    NodeValue::Paragraph => {
                        let spans = collect_inline_spans(child);
                        push_wrapped(
                            lines,
                            &spans,
                            LineType::BlockQuote,
                            wrap_width,
                            "\u{2502} ",
                            "\u{2502} ",
                        );
                    }
                    // Nested structure inside a quote keeps the quote styling
                    _ => process_block(child, lines, wrap_width, indent + 2),
                }
            }
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::List(list) => {
            process_list(node, list.list_type, list.start, lines, wrap_width, indent);
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::ThematicBreak => {
            ensure_trailing_empty_line(lines);
            lines.push(RenderedLine::new(
                "\u{2500}".repeat(wrap_width.min(60)),
                LineType::HorizontalRule,
            ));
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::HtmlBlock(html) => {
            for line in html.literal.lines() {
                lines.push(RenderedLine::new(line.to_string(), LineType::Paragraph));
            }
        }

        // Anything else (front matter, tables rendered as text, ...) is
        // flattened to its visible text.
        _ => {
            let text = extract_text(node);
            if !text.is_empty() {
                lines.push(RenderedLine::new(text, LineType::Paragraph));
            }
        }
    }
}

fn process_list<'a>(
    node: &'a AstNode<'a>,
    list_type: ListType,
    start: usize,
    lines: &mut Vec<RenderedLine>,
    wrap_width: usize,
    indent: usize,
) {
    let pad = " ".repeat(indent);
    for (idx, item) in node.children().enumerate() {
        let marker = match &item.data.borrow().value {
            NodeValue::TaskItem(Some(_)) => "[x] ".to_string(),
            NodeValue::TaskItem(None) => "[ ] ".to_string(),
            _ => match list_type {
                ListType::Bullet => "\u{2022} ".to_string(),
                ListType::Ordered => format!("{}. ", start + idx),
            },
        };
        let initial = format!("{pad}{marker}");
        let hanging = " ".repeat(initial.len());

        let mut first_para = true;
        for child in item.children() {
            match &child.data.borrow().value {
                NodeValue::Paragraph => {
                    let spans = collect_inline_spans(child);
                    let lead = if first_para { initial.as_str() } else { &hanging };
                    push_wrapped(lines, &spans, LineType::ListItem, wrap_width, lead, &hanging);
                    first_para = false;
                }
                NodeValue::List(nested) => {
                    process_list(
                        child,
                        nested.list_type,
                        nested.start,
                        lines,
                        wrap_width,
                        initial.len(),
                    );
                }
                _ => process_block(child, lines, wrap_width, initial.len()),
            }
        }
    }
}

/// Collect the styled inline spans of a block node's children.
fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    for child in node.children() {
        collect_inline(child, InlineStyle::default(), &mut spans);
    }
    spans
}

fn collect_inline<'a>(node: &'a AstNode<'a>, style: InlineStyle, spans: &mut Vec<InlineSpan>) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => spans.push(InlineSpan::new(text.clone(), style)),
        NodeValue::Code(code) => {
            let mut code_style = style;
            code_style.code = true;
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new(" ".to_string(), style));
        }
        NodeValue::Emph => {
            let mut s = style;
            s.emphasis = true;
            for child in node.children() {
                collect_inline(child, s, spans);
            }
        }
        NodeValue::Strong => {
            let mut s = style;
            s.strong = true;
            for child in node.children() {
                collect_inline(child, s, spans);
            }
        }
        NodeValue::Strikethrough => {
            let mut s = style;
            s.strikethrough = true;
            for child in node.children() {
                collect_inline(child, s, spans);
            }
        }
        NodeValue::Link(link) | NodeValue::Image(link) => {
            let mut s = style;
            s.link = true;
            if node.children().next().is_none() {
                spans.push(InlineSpan::new(link.url.clone(), s));
            } else {
                for child in node.children() {
                    collect_inline(child, s, spans);
                }
            }
        }
        NodeValue::HtmlInline(html) => spans.push(InlineSpan::new(html.clone(), style)),
        _ => {
            for child in node.children() {
                collect_inline(child, style, spans);
            }
        }
    }
}

/// Extract the plain text content of a node and its descendants.
fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut spans = Vec::new();
    for child in node.children() {
        collect_inline(child, InlineStyle::default(), &mut spans);
    }
    spans_to_string(&spans)
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

fn ensure_trailing_empty_line(lines: &mut Vec<RenderedLine>) {
    if lines
        .last()
        .is_some_and(|l| *l.line_type() != LineType::Empty)
    {
        lines.push(RenderedLine::new(String::new(), LineType::Empty));
    }
}

fn push_wrapped(
    lines: &mut Vec<RenderedLine>,
    spans: &[InlineSpan],
    line_type: LineType,
    wrap_width: usize,
    initial_indent: &str,
    subsequent_indent: &str,
) {
    for line_spans in wrap_spans(spans, wrap_width, initial_indent, subsequent_indent) {
        let content = spans_to_string(&line_spans);
        lines.push(RenderedLine::with_spans(content, line_type, line_spans));
    }
}

/// Greedy word-wrap of styled spans to `width` display columns.
///
/// Runs of whitespace collapse to single spaces; a word wider than the
/// width is placed on its own line rather than split.
fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    initial_indent: &str,
    subsequent_indent: &str,
) -> Vec<Vec<InlineSpan>> {
    let words: Vec<(String, InlineStyle)> = spans
        .iter()
        .flat_map(|span| {
            span.text()
                .split_whitespace()
                .map(|w| (w.to_string(), span.style()))
                .collect::<Vec<_>>()
        })
        .collect();

    if words.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = vec![plain_span(initial_indent)];
    let mut current_width = UnicodeWidthStr::width(initial_indent);
    let mut line_has_words = false;

    for (word, style) in words {
        let word_width = UnicodeWidthStr::width(word.as_str());
        let sep = usize::from(line_has_words);
        if line_has_words && current_width + sep + word_width > width {
            out.push(finish_line(current));
            current = vec![plain_span(subsequent_indent)];
            current_width = UnicodeWidthStr::width(subsequent_indent);
            line_has_words = false;
        }
        if line_has_words {
            push_word(&mut current, " ", style);
            current_width += 1;
        }
        push_word(&mut current, &word, style);
        current_width += word_width;
        line_has_words = true;
    }
    out.push(finish_line(current));
    out
}

fn plain_span(text: &str) -> InlineSpan {
    InlineSpan::new(text.to_string(), InlineStyle::default())
}

/// Append `text` to the line, merging into the last span when styles match.
fn push_word(current: &mut Vec<InlineSpan>, text: &str, style: InlineStyle) {
    if let Some(last) = current.last_mut() {
        if last.style() == style {
            let merged = format!("{}{}", last.text(), text);
            *last = InlineSpan::new(merged, style);
            return;
        }
    }
    current.push(InlineSpan::new(text.to_string(), style));
}

/// Drop a leading empty indent span so plain paragraphs stay single-span.
fn finish_line(mut current: Vec<InlineSpan>) -> Vec<InlineSpan> {
    if current.first().is_some_and(|s| s.text().is_empty()) {
        current.remove(0);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line_types(doc: &Document) -> Vec<LineType> {
        (0..doc.line_count())
            .filter_map(|i| doc.line_at(i).map(|l| *l.line_type()))
            .collect()
    }

    #[test]
    fn test_heading_renders_with_level() {
        let doc = Document::render("# Hello\n");
        let first = doc.line_at(0).unwrap();
        assert_eq!(*first.line_type(), LineType::Heading(1));
        assert_eq!(first.content(), "# Hello");
    }

    #[test]
    fn test_heading_then_paragraph() {
        let doc = Document::render("# Hello\nWorld\n");
        let types = line_types(&doc);
        assert!(types.contains(&LineType::Heading(1)));
        assert!(types.contains(&LineType::Paragraph));
        let para = (0..doc.line_count())
            .filter_map(|i| doc.line_at(i))
            .find(|l| *l.line_type() == LineType::Paragraph)
            .unwrap();
        assert_eq!(para.content(), "World");
    }

    #[test]
    fn test_paragraph_wraps_to_width() {
        let md = "one two three four five six seven eight nine ten";
        let doc = Document::render_with_layout(md, 20);
        assert!(doc.line_count() > 1);
        for i in 0..doc.line_count() {
            let line = doc.line_at(i).unwrap();
            assert!(
                unicode_width::UnicodeWidthStr::width(line.content()) <= 20,
                "line too wide: {:?}",
                line.content()
            );
        }
    }

    #[test]
    fn test_long_word_is_not_split() {
        let md = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
        let doc = Document::render_with_layout(md, 10);
        assert_eq!(doc.line_at(0).unwrap().content(), md);
    }

    #[test]
    fn test_inline_styles_are_captured() {
        let doc = Document::render("plain **bold** *italic* `code` ~~gone~~");
        let spans = doc.line_at(0).unwrap().spans().unwrap();
        assert!(spans.iter().any(|s| s.style().strong));
        assert!(spans.iter().any(|s| s.style().emphasis));
        assert!(spans.iter().any(|s| s.style().code));
        assert!(spans.iter().any(|s| s.style().strikethrough));
        assert!(spans.iter().any(|s| s.style().is_plain()));
    }

    #[test]
    fn test_link_text_is_marked() {
        let doc = Document::render("see [the docs](https://example.com)");
        let spans = doc.line_at(0).unwrap().spans().unwrap();
        let link = spans.iter().find(|s| s.style().link).unwrap();
        assert_eq!(link.text().trim(), "the docs");
    }

    #[test]
    fn test_code_block_renders_verbatim() {
        let doc = Document::render("```rust\nlet x = 1;\nlet y = 2;\n```\n");
        let code: Vec<_> = (0..doc.line_count())
            .filter_map(|i| doc.line_at(i))
            .filter(|l| *l.line_type() == LineType::CodeBlock)
            .map(RenderedLine::content)
            .collect();
        assert_eq!(code, vec!["let x = 1;", "let y = 2;"]);
    }

    #[test]
    fn test_block_quote_is_prefixed() {
        let doc = Document::render("> quoted text\n");
        let quote = (0..doc.line_count())
            .filter_map(|i| doc.line_at(i))
            .find(|l| *l.line_type() == LineType::BlockQuote)
            .unwrap();
        assert!(quote.content().starts_with('\u{2502}'));
        assert!(quote.content().contains("quoted text"));
    }

    #[test]
    fn test_bullet_list_markers() {
        let doc = Document::render("- first\n- second\n");
        let items: Vec<_> = (0..doc.line_count())
            .filter_map(|i| doc.line_at(i))
            .filter(|l| *l.line_type() == LineType::ListItem)
            .map(RenderedLine::content)
            .collect();
        assert_eq!(items, vec!["\u{2022} first", "\u{2022} second"]);
    }

    #[test]
    fn test_ordered_list_numbers_from_start() {
        let doc = Document::render("3. third\n4. fourth\n");
        let items: Vec<_> = (0..doc.line_count())
            .filter_map(|i| doc.line_at(i))
            .filter(|l| *l.line_type() == LineType::ListItem)
            .map(RenderedLine::content)
            .collect();
        assert_eq!(items, vec!["3. third", "4. fourth"]);
    }

    #[test]
    fn test_task_list_checkboxes() {
        let doc = Document::render("- [x] done\n- [ ] open\n");
        let items: Vec<_> = (0..doc.line_count())
            .filter_map(|i| doc.line_at(i))
            .filter(|l| *l.line_type() == LineType::ListItem)
            .map(RenderedLine::content)
            .collect();
        assert_eq!(items, vec!["[x] done", "[ ] open"]);
    }

    #[test]
    fn test_thematic_break_renders_rule() {
        let doc = Document::render("above\n\n---\n\nbelow\n");
        assert!(line_types(&doc).contains(&LineType::HorizontalRule));
    }

    #[test]
    fn test_empty_source_renders_empty() {
        let doc = Document::render("");
        assert_eq!(doc.line_count(), 0);
        assert_eq!(doc.source(), "");
    }

    #[test]
    fn test_source_is_preserved_verbatim() {
        let md = "# Hello\nWorld\n";
        let doc = Document::render(md);
        assert_eq!(doc.source(), md);
    }

    #[test]
    fn test_malformed_constructs_do_not_panic() {
        for md in [
            "```\nunterminated fence",
            "[broken link](",
            "####### seven hashes",
            "> > > deep\n>quote",
            "- \n- \n",
            "****",
            "\u{0}\u{1}\u{2}",
        ] {
            let doc = Document::render(md);
            let _ = doc.visible_lines(0, 24);
        }
    }

    #[test]
    fn test_plain_text_fallback_preserves_lines() {
        let doc = Document::from_plain_text("a\nb\nc");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_at(2).unwrap().content(), "c");
    }

    proptest! {
        #[test]
        fn prop_render_never_panics(s in "\\PC*") {
            let doc = Document::render(&s);
            prop_assert_eq!(doc.source(), s.as_str());
            let _ = doc.visible_lines(0, 24);
        }

        #[test]
        fn prop_render_markdownish_never_panics(
            s in "[-#*`>\\[\\]()! \nabcde]{0,200}"
        ) {
            let doc = Document::render_with_layout(&s, 20);
            let _ = doc.visible_lines(0, 24);
        }
    }
}
