//! Markdown rendering with optional syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::MarkdownConfig;
use crate::helpers::escape_html;

/// Marker separating the lead paragraph(s) from the rest of a post
pub const MORE_MARKER: &str = "<!-- more -->";

/// Markdown renderer
///
/// Renders plain CommonMark unless extensions or highlighting are enabled.
pub struct MarkdownRenderer {
    options: Options,
    highlighter: Option<Highlighter>,
}

/// Syntect state for fenced code blocks
struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a standard CommonMark renderer
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
            highlighter: None,
        }
    }

    /// Create a renderer from the `markdown` section of the site config
    pub fn from_config(config: &MarkdownConfig) -> Self {
        let mut renderer = Self::new();
        if config.extensions {
            renderer = renderer.with_extensions();
        }
        if config.highlight.enable {
            renderer =
                renderer.with_highlighting(&config.highlight.theme, config.highlight.line_number);
        }
        renderer
    }

    /// Enable tables, footnotes, strikethrough, task lists and heading attributes
    pub fn with_extensions(mut self) -> Self {
        // YAML metadata blocks stay off: front-matter is stripped before rendering
        self.options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;
        self
    }

    /// Highlight fenced code blocks with the given syntect theme
    pub fn with_highlighting(mut self, theme: &str, line_numbers: bool) -> Self {
        self.highlighter = Some(Highlighter {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        });
        self
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html_output = String::new();

        let Some(highlighter) = &self.highlighter else {
            html::push_html(&mut html_output, parser);
            return html_output;
        };

        let mut events: Vec<Event> = Vec::new();
        // (language, collected source) while inside a code block
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split([',', ' '])
                            .next()
                            .filter(|lang| !lang.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = highlighter.highlight(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, code)) => code.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                other => events.push(other),
            }
        }

        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Parse excerpt from content (split by <!-- more -->)
    ///
    /// Only a marker that markdown treats as raw HTML counts; one inside a
    /// code block or code span is left alone. Returns the markdown before the
    /// marker, if any, and the content with just the marker removed.
    pub fn split_excerpt(content: &str) -> (Option<String>, String) {
        let marker = Parser::new(content)
            .into_offset_iter()
            .find_map(|(event, range)| match event {
                Event::Html(html) | Event::InlineHtml(html) if html.trim() == MORE_MARKER => {
                    Some(range)
                }
                _ => None,
            });

        match marker {
            Some(range) => {
                let excerpt = content[..range.start].trim().to_string();
                let full = format!("{}{}", &content[..range.start], &content[range.end..]);
                (Some(excerpt), full)
            }
            None => (None, content.to_string()),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Highlight a code block
    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let class = escape_html(lang);

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => {
                let gutter = (1..=code.lines().count())
                    .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
                    class, gutter, highlighted
                )
            }
            Some(highlighted) => {
                format!(r#"<figure class="highlight {}">{}</figure>"#, class, highlighted)
            }
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                class,
                escape_html(code)
            ),
        }
    }
}
