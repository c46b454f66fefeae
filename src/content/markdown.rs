//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::helpers::html_escape;

/// Prefix of the CSS classes put on highlighted tokens
const CLASS_PREFIX: &str = "hljs-";

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    breaks: bool,
}

/// A code block being collected
struct CodeBlock {
    lang: Option<String>,
    source: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(true)
    }

    /// Create with custom settings
    pub fn with_options(breaks: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            breaks,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is stripped by FrontMatter::parse, so no metadata blocks here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<CodeBlock> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some(CodeBlock {
                        lang,
                        source: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = code_block.take() {
                        let highlighted = self.highlight_code(&block.source, block.lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some(block) = code_block.as_mut() {
                        block.source.push_str(&text);
                    }
                }
                Event::SoftBreak if self.breaks => events.push(Event::HardBreak),
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block, falling back to plain text for unknown languages
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let class = match lang {
            Some(lang) => format!("hljs language-{}", html_escape(lang)),
            None => "hljs".to_string(),
        };

        let syntax = self.find_syntax(lang);
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed {
                prefix: CLASS_PREFIX,
            },
        );

        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::debug!("Highlighting failed for {:?}: {}", lang, e);
                return format!(
                    r#"<pre><code class="{}">{}</code></pre>"#,
                    class,
                    html_escape(code)
                );
            }
        }

        format!(
            r#"<pre><code class="{}">{}</code></pre>"#,
            class,
            generator.finalize()
        )
    }

    fn find_syntax(&self, lang: Option<&str>) -> &SyntaxReference {
        lang.and_then(|lang| {
            self.syntax_set
                .find_syntax_by_token(lang)
                .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
        })
        .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
