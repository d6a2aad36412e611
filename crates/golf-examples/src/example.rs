//! Golf example pages and their required structure.
//!
//! An example page looks like this:
//!
//! ````markdown
//! # Text into Array
//!
//! Optional description.
//!
//! ## Before
//!
//! ```
//! Hello
//! Helix
//! ```
//!
//! ## After
//!
//! ```json
//! ["Hello", "Helix"]
//! ```
//!
//! ## Command
//!
//! ```
//! %<A-s>ms"
//! ```
//!
//! 1. `%` selects the whole file
//! 1. `<A-s>` splits the selection on newlines
//! 1. `ms"` surrounds each line with quotes
//! ````

use std::collections::HashSet;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use rayon::prelude::*;

use crate::ExampleError;
use crate::keys::{KeyEvent, parse_keys};

/// Maximum length of a line in the `## Command` code block.
pub const MAX_LINE_LEN: usize = 60;

/// Name of the generated index page, which is not an example.
pub const INDEX_NAME: &str = "index";

/// A single Helix Golf example.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Example {
    /// File stem of the page.
    pub name: String,
    /// Level 1 heading.
    pub title: String,
    /// Paragraph between the title and `## Before`, as markdown.
    pub description: Option<String>,
    /// File contents before running the command (ends with a newline).
    pub before: String,
    /// Expected file contents after running the command.
    pub after: String,
    /// File extension: the language of the `## After` code block.
    pub ext: String,
    /// Key sequence with the line breaks removed.
    pub command: String,
    /// Parsed `command`.
    pub key_events: Vec<KeyEvent>,
}

/// The element the parser is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expecting {
    Title,
    BeforeHeading,
    BeforeCode,
    AfterHeading,
    AfterCode,
    CommandHeading,
    CommandCode,
    Explanation,
    Finished,
}

impl Expecting {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::BeforeHeading,
            Self::BeforeHeading => Self::BeforeCode,
            Self::BeforeCode => Self::AfterHeading,
            Self::AfterHeading => Self::AfterCode,
            Self::AfterCode => Self::CommandHeading,
            Self::CommandHeading => Self::CommandCode,
            Self::CommandCode => Self::Explanation,
            Self::Explanation | Self::Finished => Self::Finished,
        }
    }

    /// What is missing while in this state.
    fn reason(self) -> &'static str {
        match self {
            Self::Title => "expected heading: `# ...`",
            Self::BeforeHeading => "expected heading `## Before`",
            Self::BeforeCode => "expected code block after `## Before`",
            Self::AfterHeading => "expected heading `## After`",
            Self::AfterCode => "expected code block after `## After`",
            Self::CommandHeading => "expected heading `## Command`",
            Self::CommandCode => "expected code block after `## Command`",
            Self::Explanation => "expected numbered list describing each command",
            Self::Finished => "",
        }
    }
}

/// A top-level markdown block with its events and source range.
struct Block<'a> {
    events: Vec<Event<'a>>,
    range: Range<usize>,
}

impl Block<'_> {
    fn start(&self) -> Option<&Tag<'_>> {
        match self.events.first() {
            Some(Event::Start(tag)) => Some(tag),
            _ => None,
        }
    }

    fn heading_text(&self, level: HeadingLevel) -> Option<String> {
        match self.start() {
            Some(Tag::Heading { level: l, .. }) if *l == level => Some(
                self.events
                    .iter()
                    .filter_map(|e| match e {
                        Event::Text(t) | Event::Code(t) => Some(t.as_ref()),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    /// `(language, contents)` of a code block.
    fn code_block(&self) -> Option<(String, String)> {
        let lang = match self.start() {
            Some(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                info.split_whitespace().next().unwrap_or_default().to_owned()
            }
            Some(Tag::CodeBlock(CodeBlockKind::Indented)) => String::new(),
            _ => return None,
        };
        let contents = self
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Text(t) => Some(t.as_ref()),
                _ => None,
            })
            .collect();
        Some((lang, contents))
    }

    fn is_paragraph(&self) -> bool {
        matches!(self.start(), Some(Tag::Paragraph))
    }

    fn is_ordered_list(&self) -> bool {
        matches!(self.start(), Some(Tag::List(Some(_))))
    }
}

/// Split a document into top-level blocks.
fn blocks(markdown: &str) -> Vec<Block<'_>> {
    let options = Options::ENABLE_YAML_STYLE_METADATA_BLOCKS | Options::ENABLE_GFM;
    let mut blocks = Vec::new();
    let mut current: Option<Block<'_>> = None;
    let mut depth = 0usize;

    for (event, range) in Parser::new_ext(markdown, options).into_offset_iter() {
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
        let block = current.get_or_insert_with(|| Block {
            events: Vec::new(),
            range: range.clone(),
        });
        block.events.push(event);
        if depth == 0 {
            blocks.extend(current.take());
        }
    }
    blocks
}

/// Rebuild inline markdown (text, code, emphasis, strong, links).
fn inline_markdown(events: &[Event<'_>]) -> String {
    let mut md = String::new();
    let mut links = Vec::new();
    for event in events {
        match event {
            Event::Text(text) => md.push_str(text),
            Event::Code(code) => {
                md.push('`');
                md.push_str(code);
                md.push('`');
            }
            Event::SoftBreak | Event::HardBreak => md.push('\n'),
            Event::Start(Tag::Emphasis) | Event::End(TagEnd::Emphasis) => md.push('_'),
            Event::Start(Tag::Strong) | Event::End(TagEnd::Strong) => md.push_str("**"),
            Event::Start(Tag::Link { dest_url, .. }) => {
                links.push(dest_url.to_string());
                md.push('[');
            }
            Event::End(TagEnd::Link) => {
                md.push_str("](");
                md.push_str(&links.pop().unwrap_or_default());
                md.push(')');
            }
            _ => {}
        }
    }
    md
}

/// Check the line-break and line-length rules of the command block.
fn check_command(value: &str) -> Result<(), String> {
    let chars: Vec<char> = value.chars().collect();
    let bad_break = chars.windows(3).any(|w| {
        let [a, b, c] = [w[0], w[1], w[2]];
        (a != '\n' && b == '\n' && c != '\n') || (a == '\n' && b == '\n' && c == '\n')
    });
    if bad_break {
        return Err("For each line break, use exactly 2 newlines".to_owned());
    }

    if let Some(line) = value.lines().find(|line| line.chars().count() > MAX_LINE_LEN) {
        return Err(format!(
            "Each line in the code block after `## Command` should be at most \
             {MAX_LINE_LEN} characters long.\n\
             This line is {} characters long:\n  {line}\n\n\
             Break it with two newlines.",
            line.chars().count()
        ));
    }
    Ok(())
}

/// Concatenated inline code (and trimmed code blocks) of an explanation list.
fn explanation_code(events: &[Event<'_>]) -> String {
    let mut code = String::new();
    let mut in_code_block = false;
    let mut block = String::new();
    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                block.clear();
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                code.push_str(block.trim());
            }
            Event::Text(text) if in_code_block => block.push_str(text),
            Event::Code(inline) => code.push_str(inline),
            _ => {}
        }
    }
    code
}

impl Example {
    /// Parse and validate one example page.
    ///
    /// `path` names the page (its file stem becomes [`Example::name`]) and is
    /// used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `ExampleError::InvalidStructure` with the offending byte span
    /// when the page does not follow the example structure, and
    /// `ExampleError::ParseKeys` when the command is not valid Helix key
    /// notation.
    pub fn parse(path: &Path, markdown: &str) -> Result<Self, ExampleError> {
        let invalid = |span: Range<usize>, reason: String| ExampleError::InvalidStructure {
            file: path.to_path_buf(),
            reason,
            span,
        };

        let mut example = Self {
            name: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            ..Self::default()
        };
        let mut expecting = Expecting::Title;
        let mut last_span = 0..0;

        for block in blocks(markdown) {
            let span = block.range.clone();
            let matched = match expecting {
                Expecting::Title => match block.heading_text(HeadingLevel::H1) {
                    Some(title) if !title.trim().is_empty() => {
                        example.title = title.trim().to_owned();
                        true
                    }
                    Some(_) => return Err(invalid(span, expecting.reason().to_owned())),
                    None => false,
                },
                Expecting::BeforeHeading => {
                    if block.is_paragraph() {
                        example.description = Some(inline_markdown(&block.events));
                        false
                    } else {
                        expect_heading(&block, "Before", expecting)
                            .map_err(|reason| invalid(span.clone(), reason))?
                    }
                }
                Expecting::AfterHeading => expect_heading(&block, "After", expecting)
                    .map_err(|reason| invalid(span.clone(), reason))?,
                Expecting::CommandHeading => expect_heading(&block, "Command", expecting)
                    .map_err(|reason| invalid(span.clone(), reason))?,
                Expecting::BeforeCode => match block.code_block() {
                    Some((_, contents)) => {
                        example.before = if contents.ends_with('\n') {
                            contents
                        } else {
                            format!("{contents}\n")
                        };
                        true
                    }
                    None => false,
                },
                Expecting::AfterCode => match block.code_block() {
                    Some((lang, contents)) => {
                        example.after = contents.strip_suffix('\n').unwrap_or(&contents).to_owned();
                        example.ext = lang;
                        true
                    }
                    None => false,
                },
                Expecting::CommandCode => match block.code_block() {
                    Some((_, contents)) => {
                        let value = contents.strip_suffix('\n').unwrap_or(&contents);
                        check_command(value).map_err(|reason| invalid(span.clone(), reason))?;
                        example.command = value.replace('\n', "");
                        true
                    }
                    None => false,
                },
                Expecting::Explanation => {
                    if block.is_ordered_list() {
                        let concatenated = explanation_code(&block.events);
                        if concatenated != example.command {
                            return Err(invalid(
                                span,
                                format!(
                                    "Code in the explanation list must concatenate to the command.\n\n\
                                     Concatenating the code in the list gives:\n  {concatenated}\n\n\
                                     but the code block after `## Command` is:\n  {}",
                                    example.command
                                ),
                            ));
                        }
                        true
                    } else {
                        false
                    }
                }
                Expecting::Finished => break,
            };

            if matched {
                expecting = expecting.next();
                last_span = span;
            }
        }

        if expecting != Expecting::Finished {
            return Err(invalid(last_span, expecting.reason().to_owned()));
        }

        example.key_events = parse_keys(&example.command).map_err(|err| ExampleError::ParseKeys {
            file: path.to_path_buf(),
            reason: err.reason,
            span: err.span,
        })?;

        Ok(example)
    }

    /// Read and parse one example file.
    ///
    /// # Errors
    ///
    /// Returns `ExampleError::Io` if the file cannot be read, otherwise the
    /// errors of [`Example::parse`].
    pub fn from_file(path: &Path) -> Result<Self, ExampleError> {
        let markdown = fs::read_to_string(path).map_err(|e| ExampleError::io(path, e))?;
        Self::parse(path, &markdown)
    }

    /// Parse every example in `dir`.
    ///
    /// All `.md` files except the generated `index.md` are parsed in
    /// parallel. A non-empty `filter` restricts parsing to those names. The
    /// result is sorted by number of key events, shortest first.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn parse_all(dir: &Path, filter: &HashSet<String>) -> Result<Vec<Self>, ExampleError> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| ExampleError::io(dir, e))?
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "md"))
            .filter(|path| {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy())
                    .unwrap_or_default();
                stem != INDEX_NAME && (filter.is_empty() || filter.contains(stem.as_ref()))
            })
            .collect();
        paths.sort();

        let mut examples = paths
            .par_iter()
            .map(|path| Self::from_file(path))
            .collect::<Result<Vec<_>, _>>()?;
        examples.sort_by(|a, b| {
            a.key_events
                .len()
                .cmp(&b.key_events.len())
                .then_with(|| a.name.cmp(&b.name))
        });

        tracing::debug!(count = examples.len(), dir = %dir.display(), "Parsed examples");
        Ok(examples)
    }
}

/// Match a `## {text}` heading. Other H2 headings are an error; other blocks
/// are skipped.
fn expect_heading(block: &Block<'_>, text: &str, expecting: Expecting) -> Result<bool, String> {
    match block.heading_text(HeadingLevel::H2) {
        Some(found) if found.trim() == text => Ok(true),
        Some(_) => Err(expecting.reason().to_owned()),
        None => Ok(false),
    }
}
