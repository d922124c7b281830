use crate::errors::CatalogError;

use super::types::{Category, Example};

fn parse_err(line: usize, message: &str) -> CatalogError {
    CatalogError::Parse { line, message: message.to_string() }
}

/// Returns the heading of a `// --- HEADING ---` banner line.
fn section_heading(trimmed: &str) -> Option<&str> {
    let inner = trimmed.strip_prefix("//")?.trim().strip_prefix("---")?.strip_suffix("---")?;
    Some(inner.trim())
}

/// One line split into code and trailing comment, with the brackets of the code in order.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Lexed<'a> {
    pub code: &'a str,
    pub note: Option<&'a str>,
    pub brackets: Vec<char>,
}

type Chars<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

// Consumes a string literal up to and including its closing quote.
fn skip_string(chars: &mut Chars<'_>, quote: char) {
    let mut escaped = false;
    for (_, c) in chars.by_ref() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return;
        }
    }
}

// Consumes a regex literal body; `/` inside a `[...]` class does not close it.
fn skip_regex(chars: &mut Chars<'_>) {
    let mut escaped = false;
    let mut in_class = false;
    for (_, c) in chars.by_ref() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => return,
            _ => {}
        }
    }
}

/// A `/` starts a regex literal unless it follows an operand.
fn regex_allowed(prev: Option<char>) -> bool {
    prev.is_none_or(|p| "(,=:[!&|?{};+-*%<>~^".contains(p))
}

/// Splits a line into code and trailing `//` comment and collects its brackets.
/// String and regex literals are opaque: `//`, quotes and brackets inside them are code.
///
/// A `/` at the very start of a continuation line is read as a regex, not a division.
pub(crate) fn lex_line(line: &str) -> Lexed<'_> {
    let mut brackets = Vec::new();
    let mut prev: Option<char> = None;
    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' | '\'' | '`' => skip_string(&mut chars, c),
            '/' if chars.peek().is_some_and(|&(_, n)| n == '/') => {
                return Lexed { code: &line[..i], note: Some(line[i + 2..].trim()), brackets };
            }
            '/' if regex_allowed(prev) => skip_regex(&mut chars),
            '(' | '[' | '{' | ')' | ']' | '}' => brackets.push(c),
            c if c.is_whitespace() => continue,
            _ => {}
        }
        prev = Some(c);
    }
    Lexed { code: line, note: None, brackets }
}

/// Applies `brackets` to `depth`. `None` if a closer has no opener.
fn apply_brackets(brackets: &[char], mut depth: i64) -> Option<i64> {
    for c in brackets {
        if matches!(c, '(' | '[' | '{') {
            depth += 1;
        } else {
            depth -= 1;
            if depth < 0 {
                return None;
            }
        }
    }
    Some(depth)
}

struct OpenStatement {
    category: Category,
    description: String,
    start: usize,
    lines: Vec<String>,
    note: Option<String>,
    depth: i64,
}

impl OpenStatement {
    fn new(category: Category, description: String, start: usize) -> Self {
        Self { category, description, start, lines: Vec::new(), note: None, depth: 0 }
    }

    fn push(&mut self, raw: &str, line: usize) -> Result<(), CatalogError> {
        let Lexed { code, note, brackets } = lex_line(raw);
        self.depth = apply_brackets(&brackets, self.depth)
            .ok_or_else(|| parse_err(line, "closing bracket without a matching opener"))?;
        let code = if self.lines.is_empty() { code.trim() } else { code.trim_end() };
        self.lines.push(code.to_string());
        if let Some(n) = note.filter(|n| !n.is_empty()) {
            self.note = Some(n.to_string());
        }
        Ok(())
    }

    fn finish(self, id: usize) -> Example {
        let description = match self.note {
            Some(note) => format!("{}: {}", self.description, note),
            None => self.description,
        };
        Example {
            id,
            category: self.category,
            description,
            query: self.lines.join("\n"),
            line: self.start,
        }
    }
}

/// Parses catalog source text into examples, in source order.
///
/// The format is line oriented:
/// - `// --- HEADING ---` opens a section; the heading selects the category.
/// - `// text` lines describe the statement(s) that follow. Consecutive lines join.
/// - any other line starts a statement, which runs until its brackets balance.
///   A trailing `// note` is appended to the description.
///
/// A leading byte order mark is ignored. Quotes, brackets and `//` inside string or
/// regex literals (`/it's/`) do not affect statement boundaries.
///
/// # Errors
/// Returns `UnknownSection` for unrecognised banners, `Parse` for statements outside a
/// section, without a description or with unbalanced brackets, and `Empty` if the text
/// holds no statements.
pub fn parse_catalog(src: &str) -> Result<Vec<Example>, CatalogError> {
    let mut examples: Vec<Example> = Vec::new();
    let mut section: Option<Category> = None;
    let mut description: Option<String> = None;
    let mut last_was_comment = false;
    let mut open: Option<OpenStatement> = None;
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);

    for (idx, raw) in src.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();

        if let Some(mut stmt) = open.take() {
            if !trimmed.is_empty() && !trimmed.starts_with("//") {
                stmt.push(raw, line_no)?;
            }
            if stmt.depth == 0 {
                examples.push(stmt.finish(examples.len() + 1));
            } else {
                open = Some(stmt);
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }
        if let Some(heading) = section_heading(trimmed) {
            let category = Category::from_heading(heading).ok_or_else(|| {
                CatalogError::UnknownSection { line: line_no, heading: heading.to_string() }
            })?;
            log::debug!("catalog section {} at line {}", category, line_no);
            section = Some(category);
            description = None;
            last_was_comment = false;
            continue;
        }
        if let Some(text) = trimmed.strip_prefix("//") {
            let text = text.trim();
            // preamble before the first banner is not attached to anything
            if section.is_none() || text.is_empty() {
                continue;
            }
            if last_was_comment {
                if let Some(d) = description.as_mut() {
                    d.push(' ');
                    d.push_str(text);
                }
            } else {
                description = Some(text.to_string());
            }
            last_was_comment = true;
            continue;
        }

        last_was_comment = false;
        let Some(category) = section else {
            return Err(parse_err(line_no, "statement outside of a section"));
        };
        let Some(desc) = description.clone() else {
            return Err(parse_err(line_no, "statement has no description"));
        };
        let mut stmt = OpenStatement::new(category, desc, line_no);
        stmt.push(raw, line_no)?;
        if stmt.depth == 0 {
            examples.push(stmt.finish(examples.len() + 1));
        } else {
            open = Some(stmt);
        }
    }

    if let Some(stmt) = open {
        return Err(parse_err(stmt.start, "statement is not closed before end of input"));
    }
    if examples.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(examples)
}
