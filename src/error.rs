//! # Error and Result for this crate
//!
//! This crate defines a common [Error] structure that every pipeline stage converts its failures
//! into. Each error carries an [ErrorType] so that callers can tell malformed source text apart
//! from a structurally invalid schema or a type reference that couldn't be linked.

use logos::Span;
use std::{error, fmt, result};

/// This crate's result type using the [Error] structure.
pub type Result<T> = result::Result<T, Error>;

/// This crate's error structure which internal errors are converted into.
///
/// The error is split into a general message and a context string. For parsing the context
/// string is populated with a snippet of the source text around the offending token, for the
/// other stages it's usually left empty.
///
/// Any error aborts a pipeline run as a whole, no partial graph is ever returned alongside it.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) location: Option<Location>,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

/// The taxonomy of fatal pipeline failures.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorType {
    /// Malformed source text, e.g. an unterminated string or invalid grammar.
    SchemaParse,
    /// A structurally invalid schema, e.g. one without a query root type.
    SchemaBuild,
    /// A type name that's referenced somewhere but never defined.
    UnresolvedReference,
}

impl Error {
    /// Create a new Error with only a main message from an input string.
    pub fn new<S: Into<String>>(message: S, error_type: ErrorType) -> Self {
        Self {
            message: message.into(),
            location: None,
            context: None,
            error_type,
        }
    }

    /// Create a new Error with a main message, a location, and a context string.
    pub fn new_with_context<S: Into<String>>(
        message: S,
        location: Option<Location>,
        context: S,
        error_type: ErrorType,
    ) -> Self {
        Self {
            message: message.into(),
            location,
            context: Some(context.into()),
            error_type,
        }
    }

    /// Attaches the location of the definition that caused this error.
    #[inline]
    pub(crate) fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    /// Returns the message of the current error. The context is discarded.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the location of the current error.
    pub fn location(&self) -> &Option<Location> {
        &self.location
    }

    /// Returns which kind of failure this error represents.
    #[inline]
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Formats this error, with the option to include the context information as well,
    /// which will cause the string to be multi-line.
    pub fn print(&self, include_ctx: bool) -> String {
        let prefix = match self.error_type {
            ErrorType::SchemaParse => "Syntax Error",
            ErrorType::SchemaBuild => "Schema Error",
            ErrorType::UnresolvedReference => "Reference Error",
        };

        let formatted = match self.location {
            Some(ref location) => format!("{}: {} ({})", prefix, self.message, location),
            None => format!("{}: {}", prefix, self.message),
        };

        match self.context {
            Some(ref context) if include_ctx => format!("{}\n{}", formatted, context),
            _ => formatted,
        }
    }
}

/// Prints the lines surrounding `span` with line numbers and underlines the span itself.
pub(crate) fn print_span(source: &str, span: Span) -> String {
    let mut out = String::new();
    let start_line = line_of(source, span.start);

    let start = source[..span.start]
        .rfind('\n')
        .and_then(|start| source[..start].rfind('\n'))
        .map_or(0, |idx| idx + 1);

    let end = source[span.end..]
        .find('\n')
        .map_or(source.len(), |idx| idx + span.end);

    let snippet = &source[start..end];
    let first_line = line_of(source, start);
    let line_num_pad = (first_line + snippet.lines().count().max(1) - 1)
        .to_string()
        .len();
    for (index, line) in snippet.lines().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let line_num = (first_line + index).to_string();
        out.push_str(&" ".repeat(line_num_pad - line_num.len() + 1));
        out.push_str(&line_num);
        out.push_str(" | ");
        out.push_str(line);
    }
    if start_line == line_of(source, span.end) {
        let line_start = source[..span.start].rfind('\n').map_or(0, |idx| idx + 1);
        out.push('\n');
        out.push_str(&" ".repeat(line_num_pad + 1));
        out.push_str(" | ");
        out.push_str(&" ".repeat(span.start - line_start));
        out.push_str(&"^".repeat((span.end - span.start).max(1)));
    };

    out
}

/// A position inside one of the source fragments.
///
/// Lines and columns are both 1-based, the column counts characters rather than bytes.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Location {
    pub filepath: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filepath, self.line, self.column)
    }
}

#[inline]
fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

/// Computes the line and column of a byte offset. `\r\n`, `\r`, and `\n` all end a line, and a
/// leading byte order mark doesn't count towards the first line's columns.
pub(crate) fn get_location(filepath: &str, source: &str, offset: usize) -> Location {
    let offset = offset.min(source.len());
    let prefix = &source[..offset];
    let mut line = 1;
    let mut line_start = 0;
    let mut chars = prefix.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        match c {
            '\r' if matches!(chars.peek(), Some((_, '\n'))) => {
                chars.next();
                line += 1;
                line_start = idx + 2;
            }
            '\r' | '\n' => {
                line += 1;
                line_start = idx + 1;
            }
            _ => {}
        }
    }

    let mut current_line = &prefix[line_start..];
    if line_start == 0 {
        current_line = current_line.trim_start_matches('\u{FEFF}');
    }
    Location {
        filepath: filepath.to_string(),
        line,
        column: current_line.chars().count() + 1,
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print(true))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n", self)
    }
}

impl error::Error for Error {}
