use std::cmp::max;
use std::fmt;

#[cfg(feature = "unicode")]
use unicode_width::UnicodeWidthStr;

use crate::types::span::Span;

/// An error that can occur during template compilation.
///
/// The compiler trusts the parser to hand it a well-formed tree, so these are
/// contract violations: the message names the offending node kind and, where
/// the parser supplied one, its span. If the template carries its source then
/// the alternate format (`{:#}`) renders the offending excerpt.
#[derive(Clone)]
pub struct Error {
    msg: String,
    span: Option<Span>,
    source: Option<String>,
}

impl Error {
    pub(crate) fn node(kind: &str, msg: impl fmt::Display, span: Span) -> Self {
        Self {
            msg: format!("invalid {kind}: {msg}"),
            span: if span.is_empty() { None } else { Some(span) },
            source: None,
        }
    }

    /// Attach the template source if the error does not have one yet.
    pub(crate) fn with_source(mut self, source: Option<&str>) -> Self {
        if self.source.is_none() {
            self.source = source.map(str::to_owned);
        }
        self
    }

    /// Returns the error message without any location information.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the span of the offending node, if known.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// The source and span to excerpt, if the span lies on character
    /// boundaries within the source.
    fn pretty(&self) -> Option<(&str, Span)> {
        match (&self.source, self.span) {
            (Some(source), Some(span))
                if !source.is_empty()
                    && span.m <= span.n
                    && span.n <= source.len()
                    && source.is_char_boundary(span.m)
                    && source.is_char_boundary(span.n) =>
            {
                Some((source, span))
            }
            _ => None,
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pretty() {
            Some((source, span)) => fmt_pretty(&self.msg, source, span, f),
            None => fmt::Display::fmt(self, f),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.pretty(), self.span) {
            (Some((source, span)), _) if f.alternate() => fmt_pretty(&self.msg, source, span, f),
            (_, Some(span)) => write!(f, "{} between bytes {} and {}", self.msg, span.m, span.n),
            (_, None) => write!(f, "{}", self.msg),
        }
    }
}

fn fmt_pretty(msg: &str, source: &str, span: Span, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lines: Vec<_> = source.split_terminator('\n').collect();
    let (line, col) = to_line_col(&lines, span.m);
    let underline_width = max(1, width(&source[span]));
    let code = lines.get(line).or(lines.last()).copied().unwrap_or("");

    let num = (line + 1).to_string();
    let pad = width(&num);
    let pipe = "|";
    let underline = "^".repeat(underline_width);

    write!(
        f,
        "\n \
        {0:pad$} {pipe}\n \
        {num:>} {pipe} {code}\n \
        {0:pad$} {pipe} {underline:>width$} {msg}\n",
        "",
        pad = pad,
        pipe = pipe,
        num = num,
        code = code,
        underline = underline,
        width = col + underline_width,
        msg = msg
    )
}

fn to_line_col(lines: &[&str], offset: usize) -> (usize, usize) {
    let mut n = 0;
    for (i, line) in lines.iter().enumerate() {
        let len = line.len() + 1;
        if n + len > offset {
            return (i, width(&line[..offset - n]));
        }
        n += len;
    }
    (lines.len(), lines.last().map(|l| width(l)).unwrap_or(0))
}

#[cfg(feature = "unicode")]
fn width(s: &str) -> usize {
    s.width()
}

#[cfg(not(feature = "unicode"))]
fn width(s: &str) -> usize {
    s.chars().count()
}
