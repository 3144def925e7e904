//! Call-site extraction.
//!
//! Candidates are found with a regular expression, which is only an approximation of the
//! source language: matches inside string literals and comments are reported too unless the
//! literal pre-pass is enabled. Arguments are recovered by counting parenthesis depth from the
//! opening paren, since a regular expression cannot bound nested parens.

use log::debug;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::lexer::{inside_literal, literal_spans};
use crate::options::{language_settings, Options};
use crate::psi::{LineIndex, Span};

/// Marker appended to truncated argument summaries.
pub const TRUNCATION_MARKER: &str = "...";

/// The member used on the notification identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Bare call without member access, eg. `toast("Saved")`.
    Default,
    /// `toast.success(..)`
    Success,
    /// `toast.error(..)`
    Error,
    /// `toast.info(..)`
    Info,
    /// `toast.warning(..)`
    Warning,
    /// `toast.loading(..)`
    Loading,
    /// `toast.custom(..)`
    Custom,
    /// `toast.message(..)`
    Message,
}

impl Variant {
    /// Every variant selected with a dotted member, in detection order.
    pub const MEMBERS: [Variant; 7] = [
        Variant::Success,
        Variant::Error,
        Variant::Info,
        Variant::Warning,
        Variant::Loading,
        Variant::Custom,
        Variant::Message,
    ];

    /// Lowercase name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Default => "default",
            Variant::Success => "success",
            Variant::Error => "error",
            Variant::Info => "info",
            Variant::Warning => "warning",
            Variant::Loading => "loading",
            Variant::Custom => "custom",
            Variant::Message => "message",
        }
    }

    /// Look up a dotted member name. `default` is not a member.
    ///
    /// ```
    /// use toastscan::extract::Variant;
    /// assert_eq!(Variant::from_member("error"), Some(Variant::Error));
    /// assert_eq!(Variant::from_member("default"), None);
    /// assert_eq!(Variant::from_member("dismiss"), None);
    /// ```
    pub fn from_member(name: &str) -> Option<Variant> {
        Variant::MEMBERS.into_iter().find(|v| v.as_str() == name)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name which is not one of the known variants.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown variant '{0}'")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Variant, UnknownVariant> {
        match s {
            "default" => Ok(Variant::Default),
            _ => Variant::from_member(s).ok_or_else(|| UnknownVariant(s.to_string())),
        }
    }
}

/// A single discovered call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CallSite {
    /// File the call was found in.
    pub file: PathBuf,
    /// 1-based line of the start of the call.
    pub line: usize,
    /// Member used on the identifier.
    pub variant: Variant,
    /// Whitespace-normalized, possibly truncated argument text.
    #[serde(rename = "args")]
    pub args_summary: String,
}

/// Compiled call-site matcher.
#[derive(Clone, Debug)]
pub struct Extractor {
    pattern: Regex,
    summary_max_length: usize,
    skip_literals: bool,
}

impl Extractor {
    /// Build the matcher for the identifier and variants in `options`.
    pub fn new(options: &Options) -> Result<Extractor, regex::Error> {
        let pattern = Regex::new(&call_pattern(&options.identifier, &options.variants))?;
        debug!("Call pattern: {}", pattern.as_str());
        Ok(Extractor {
            pattern,
            summary_max_length: options.summary_max_length,
            skip_literals: options.skip_literals,
        })
    }

    /// Find all calls in `text`, in the order they appear. `file` is only recorded in the
    /// results and used to pick lexical settings for the literal pre-pass.
    ///
    /// ```
    /// use std::path::Path;
    /// use toastscan::extract::{Extractor, Variant};
    /// use toastscan::options::Options;
    ///
    /// let extractor = Extractor::new(&Options::default()).unwrap();
    /// let sites = extractor.scan(Path::new("app.tsx"), "toast.success(\"Saved\")");
    /// assert_eq!(sites[0].variant, Variant::Success);
    /// assert_eq!(sites[0].args_summary, "\"Saved\"");
    /// ```
    pub fn scan(&self, file: &Path, text: &str) -> Vec<CallSite> {
        let literals = if self.skip_literals {
            literal_spans(text, language_settings(file))
        } else {
            Vec::new()
        };
        let lines = LineIndex::new(text);

        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                if inside_literal(&literals, whole.start()) {
                    debug!("{}: skipping match at byte {}", file.display(), whole.start());
                    return None;
                }
                let variant = match caps.get(1) {
                    Some(member) => Variant::from_member(member.as_str())?,
                    None => Variant::Default,
                };
                let args = balanced_arguments(text, whole.end(), &literals);
                Some(CallSite {
                    file: file.to_path_buf(),
                    line: lines.line_of(whole.start()),
                    variant,
                    args_summary: summarize(args, self.summary_max_length),
                })
            })
            .collect()
    }
}

fn call_pattern(identifier: &str, variants: &[Variant]) -> String {
    let members = variants
        .iter()
        .filter(|v| **v != Variant::Default)
        .map(|v| v.as_str())
        .collect::<Vec<_>>();
    if members.is_empty() {
        format!(r"{}\s*\(", regex::escape(identifier))
    } else {
        format!(
            r"{}(?:\.({}))?\s*\(",
            regex::escape(identifier),
            members.join("|")
        )
    }
}

/// Argument text starting at byte `start`, which must follow an opening paren, up to but not
/// including its matching closing paren. Runs to the end of `text` if the paren is never closed.
/// Parens inside `literals` are not counted.
///
/// ```
/// use toastscan::extract::balanced_arguments;
/// let text = "toast(a(b), c) + d)";
/// assert_eq!(balanced_arguments(text, 6, &[]), "a(b), c");
/// assert_eq!(balanced_arguments("toast(a(b", 6, &[]), "a(b");
/// ```
pub fn balanced_arguments<'a>(text: &'a str, start: usize, literals: &[Span]) -> &'a str {
    let rest = &text[start..];
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '(' | ')' if inside_literal(literals, start + i) => {}
            '(' => depth += 1,
            ')' if depth == 0 => return &rest[..i],
            ')' => depth -= 1,
            _ => {}
        }
    }
    rest
}

/// Collapse whitespace runs to single spaces, trim, and cut to `max_len` characters.
///
/// ```
/// use toastscan::extract::summarize;
/// assert_eq!(summarize("  \"a\",\n\t{ b }  ", 100), "\"a\", { b }");
/// assert_eq!(summarize("abcdef", 3), "abc...");
/// ```
pub fn summarize(raw: &str, max_len: usize) -> String {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    match normalized.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{}", &normalized[..cut], TRUNCATION_MARKER),
        None => normalized,
    }
}
