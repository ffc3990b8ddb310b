use sieve_fs::FileRecord;

use crate::dsl::directive::{Directive, NOT};
use crate::error::{DirectiveError, SyntaxReason};

/// How `between` treats a lower bound above its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsCheck {
    /// Reject the directive.
    #[default]
    Strict,
    /// Accept it; the resulting filter matches nothing.
    Lax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub between: BoundsCheck,
}

/// Recognised filter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTag {
    GreaterThan,
    SmallerThan,
    Between,
    File,
    Contains,
    Prefix,
    Suffix,
    Writable,
    Executable,
    Hidden,
    All,
}

impl FilterTag {
    pub fn from_token(token: &str) -> Option<Self> {
        let tag = match token {
            "greater_than" => FilterTag::GreaterThan,
            "smaller_than" => FilterTag::SmallerThan,
            "between" => FilterTag::Between,
            "file" => FilterTag::File,
            "contains" => FilterTag::Contains,
            "prefix" => FilterTag::Prefix,
            "suffix" => FilterTag::Suffix,
            "writable" => FilterTag::Writable,
            "executable" => FilterTag::Executable,
            "hidden" => FilterTag::Hidden,
            "all" => FilterTag::All,
            _ => return None,
        };
        Some(tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterTag::GreaterThan => "greater_than",
            FilterTag::SmallerThan => "smaller_than",
            FilterTag::Between => "between",
            FilterTag::File => "file",
            FilterTag::Contains => "contains",
            FilterTag::Prefix => "prefix",
            FilterTag::Suffix => "suffix",
            FilterTag::Writable => "writable",
            FilterTag::Executable => "executable",
            FilterTag::Hidden => "hidden",
            FilterTag::All => "all",
        }
    }

    fn param_count(self) -> usize {
        match self {
            FilterTag::All => 0,
            FilterTag::Between => 2,
            _ => 1,
        }
    }
}

/// A validated filter. Sizes are in KB (`bytes / 1024`), name tests apply
/// to the base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    GreaterThan(u64),
    SmallerThan(u64),
    Between { min: u64, max: u64 },
    File(String),
    Contains(String),
    Prefix(String),
    Suffix(String),
    Writable(bool),
    Executable(bool),
    Hidden(bool),
    All,
}

impl FilterKind {
    pub fn matches(&self, rec: &FileRecord) -> bool {
        match self {
            FilterKind::GreaterThan(kb) => rec.size_kb() > *kb,
            FilterKind::SmallerThan(kb) => rec.size_kb() < *kb,
            FilterKind::Between { min, max } => (*min..=*max).contains(&rec.size_kb()),
            FilterKind::File(name) => rec.name == *name,
            FilterKind::Contains(s) => rec.name.contains(s.as_str()),
            FilterKind::Prefix(s) => rec.name.starts_with(s.as_str()),
            FilterKind::Suffix(s) => rec.name.ends_with(s.as_str()),
            FilterKind::Writable(want) => rec.is_writable() == *want,
            FilterKind::Executable(want) => rec.is_executable() == *want,
            FilterKind::Hidden(want) => rec.is_hidden() == *want,
            FilterKind::All => true,
        }
    }
}

/// File predicate: a filter, possibly wrapped in negations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Filter(FilterKind),
    Not(Box<Predicate>),
}

impl Predicate {
    /// The fallback predicate: accepts every file.
    pub fn all() -> Self {
        Predicate::Filter(FilterKind::All)
    }

    pub fn test(&self, rec: &FileRecord) -> bool {
        match self {
            Predicate::Filter(kind) => kind.matches(rec),
            Predicate::Not(inner) => !inner.test(rec),
        }
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::all()
    }
}

pub fn negate(pred: Predicate) -> Predicate {
    Predicate::Not(Box::new(pred))
}

/// Build a predicate from one filter directive line.
pub fn build_filter(line: &str, opts: FilterOptions) -> Result<Predicate, DirectiveError> {
    let directive = Directive::parse(line, NOT);

    let Some(tag) = FilterTag::from_token(directive.kind) else {
        return Err(DirectiveError::UnknownFilterName(directive.kind.to_owned()));
    };

    if directive.modifiers > 1 {
        return Err(syntax(tag, SyntaxReason::RepeatedModifier(NOT)));
    }

    let kind = build_kind(tag, &directive.params, opts)?;
    let pred = Predicate::Filter(kind);

    Ok(if directive.is_modified() {
        negate(pred)
    } else {
        pred
    })
}

fn build_kind(
    tag: FilterTag,
    params: &[&str],
    opts: FilterOptions,
) -> Result<FilterKind, DirectiveError> {
    let expected = tag.param_count();
    if params.len() != expected {
        return Err(syntax(
            tag,
            SyntaxReason::WrongParamCount {
                expected,
                found: params.len(),
            },
        ));
    }

    let kind = match tag {
        FilterTag::GreaterThan => FilterKind::GreaterThan(parse_size(tag, params[0])?),
        FilterTag::SmallerThan => FilterKind::SmallerThan(parse_size(tag, params[0])?),
        FilterTag::Between => {
            let min = parse_size(tag, params[0])?;
            let max = parse_size(tag, params[1])?;
            if min > max && opts.between == BoundsCheck::Strict {
                return Err(syntax(tag, SyntaxReason::InvertedBounds { min, max }));
            }
            FilterKind::Between { min, max }
        }
        FilterTag::File => FilterKind::File(params[0].to_owned()),
        FilterTag::Contains => FilterKind::Contains(params[0].to_owned()),
        FilterTag::Prefix => FilterKind::Prefix(params[0].to_owned()),
        FilterTag::Suffix => FilterKind::Suffix(params[0].to_owned()),
        FilterTag::Writable => FilterKind::Writable(parse_yes_no(tag, params[0])?),
        FilterTag::Executable => FilterKind::Executable(parse_yes_no(tag, params[0])?),
        FilterTag::Hidden => FilterKind::Hidden(parse_yes_no(tag, params[0])?),
        FilterTag::All => FilterKind::All,
    };

    Ok(kind)
}

fn syntax(tag: FilterTag, reason: SyntaxReason) -> DirectiveError {
    DirectiveError::IllegalFilterSyntax {
        kind: tag.as_str(),
        reason,
    }
}

/// Parse a KB size: optional sign, then decimal digits. A minus sign is only
/// rejected when the value is actually below zero, so `-0` reads as 0.
fn parse_size(tag: FilterTag, raw: &str) -> Result<u64, DirectiveError> {
    if let Some(digits) = raw.strip_prefix('-')
        && !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
    {
        if digits.bytes().all(|b| b == b'0') {
            return Ok(0);
        }
        return Err(syntax(tag, SyntaxReason::NegativeSize(raw.to_owned())));
    }

    raw.parse::<u64>()
        .map_err(|_| syntax(tag, SyntaxReason::InvalidSize(raw.to_owned())))
}

fn parse_yes_no(tag: FilterTag, raw: &str) -> Result<bool, DirectiveError> {
    match raw {
        "YES" => Ok(true),
        "NO" => Ok(false),
        _ => Err(DirectiveError::InvalidBooleanLiteral {
            kind: tag.as_str(),
            value: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
