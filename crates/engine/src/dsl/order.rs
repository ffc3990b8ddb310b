use std::cmp::Ordering;

use sieve_fs::FileRecord;

use crate::dsl::directive::{Directive, REVERSE};
use crate::error::{DirectiveError, SyntaxReason};

/// Recognised order names. Every order breaks ties on the absolute path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// Absolute path, lexically.
    Abs,
    /// Extension, lexically.
    Type,
    /// Length in bytes.
    Size,
}

impl OrderKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "abs" => Some(OrderKind::Abs),
            "type" => Some(OrderKind::Type),
            "size" => Some(OrderKind::Size),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderKind::Abs => "abs",
            OrderKind::Type => "type",
            OrderKind::Size => "size",
        }
    }

    fn primary(self, a: &FileRecord, b: &FileRecord) -> Ordering {
        match self {
            OrderKind::Abs => by_abs_path(a, b),
            OrderKind::Type => extension(&a.name).cmp(extension(&b.name)),
            OrderKind::Size => a.size.cmp(&b.size),
        }
    }
}

/// File comparator: an order key, possibly reversed.
///
/// Reversal only flips the primary key; ties are always broken by
/// ascending absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparator {
    Key(OrderKind),
    Reverse(Box<Comparator>),
}

impl Comparator {
    /// The fallback comparator: ascending absolute path.
    pub fn abs() -> Self {
        Comparator::Key(OrderKind::Abs)
    }

    fn primary(&self, a: &FileRecord, b: &FileRecord) -> Ordering {
        match self {
            Comparator::Key(kind) => kind.primary(a, b),
            Comparator::Reverse(inner) => inner.primary(a, b).reverse(),
        }
    }

    pub fn compare(&self, a: &FileRecord, b: &FileRecord) -> Ordering {
        self.primary(a, b).then_with(|| by_abs_path(a, b))
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Comparator::abs()
    }
}

pub fn reverse(cmp: Comparator) -> Comparator {
    Comparator::Reverse(Box::new(cmp))
}

#[inline]
fn by_abs_path(a: &FileRecord, b: &FileRecord) -> Ordering {
    a.abs_path.cmp(&b.abs_path)
}

/// Text after the last `.` of a base name. Names without a dot, or whose
/// only leading dot marks a hidden file, have the empty extension.
pub fn extension(name: &str) -> &str {
    match name.rfind('.') {
        None | Some(0) => "",
        Some(idx) => &name[idx + 1..],
    }
}

/// Build a comparator from one order directive line.
pub fn build_order(line: &str) -> Result<Comparator, DirectiveError> {
    let directive = Directive::parse(line, REVERSE);

    let Some(kind) = OrderKind::from_token(directive.kind) else {
        return Err(DirectiveError::UnknownOrderName(directive.kind.to_owned()));
    };

    if directive.modifiers > 1 {
        return Err(syntax(kind, SyntaxReason::RepeatedModifier(REVERSE)));
    }

    if let Some(extra) = directive.params.first() {
        return Err(syntax(kind, SyntaxReason::UnexpectedToken((*extra).to_owned())));
    }

    let cmp = Comparator::Key(kind);
    Ok(if directive.is_modified() {
        reverse(cmp)
    } else {
        cmp
    })
}

fn syntax(kind: OrderKind, reason: SyntaxReason) -> DirectiveError {
    DirectiveError::IllegalOrderSyntax {
        kind: kind.as_str(),
        reason,
    }
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
