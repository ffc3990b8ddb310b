use smallvec::SmallVec;

/// Token separator inside a directive line.
pub const SEPARATOR: char = '#';
/// Trailing filter modifier.
pub const NOT: &str = "NOT";
/// Trailing order modifier.
pub const REVERSE: &str = "REVERSE";

/// Directive tokens. No recognised directive needs more than four.
pub type Tokens<'a> = SmallVec<[&'a str; 4]>;

/// One directive line split into its kind, its parameters and the number
/// of trailing modifier tokens that were stripped off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    pub kind: &'a str,
    pub params: Tokens<'a>,
    pub modifiers: usize,
}

/// Split `line` on `#`. Trailing empty tokens are dropped, interior ones
/// kept; the result always has at least the kind token.
pub fn tokenize(line: &str) -> Tokens<'_> {
    let mut tokens: Tokens<'_> = line.split(SEPARATOR).collect();
    while tokens.len() > 1 && tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

impl<'a> Directive<'a> {
    /// Parse a directive whose trailing tokens may be `modifier`.
    ///
    /// The modifier is only recognised after the kind token, so a bare
    /// `NOT` line is a directive of kind `NOT`. Builders accept at most
    /// one modifier.
    pub fn parse(line: &'a str, modifier: &str) -> Self {
        let mut tokens = tokenize(line);
        let mut modifiers = 0;
        while tokens.len() > 1 && tokens.last() == Some(&modifier) {
            tokens.pop();
            modifiers += 1;
        }

        let kind = tokens.remove(0);
        Directive {
            kind,
            params: tokens,
            modifiers,
        }
    }

    #[inline]
    pub fn is_modified(&self) -> bool {
        self.modifiers > 0
    }
}

#[cfg(test)]
#[path = "directive_tests.rs"]
mod tests;
