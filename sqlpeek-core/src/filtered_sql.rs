/// Stands in for every `?` found inside a string literal.
///
/// Private use code point, it is not expected in SQL text.
pub const MASK: char = '\u{E000}';

/// SQL text where the question marks that are not bind placeholders are
/// masked, so that splitting on `?` yields the text between placeholders.
///
/// Quotes are tracked by plain parity: every `'` toggles the literal state.
/// An escaped quote (`''`) toggles twice and therefore works, but an unbalanced
/// quote masks everything up to the end of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredSql {
    masked: String,
    placeholders: usize,
}

impl FilteredSql {
    pub fn new(sql: &str) -> Self {
        let mut masked = String::with_capacity(sql.len());
        let mut placeholders = 0;
        let mut in_literal = false;
        for c in sql.chars() {
            match c {
                '\'' => {
                    in_literal = !in_literal;
                    masked.push(c);
                }
                '?' if in_literal => masked.push(MASK),
                '?' => {
                    placeholders += 1;
                    masked.push(c);
                }
                _ => masked.push(c),
            }
        }
        Self {
            masked,
            placeholders,
        }
    }

    pub fn masked(&self) -> &str {
        &self.masked
    }

    /// Number of bind placeholders.
    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    /// Text around the placeholders, always `placeholder_count() + 1` items,
    /// some of which may be empty.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.masked.split('?')
    }

    /// Turn every masked question mark back into `?`.
    pub fn unmask(text: &str) -> String {
        text.replace(MASK, "?")
    }
}
