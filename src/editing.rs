//! Caret arithmetic over the formula text.
//!
//! Every operation takes the current text and caret and returns the new text and caret, positions
//! are counted in characters, the same unit egui's text cursors use.

/// A selection within the formula text, in characters, with `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caret {
    pub start: usize,
    pub end: usize,
}

impl Caret {
    /// A caret with nothing selected.
    pub fn collapsed(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// A selection between two positions, in either order.
    pub fn between(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A caret at the end of `text`.
    pub fn at_end_of(text: &str) -> Self {
        Self::collapsed(text.chars().count())
    }

    fn clamped_to(self, text: &str) -> Self {
        let length = text.chars().count();
        Self::between(self.start.min(length), self.end.min(length))
    }
}

/// The result of an edit: the new text and where the caret ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub caret: Caret,
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')')
}

/// byte offset of the character at `char_index`, or the text length when past the end.
fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// The word being typed just before `caret`, i.e. everything after the last operator, parenthesis
/// or whitespace. Empty when the caret follows a separator or sits at the start.
pub fn last_word(text: &str, caret: usize) -> &str {
    let before = &text[..byte_offset(text, caret)];
    before.rsplit(is_word_separator).next().unwrap_or("")
}

/// Replace the selection with `token` and collapse the caret right after it.
pub fn insert_token(text: &str, caret: Caret, token: &str) -> Edit {
    let caret = caret.clamped_to(text);
    let start = byte_offset(text, caret.start);
    let end = byte_offset(text, caret.end);

    let mut result = String::with_capacity(text.len() - (end - start) + token.len());
    result.push_str(&text[..start]);
    result.push_str(token);
    result.push_str(&text[end..]);

    Edit {
        text: result,
        caret: Caret::collapsed(caret.start + token.chars().count()),
    }
}

/// Replace the word being typed before `caret` with `suggestion`.
///
/// Text from `caret` onwards is kept as is, the caret collapses after the suggestion.
pub fn accept_suggestion(text: &str, caret: usize, suggestion: &str) -> Edit {
    let split = byte_offset(text, caret);
    let (before, after) = text.split_at(split);
    let word = last_word(before, usize::MAX);

    let mut replaced = String::with_capacity(text.len() - word.len() + suggestion.len());
    replaced.push_str(&before[..before.len() - word.len()]);
    replaced.push_str(suggestion);
    let caret = Caret::at_end_of(&replaced);
    replaced.push_str(after);

    Edit {
        text: replaced,
        caret,
    }
}

/// Append `values` joined with `" + "`, itself joined to any existing text with `" + "`.
///
/// The separator is added even when `values` is empty, leaving a trailing `" + "`.
pub fn append_terms<S: AsRef<str>>(text: &str, values: &[S]) -> Edit {
    let joined = values
        .iter()
        .map(|value| value.as_ref())
        .collect::<Vec<&str>>()
        .join(" + ");

    let mut result = text.to_string();
    if !result.is_empty() {
        result.push_str(" + ");
    }
    result.push_str(&joined);

    let caret = Caret::at_end_of(&result);
    Edit {
        text: result,
        caret,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 0, "")]
    #[case("SUM(col", 7, "col")]
    #[case("SUM(col", 5, "c")]
    #[case("a + b", 5, "b")]
    #[case("a + ", 4, "")]
    #[case("a*b/c-d", 7, "d")]
    #[case("price\tqty", 9, "qty")]
    #[case("(x)", 3, "")]
    #[case("word", 100, "word")]
    #[case("größe", 3, "grö")]
    fn last_word_before_caret(#[case] text: &str, #[case] caret: usize, #[case] expected: &str) {
        assert_eq!(last_word(text, caret), expected);
    }

    #[rstest]
    #[case("", Caret::collapsed(0), "+", "+", 1)]
    #[case("ab", Caret::collapsed(1), " * ", "a * b", 4)]
    #[case("a + b", Caret::between(2, 3), "-", "a - b", 3)]
    #[case("a + b", Caret::between(3, 2), "-", "a - b", 3)]
    #[case("abc", Caret::collapsed(3), "sqrt(", "abcsqrt(", 8)]
    #[case("abc", Caret::between(0, 3), "x", "x", 1)]
    #[case("abc", Caret::collapsed(42), ")", "abc)", 4)]
    #[case("ä", Caret::collapsed(1), "ö", "äö", 2)]
    fn insert_token_replaces_selection(
        #[case] text: &str,
        #[case] caret: Caret,
        #[case] token: &str,
        #[case] expected_text: &str,
        #[case] expected_caret: usize,
    ) {
        let edit = insert_token(text, caret, token);

        assert_eq!(edit.text, expected_text);
        assert_eq!(edit.caret, Caret::collapsed(expected_caret));
    }

    #[rstest]
    #[case("SUM(col", 7, "col1", "SUM(col1", 8)]
    #[case("SUM(col)", 7, "col2", "SUM(col2)", 8)]
    #[case("co + b", 2, "col1", "col1 + b", 4)]
    #[case("a + ", 4, "col1", "a + col1", 8)]
    #[case("", 0, "SUM", "SUM", 3)]
    fn accept_suggestion_replaces_only_the_last_word(
        #[case] text: &str,
        #[case] caret: usize,
        #[case] suggestion: &str,
        #[case] expected_text: &str,
        #[case] expected_caret: usize,
    ) {
        let edit = accept_suggestion(text, caret, suggestion);

        assert_eq!(edit.text, expected_text);
        assert_eq!(edit.caret, Caret::collapsed(expected_caret));
    }

    #[rstest]
    #[case("", &["a", "b"], "a + b")]
    #[case("X", &["a", "b"], "X + a + b")]
    #[case("X", &["a"], "X + a")]
    #[case("X", &[], "X + ")]
    #[case("", &[], "")]
    fn append_terms_joins_with_plus(
        #[case] text: &str,
        #[case] values: &[&str],
        #[case] expected: &str,
    ) {
        let edit = append_terms(text, values);

        assert_eq!(edit.text, expected);
        assert_eq!(edit.caret, Caret::at_end_of(expected));
    }
}
