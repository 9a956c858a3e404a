/// The column and function names offered as autocomplete suggestions.
///
/// Both lists keep the order and duplicates they were configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    columns: Vec<String>,
    functions: Vec<String>,
}

impl Vocabulary {
    pub fn new(columns: Vec<String>, functions: Vec<String>) -> Self {
        Self { columns, functions }
    }

    /// Build a vocabulary from two comma separated lists, `None` meaning the list is absent.
    pub fn from_comma_lists(columns: Option<&str>, functions: Option<&str>) -> Self {
        Self::new(split_comma_list(columns), split_comma_list(functions))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    /// Every entry, columns first, that starts with `prefix`.
    ///
    /// Matching is case-sensitive and entries present in both lists are returned twice.
    pub fn matches(&self, prefix: &str) -> Vec<String> {
        self.columns
            .iter()
            .chain(self.functions.iter())
            .filter(|entry| entry.starts_with(prefix))
            .cloned()
            .collect()
    }
}

// an empty string counts as absent, otherwise segments are kept exactly as given, empty ones
// included.
fn split_comma_list(value: Option<&str>) -> Vec<String> {
    match value {
        None | Some("") => vec![],
        Some(value) => value.split(',').map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vocabulary() -> Vocabulary {
        Vocabulary::from_comma_lists(Some("col1,col2,SUMMARY"), Some("SUM,AVG,col1"))
    }

    #[rstest]
    #[case("col", vec!["col1", "col2", "col1"])]
    #[case("SUM", vec!["SUMMARY", "SUM"])]
    #[case("sum", vec![])]
    #[case("AVG", vec!["AVG"])]
    #[case("x", vec![])]
    fn matches_columns_then_functions(#[case] prefix: &str, #[case] expected: Vec<&str>) {
        assert_eq!(vocabulary().matches(prefix), expected);
    }

    #[test]
    fn empty_prefix_matches_everything_in_order() {
        let vocabulary = vocabulary();

        assert_eq!(
            vocabulary.matches(""),
            vec!["col1", "col2", "SUMMARY", "SUM", "AVG", "col1"]
        );
    }

    #[rstest]
    #[case(None, vec![])]
    #[case(Some(""), vec![])]
    #[case(Some("a"), vec!["a"])]
    #[case(Some("a,b,a"), vec!["a", "b", "a"])]
    #[case(Some("a, b,,"), vec!["a", " b", "", ""])]
    fn comma_lists_are_split_verbatim(#[case] value: Option<&str>, #[case] expected: Vec<&str>) {
        let vocabulary = Vocabulary::from_comma_lists(value, None);

        assert_eq!(vocabulary.columns(), expected.as_slice());
        assert!(vocabulary.functions().is_empty());
    }
}
