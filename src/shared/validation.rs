use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One or more consecutive whitespace characters
    /// - "My  Song" has a single run between the words
    pub static ref WHITESPACE_RUN_REGEX: Regex = Regex::new(r"\s+").unwrap();

    /// Matches any value containing at least one non-whitespace character
    /// - Valid: "Test Song", " x "
    /// - Invalid: "", "   "
    pub static ref NON_BLANK_REGEX: Regex = Regex::new(r"\S").unwrap();
}

/// Replace every whitespace run with a single underscore, as used in asset file names
pub fn underscore_whitespace(value: &str) -> String {
    WHITESPACE_RUN_REGEX.replace_all(value, "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore_whitespace() {
        assert_eq!(underscore_whitespace("My Song"), "My_Song");
        assert_eq!(underscore_whitespace("The   Band"), "The_Band");
        assert_eq!(underscore_whitespace("tab\there\nnewline"), "tab_here_newline");
        assert_eq!(underscore_whitespace(" leading"), "_leading");
        assert_eq!(underscore_whitespace("NoSpaces"), "NoSpaces");
    }

    #[test]
    fn test_non_blank_regex() {
        assert!(NON_BLANK_REGEX.is_match("Test Song"));
        assert!(NON_BLANK_REGEX.is_match(" x "));
        assert!(!NON_BLANK_REGEX.is_match(""));
        assert!(!NON_BLANK_REGEX.is_match(" \t\n"));
    }
}
