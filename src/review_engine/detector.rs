//! Substring-based language guessing.
//!
//! Markers are searched in the raw text, comments and string literals
//! included.

use crate::core::types::{LanguageValidation, SourceLanguage};

fn contains_any(code: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| code.contains(needle))
}

fn is_javascript(code: &str) -> bool {
    code.contains("function") && contains_any(code, &["const", "let", "var"])
}

fn is_python(code: &str) -> bool {
    contains_any(code, &["def ", "import ", "print("])
}

fn is_java(code: &str) -> bool {
    contains_any(code, &["public class", "private ", "import java."])
}

fn is_cpp(code: &str) -> bool {
    contains_any(code, &["#include <", "namespace ", "std::"])
}

/// Guess the language of `code`.
///
/// Checked in priority order JavaScript, Python, Java, C++; anything that
/// matches none of them is reported as JavaScript.
pub fn detect_language(code: &str) -> SourceLanguage {
    let language = if is_javascript(code) {
        SourceLanguage::JavaScript
    } else if is_python(code) {
        SourceLanguage::Python
    } else if is_java(code) {
        SourceLanguage::Java
    } else if is_cpp(code) {
        SourceLanguage::Cpp
    } else {
        tracing::debug!("No language markers matched, defaulting to javascript");
        SourceLanguage::JavaScript
    };
    tracing::debug!("Detected language: {}", language);
    language
}

/// Compare the language the caller declared with the detected one.
pub fn validate_language(code: &str, selected: SourceLanguage) -> LanguageValidation {
    let detected = detect_language(code);
    LanguageValidation {
        is_valid: detected == selected,
        detected_language: detected,
        selected_language: selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_each_language() {
        assert_eq!(
            detect_language("function add(a, b) {\n  let sum = a + b;\n}"),
            SourceLanguage::JavaScript
        );
        assert_eq!(detect_language("def main():\n    pass"), SourceLanguage::Python);
        assert_eq!(
            detect_language("public class Main {\n}"),
            SourceLanguage::Java
        );
        assert_eq!(
            detect_language("#include <iostream>\nint main() {}"),
            SourceLanguage::Cpp
        );
    }

    #[test]
    fn test_unmatched_code_defaults_to_javascript() {
        assert_eq!(detect_language(""), SourceLanguage::JavaScript);
        assert_eq!(detect_language("SELECT * FROM users;"), SourceLanguage::JavaScript);
    }

    #[test]
    fn test_priority_order_wins_over_later_markers() {
        // Java source with an import looks like Python first.
        assert_eq!(
            detect_language("import java.util.List;\npublic class A {}"),
            SourceLanguage::Python
        );
        // C++ with a `private ` member is reported as Java.
        assert_eq!(
            detect_language("class A {\n  private std::string name;\n};"),
            SourceLanguage::Java
        );
    }

    #[test]
    fn test_markers_inside_comments_count() {
        assert_eq!(
            detect_language("// we used to def things here\nx = 1"),
            SourceLanguage::Python
        );
    }

    #[test]
    fn test_validate_language_matches_detector() {
        let code = "def greet(name):\n    print(name)";
        let ok = validate_language(code, SourceLanguage::Python);
        assert!(ok.is_valid);
        assert_eq!(ok.detected_language, SourceLanguage::Python);

        let mismatch = validate_language(code, SourceLanguage::Cpp);
        assert!(!mismatch.is_valid);
        assert_eq!(mismatch.detected_language, SourceLanguage::Python);
        assert_eq!(mismatch.selected_language, SourceLanguage::Cpp);
    }
}
