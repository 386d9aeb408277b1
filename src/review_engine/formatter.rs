//! Display helpers for issues.
//!
//! Nothing here feeds back into an issue's category or severity.

use crate::core::types::{Category, Improvement, Issue, Severity, Suggestion};

const ERROR_GLYPH: &str = "❌";

fn severity_glyph(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "🔴",
        Severity::Medium => "🟡",
        Severity::Low => "🟢",
    }
}

fn category_glyph(category: Category) -> &'static str {
    match category {
        Category::Bug => "🐛",
        Category::Security => "🔒",
        Category::Performance => "⚡",
        Category::CodeSmell => "👃",
        Category::Duplication => "🔄",
    }
}

/// `"<category> <severity> ❌ <message>"`
pub fn format_issue_message(issue: &Issue) -> String {
    let mut formatted = format!("{} {}", ERROR_GLYPH, issue.message);
    formatted = format!("{} {}", severity_glyph(issue.severity), formatted);
    formatted = format!("{} {}", category_glyph(issue.category), formatted);
    formatted
}

pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Bug => "Bug",
        Category::Security => "Security",
        Category::Performance => "Performance",
        Category::Duplication => "Duplication",
        Category::CodeSmell => "Code Smell",
    }
}

/// Example fix shown next to an issue, picked by category and message.
pub fn suggested_fix_snippet(issue: &Issue) -> &'static str {
    let message = issue.message.as_str();
    match issue.category {
        Category::Bug if message.contains("===") => {
            "// Replace loose equality with strict equality\n// Bad\nif (x == y) { ... }\n\n// Good\nif (x === y) { ... }"
        }
        Category::Bug if message.contains("error handling") => {
            "// Add proper error handling\n// Bad\ntry {\n  riskyOperation();\n}\n\n// Good\ntry {\n  riskyOperation();\n} catch (error) {\n  console.error('Operation failed:', error);\n}"
        }
        Category::Bug => {
            "// Add null checks and error handling\n// Example fix\ntry {\n  // Your fixed code here\n} catch (error) {\n  console.error('Error occurred:', error);\n}"
        }
        Category::Security if message.contains("XSS") => {
            "// Use safer alternatives\n// Bad\nelement.innerHTML = userInput;\n\n// Good\nelement.textContent = userInput;\n// or\nconst sanitizedInput = DOMPurify.sanitize(userInput);\nelement.innerHTML = sanitizedInput;"
        }
        Category::Security if message.contains("Command Injection") => {
            "# Vulnerable code with command injection\nimport os\n\ndef delete_file_vulnerable():\n    filename = input(\"Enter the filename to delete: \")\n    os.system(f\"rm {filename}\")  # VULNERABLE!\n\n# Safe alternative\nimport os\n\ndef delete_file_safe():\n    filename = input(\"Enter the filename to delete: \")\n    if '/' not in filename and '\\\\' not in filename:\n        try:\n            os.remove(filename)\n        except Exception as e:\n            print(f\"Error: {e}\")\n    else:\n        print(\"Invalid filename\")"
        }
        Category::Security => {
            "// Use proper input validation and sanitization\n// Example fix\nconst sanitizedInput = sanitizeInput(userInput);\n// then use sanitizedInput"
        }
        Category::Performance => {
            "// Optimize for better performance\n// Example fix\n// Consider caching results or using memoization"
        }
        Category::Duplication => {
            "// Extract duplicated code into a reusable function\n// Example fix\nfunction extractedFunction(params) {\n  // Shared functionality\n}"
        }
        Category::CodeSmell if message.contains("var") => {
            "// Replace var with const/let\n// Bad\nvar x = 5;\n\n// Good\nconst x = 5; // Or let x = 5; if reassignment is needed"
        }
        Category::CodeSmell if message.contains("console.log") => {
            "// Remove console.log or use proper logging\n// Bad\nconsole.log('Debug info');\n\n// Good\nlogger.debug('Debug info');"
        }
        Category::CodeSmell => {
            "// Improve code readability and maintainability\n// Example fix\n// Rename variables for clarity\n// Break down complex functions\n// Add appropriate comments"
        }
    }
}

pub fn to_suggestion(issue: &Issue) -> Suggestion {
    Suggestion {
        issue: issue.clone(),
        formatted_message: format_issue_message(issue),
        category_label: category_label(issue.category).to_string(),
        suggested_fix: suggested_fix_snippet(issue).to_string(),
    }
}

/// One unapplied improvement per issue.
pub fn improvements(issues: &[Issue]) -> Vec<Improvement> {
    issues
        .iter()
        .map(|issue| Improvement {
            message: issue.message.clone(),
            applied: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(message: &str, severity: Severity, category: Category) -> Issue {
        Issue {
            line: 1,
            message: message.to_string(),
            severity,
            category,
        }
    }

    #[test]
    fn test_glyph_order_is_category_severity_error() {
        let bug = issue("Boom", Severity::High, Category::Bug);
        assert_eq!(format_issue_message(&bug), "🐛 🔴 ❌ Boom");

        let smell = issue("Smelly", Severity::Medium, Category::CodeSmell);
        assert_eq!(format_issue_message(&smell), "👃 🟡 ❌ Smelly");

        let sec = issue("Leak", Severity::Low, Category::Security);
        assert_eq!(format_issue_message(&sec), "🔒 🟢 ❌ Leak");

        let perf = issue("Slow", Severity::Low, Category::Performance);
        assert_eq!(format_issue_message(&perf), "⚡ 🟢 ❌ Slow");

        let dup = issue("Again", Severity::High, Category::Duplication);
        assert_eq!(format_issue_message(&dup), "🔄 🔴 ❌ Again");
    }

    #[test]
    fn test_formatting_leaves_issue_untouched() {
        let original = issue("Boom", Severity::High, Category::Bug);
        let suggestion = to_suggestion(&original);
        assert_eq!(suggestion.issue, original);
        assert_eq!(suggestion.category_label, "Bug");
    }

    #[test]
    fn test_fix_snippet_lookup() {
        let eq = issue(
            "Use strict equality (===) instead of loose equality (==)",
            Severity::Medium,
            Category::Bug,
        );
        assert!(suggested_fix_snippet(&eq).contains("x === y"));

        let xss = issue("innerHTML leads to XSS", Severity::High, Category::Security);
        assert!(suggested_fix_snippet(&xss).contains("textContent"));

        let injection = issue("Command Injection Vulnerability", Severity::High, Category::Security);
        assert!(suggested_fix_snippet(&injection).contains("os.remove"));

        let console = issue(
            "Remove console.log statements in production code",
            Severity::Low,
            Category::CodeSmell,
        );
        assert!(suggested_fix_snippet(&console).contains("logger.debug"));

        let other = issue("Check for unused imports", Severity::Low, Category::CodeSmell);
        assert!(suggested_fix_snippet(&other).contains("readability"));
    }

    #[test]
    fn test_improvements_start_unapplied() {
        let issues = vec![issue("a", Severity::Low, Category::Bug)];
        assert_eq!(
            improvements(&issues),
            vec![Improvement {
                message: "a".to_string(),
                applied: false
            }]
        );
    }
}
