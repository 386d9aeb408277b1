use crate::core::types::{Category, Issue};

/// Apply the line-local substitutions suggested by `issues`.
///
/// Only two rewrites exist: `var ` becomes `const ` on a code-smell line and
/// ` == ` becomes ` === ` on a bug line. Each issue touches at most its own
/// line, and only the first occurrence on it. Issues pointing past the end
/// of the text or at an empty line are skipped.
pub fn recommend_fix(code: &str, issues: &[Issue]) -> String {
    let mut lines: Vec<String> = code.split('\n').map(str::to_string).collect();

    for issue in issues {
        let Some(line) = issue
            .line
            .checked_sub(1)
            .and_then(|index| lines.get_mut(index))
        else {
            continue;
        };
        if line.is_empty() {
            continue;
        }
        match issue.category {
            Category::CodeSmell if line.contains("var ") => {
                *line = line.replacen("var ", "const ", 1);
            }
            Category::Bug if line.contains(" == ") => {
                *line = line.replacen(" == ", " === ", 1);
            }
            _ => {}
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Severity;

    fn issue(line: usize, category: Category) -> Issue {
        Issue {
            line,
            message: "m".to_string(),
            severity: Severity::Medium,
            category,
        }
    }

    #[test]
    fn test_rewrites_var_and_loose_equality() {
        let code = "var x = 1;\nconsole.log(x);\nif (x == 1) { }";
        let issues = vec![
            issue(1, Category::CodeSmell),
            issue(2, Category::CodeSmell),
            issue(3, Category::Bug),
        ];
        assert_eq!(
            recommend_fix(code, &issues),
            "const x = 1;\nconsole.log(x);\nif (x === 1) { }"
        );
    }

    #[test]
    fn test_only_first_occurrence_on_the_line() {
        let code = "var a = 1; var b = 2;";
        assert_eq!(
            recommend_fix(code, &[issue(1, Category::CodeSmell)]),
            "const a = 1; var b = 2;"
        );
    }

    #[test]
    fn test_category_gates_the_rewrite() {
        let code = "var a = b == c;";
        assert_eq!(recommend_fix(code, &[issue(1, Category::Security)]), code);
        assert_eq!(
            recommend_fix(code, &[issue(1, Category::Bug)]),
            "var a = b === c;"
        );
    }

    #[test]
    fn test_out_of_range_lines_are_ignored() {
        let code = "var a = 1;";
        assert_eq!(recommend_fix(code, &[issue(0, Category::CodeSmell)]), code);
        assert_eq!(recommend_fix(code, &[issue(5, Category::CodeSmell)]), code);
    }

    #[test]
    fn test_preserves_trailing_newline() {
        let code = "var a = 1;\n";
        assert_eq!(
            recommend_fix(code, &[issue(1, Category::CodeSmell)]),
            "const a = 1;\n"
        );
    }

    #[test]
    fn test_reapplying_is_a_no_op() {
        let code = "var x = 1;\nif (x == 1) { }";
        let issues = vec![issue(1, Category::CodeSmell), issue(2, Category::Bug)];
        let once = recommend_fix(code, &issues);
        assert_eq!(recommend_fix(&once, &issues), once);
    }
}
