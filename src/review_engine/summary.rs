pub const SEVERAL_ISSUES: &str =
    "Several issues were found that should be addressed to improve code quality.";
pub const MOSTLY_SOLID: &str = "Code is mostly solid with a few minor improvements suggested.";
pub const CLEAN: &str = "Code looks clean and follows good practices!";

/// One sentence on overall code health.
pub fn summarize(issue_count: usize) -> &'static str {
    match issue_count {
        0 => CLEAN,
        1..=3 => MOSTLY_SOLID,
        _ => SEVERAL_ISSUES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(summarize(0), CLEAN);
        assert_eq!(summarize(1), MOSTLY_SOLID);
        assert_eq!(summarize(3), MOSTLY_SOLID);
        assert_eq!(summarize(4), SEVERAL_ISSUES);
        assert_eq!(summarize(100), SEVERAL_ISSUES);
    }
}
