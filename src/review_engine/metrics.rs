use crate::core::types::{Category, Issue, Metrics};

/// Source of the mock coverage percentage.
pub trait CoverageSource: Send + Sync {
    /// A value in `[0, 100)`.
    fn sample(&self) -> u8;
}

/// Draws coverage from the operating system's random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCoverage;

impl CoverageSource for RandomCoverage {
    fn sample(&self) -> u8 {
        let mut buf = [0u8; 4];
        if let Err(e) = getrandom::getrandom(&mut buf) {
            tracing::warn!("Random source unavailable, reporting zero coverage: {}", e);
            return 0;
        }
        (u32::from_le_bytes(buf) % 100) as u8
    }
}

/// Always reports the same coverage.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCoverage(pub u8);

impl CoverageSource for FixedCoverage {
    fn sample(&self) -> u8 {
        self.0 % 100
    }
}

/// Count issues per category.
///
/// Performance findings are not tallied; no rule produces them (nor
/// duplication findings) today, so `duplications` stays at zero.
pub fn aggregate(issues: &[Issue], coverage: u8) -> Metrics {
    let count = |category: Category| issues.iter().filter(|i| i.category == category).count();
    Metrics {
        bugs: count(Category::Bug),
        vulnerabilities: count(Category::Security),
        code_smells: count(Category::CodeSmell),
        duplications: count(Category::Duplication),
        coverage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Severity;

    fn issue(category: Category) -> Issue {
        Issue {
            line: 1,
            message: "m".to_string(),
            severity: Severity::Low,
            category,
        }
    }

    #[test]
    fn test_aggregate_counts_by_category() {
        let issues = vec![
            issue(Category::Bug),
            issue(Category::Bug),
            issue(Category::Security),
            issue(Category::CodeSmell),
            issue(Category::Duplication),
        ];
        let metrics = aggregate(&issues, 42);
        assert_eq!(
            metrics,
            Metrics {
                bugs: 2,
                vulnerabilities: 1,
                code_smells: 1,
                duplications: 1,
                coverage: 42,
            }
        );
    }

    #[test]
    fn test_performance_is_not_counted() {
        let issues = vec![issue(Category::Performance), issue(Category::Bug)];
        let m = aggregate(&issues, 0);
        assert_eq!(m.bugs + m.vulnerabilities + m.code_smells + m.duplications, 1);
        assert!(m.bugs + m.vulnerabilities + m.code_smells + m.duplications <= issues.len());
    }

    #[test]
    fn test_random_coverage_stays_below_one_hundred() {
        let source = RandomCoverage;
        for _ in 0..200 {
            assert!(source.sample() < 100);
        }
    }

    #[test]
    fn test_fixed_coverage() {
        assert_eq!(FixedCoverage(73).sample(), 73);
        assert_eq!(FixedCoverage(150).sample(), 50);
    }
}
