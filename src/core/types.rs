use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the reviewer knows how to scan.
///
/// Detection never yields anything outside this set: code that matches no
/// marker is treated as JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    JavaScript,
    Python,
    Java,
    Cpp,
}

impl SourceLanguage {
    pub const ALL: [SourceLanguage; 4] = [
        SourceLanguage::JavaScript,
        SourceLanguage::Python,
        SourceLanguage::Java,
        SourceLanguage::Cpp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::JavaScript => "javascript",
            SourceLanguage::Python => "python",
            SourceLanguage::Java => "java",
            SourceLanguage::Cpp => "cpp",
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "javascript" => Ok(SourceLanguage::JavaScript),
            "python" => Ok(SourceLanguage::Python),
            "java" => Ok(SourceLanguage::Java),
            "cpp" => Ok(SourceLanguage::Cpp),
            other => Err(other.to_string()),
        }
    }
}

/// Coarse impact ranking attached to an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of problem an issue represents.
///
/// `Performance` and `Duplication` are part of the wire vocabulary but no
/// scanner rule emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Bug,
    Security,
    Performance,
    Duplication,
    CodeSmell,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bug => "bug",
            Category::Security => "security",
            Category::Performance => "performance",
            Category::Duplication => "duplication",
            Category::CodeSmell => "code-smell",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding emitted by a scanner rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// 1-based line number in the submitted text
    pub line: usize,
    pub message: String,
    pub severity: Severity,
    pub category: Category,
}

/// Category counters plus the mock coverage figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub bugs: usize,
    pub vulnerabilities: usize,
    pub code_smells: usize,
    pub duplications: usize,
    /// Random percentage in `[0, 100)`, unrelated to the issues
    pub coverage: u8,
}

/// An issue as it goes out to callers, decorated for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(flatten)]
    pub issue: Issue,
    pub formatted_message: String,
    pub category_label: String,
    pub suggested_fix: String,
}

/// Tracking entry for a suggested improvement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    pub message: String,
    pub applied: bool,
}

/// Aggregate output of one review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub detected_language: SourceLanguage,
    pub suggestions: Vec<Suggestion>,
    pub summary: String,
    pub metrics: Metrics,
    pub original_code: String,
    pub recommended_fix: String,
    pub improvements: Vec<Improvement>,
}

impl ReviewResult {
    /// The bare issues in rule evaluation order.
    pub fn issues(&self) -> Vec<Issue> {
        self.suggestions.iter().map(|s| s.issue.clone()).collect()
    }
}

/// Outcome of comparing a declared language with the detected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageValidation {
    pub is_valid: bool,
    pub detected_language: SourceLanguage,
    pub selected_language: SourceLanguage,
}

/// Input to a review.
///
/// `code` is kept as raw JSON so a body with a non-string value still
/// reaches the handler instead of failing extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub language: Option<String>,
}
