//! 代码评审规则集合
//!
//! 每个扫描器是一组固定顺序的规则。规则检查整段文本或逐行检查，
//! 最多报告一个问题，位置为第一处匹配的行。匹配只做子串查找，
//! 不理解作用域、词法单元或字符串字面量。

use crate::core::types::{Category, Issue, Severity, SourceLanguage};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

/// 要运行的规则集
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScannerKind {
    JavaScript,
    Python,
    Java,
    Cpp,
    Generic,
}

impl From<SourceLanguage> for ScannerKind {
    fn from(language: SourceLanguage) -> Self {
        match language {
            SourceLanguage::JavaScript => ScannerKind::JavaScript,
            SourceLanguage::Python => ScannerKind::Python,
            SourceLanguage::Java => ScannerKind::Java,
            SourceLanguage::Cpp => ScannerKind::Cpp,
        }
    }
}

impl fmt::Display for ScannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScannerKind::JavaScript => "javascript",
            ScannerKind::Python => "python",
            ScannerKind::Java => "java",
            ScannerKind::Cpp => "cpp",
            ScannerKind::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// 待评审文本，按行切分一次供所有规则使用
pub struct ScanContext<'a> {
    pub code: &'a str,
    pub lines: Vec<&'a str>,
}

impl<'a> ScanContext<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            code,
            lines: code.split('\n').collect(),
        }
    }

    /// 第一个满足 `pred` 的行号（从 1 开始）
    pub fn first_line(&self, pred: impl Fn(&str) -> bool) -> Option<usize> {
        self.lines.iter().position(|&line| pred(line)).map(|i| i + 1)
    }
}

pub trait Rule: Send + Sync {
    fn name(&self) -> &str;
    fn category(&self) -> Category;
    fn severity(&self) -> Severity;
    fn message(&self) -> &str;

    /// 要报告的行号；规则未触发时返回 `None`
    fn find_line(&self, context: &ScanContext) -> Option<usize>;

    fn apply(&self, context: &ScanContext) -> Option<Issue> {
        let line = self.find_line(context)?;
        tracing::debug!("Rule '{}' fired at line {}", self.name(), line);
        Some(Issue {
            line,
            message: self.message().to_string(),
            severity: self.severity(),
            category: self.category(),
        })
    }
}

/// 逐行规则：在第一处匹配的行上触发
pub struct LinePattern {
    pub name: &'static str,
    pub message: &'static str,
    pub severity: Severity,
    pub category: Category,
    pub matches: fn(&str) -> bool,
}

impl Rule for LinePattern {
    fn name(&self) -> &str {
        self.name
    }

    fn category(&self) -> Category {
        self.category
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn message(&self) -> &str {
        self.message
    }

    fn find_line(&self, context: &ScanContext) -> Option<usize> {
        context.first_line(self.matches)
    }
}

/// 整文件规则：条件成立时触发，报告在第一个匹配 `locate` 的行
pub struct FilePattern {
    pub name: &'static str,
    pub message: &'static str,
    pub severity: Severity,
    pub category: Category,
    pub applies: fn(&str) -> bool,
    pub locate: fn(&str) -> bool,
}

impl Rule for FilePattern {
    fn name(&self) -> &str {
        self.name
    }

    fn category(&self) -> Category {
        self.category
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn message(&self) -> &str {
        self.message
    }

    fn find_line(&self, context: &ScanContext) -> Option<usize> {
        if !(self.applies)(context.code) {
            return None;
        }
        Some(context.first_line(self.locate).unwrap_or(1))
    }
}

/// 文件超过 `max_lines` 行时在第 1 行报告
pub struct LongFile {
    pub max_lines: usize,
    pub severity: Severity,
}

impl Rule for LongFile {
    fn name(&self) -> &str {
        "long-function"
    }

    fn category(&self) -> Category {
        Category::CodeSmell
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn message(&self) -> &str {
        "Function is too long, consider breaking it down into smaller functions"
    }

    fn find_line(&self, context: &ScanContext) -> Option<usize> {
        (context.lines.len() > self.max_lines).then_some(1)
    }
}

lazy_static! {
    static ref MAGIC_NUMBER_REGEX: Regex = Regex::new(r"(?-u:\b)[0-9]{3,}(?-u:\b)").unwrap();
}

/// 规则工厂，负责为每种扫描器创建规则列表
pub struct RuleFactory;

impl RuleFactory {
    pub fn create_language_rules(kind: ScannerKind) -> Vec<Box<dyn Rule>> {
        match kind {
            ScannerKind::JavaScript => Self::create_javascript_rules(),
            ScannerKind::Python => Self::create_python_rules(),
            ScannerKind::Java => Self::create_java_rules(),
            ScannerKind::Cpp => Self::create_cpp_rules(),
            ScannerKind::Generic => Self::create_generic_rules(),
        }
    }

    fn create_javascript_rules() -> Vec<Box<dyn Rule>> {
        vec![
            Box::new(LinePattern {
                name: "no-var",
                message: "Consider using 'const' or 'let' instead of 'var' for better scoping",
                severity: Severity::Medium,
                category: Category::CodeSmell,
                matches: |line| line.contains("var "),
            }),
            Box::new(LinePattern {
                name: "no-console",
                message: "Remove console.log statements in production code",
                severity: Severity::Low,
                category: Category::CodeSmell,
                matches: |line| line.contains("console.log"),
            }),
            Box::new(LinePattern {
                name: "strict-equality",
                message: "Use strict equality (===) instead of loose equality (==)",
                severity: Severity::Medium,
                category: Category::Bug,
                matches: |line| line.contains(" == ") && !line.contains(" === "),
            }),
            Box::new(FilePattern {
                name: "try-without-catch",
                message: "Missing error handling for try block",
                severity: Severity::High,
                category: Category::Bug,
                applies: |code| code.contains("try") && !code.contains("catch"),
                locate: |line| line.contains("try"),
            }),
            Box::new(FilePattern {
                name: "eval-or-inner-html",
                message: "Avoid using eval() or directly setting innerHTML as it can lead to XSS vulnerabilities",
                severity: Severity::High,
                category: Category::Security,
                applies: |code| code.contains("eval(") || code.contains("innerHTML = "),
                locate: |line| line.contains("eval(") || line.contains("innerHTML = "),
            }),
        ]
    }

    fn create_python_rules() -> Vec<Box<dyn Rule>> {
        vec![
            Box::new(LinePattern {
                name: "bare-except",
                message: "Avoid bare except clauses, specify the exception type",
                severity: Severity::Medium,
                category: Category::Bug,
                matches: |line| line.contains("except:"),
            }),
            Box::new(LinePattern {
                name: "mutable-default-argument",
                message: "Avoid mutable default arguments as they can lead to unexpected behavior",
                severity: Severity::High,
                category: Category::Bug,
                matches: |line| {
                    line.contains("def ") && (line.contains("=[]") || line.contains("={}"))
                },
            }),
            Box::new(LinePattern {
                name: "command-injection",
                message: "Command Injection Vulnerability: User input is directly used in shell commands. Use os.remove() for file operations or subprocess with shell=False and proper argument lists instead.",
                severity: Severity::High,
                category: Category::Security,
                matches: |line| {
                    (line.contains("os.system(") && line.contains("f\""))
                        || (line.contains("subprocess.")
                            && line.contains("shell=True")
                            && (line.contains("f\"")
                                || line.contains("format")
                                || line.contains('+')))
                },
            }),
            // Flags the first import whether or not it is used.
            Box::new(LinePattern {
                name: "unused-import",
                message: "Check for unused imports",
                severity: Severity::Low,
                category: Category::CodeSmell,
                matches: |line| line.starts_with("import ") || line.starts_with("from "),
            }),
        ]
    }

    fn create_java_rules() -> Vec<Box<dyn Rule>> {
        vec![
            Box::new(LinePattern {
                name: "raw-type",
                message: "Use parameterized types instead of raw types",
                severity: Severity::Medium,
                category: Category::CodeSmell,
                matches: |line| {
                    line.contains("List ") || line.contains("Map ") || line.contains("Set ")
                },
            }),
            Box::new(LinePattern {
                name: "system-out",
                message: "Consider using a logging framework instead of System.out.println",
                severity: Severity::Low,
                category: Category::CodeSmell,
                matches: |line| line.contains("System.out.println"),
            }),
            Box::new(LinePattern {
                name: "null-dereference",
                message: "Potential NullPointerException, consider adding null checks",
                severity: Severity::High,
                category: Category::Bug,
                matches: |line| {
                    line.contains('.')
                        && !line.contains("null")
                        && !line.contains("if")
                        && !line.contains("assert")
                },
            }),
        ]
    }

    fn create_cpp_rules() -> Vec<Box<dyn Rule>> {
        vec![
            Box::new(LinePattern {
                name: "using-namespace-std",
                message: "Avoid 'using namespace std;' in header files",
                severity: Severity::Medium,
                category: Category::CodeSmell,
                matches: |line| line.contains("using namespace std;"),
            }),
            Box::new(LinePattern {
                name: "raw-pointer",
                message: "Consider using smart pointers instead of raw pointers",
                severity: Severity::High,
                category: Category::Bug,
                matches: |line| {
                    line.contains('*') && !line.contains("new") && !line.contains("delete")
                },
            }),
            Box::new(FilePattern {
                name: "memory-leak",
                message: "Potential memory leak, ensure proper cleanup with delete or use smart pointers",
                severity: Severity::High,
                category: Category::Bug,
                applies: |code| code.contains("new") && !code.contains("delete"),
                locate: |line| line.contains("new"),
            }),
        ]
    }

    fn create_generic_rules() -> Vec<Box<dyn Rule>> {
        vec![
            Box::new(LinePattern {
                name: "todo-comment",
                message: "Address TODO comment before finalizing code",
                severity: Severity::Low,
                category: Category::CodeSmell,
                matches: |line| line.to_lowercase().contains("todo"),
            }),
            Box::new(LongFile {
                max_lines: 30,
                severity: Severity::Medium,
            }),
            Box::new(LinePattern {
                name: "magic-number",
                message: "Avoid magic numbers, use named constants instead",
                severity: Severity::Low,
                category: Category::CodeSmell,
                matches: |line| MAGIC_NUMBER_REGEX.is_match(line),
            }),
        ]
    }
}

/// 按顺序对 `code` 运行 `kind` 的全部规则
pub fn scan(code: &str, kind: ScannerKind) -> Vec<Issue> {
    let context = ScanContext::new(code);
    let issues: Vec<Issue> = RuleFactory::create_language_rules(kind)
        .iter()
        .filter_map(|rule| rule.apply(&context))
        .collect();
    tracing::debug!("{} scanner produced {} issue(s)", kind, issues.len());
    issues
}
