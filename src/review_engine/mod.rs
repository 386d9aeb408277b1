//! 启发式代码评审模块
//!
//! 包括语言检测、按语言扫描规则、指标统计、消息格式化和简单修复，
//! 由 [`Reviewer`] 串联起来。

pub mod detector;
pub mod fixer;
pub mod formatter;
pub mod metrics;
pub mod rules;
pub mod summary;

use crate::core::types::{LanguageValidation, ReviewResult, SourceLanguage};
use crate::errors::ReviewError;
use std::future::Future;
use std::time::Duration;

pub use detector::{detect_language, validate_language};
pub use fixer::recommend_fix;
pub use formatter::format_issue_message;
pub use metrics::{CoverageSource, FixedCoverage, RandomCoverage, aggregate};
pub use rules::{ScannerKind, scan};
pub use summary::summarize;

/// 评审完成前的等待，模拟模型延迟
pub trait Delay: Send + Sync {
    fn wait(&self) -> impl Future<Output = ()> + Send;
}

/// 使用 tokio 定时器休眠
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLatency(pub Duration);

impl Delay for SimulatedLatency {
    fn wait(&self) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(self.0)
    }
}

/// 立即返回
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn wait(&self) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}

/// 无状态评审服务
///
/// 只持有延迟与覆盖率来源，每次调用都从头构建结果。
#[derive(Debug, Clone)]
pub struct Reviewer<D = SimulatedLatency, C = RandomCoverage> {
    delay: D,
    coverage: C,
}

impl Reviewer {
    /// 使用给定模拟延迟的评审器
    pub fn with_latency(latency: Duration) -> Self {
        Reviewer::new(SimulatedLatency(latency), RandomCoverage)
    }
}

impl<D: Delay, C: CoverageSource> Reviewer<D, C> {
    pub fn new(delay: D, coverage: C) -> Self {
        Self { delay, coverage }
    }

    /// 等待配置的延迟后评审 `code`
    pub async fn review(&self, code: &str) -> Result<ReviewResult, ReviewError> {
        self.delay.wait().await;
        self.review_now(code)
    }

    /// 不等待，直接评审 `code`
    ///
    /// 扫描器只按检测到的语言选择；调用方声明的语言另行校验，
    /// 见 [`check_declared_language`]。
    pub fn review_now(&self, code: &str) -> Result<ReviewResult, ReviewError> {
        if code.is_empty() {
            return Err(ReviewError::EmptyCode);
        }

        let language = detect_language(code);
        tracing::info!("Reviewing {} line(s) as {}", code.split('\n').count(), language);

        let issues = scan(code, language.into());
        let metrics = aggregate(&issues, self.coverage.sample());
        let recommended_fix = recommend_fix(code, &issues);

        tracing::info!(
            "Review finished: {} bug(s), {} vulnerability(ies), {} code smell(s)",
            metrics.bugs,
            metrics.vulnerabilities,
            metrics.code_smells
        );

        Ok(ReviewResult {
            detected_language: language,
            suggestions: issues.iter().map(formatter::to_suggestion).collect(),
            summary: summarize(issues.len()).to_string(),
            metrics,
            original_code: code.to_string(),
            recommended_fix,
            improvements: formatter::improvements(&issues),
        })
    }
}

/// 校验调用方声明的语言
///
/// 未声明时返回 `Ok(None)`。无法识别的语言名总是报错；
/// 语言不一致只有在 `enforce` 为真时才报错，否则把校验结果交给调用方处理。
pub fn check_declared_language(
    code: &str,
    declared: Option<&str>,
    enforce: bool,
) -> Result<Option<LanguageValidation>, ReviewError> {
    let Some(name) = declared.map(str::trim).filter(|name| !name.is_empty()) else {
        return Ok(None);
    };
    let selected: SourceLanguage = name
        .parse()
        .map_err(ReviewError::UnsupportedLanguage)?;

    let validation = validate_language(code, selected);
    if !validation.is_valid {
        if enforce {
            tracing::warn!(
                "Rejecting review: detected {} but {} was selected",
                validation.detected_language,
                selected
            );
            return Err(ReviewError::LanguageMismatch {
                detected: validation.detected_language,
                selected,
            });
        }
        tracing::info!(
            "Language mismatch ignored: detected {} but {} was selected",
            validation.detected_language,
            selected
        );
    }
    Ok(Some(validation))
}
