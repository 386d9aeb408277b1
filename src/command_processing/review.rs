use crate::cli::{DetectArgs, ReviewArgs};
use crate::config::AppConfig;
use crate::core::types::{LanguageValidation, ReviewResult, Severity, Suggestion};
use crate::errors::{AppError, ReviewError};
use crate::review_engine::{
    NoDelay, RandomCoverage, Reviewer, check_declared_language, detect_language,
};
use colored::Colorize;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Read the code to review from a file, or stdin for none or "-".
fn read_source(file: Option<&PathBuf>) -> Result<String, AppError> {
    match file.filter(|path| path.as_os_str() != "-") {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| AppError::IO(format!("reading {}", path.display()), e)),
        None => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .map_err(|e| AppError::IO("reading code from stdin".to_string(), e))?;
            Ok(code)
        }
    }
}

/// Handle `revio review`.
pub async fn handle_review(args: ReviewArgs, config: &AppConfig) -> Result<(), AppError> {
    let code = read_source(args.file.as_ref())?;
    if code.is_empty() {
        return Err(ReviewError::EmptyCode.into());
    }

    let enforce = args.enforce_language || config.review.enforce_language;
    let validation = check_declared_language(&code, args.language.as_deref(), enforce)?;

    let result = if args.no_delay {
        tracing::debug!("Simulated latency disabled by --no-delay");
        Reviewer::new(NoDelay, RandomCoverage).review(&code).await?
    } else {
        Reviewer::with_latency(config.review.simulated_latency)
            .review(&code)
            .await?
    };

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| ReviewError::Internal(format!("failed to serialize review: {}", e)))?;
        println!("{}", json);
    } else {
        print!("{}", render_report(&result, validation.as_ref()));
    }
    Ok(())
}

/// Handle `revio detect`.
pub fn handle_detect(args: DetectArgs) -> Result<(), AppError> {
    let code = read_source(args.file.as_ref())?;
    match check_declared_language(&code, args.language.as_deref(), false)? {
        Some(validation) => println!("{}", render_validation(&validation)),
        None => println!("{}", detect_language(&code)),
    }
    Ok(())
}

fn severity_tag(severity: Severity) -> colored::ColoredString {
    let tag = severity.to_string().to_uppercase();
    match severity {
        Severity::High => tag.red().bold(),
        Severity::Medium => tag.yellow().bold(),
        Severity::Low => tag.green(),
    }
}

fn render_suggestion(suggestion: &Suggestion) -> String {
    format!(
        "  {:>4}  {:<8} {:<12} {}\n",
        format!("L{}", suggestion.issue.line),
        severity_tag(suggestion.issue.severity),
        suggestion.issue.category.to_string(),
        suggestion.formatted_message
    )
}

fn render_validation(validation: &LanguageValidation) -> String {
    if validation.is_valid {
        format!("{} (matches selected language)", validation.detected_language)
    } else {
        format!(
            "{} (selected {}, mismatch)",
            validation.detected_language, validation.selected_language
        )
    }
}

/// Human-readable report for the terminal.
pub fn render_report(result: &ReviewResult, validation: Option<&LanguageValidation>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        "Detected language:".bold(),
        result.detected_language
    ));
    if let Some(validation) = validation.filter(|v| !v.is_valid) {
        out.push_str(&format!(
            "{} {}\n",
            "Warning:".yellow().bold(),
            render_validation(validation)
        ));
    }
    out.push('\n');

    if result.suggestions.is_empty() {
        out.push_str("No issues found in the code! Good job!\n");
    } else {
        out.push_str(&format!(
            "{}\n",
            format!("Issues Found ({})", result.suggestions.len()).bold()
        ));
        for suggestion in &result.suggestions {
            out.push_str(&render_suggestion(suggestion));
        }
    }

    let m = &result.metrics;
    out.push_str(&format!(
        "\n{} bugs {}, vulnerabilities {}, code smells {}, duplications {}, coverage {}%\n",
        "Metrics:".bold(),
        m.bugs,
        m.vulnerabilities,
        m.code_smells,
        m.duplications,
        m.coverage
    ));
    out.push_str(&format!("{} {}\n", "Summary:".bold(), result.summary));

    if result.recommended_fix != result.original_code {
        out.push_str(&format!("\n{}\n", "Recommended fix:".bold()));
        out.push_str(&result.recommended_fix);
        if !result.recommended_fix.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
