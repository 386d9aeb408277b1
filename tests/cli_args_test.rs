use clap::Parser;
use revio::cli::{RevioArgs, RevioSubCommand};
use std::path::PathBuf;

#[test]
fn test_review_args_defaults() {
    let args = RevioArgs::try_parse_from(["revio", "review"]).unwrap();
    match args.command {
        RevioSubCommand::Review(review) => {
            assert_eq!(review.file, None);
            assert_eq!(review.language, None);
            assert!(!review.enforce_language);
            assert!(!review.json);
            assert!(!review.no_delay);
        }
        other => panic!("expected review subcommand, got {:?}", other),
    }
}

#[test]
fn test_review_args_full() {
    let args = RevioArgs::try_parse_from([
        "revio",
        "review",
        "src/app.js",
        "--language",
        "javascript",
        "--enforce-language",
        "--json",
        "--no-delay",
    ])
    .unwrap();
    match args.command {
        RevioSubCommand::Review(review) => {
            assert_eq!(review.file, Some(PathBuf::from("src/app.js")));
            assert_eq!(review.language.as_deref(), Some("javascript"));
            assert!(review.enforce_language);
            assert!(review.json);
            assert!(review.no_delay);
        }
        other => panic!("expected review subcommand, got {:?}", other),
    }
}

#[test]
fn test_review_alias() {
    let args = RevioArgs::try_parse_from(["revio", "r", "-l", "python"]).unwrap();
    assert!(matches!(
        args.command,
        RevioSubCommand::Review(ref review) if review.language.as_deref() == Some("python")
    ));
}

#[test]
fn test_detect_and_serve_args() {
    let args = RevioArgs::try_parse_from(["revio", "detect", "-", "--language", "cpp"]).unwrap();
    match args.command {
        RevioSubCommand::Detect(detect) => {
            assert_eq!(detect.file, Some(PathBuf::from("-")));
            assert_eq!(detect.language.as_deref(), Some("cpp"));
        }
        other => panic!("expected detect subcommand, got {:?}", other),
    }

    let args = RevioArgs::try_parse_from(["revio", "serve", "--port", "5002"]).unwrap();
    match args.command {
        RevioSubCommand::Serve(serve) => {
            assert_eq!(serve.port, Some(5002));
            assert_eq!(serve.host, None);
        }
        other => panic!("expected serve subcommand, got {:?}", other),
    }
}

#[test]
fn test_rejects_unknown_subcommand() {
    assert!(RevioArgs::try_parse_from(["revio", "commit"]).is_err());
    assert!(RevioArgs::try_parse_from(["revio", "serve", "--port", "http"]).is_err());
}
