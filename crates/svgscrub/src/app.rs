use anyhow::Result;
use svgcore::{SanitizeOptions, SanitizeReport};

use crate::cli::Cli;
use crate::config::Config;
use crate::file_manager;

/// Outcome of one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(SanitizeReport),
    /// The input was refused and nothing was written.
    Rejected(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Written(_))
    }
}

/// 0 when the document was written, 1 when it was rejected, 2 on I/O or
/// config failures.
pub fn exit_code(result: &Result<Outcome>) -> i32 {
    match result {
        Ok(Outcome::Written(_)) => 0,
        Ok(Outcome::Rejected(_)) => 1,
        Err(_) => 2,
    }
}

pub async fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path).await?,
        None => Config::load().await?,
    };
    cli.apply_overrides(&mut config);
    Ok(config)
}

/// Reads, sanitizes and writes a single document.
///
/// I/O failures are errors; a document the sanitizer refuses is reported as
/// [`Outcome::Rejected`] so the caller can pick an exit status.
pub async fn run(cli: &Cli) -> Result<Outcome> {
    let config = load_config(cli).await?;
    let input = file_manager::read_input(cli.input.as_deref(), config.max_input_bytes).await?;

    let options = SanitizeOptions {
        max_input_bytes: Some(config.max_input_bytes),
    };

    match svgcore::sanitize_document_with(&input, &options) {
        Ok(sanitized) => {
            file_manager::write_output(cli.output.as_deref(), &sanitized.svg).await?;
            if config.report {
                eprintln!("{}", format_report(&sanitized.report));
            }
            Ok(Outcome::Written(sanitized.report))
        }
        Err(e) => {
            log::warn!("Rejected input: {}", e);
            eprintln!("SVGを無害化できませんでした: {}", e);
            Ok(Outcome::Rejected(e.to_string()))
        }
    }
}

pub fn format_report(report: &SanitizeReport) -> String {
    if report.is_clean() {
        return "変更なし".to_string();
    }
    format!(
        "削除された要素: {}, 削除された属性: {}, 書き換えられた値: {}",
        report.removed_elements, report.removed_attributes, report.rewritten_values
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli_for(dir: &TempDir, extra: &[&str]) -> Cli {
        let input = dir.path().join("in.svg");
        let output = dir.path().join("out.svg");
        // Point --config at a file that does not exist so user config is ignored
        let config = dir.path().join("config.json");
        let mut args = vec![
            "svgscrub".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
            "--config".to_string(),
            config.display().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        Cli::try_parse_from(args).unwrap()
    }

    #[tokio::test]
    async fn test_run_sanitizes_file() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(
            dir.path().join("in.svg"),
            r#"<svg><rect onclick="x()"/><script>alert(1)</script></svg>"#,
        )
        .await
        .unwrap();

        let outcome = run(&cli_for(&dir, &[])).await.unwrap();
        assert!(outcome.is_success());

        let written = std::fs::read_to_string(dir.path().join("out.svg")).unwrap();
        assert_eq!(written, "<svg><rect/></svg>");

        match outcome {
            Outcome::Written(report) => {
                assert_eq!(report.removed_elements, 1);
                assert_eq!(report.removed_attributes, 1);
            }
            Outcome::Rejected(reason) => panic!("unexpected rejection: {}", reason),
        }
    }

    #[tokio::test]
    async fn test_run_rejects_non_svg_root() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("in.svg"), "<html><body/></html>")
            .await
            .unwrap();

        let outcome = run(&cli_for(&dir, &[])).await.unwrap();
        assert!(matches!(outcome, Outcome::Rejected(_)));
        assert!(!dir.path().join("out.svg").exists());
    }

    #[tokio::test]
    async fn test_run_respects_max_bytes() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("in.svg"), "<svg><rect/></svg>")
            .await
            .unwrap();

        let result = run(&cli_for(&dir, &["--max-bytes", "8"])).await;
        assert!(result.is_err());
        assert!(!dir.path().join("out.svg").exists());
    }

    #[tokio::test]
    async fn test_config_file_enables_report() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("config.json"), r#"{"report": true}"#)
            .await
            .unwrap();

        let config = load_config(&cli_for(&dir, &[])).await.unwrap();
        assert!(config.report);
    }

    #[tokio::test]
    async fn test_exit_codes() {
        let dir = TempDir::new().unwrap();
        // input file was never written
        let missing = run(&cli_for(&dir, &[])).await;
        assert_eq!(exit_code(&missing), 2);

        tokio::fs::write(dir.path().join("in.svg"), "<svg><script/></svg>")
            .await
            .unwrap();
        assert_eq!(exit_code(&run(&cli_for(&dir, &[])).await), 1);

        tokio::fs::write(dir.path().join("in.svg"), "<svg><rect/></svg>")
            .await
            .unwrap();
        assert_eq!(exit_code(&run(&cli_for(&dir, &[])).await), 0);
    }

    #[test]
    fn test_format_report() {
        assert_eq!(format_report(&SanitizeReport::default()), "変更なし");

        let report = SanitizeReport {
            removed_elements: 2,
            removed_attributes: 3,
            rewritten_values: 1,
        };
        let text = format_report(&report);
        assert!(text.contains("2"));
        assert!(text.contains("3"));
    }
}
