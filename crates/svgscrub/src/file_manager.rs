use anyhow::Result;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// `None` and `-` both mean the standard stream.
fn is_stdio(path: Option<&Path>) -> bool {
    path.map_or(true, |p| p.as_os_str() == "-")
}

/// Reads the input document, refusing anything over `limit` bytes before it
/// is fully buffered.
pub async fn read_input(path: Option<&Path>, limit: usize) -> Result<String> {
    let path = match path {
        Some(path) if !is_stdio(Some(path)) => path,
        _ => return read_stdin(limit).await,
    };

    if !path.exists() {
        return Err(anyhow::anyhow!(
            "ファイルが見つかりません: {}",
            path.display()
        ));
    }

    if !path.is_file() {
        return Err(anyhow::anyhow!(
            "指定されたパスはファイルではありません: {}",
            path.display()
        ));
    }

    match fs::metadata(path).await {
        Ok(metadata) if metadata.len() > limit as u64 => {
            return Err(anyhow::anyhow!(
                "入力が大きすぎます ({} バイト、上限 {} バイト): {}",
                metadata.len(),
                limit,
                path.display()
            ));
        }
        Ok(_) => {}
        Err(e) => log::warn!("Failed to get file metadata: {}", e),
    }

    match fs::read_to_string(path).await {
        Ok(content) => {
            log::debug!("Read {} bytes from {}", content.len(), path.display());
            Ok(content)
        }
        Err(e) => {
            let error_msg = match e.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    format!("ファイルへのアクセス権限がありません: {}", path.display())
                }
                std::io::ErrorKind::NotFound => {
                    format!("ファイルが見つかりません: {}", path.display())
                }
                std::io::ErrorKind::InvalidData => {
                    format!(
                        "ファイルのエンコーディングが無効です (UTF-8ではありません): {}",
                        path.display()
                    )
                }
                _ => {
                    format!("ファイル読み込みエラー: {} - {}", path.display(), e)
                }
            };
            Err(anyhow::anyhow!(error_msg))
        }
    }
}

async fn read_stdin(limit: usize) -> Result<String> {
    let mut buf = Vec::new();
    // One byte past the limit is enough to tell that the input is too large
    tokio::io::stdin()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .await?;
    if buf.len() > limit {
        return Err(anyhow::anyhow!(
            "標準入力が大きすぎます (上限 {} バイト)",
            limit
        ));
    }
    String::from_utf8(buf)
        .map_err(|_| anyhow::anyhow!("標準入力のエンコーディングが無効です (UTF-8ではありません)"))
}

/// Writes the sanitized document to `path`, or to stdout.
pub async fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) if !is_stdio(Some(path)) => {
            if let Err(e) = fs::write(path, content).await {
                return Err(anyhow::anyhow!(
                    "ファイルの書き込みに失敗しました: {} - {}",
                    path.display(),
                    e
                ));
            }
            log::info!("Wrote sanitized SVG to: {}", path.display());
        }
        _ => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(content.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[tokio::test]
    async fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<svg><rect/></svg>").unwrap();

        let content = read_input(Some(file.path()), 1024).await.unwrap();
        assert_eq!(content, "<svg><rect/></svg>");
    }

    #[tokio::test]
    async fn test_read_input_rejects_large_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<svg><rect/></svg>").unwrap();

        let error = read_input(Some(file.path()), 4).await.unwrap_err();
        assert!(error.to_string().contains("大きすぎます"));
    }

    #[tokio::test]
    async fn test_read_input_missing_file() {
        let dir = TempDir::new().unwrap();
        let error = read_input(Some(dir.path().join("missing.svg").as_path()), 1024)
            .await
            .unwrap_err();
        assert!(error.to_string().contains("見つかりません"));
    }

    #[tokio::test]
    async fn test_read_input_directory() {
        let dir = TempDir::new().unwrap();
        let error = read_input(Some(dir.path()), 1024).await.unwrap_err();
        assert!(error.to_string().contains("ファイルではありません"));
    }

    #[tokio::test]
    async fn test_write_output_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.svg");
        write_output(Some(path.as_path()), "<svg/>").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
    }

    #[test]
    fn test_dash_means_stdio() {
        assert!(is_stdio(None));
        assert!(is_stdio(Some(Path::new("-"))));
        assert!(!is_stdio(Some(Path::new("in.svg"))));
    }
}
