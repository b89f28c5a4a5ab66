//! 调试快照 - 业务能力层
//!
//! 保存当前页面的截图、HTML 和地址，用于排查选择器问题

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::infrastructure::PageDriver;

/// 一次快照生成的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureArtifacts {
    pub screenshot: Option<PathBuf>,
    pub html: PathBuf,
    pub url: PathBuf,
}

/// 保存页面快照到 `dir`，文件名以 `prefix-时间戳` 开头
///
/// 截图失败只记录警告，HTML 和地址仍会保存
pub async fn capture_page(page: &dyn PageDriver, dir: &Path, prefix: &str) -> AppResult<CaptureArtifacts> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::persistence(dir, e))?;

    let ts = chrono::Utc::now().timestamp_millis();
    let screenshot_path = dir.join(format!("{}-{}.png", prefix, ts));
    let html_path = dir.join(format!("{}-{}.html", prefix, ts));
    let url_path = dir.join(format!("{}-{}.url.txt", prefix, ts));

    let screenshot = match page.screenshot().await {
        Ok(bytes) => {
            fs::write(&screenshot_path, bytes)
                .await
                .map_err(|e| AppError::persistence(&screenshot_path, e))?;
            Some(screenshot_path)
        }
        Err(e) => {
            warn!("⚠️ 截图失败: {}", e);
            None
        }
    };

    let html = page
        .content()
        .await
        .map_err(|e| AppError::persistence(&html_path, e))?;
    fs::write(&html_path, html)
        .await
        .map_err(|e| AppError::persistence(&html_path, e))?;

    let url = page.current_url().await.unwrap_or_default();
    fs::write(&url_path, url)
        .await
        .map_err(|e| AppError::persistence(&url_path, e))?;

    info!("✓ 调试快照已保存:");
    if let Some(path) = &screenshot {
        info!("  - {}", path.display());
    }
    info!("  - {}", html_path.display());
    info!("  - {}", url_path.display());

    Ok(CaptureArtifacts {
        screenshot,
        html: html_path,
        url: url_path,
    })
}
