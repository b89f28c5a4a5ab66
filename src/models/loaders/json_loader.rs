use std::path::Path;

use serde::Deserialize;
use tokio::fs;
use tracing::{info, warn};

use crate::error::{AppError, ConfigError, FileError};
use crate::models::Credentials;

/// 凭据文件结构: `{ "validusername": { "email": "...", "password": "..." } }`
#[derive(Debug, Deserialize)]
struct UserData {
    validusername: Credentials,
}

/// 解析凭据 JSON
pub fn parse_credentials(path: &Path, content: &str) -> Result<Credentials, ConfigError> {
    let data: UserData =
        serde_json::from_str(content).map_err(|source| ConfigError::CredentialsMalformed {
            path: path.to_path_buf(),
            source,
        })?;
    data.validusername.validate()?;
    Ok(data.validusername)
}

/// 加载凭据
///
/// 优先读取 JSON 文件；文件不存在时回退到 `NAUKRI_EMAIL` / `NAUKRI_PASSWORD`
pub async fn load_credentials<F>(path: &Path, env_lookup: F) -> Result<Credentials, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    if fs::try_exists(path).await.unwrap_or(false) {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| FileError::ReadFailed {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
        let credentials = parse_credentials(path, &content)?;
        info!("✓ 已从 {} 加载凭据", path.display());
        return Ok(credentials);
    }

    warn!("⚠️ 凭据文件 {} 不存在，尝试读取环境变量", path.display());
    match (env_lookup("NAUKRI_EMAIL"), env_lookup("NAUKRI_PASSWORD")) {
        (Some(email), Some(password)) => Ok(Credentials::new(email, password)?),
        _ => Err(ConfigError::CredentialsMissing {
            path: path.to_path_buf(),
        }
        .into()),
    }
}
