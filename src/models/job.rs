use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// 职位详情页链接，总是 http(s) 绝对地址
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobLink(Url);

impl JobLink {
    /// 以 `base` 为基准解析 href；非 http(s) 链接返回 None
    pub fn resolve(base: Option<&Url>, href: &str) -> Option<Self> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        let url = match Url::parse(href) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => base?.join(href).ok()?,
            Err(_) => return None,
        };
        match url.scheme() {
            "http" | "https" => Some(Self(url)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for JobLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// 单个职位的处理结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplyStatus {
    Applied,
    Skipped,
    Error,
    DryRun,
}

impl fmt::Display for ApplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplyStatus::Applied => "applied",
            ApplyStatus::Skipped => "skipped",
            ApplyStatus::Error => "error",
            ApplyStatus::DryRun => "dry-run",
        };
        f.write_str(s)
    }
}

/// 单个职位的处理结果，创建后不可修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationResult {
    url: String,
    status: ApplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl ApplicationResult {
    pub fn new(url: impl Into<String>, status: ApplyStatus, note: Option<String>) -> Self {
        Self {
            url: url.into(),
            status,
            note,
        }
    }

    pub fn applied(url: impl Into<String>, note: impl Into<String>) -> Self {
        Self::new(url, ApplyStatus::Applied, Some(note.into()))
    }

    pub fn skipped(url: impl Into<String>, note: impl Into<String>) -> Self {
        Self::new(url, ApplyStatus::Skipped, Some(note.into()))
    }

    pub fn error(url: impl Into<String>, note: impl Into<String>) -> Self {
        Self::new(url, ApplyStatus::Error, Some(note.into()))
    }

    pub fn dry_run(url: impl Into<String>, note: impl Into<String>) -> Self {
        Self::new(url, ApplyStatus::DryRun, Some(note.into()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> ApplyStatus {
        self.status
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

impl fmt::Display for ApplicationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.url, self.status)?;
        if let Some(note) = &self.note {
            write!(f, " ({})", note)?;
        }
        Ok(())
    }
}
