use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 导航失败（已耗尽重试次数）
    #[error("导航到 {url} 失败 (共尝试 {attempts} 次): {source}")]
    Navigation {
        url: String,
        attempts: u32,
        #[source]
        source: BoxError,
    },

    /// 登录失败
    #[error("登录失败: {0}")]
    Authentication(String),

    /// 简历上传失败
    #[error("上传 {} 失败: {source}", path.display())]
    Upload {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// 单个职位处理失败
    #[error("处理职位 {url} 失败: {source}")]
    JobProcessing {
        url: String,
        #[source]
        source: BoxError,
    },

    /// 结果持久化失败
    #[error("保存结果到 {} 失败: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),

    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: BoxError,
    },
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: BoxError,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: BoxError,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 凭据缺失
    #[error("未找到登录凭据: 文件 {} 不存在且未设置 NAUKRI_EMAIL / NAUKRI_PASSWORD", path.display())]
    CredentialsMissing { path: PathBuf },
    /// 凭据字段为空
    #[error("凭据字段 {field} 不能为空")]
    EmptyCredential { field: &'static str },
    /// 凭据文件格式错误
    #[error("凭据文件格式错误 ({}): {source}", path.display())]
    CredentialsMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建导航失败错误
    pub fn navigation(url: impl Into<String>, attempts: u32, source: impl Into<BoxError>) -> Self {
        AppError::Navigation {
            url: url.into(),
            attempts,
            source: source.into(),
        }
    }

    /// 创建上传失败错误
    pub fn upload(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        AppError::Upload {
            path: path.into(),
            source: source.into(),
        }
    }

    /// 创建职位处理错误
    pub fn job_processing(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AppError::JobProcessing {
            url: url.into(),
            source: source.into(),
        }
    }

    /// 创建持久化错误
    pub fn persistence(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        AppError::Persistence {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

// ========== 可选步骤的探测结果 ==========

/// 可选步骤的结果
///
/// `Absent` 表示目标元素不存在、步骤被跳过，这不是错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T = ()> {
    /// 步骤已执行
    Done(T),
    /// 目标不存在，跳过
    Absent,
}

/// 可选步骤执行时遇到的意外失败
///
/// 只会被记录到日志，从不中断流程
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub step: &'static str,
    pub message: String,
}

impl Warning {
    pub fn new(step: &'static str, err: impl fmt::Display) -> Self {
        Self {
            step,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.step, self.message)
    }
}

impl std::error::Error for Warning {}

/// 可选步骤的返回类型
pub type ProbeResult<T = ()> = Result<Probe<T>, Warning>;
