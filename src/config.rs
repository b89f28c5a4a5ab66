use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::utils::pacing::Pacing;

/// 默认登录页
const DEFAULT_LOGIN_URL: &str = "https://www.naukri.com/nlogin/login";

/// 运行环境，决定登录页地址
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Qa,
    Dev,
    Prod,
}

impl Environment {
    /// 解析环境名称，未知名称回退到 qa
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "qa" => Environment::Qa,
            "dev" => Environment::Dev,
            "prod" => Environment::Prod,
            other => {
                warn!("⚠️ 未知环境 '{}'，使用 qa", other);
                Environment::Qa
            }
        }
    }

    /// 环境对应的登录页，目前三个环境共用同一个地址
    pub fn login_url(&self) -> &'static str {
        match self {
            Environment::Qa | Environment::Dev | Environment::Prod => DEFAULT_LOGIN_URL,
        }
    }
}

/// 运行模式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// 搜索职位并投递（默认 dry-run）
    Apply,
    /// 刷新简历标题，可选上传简历
    ProfileRefresh,
    /// 保存个人主页截图和 HTML
    DebugCapture,
}

impl RunMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "apply" => Some(RunMode::Apply),
            "profile-refresh" | "profile" => Some(RunMode::ProfileRefresh),
            "debug-capture" | "debug" => Some(RunMode::DebugCapture),
            _ => None,
        }
    }
}

/// 流程参数
#[derive(Clone, Debug)]
pub struct WorkflowOptions {
    pub mode: RunMode,
    /// 浏览器语言
    pub locale: String,
    /// 存在文件输入框时是否上传简历
    pub upload_enabled: bool,
    /// 是否真正提交申请；false 时只做 dry-run
    pub live_apply: bool,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            mode: RunMode::Apply,
            locale: "en-IN".to_string(),
            upload_enabled: true,
            live_apply: false,
        }
    }
}

/// 各步骤的等待上限
#[derive(Clone, Debug)]
pub struct Timeouts {
    /// 普通导航
    pub navigation: Duration,
    /// 搜索兜底 URL 导航
    pub fallback_navigation: Duration,
    /// 登录按钮可见
    pub login_button: Duration,
    /// 搜索结果出现
    pub search_results: Duration,
    /// 搜索完成后的固定停顿
    pub search_settle: Duration,
    /// 申请表单出现
    pub apply_form: Duration,
    /// 申请表单未出现时的固定停顿
    pub apply_settle: Duration,
    /// 页面加载
    pub load_state: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation: Duration::from_secs(30),
            fallback_navigation: Duration::from_secs(45),
            login_button: Duration::from_secs(7),
            search_results: Duration::from_secs(10),
            search_settle: Duration::from_millis(1200),
            apply_form: Duration::from_secs(4),
            apply_settle: Duration::from_millis(900),
            load_state: Duration::from_secs(30),
        }
    }
}

impl Timeouts {
    /// 所有等待都为零，用于测试
    pub fn immediate() -> Self {
        Self {
            navigation: Duration::ZERO,
            fallback_navigation: Duration::ZERO,
            login_button: Duration::ZERO,
            search_results: Duration::ZERO,
            search_settle: Duration::ZERO,
            apply_form: Duration::ZERO,
            apply_settle: Duration::ZERO,
            load_state: Duration::ZERO,
        }
    }
}

/// 导航重试策略：第 n 次失败后等待 base + n * step
#[derive(Clone, Debug)]
pub struct NavigationPolicy {
    pub retries: u32,
    pub backoff_base: Duration,
    pub backoff_step: Duration,
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            backoff_base: Duration::from_millis(1000),
            backoff_step: Duration::from_millis(500),
        }
    }
}

impl NavigationPolicy {
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_base + self.backoff_step * attempt
    }
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 运行环境
    pub environment: Environment,
    /// 登录页
    pub base_url: String,
    /// 站点根地址
    pub site_root: String,
    /// 凭据文件
    pub credentials_file: PathBuf,
    /// 搜索关键词
    pub keyword: String,
    /// 搜索地点
    pub location: String,
    /// 最多处理的职位数
    pub max_applies: usize,
    /// 简历文件
    pub resume_path: PathBuf,
    /// 申请表单中的手机号
    pub phone: String,
    /// 结果输出目录
    pub results_dir: PathBuf,
    /// 浏览器调试端口；设置后连接已运行的浏览器
    pub browser_debug_port: Option<u16>,
    /// 浏览器可执行文件
    pub chrome_executable: Option<PathBuf>,
    /// 是否无头启动
    pub headless: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    pub options: WorkflowOptions,
    pub timeouts: Timeouts,
    pub navigation: NavigationPolicy,
    /// 收集链接后的停顿
    pub collect_pacing: Pacing,
    /// 两个职位之间的停顿
    pub job_pacing: Pacing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Qa,
            base_url: DEFAULT_LOGIN_URL.to_string(),
            site_root: "https://www.naukri.com".to_string(),
            credentials_file: PathBuf::from("Files").join("Test-data").join("userdata.json"),
            keyword: "SDET".to_string(),
            location: "Bangalore".to_string(),
            max_applies: 3,
            resume_path: PathBuf::from("Files").join("Sujith-S.pdf"),
            phone: String::new(),
            results_dir: PathBuf::from("test-results"),
            browser_debug_port: None,
            chrome_executable: None,
            headless: true,
            verbose_logging: false,
            options: WorkflowOptions::default(),
            timeouts: Timeouts::default(),
            navigation: NavigationPolicy::default(),
            collect_pacing: Pacing::new(Duration::from_millis(600), Duration::from_millis(600)),
            job_pacing: Pacing::new(Duration::from_millis(800), Duration::from_millis(800)),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源构建配置，便于测试
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let environment = lookup("ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or(default.environment);
        let base_url = lookup("NAUKRI_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| environment.login_url().to_string());
        let mode = match lookup("RUN_MODE") {
            Some(v) => RunMode::parse(&v).unwrap_or_else(|| {
                warn!("⚠️ 未知运行模式 '{}'，使用 apply", v);
                RunMode::Apply
            }),
            None => default.options.mode,
        };

        Self {
            environment,
            base_url,
            site_root: lookup("NAUKRI_SITE_ROOT").unwrap_or(default.site_root),
            credentials_file: lookup("CREDENTIALS_FILE").map(PathBuf::from).unwrap_or(default.credentials_file),
            keyword: lookup("KEYWORD").unwrap_or(default.keyword),
            location: lookup("LOCATION").unwrap_or(default.location),
            max_applies: lookup("MAX_APPLIES").and_then(|v| v.trim().parse().ok()).unwrap_or(default.max_applies),
            resume_path: lookup("RESUME_PATH").map(PathBuf::from).unwrap_or(default.resume_path),
            phone: lookup("PHONE").unwrap_or(default.phone),
            results_dir: lookup("RESULTS_DIR").map(PathBuf::from).unwrap_or(default.results_dir),
            browser_debug_port: lookup("BROWSER_DEBUG_PORT").and_then(|v| v.trim().parse().ok()),
            chrome_executable: lookup("CHROME_EXECUTABLE").map(PathBuf::from),
            headless: lookup("HEADLESS").map(|v| parse_flag(&v)).unwrap_or(default.headless),
            verbose_logging: lookup("VERBOSE_LOGGING").map(|v| parse_flag(&v)).unwrap_or(default.verbose_logging),
            options: WorkflowOptions {
                mode,
                locale: lookup("LOCALE").unwrap_or(default.options.locale),
                upload_enabled: lookup("UPLOAD_ENABLED")
                    .map(|v| parse_flag(&v))
                    .unwrap_or(default.options.upload_enabled),
                // 只有明确写 true 才会真正提交
                live_apply: lookup("LIVE_APPLY").map(|v| parse_flag(&v)).unwrap_or(false),
            },
            timeouts: default.timeouts,
            navigation: default.navigation,
            collect_pacing: default.collect_pacing,
            job_pacing: default.job_pacing,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
