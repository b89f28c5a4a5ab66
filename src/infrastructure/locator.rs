//! 容错定位器
//!
//! 目标站点的页面结构经常变化，同一个元素往往要准备多个选择器。
//! `ResilientLocator` 按顺序尝试每个选择器，第一个命中的胜出。

use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use regex::RegexBuilder;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::infrastructure::PageDriver;

/// 轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// CSS 选择器，加上可选的文本匹配
///
/// 文本模式不区分大小写，同时匹配元素的可见文本、value、
/// aria-label、alt 和 title，语法需同时兼容 JS RegExp 和 regex crate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    css: String,
    text: Option<String>,
}

impl Selector {
    pub fn css(css: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            text: None,
        }
    }

    pub fn with_text(mut self, pattern: impl Into<String>) -> Self {
        self.text = Some(pattern.into());
        self
    }

    pub fn css_str(&self) -> &str {
        &self.css
    }

    pub fn text_pattern(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// 判断一段元素文本是否满足文本模式；无模式时总是满足
    pub fn matches_text(&self, label: &str) -> bool {
        match &self.text {
            None => true,
            Some(pattern) => RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map(|re| re.is_match(label))
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{}:has-text(/{}/i)", self.css, text),
            None => f.write_str(&self.css),
        }
    }
}

/// 有序的选择器列表，先命中者胜出
#[derive(Debug, Clone)]
pub struct ResilientLocator {
    name: &'static str,
    strategies: Vec<Selector>,
}

impl ResilientLocator {
    pub fn new(name: &'static str, strategies: Vec<Selector>) -> Self {
        Self { name, strategies }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn strategies(&self) -> &[Selector] {
        &self.strategies
    }

    /// 把所有纯 CSS 选择器合并成一个逗号分隔的选择器
    ///
    /// 合并后按文档顺序匹配，同一元素只出现一次。
    /// 任一选择器带文本模式时无法合并，返回 None
    pub fn combined(&self) -> Option<Selector> {
        if self.strategies.is_empty() || self.strategies.iter().any(|s| s.text.is_some()) {
            return None;
        }
        let css: Vec<&str> = self.strategies.iter().map(|s| s.css.as_str()).collect();
        Some(Selector::css(css.join(", ")))
    }

    /// 返回第一个匹配数大于 0 的选择器
    ///
    /// 单个选择器执行出错视为未命中；全部出错时返回最后一个错误
    pub async fn locate<'p>(&self, page: &'p dyn PageDriver) -> Result<Option<Located<'p>>> {
        let mut last_err = None;
        let mut errors = 0;
        for selector in &self.strategies {
            match page.count(selector).await {
                Ok(0) => {}
                Ok(count) => {
                    debug!("[{}] 命中 {} ({} 个)", self.name, selector, count);
                    return Ok(Some(Located {
                        page,
                        selector: selector.clone(),
                    }));
                }
                Err(e) => {
                    debug!("[{}] 选择器 {} 执行失败: {}", self.name, selector, e);
                    errors += 1;
                    last_err = Some(e);
                }
            }
        }
        match last_err {
            Some(e) if errors == self.strategies.len() => Err(e),
            _ => Ok(None),
        }
    }

    /// 轮询 `locate` 直到命中或超时；超时返回 None
    pub async fn wait_for<'p>(
        &self,
        page: &'p dyn PageDriver,
        timeout: Duration,
    ) -> Result<Option<Located<'p>>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(found) = self.locate(page).await? {
                return Ok(Some(found));
            }
            let now = Instant::now();
            if now >= deadline {
                debug!("[{}] 等待 {:?} 后仍未出现", self.name, timeout);
                return Ok(None);
            }
            sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }
}

/// 定位结果，操作默认作用于第一个元素
pub struct Located<'p> {
    page: &'p dyn PageDriver,
    selector: Selector,
}

impl<'p> Located<'p> {
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub async fn click(&self) -> Result<()> {
        self.page.click(&self.selector, 0).await
    }

    pub async fn fill(&self, value: &str) -> Result<()> {
        self.page.fill(&self.selector, 0, value).await
    }

    pub async fn value(&self) -> Result<String> {
        self.page.input_value(&self.selector, 0).await
    }

    pub async fn is_visible(&self) -> Result<bool> {
        self.page.is_visible(&self.selector, 0).await
    }

    pub async fn is_enabled(&self) -> Result<bool> {
        self.page.is_enabled(&self.selector, 0).await
    }

    pub async fn set_input_files(&self, path: &Path) -> Result<()> {
        self.page.set_input_files(&self.selector, 0, path).await
    }
}
