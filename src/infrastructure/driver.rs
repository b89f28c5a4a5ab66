use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::infrastructure::locator::Selector;

/// 单个页面（标签页）的能力
///
/// 元素通过 `Selector` 加下标定位，下标按文档顺序从 0 开始
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// 导航到 url，超过 `timeout` 视为失败
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    /// 等待文档就绪，超时返回错误
    async fn wait_for_load(&self, timeout: Duration) -> Result<()>;

    async fn count(&self, selector: &Selector) -> Result<usize>;

    async fn click(&self, selector: &Selector, index: usize) -> Result<()>;

    async fn fill(&self, selector: &Selector, index: usize, value: &str) -> Result<()>;

    async fn input_value(&self, selector: &Selector, index: usize) -> Result<String>;

    async fn attribute(&self, selector: &Selector, index: usize, name: &str) -> Result<Option<String>>;

    async fn is_visible(&self, selector: &Selector, index: usize) -> Result<bool>;

    async fn is_enabled(&self, selector: &Selector, index: usize) -> Result<bool>;

    async fn set_input_files(&self, selector: &Selector, index: usize, path: &Path) -> Result<()>;

    /// 页面可见文本
    async fn body_text(&self) -> Result<String>;

    /// 页面 HTML
    async fn content(&self) -> Result<String>;

    /// 整页 PNG 截图
    async fn screenshot(&self) -> Result<Vec<u8>>;

    async fn close(&self) -> Result<()>;
}

/// 已登录的浏览器会话
///
/// `primary()` 是登录用的主页面，生命周期覆盖所有子页面；
/// `open_page()` 打开共享登录态的新标签页
#[async_trait]
pub trait BrowserSession: Send + Sync {
    type Page: PageDriver;

    fn primary(&self) -> &Self::Page;

    async fn open_page(&self) -> Result<Self::Page>;
}
