use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::Browser;
use tracing::{debug, error};

use crate::config::Config;
use crate::error::BrowserError;
use crate::browser::{connect_to_browser, launch_headless_browser};
use crate::infrastructure::{BrowserSession, JsExecutor};

/// 基于 chromiumoxide 的浏览器会话
///
/// 持有 Browser 和登录用的主页面；子页面与主页面共享 cookie
pub struct ChromeSession {
    browser: Browser,
    primary: JsExecutor,
    launched: bool,
}

impl ChromeSession {
    /// 按配置连接或启动浏览器，并打开主页面
    pub async fn start(config: &Config) -> Result<Self> {
        let (browser, launched) = match config.browser_debug_port {
            Some(port) => (connect_to_browser(port).await?, false),
            None => (launch_headless_browser(config).await?, true),
        };
        let primary = Self::new_executor(&browser).await?;
        Ok(Self {
            browser,
            primary,
            launched,
        })
    }

    async fn new_executor(browser: &Browser) -> Result<JsExecutor> {
        let page = browser.new_page("about:blank").await.map_err(|e| {
            error!("创建页面失败: {}", e);
            BrowserError::PageCreationFailed {
                source: Box::new(e),
            }
        })?;
        let executor = JsExecutor::new(page);
        executor.accept_dialogs().await?;
        Ok(executor)
    }

    /// 关闭浏览器；连接模式下只断开连接
    pub async fn shutdown(mut self) {
        if !self.launched {
            return;
        }
        if let Err(e) = self.browser.close().await {
            debug!("关闭浏览器失败: {}", e);
        }
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    type Page = JsExecutor;

    fn primary(&self) -> &JsExecutor {
        &self.primary
    }

    async fn open_page(&self) -> Result<JsExecutor> {
        Self::new_executor(&self.browser).await
    }
}
