//! 导航服务 - 业务能力层
//!
//! 只负责"打开某个地址"，带有限次数的重试

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::NavigationPolicy;
use crate::error::{AppError, AppResult};
use crate::infrastructure::PageDriver;

/// 导航服务
pub struct Navigator {
    policy: NavigationPolicy,
}

impl Navigator {
    pub fn new(policy: NavigationPolicy) -> Self {
        Self { policy }
    }

    /// 按默认重试次数导航
    pub async fn goto(&self, page: &dyn PageDriver, url: &str, timeout: Duration) -> AppResult<()> {
        self.goto_with_retries(page, url, timeout, self.policy.retries).await
    }

    /// 导航到 url，失败后线性退避重试 `retries` 次
    pub async fn goto_with_retries(
        &self,
        page: &dyn PageDriver,
        url: &str,
        timeout: Duration,
        retries: u32,
    ) -> AppResult<()> {
        let mut attempt = 0;
        loop {
            match page.goto(url, timeout).await {
                Ok(()) => {
                    debug!("✓ 已打开 {}", url);
                    return Ok(());
                }
                Err(e) => {
                    warn!("第 {} 次打开 {} 失败: {}", attempt + 1, url, e);
                    if attempt >= retries {
                        return Err(AppError::navigation(url, attempt + 1, e));
                    }
                    sleep(self.policy.backoff(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}
