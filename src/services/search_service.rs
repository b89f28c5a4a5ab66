//! 职位搜索服务 - 业务能力层
//!
//! 只负责让页面停在职位列表上；任何一步失败都降级继续

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::PageDriver;
use crate::models::SearchQuery;
use crate::pages::SearchPage;
use crate::services::navigator::Navigator;

/// 最终通过哪条路径到达结果页
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPath {
    /// 填写搜索栏并点击搜索
    Form,
    /// 直接访问拼接的搜索地址
    FallbackUrl,
    /// 兜底地址也打不开，停在站点首页
    SiteRoot,
    /// 所有导航都失败，页面保持原状
    Unavailable,
}

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub path: SearchPath,
    /// 超时前是否出现了结果标志
    pub results_ready: bool,
}

/// 职位搜索服务
pub struct SearchService<'a> {
    config: &'a Config,
    navigator: Navigator,
    search_page: SearchPage,
}

impl<'a> SearchService<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            navigator: Navigator::new(config.navigation.clone()),
            search_page: SearchPage::new(),
        }
    }

    /// 执行搜索，从不返回错误
    pub async fn search(&self, page: &dyn PageDriver, query: &SearchQuery) -> SearchOutcome {
        let path = if self.submit_form(page, query).await {
            SearchPath::Form
        } else {
            self.navigate_fallback(page, query).await
        };

        let results_ready = match self
            .search_page
            .results_marker
            .wait_for(page, self.config.timeouts.search_results)
            .await
        {
            Ok(Some(_)) => true,
            Ok(None) => {
                warn!("⚠️ 等待搜索结果超时，继续执行");
                false
            }
            Err(e) => {
                warn!("⚠️ 检查搜索结果失败: {}，继续执行", e);
                false
            }
        };
        sleep(self.config.timeouts.search_settle).await;

        info!(
            "已搜索 keyword=\"{}\" location=\"{}\" ({:?})",
            query.keyword, query.location, path
        );
        SearchOutcome { path, results_ready }
    }

    /// 通过搜索栏提交；找不到搜索按钮时返回 false
    async fn submit_form(&self, page: &dyn PageDriver, query: &SearchQuery) -> bool {
        match self.search_page.keyword_input.locate(page).await {
            Ok(Some(input)) => {
                if let Err(e) = input.fill(&query.keyword).await {
                    warn!("⚠️ 填写关键词失败: {}", e);
                }
            }
            Ok(None) => info!("未找到关键词输入框，稍后尝试直接访问搜索地址"),
            Err(e) => warn!("⚠️ 查找关键词输入框失败: {}", e),
        }

        match self.search_page.location_input.locate(page).await {
            Ok(Some(input)) => {
                if let Err(e) = input.fill(&query.location).await {
                    warn!("⚠️ 填写地点失败: {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("⚠️ 查找地点输入框失败: {}", e),
        }

        let button = match self.search_page.submit_button.locate(page).await {
            Ok(Some(button)) => button,
            Ok(None) => return false,
            Err(e) => {
                warn!("⚠️ 查找搜索按钮失败: {}", e);
                return false;
            }
        };
        if let Err(e) = button.click().await {
            warn!("⚠️ 点击搜索按钮失败: {}", e);
            return false;
        }
        if let Err(e) = page.wait_for_load(self.config.timeouts.load_state).await {
            warn!("⚠️ 等待搜索结果页加载失败: {}", e);
        }
        true
    }

    /// 直接访问搜索地址，失败时退回站点首页
    async fn navigate_fallback(&self, page: &dyn PageDriver, query: &SearchQuery) -> SearchPath {
        let timeouts = &self.config.timeouts;
        let fallback_url = query.fallback_url(&self.config.site_root);
        info!("未找到搜索按钮，直接访问: {}", fallback_url);

        let nav_err = match self
            .navigator
            .goto_with_retries(page, &fallback_url, timeouts.fallback_navigation, 2)
            .await
        {
            Ok(()) => return SearchPath::FallbackUrl,
            Err(e) => e,
        };
        warn!("⚠️ {}，尝试站点首页", nav_err);

        match self
            .navigator
            .goto_with_retries(page, &self.config.site_root, timeouts.navigation, 1)
            .await
        {
            Ok(()) => SearchPath::SiteRoot,
            Err(e) => {
                warn!("⚠️ {}，在当前页面继续", e);
                SearchPath::Unavailable
            }
        }
    }
}
