//! 职位链接收集 - 业务能力层

use std::collections::HashSet;

use tracing::{debug, info, warn};
use url::Url;

use crate::infrastructure::{PageDriver, ResilientLocator, Selector};
use crate::models::JobLink;
use crate::pages::SearchPage;

/// 每个需要的链接最多读取的候选数量
const OVER_COLLECT_FACTOR: usize = 3;

/// 从结果页收集职位链接
///
/// 先尝试职位卡片选择器，读不到任何 href 时再用更宽泛的选择器。
/// 结果去重、按首次出现顺序排列，长度不超过 `max_results`
pub async fn collect_job_links(page: &dyn PageDriver, max_results: usize) -> Vec<JobLink> {
    if max_results == 0 {
        return Vec::new();
    }

    let search_page = SearchPage::new();
    let budget = max_results.saturating_mul(OVER_COLLECT_FACTOR);
    let mut hrefs = Vec::new();
    for family in search_page.card_families() {
        let found = read_hrefs(page, family, budget).await;
        if !found.is_empty() {
            hrefs = found;
            break;
        }
        debug!("[{}] 没有可用的链接", family.name());
    }

    let base = match page.current_url().await {
        Ok(url) => Url::parse(&url).ok(),
        Err(e) => {
            warn!("⚠️ 获取当前页面地址失败: {}", e);
            None
        }
    };
    let links = normalize_links(base.as_ref(), hrefs, max_results);

    info!("收集到 {} 个职位链接 (上限 {})", links.len(), max_results);
    if links.is_empty() {
        warn!("⚠️ 没有收集到职位链接，搜索选择器可能需要调整");
    }
    links
}

/// 读取一组卡片的 href，最多检查 `budget` 个元素
///
/// 纯 CSS 的组合并成一次查询，按文档顺序读取；
/// 合并查询失败或无法合并时逐个选择器读取
async fn read_hrefs(page: &dyn PageDriver, family: &ResilientLocator, budget: usize) -> Vec<String> {
    if let Some(combined) = family.combined() {
        match page.count(&combined).await {
            Ok(count) => return read_matches(page, family, &combined, count.min(budget)).await,
            Err(e) => debug!("[{}] 合并选择器执行失败: {}，逐个尝试", family.name(), e),
        }
    }

    let mut hrefs = Vec::new();
    let mut examined = 0;
    for selector in family.strategies() {
        if examined >= budget {
            break;
        }
        let count = match page.count(selector).await {
            Ok(count) => count,
            Err(e) => {
                debug!("[{}] 选择器 {} 执行失败: {}", family.name(), selector, e);
                continue;
            }
        };
        let take = count.min(budget - examined);
        hrefs.extend(read_matches(page, family, selector, take).await);
        examined += take;
    }
    hrefs
}

/// 读取前 `take` 个匹配元素的 href；单个元素读取失败时跳过
async fn read_matches(
    page: &dyn PageDriver,
    family: &ResilientLocator,
    selector: &Selector,
    take: usize,
) -> Vec<String> {
    let mut hrefs = Vec::new();
    for index in 0..take {
        match page.attribute(selector, index, "href").await {
            Ok(Some(href)) => hrefs.push(href),
            Ok(None) => {}
            Err(e) => debug!("[{}] 读取第 {} 个链接失败: {}", family.name(), index, e),
        }
    }
    hrefs
}

/// 解析为绝对地址、去重并截断
pub fn normalize_links<I>(base: Option<&Url>, hrefs: I, max_results: usize) -> Vec<JobLink>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for href in hrefs {
        if links.len() >= max_results {
            break;
        }
        let Some(link) = JobLink::resolve(base, &href) else {
            debug!("忽略无效链接: {}", href);
            continue;
        };
        if seen.insert(link.as_str().to_string()) {
            links.push(link);
        }
    }
    links
}
