//! 运行模式 - 编排层
//!
//! 三种运行模式共用登录和收尾：
//!
//! ```text
//! Apply          登录 → 搜索 → 收集链接 → 逐个处理 → 收尾
//! ProfileRefresh 登录 → 个人主页 → 保存简历标题 / 上传简历 → 退出登录
//! DebugCapture   登录 → 个人主页 → 保存截图、HTML、地址
//! ```

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppResult, Probe};
use crate::infrastructure::BrowserSession;
use crate::models::{Credentials, SearchQuery};
use crate::orchestrator::finalizer::{finalize, RunReport};
use crate::orchestrator::job_processor::process_jobs;
use crate::services::session::log_probe;
use crate::services::{
    capture_page, collect_job_links, CaptureArtifacts, ProfileService, SearchService, SessionService,
    StepReport,
};
use crate::utils::logging::log_phase;

/// 投递流程：登录失败直接返回错误，之后的每一步都降级继续
pub async fn run_apply_pipeline<S: BrowserSession>(
    session: &S,
    config: &Config,
    credentials: &Credentials,
) -> AppResult<RunReport> {
    let page = session.primary();

    log_phase("登录");
    SessionService::new(config).bootstrap(page, credentials).await?;

    log_phase("搜索职位");
    let query = SearchQuery::from_config(config);
    let outcome = SearchService::new(config).search(page, &query).await;
    if !outcome.results_ready {
        warn!("⚠️ 未确认搜索结果已出现，收集结果可能为空");
    }

    let links = collect_job_links(page, query.max_results).await;
    config.collect_pacing.pause().await;

    log_phase("处理职位");
    let results = process_jobs(session, config, credentials, links).await;

    Ok(finalize(page, config, results).await)
}

/// 刷新个人资料：每一步都是尽力而为
pub async fn run_profile_refresh<S: BrowserSession>(
    session: &S,
    config: &Config,
    credentials: &Credentials,
) -> AppResult<Vec<StepReport>> {
    let page = session.primary();
    let sessions = SessionService::new(config);

    log_phase("登录");
    sessions.bootstrap(page, credentials).await?;

    log_phase("刷新个人资料");
    let reports = match sessions.open_profile(page).await {
        Ok(Probe::Done(())) => ProfileService::new(config).refresh(page).await,
        other => {
            log_probe("进入个人主页", other);
            warn!("⚠️ 未能进入个人主页，跳过资料刷新");
            Vec::new()
        }
    };
    for report in &reports {
        info!("{}", report);
    }

    log_phase("收尾");
    log_probe("退出登录", sessions.logout(page).await);
    Ok(reports)
}

/// 保存个人主页的调试快照
///
/// 登录失败也会继续截图，方便排查登录页本身的问题
pub async fn run_debug_capture<S: BrowserSession>(
    session: &S,
    config: &Config,
    credentials: &Credentials,
) -> AppResult<CaptureArtifacts> {
    let page = session.primary();
    let sessions = SessionService::new(config);

    log_phase("登录");
    if let Err(e) = sessions.bootstrap(page, credentials).await {
        warn!("⚠️ {}，继续保存快照", e);
    }

    log_phase("调试快照");
    match sessions.open_profile(page).await {
        Ok(Probe::Done(())) => info!("已进入个人主页"),
        other => {
            log_probe("进入个人主页", other);
            warn!("⚠️ 未能进入个人主页，保存当前页面");
        }
    }

    capture_page(page, &config.results_dir.join("debug-profile"), "profile").await
}
