use naukri_apply::browser::ChromeSession;
use naukri_apply::config::Config;
use naukri_apply::infrastructure::{BrowserSession, PageDriver};
use naukri_apply::models::load_credentials;
use naukri_apply::orchestrator::run_apply_pipeline;
use naukri_apply::utils::logging;

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_dry_run_against_live_site() {
    // 初始化日志
    logging::init(true);

    // 加载配置（强制 dry-run）
    let mut config = Config::from_env();
    config.options.live_apply = false;
    config.max_applies = 1;

    let credentials = load_credentials(&config.credentials_file, |key| std::env::var(key).ok())
        .await
        .expect("加载凭据失败");

    let session = ChromeSession::start(&config).await.expect("启动浏览器失败");
    let report = run_apply_pipeline(&session, &config, &credentials)
        .await
        .expect("运行失败");
    session.shutdown().await;

    assert!(report.results.len() <= 1);
    assert!(report
        .results
        .iter()
        .all(|r| r.status() != naukri_apply::ApplyStatus::Applied));
}

#[tokio::test]
#[ignore]
async fn test_browser_session() {
    // 初始化日志
    logging::init(false);

    // 加载配置
    let config = Config::from_env();

    // 测试浏览器启动 / 连接
    let session = ChromeSession::start(&config).await.expect("应该能够启动浏览器");

    let tab = session.open_page().await.expect("应该能够打开新标签页");
    let url = tab.current_url().await.expect("应该能够读取地址");
    assert_eq!(url, "about:blank");
    tab.close().await.expect("应该能够关闭标签页");

    session.shutdown().await;
}

#[tokio::test]
#[ignore]
async fn test_load_credentials_file() {
    // 加载配置
    let config = Config::from_env();

    // 测试读取凭据文件
    let result = load_credentials(&config.credentials_file, |key| std::env::var(key).ok()).await;

    assert!(result.is_ok(), "应该能够加载凭据");
    println!("账号: {}", result.unwrap().email());
}
