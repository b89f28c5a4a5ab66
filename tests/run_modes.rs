mod common;

use tokio_test::assert_ok;

use common::*;
use naukri_apply::infrastructure::{BrowserSession, PageDriver};
use naukri_apply::models::ApplicationResult;
use naukri_apply::orchestrator::{finalize, run_debug_capture, run_profile_refresh};
use naukri_apply::pages::{LoginPage, ProfilePage};
use naukri_apply::services::StepStatus;

const PROFILE_URL: &str = "https://login.test/mnjuser/profile";

fn account_menu() -> FakeElement {
    let profile = ProfilePage::new();
    FakeElement::for_locator(&profile.avatar, "profile photo")
        .reveals(vec![FakeElement::for_locator(&profile.logout_link, "Logout").navigates_to(LOGIN_URL)])
}

fn profile_site() -> FakeSite {
    let login = LoginPage::new();
    let profile = ProfilePage::new();
    login_pages(FakeSite::new(), HOME_URL)
        .page(
            HOME_URL,
            FakeDom::new(vec![
                FakeElement::for_locator(&login.profile_link, "View profile").navigates_to(PROFILE_URL),
                account_menu(),
            ]),
        )
        .page(
            PROFILE_URL,
            FakeDom::new(vec![
                FakeElement::for_locator(&profile.headline_edit, "").reveals(vec![
                    FakeElement::for_locator(&profile.headline_textbox, "").value("SDET with 5 years"),
                    FakeElement::for_locator(&profile.save_button, "Save"),
                ]),
                FakeElement::for_locator(&profile.resume_input, ""),
                account_menu(),
            ])
            .with_body("Resume has been successfully uploaded on 19 Oct"),
        )
}

#[tokio::test]
async fn test_profile_refresh_saves_headline_and_uploads_resume() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.resume_path = dir.path().join("resume.pdf");
    std::fs::write(&config.resume_path, b"%PDF-1.4").unwrap();
    let browser = profile_site().into_browser();

    let reports = assert_ok!(run_profile_refresh(&browser, &config, &credentials()).await);

    let statuses: Vec<&StepStatus> = reports.iter().map(|r| &r.status).collect();
    assert_eq!(statuses, vec![&StepStatus::Done, &StepStatus::Done]);
    assert_eq!(browser.clicks_on("^Save$"), 1);
    assert_eq!(browser.uploads(), vec![config.resume_path.clone()]);
    assert_eq!(browser.clicks_on("Logout"), 1);
}

#[tokio::test]
async fn test_profile_refresh_respects_upload_switch() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.options.upload_enabled = false;
    let browser = profile_site().into_browser();

    let reports = assert_ok!(run_profile_refresh(&browser, &config, &credentials()).await);

    assert_eq!(reports[0].status, StepStatus::Done);
    assert!(matches!(reports[1].status, StepStatus::Skipped(_)));
    assert!(browser.uploads().is_empty());
}

#[tokio::test]
async fn test_profile_refresh_without_headline_editor_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let browser = profile_site()
        .page(PROFILE_URL, FakeDom::new(vec![account_menu()]))
        .into_browser();

    let reports = assert_ok!(run_profile_refresh(&browser, &config, &credentials()).await);

    assert!(matches!(reports[0].status, StepStatus::Skipped(_)));
    // 简历文件不存在，上传同样跳过
    assert!(matches!(reports[1].status, StepStatus::Skipped(_)));
}

#[tokio::test]
async fn test_debug_capture_writes_screenshot_html_and_url() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let browser = profile_site().into_browser();

    let artifacts = assert_ok!(run_debug_capture(&browser, &config, &credentials()).await);

    let capture_dir = dir.path().join("debug-profile");
    let screenshot = artifacts.screenshot.expect("screenshot should be saved");
    assert!(screenshot.starts_with(&capture_dir));
    assert!(screenshot.extension().is_some_and(|ext| ext == "png"));
    assert!(artifacts.html.starts_with(&capture_dir));
    assert_eq!(std::fs::read_to_string(&artifacts.url).unwrap(), PROFILE_URL);
    let name = artifacts.url.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("profile-") && name.ends_with(".url.txt"));
}

#[tokio::test]
async fn test_debug_capture_continues_after_failed_login() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let browser = FakeSite::new()
        .page(LOGIN_URL, FakeDom::default().with_body("Service unavailable"))
        .into_browser();

    let artifacts = assert_ok!(run_debug_capture(&browser, &config, &credentials()).await);

    assert_eq!(std::fs::read_to_string(&artifacts.url).unwrap(), LOGIN_URL);
    assert!(std::fs::read_to_string(&artifacts.html)
        .unwrap()
        .contains("Service unavailable"));
}

#[tokio::test]
async fn test_finalize_logs_out_and_saves_results() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let browser = profile_site().into_browser();
    let page = browser.primary();
    assert_ok!(page.goto(HOME_URL, config.timeouts.navigation).await);

    let results = vec![ApplicationResult::dry_run("https://jobs.test/job-detail/a", "would-submit")];
    let report = finalize(page, &config, results.clone()).await;

    assert_eq!(browser.clicks_on("Logout"), 1);
    assert_eq!(report.results, results);
    assert!(report.saved_to.is_some_and(|p| p.starts_with(dir.path())));
}

#[tokio::test]
async fn test_finalize_keeps_results_when_saving_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let config = test_config(&blocker.join("results"));
    let browser = FakeSite::new().into_browser();

    let results = vec![ApplicationResult::skipped("https://jobs.test/job-detail/b", "no apply button")];
    let report = finalize(browser.primary(), &config, results.clone()).await;

    assert_eq!(report.results, results);
    assert!(report.saved_to.is_none());
}
