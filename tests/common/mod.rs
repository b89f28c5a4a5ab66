//! 测试用的内存站点
//!
//! `FakeBrowser` / `FakePage` 实现 `BrowserSession` / `PageDriver`，
//! 每个 URL 对应一份 `FakeDom`。元素按 CSS 字符串精确匹配，
//! 逗号分隔的选择器列表匹配其中任意一项，
//! 文本模式沿用 `Selector::matches_text`。
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use naukri_apply::config::{Config, NavigationPolicy, Timeouts};
use naukri_apply::infrastructure::{BrowserSession, PageDriver, ResilientLocator, Selector};
use naukri_apply::models::Credentials;
use naukri_apply::utils::Pacing;

pub const LOGIN_URL: &str = "https://login.test/nlogin/login";
pub const HOME_URL: &str = "https://login.test/mnjuser/homepage";
pub const SITE_ROOT: &str = "https://jobs.test";

/// 点击元素后的效果
#[derive(Debug, Clone)]
pub enum OnClick {
    Nothing,
    /// 当前页面跳转到另一个 URL
    Navigate(String),
    /// 在当前页面追加元素
    Reveal(Vec<FakeElement>),
    /// 点击时报错
    Fail(String),
}

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub css: String,
    pub label: String,
    pub value: String,
    pub attrs: HashMap<String, String>,
    pub enabled: bool,
    pub visible: bool,
    /// false 时读取属性报错，模拟已从 DOM 上脱离的元素
    pub readable: bool,
    pub on_click: OnClick,
}

impl FakeElement {
    pub fn new(css: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            label: label.into(),
            value: String::new(),
            attrs: HashMap::new(),
            enabled: true,
            visible: true,
            readable: true,
            on_click: OnClick::Nothing,
        }
    }

    /// 使用定位器第一个选择器的 CSS
    pub fn for_locator(locator: &ResilientLocator, label: impl Into<String>) -> Self {
        let css = locator
            .strategies()
            .first()
            .map(|s| s.css_str().to_string())
            .unwrap_or_default();
        Self::new(css, label)
    }

    pub fn link(css: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(css, "").attr("href", href)
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn detached(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn navigates_to(mut self, url: impl Into<String>) -> Self {
        self.on_click = OnClick::Navigate(url.into());
        self
    }

    pub fn reveals(mut self, elements: Vec<FakeElement>) -> Self {
        self.on_click = OnClick::Reveal(elements);
        self
    }

    pub fn fails_on_click(mut self, message: impl Into<String>) -> Self {
        self.on_click = OnClick::Fail(message.into());
        self
    }

    fn matches(&self, selector: &Selector) -> bool {
        let label = format!("{} {}", self.label, self.value);
        split_css(selector).any(|css| css == self.css) && selector.matches_text(label.trim())
    }
}

fn split_css(selector: &Selector) -> impl Iterator<Item = &str> {
    selector.css_str().split(',').map(str::trim)
}

#[derive(Debug, Clone, Default)]
pub struct FakeDom {
    pub elements: Vec<FakeElement>,
    pub body: String,
}

impl FakeDom {
    pub fn new(elements: Vec<FakeElement>) -> Self {
        Self {
            elements,
            body: String::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// 页面上发生的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Goto { page: usize, url: String },
    Click { page: usize, url: String, css: String, label: String },
    Fill { page: usize, css: String, value: String },
    Upload { page: usize, path: PathBuf },
    Close { page: usize },
}

#[derive(Default)]
struct SiteState {
    pages: HashMap<String, FakeDom>,
    /// url -> 剩余失败次数
    failing: Mutex<HashMap<String, usize>>,
    broken_css: HashSet<String>,
    fail_new_page: bool,
    fail_uploads: bool,
    events: Mutex<Vec<Event>>,
}

impl SiteState {
    fn record(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// 站点构建器
#[derive(Default)]
pub struct FakeSite {
    state: SiteState,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, dom: FakeDom) -> Self {
        self.state.pages.insert(url.to_string(), dom);
        self
    }

    /// 前 `times` 次打开 url 时失败
    pub fn fail_goto(self, url: &str, times: usize) -> Self {
        if let Ok(mut failing) = self.state.failing.lock() {
            failing.insert(url.to_string(), times);
        }
        self
    }

    /// 对该 CSS 的任何查询都报错
    pub fn broken_selector(mut self, css: &str) -> Self {
        self.state.broken_css.insert(css.to_string());
        self
    }

    /// 所有文件上传都报错
    pub fn fail_uploads(mut self) -> Self {
        self.state.fail_uploads = true;
        self
    }

    pub fn without_new_pages(mut self) -> Self {
        self.state.fail_new_page = true;
        self
    }

    pub fn into_browser(self) -> FakeBrowser {
        let state = Arc::new(self.state);
        FakeBrowser {
            primary: FakePage::new(0, state.clone()),
            state,
            next_id: AtomicUsize::new(1),
        }
    }
}

pub struct FakeBrowser {
    state: Arc<SiteState>,
    primary: FakePage,
    next_id: AtomicUsize,
}

impl FakeBrowser {
    pub fn events(&self) -> Vec<Event> {
        self.state
            .events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn clicks_on(&self, label_pattern: &str) -> usize {
        let selector = Selector::css("*").with_text(label_pattern);
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Click { label, .. } if selector.matches_text(label)))
            .count()
    }

    pub fn uploads(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Upload { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn fills(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Fill { css, value, .. } => Some((css, value)),
                _ => None,
            })
            .collect()
    }

    pub fn gotos(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Goto { url, .. } => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn closed_pages(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Close { page } => Some(page),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl BrowserSession for FakeBrowser {
    type Page = FakePage;

    fn primary(&self) -> &FakePage {
        &self.primary
    }

    async fn open_page(&self) -> Result<FakePage> {
        if self.state.fail_new_page {
            bail!("new tab refused");
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(FakePage::new(id, self.state.clone()))
    }
}

struct PageState {
    url: String,
    dom: FakeDom,
    closed: bool,
}

pub struct FakePage {
    id: usize,
    site: Arc<SiteState>,
    state: Mutex<PageState>,
}

impl FakePage {
    fn new(id: usize, site: Arc<SiteState>) -> Self {
        Self {
            id,
            site,
            state: Mutex::new(PageState {
                url: "about:blank".to_string(),
                dom: FakeDom::default(),
                closed: false,
            }),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut PageState) -> Result<T>) -> Result<T> {
        let mut state = self.state.lock().map_err(|_| anyhow!("page state poisoned"))?;
        if state.closed {
            bail!("page {} is closed", self.id);
        }
        f(&mut state)
    }

    fn check_selector(&self, selector: &Selector) -> Result<()> {
        if split_css(selector).any(|css| self.site.broken_css.contains(css)) {
            bail!("selector {} is broken", selector);
        }
        Ok(())
    }

    fn load(&self, state: &mut PageState, url: &str) {
        state.url = url.to_string();
        state.dom = self.site.pages.get(url).cloned().unwrap_or_default();
    }

    fn nth<'s>(state: &'s mut PageState, selector: &Selector, index: usize) -> Result<&'s mut FakeElement> {
        state
            .dom
            .elements
            .iter_mut()
            .filter(|e| e.matches(selector))
            .nth(index)
            .ok_or_else(|| anyhow!("no element {} at {}", selector, index))
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn goto(&self, url: &str, _timeout: Duration) -> Result<()> {
        self.site.record(Event::Goto {
            page: self.id,
            url: url.to_string(),
        });
        if let Ok(mut failing) = self.site.failing.lock() {
            if let Some(remaining) = failing.get_mut(url) {
                if *remaining > 0 {
                    *remaining -= 1;
                    bail!("net::ERR_ABORTED at {}", url);
                }
            }
        }
        self.with_state(|state| {
            self.load(state, url);
            Ok(())
        })
    }

    async fn current_url(&self) -> Result<String> {
        self.with_state(|state| Ok(state.url.clone()))
    }

    async fn wait_for_load(&self, _timeout: Duration) -> Result<()> {
        self.with_state(|_| Ok(()))
    }

    async fn count(&self, selector: &Selector) -> Result<usize> {
        self.check_selector(selector)?;
        self.with_state(|state| Ok(state.dom.elements.iter().filter(|e| e.matches(selector)).count()))
    }

    async fn click(&self, selector: &Selector, index: usize) -> Result<()> {
        self.check_selector(selector)?;
        self.with_state(|state| {
            let url = state.url.clone();
            let element = Self::nth(state, selector, index)?;
            let (css, label, action) = (element.css.clone(), element.label.clone(), element.on_click.clone());
            self.site.record(Event::Click {
                page: self.id,
                url,
                css,
                label,
            });
            match action {
                OnClick::Nothing => {}
                OnClick::Navigate(target) => self.load(state, &target),
                OnClick::Reveal(elements) => state.dom.elements.extend(elements),
                OnClick::Fail(message) => bail!(message),
            }
            Ok(())
        })
    }

    async fn fill(&self, selector: &Selector, index: usize, value: &str) -> Result<()> {
        self.check_selector(selector)?;
        self.with_state(|state| {
            let element = Self::nth(state, selector, index)?;
            element.value = value.to_string();
            self.site.record(Event::Fill {
                page: self.id,
                css: element.css.clone(),
                value: value.to_string(),
            });
            Ok(())
        })
    }

    async fn input_value(&self, selector: &Selector, index: usize) -> Result<String> {
        self.with_state(|state| Ok(Self::nth(state, selector, index)?.value.clone()))
    }

    async fn attribute(&self, selector: &Selector, index: usize, name: &str) -> Result<Option<String>> {
        self.check_selector(selector)?;
        self.with_state(|state| {
            let element = Self::nth(state, selector, index)?;
            if !element.readable {
                bail!("element {} is detached", selector);
            }
            Ok(element.attrs.get(name).cloned())
        })
    }

    async fn is_visible(&self, selector: &Selector, index: usize) -> Result<bool> {
        self.with_state(|state| Ok(Self::nth(state, selector, index)?.visible))
    }

    async fn is_enabled(&self, selector: &Selector, index: usize) -> Result<bool> {
        self.with_state(|state| Ok(Self::nth(state, selector, index)?.enabled))
    }

    async fn set_input_files(&self, selector: &Selector, index: usize, path: &Path) -> Result<()> {
        self.with_state(|state| {
            Self::nth(state, selector, index)?;
            if self.site.fail_uploads {
                bail!("upload rejected for {}", path.display());
            }
            self.site.record(Event::Upload {
                page: self.id,
                path: path.to_path_buf(),
            });
            Ok(())
        })
    }

    async fn body_text(&self) -> Result<String> {
        self.with_state(|state| Ok(state.dom.body.clone()))
    }

    async fn content(&self) -> Result<String> {
        self.with_state(|state| Ok(format!("<html><body>{}</body></html>", state.dom.body)))
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.with_state(|_| Ok(b"\x89PNG\r\n".to_vec()))
    }

    async fn close(&self) -> Result<()> {
        self.site.record(Event::Close { page: self.id });
        self.with_state(|state| {
            state.closed = true;
            Ok(())
        })
    }
}

// ========== 测试配置 ==========

pub fn credentials() -> Credentials {
    Credentials::new("tester@example.com", "secret-pass").expect("valid credentials")
}

/// 零等待配置，结果写入 `results_dir`
pub fn test_config(results_dir: &Path) -> Config {
    Config {
        base_url: LOGIN_URL.to_string(),
        site_root: SITE_ROOT.to_string(),
        keyword: "SDET".to_string(),
        location: "Bangalore".to_string(),
        max_applies: 3,
        resume_path: results_dir.join("missing-resume.pdf"),
        phone: "9999999999".to_string(),
        results_dir: results_dir.to_path_buf(),
        timeouts: Timeouts::immediate(),
        navigation: NavigationPolicy {
            retries: 2,
            backoff_base: Duration::ZERO,
            backoff_step: Duration::ZERO,
        },
        collect_pacing: Pacing::none(),
        job_pacing: Pacing::none(),
        ..Config::default()
    }
}

// ========== 页面构建 ==========

/// 登录页：点击登录后跳转到首页，首页有个人主页链接和搜索栏
pub fn login_pages(site: FakeSite, search_results_url: &str) -> FakeSite {
    use naukri_apply::pages::{LoginPage, SearchPage};
    let login = LoginPage::new();
    let search = SearchPage::new();

    site.page(
        LOGIN_URL,
        FakeDom::new(vec![
            FakeElement::for_locator(&login.username_input, ""),
            FakeElement::for_locator(&login.password_input, ""),
            FakeElement::for_locator(&login.login_button, "Login").navigates_to(HOME_URL),
        ]),
    )
    .page(
        HOME_URL,
        FakeDom::new(vec![
            FakeElement::for_locator(&login.profile_link, "View profile"),
            FakeElement::for_locator(&search.keyword_input, ""),
            FakeElement::for_locator(&search.location_input, ""),
            FakeElement::for_locator(&search.submit_button, "Search").navigates_to(search_results_url),
        ]),
    )
}

/// 搜索结果页，每个 href 一张职位卡片
pub fn results_page(hrefs: &[&str]) -> FakeDom {
    FakeDom::new(
        hrefs
            .iter()
            .map(|href| FakeElement::link("a.jobTuple__title", *href))
            .collect(),
    )
}

/// 有申请按钮的职位页；点击后出现表单
pub fn job_with_form(confirmation_url: &str) -> FakeDom {
    use naukri_apply::pages::JobPage;
    let job = JobPage::new();
    FakeDom::new(vec![FakeElement::for_locator(&job.apply_button, "Apply").reveals(vec![
        FakeElement::new("form", ""),
        FakeElement::for_locator(&job.name_input, ""),
        FakeElement::for_locator(&job.email_input, "").value("prefilled@example.com"),
        FakeElement::for_locator(&job.phone_input, ""),
        FakeElement::for_locator(&job.file_input, ""),
        FakeElement::for_locator(&job.submit_button, "Submit application").navigates_to(confirmation_url),
    ])])
    .with_body("Senior SDET")
}

/// 没有申请按钮的职位页（例如已下线）
pub fn job_without_apply() -> FakeDom {
    FakeDom::new(vec![FakeElement::new("h1", "This job is no longer available")])
        .with_body("This job is no longer available")
}
