//! JS 执行器 - 基础设施层
//!
//! 持有 chromiumoxide 的 Page，通过执行 JS 实现 `PageDriver`

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::page::{
    EventJavascriptDialogOpening, HandleJavaScriptDialogParams,
};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::time::{sleep, timeout, Instant};
use tracing::debug;

use crate::infrastructure::{PageDriver, Selector};

/// 上传时用于标记目标元素的序号
static UPLOAD_MARKER: AtomicU64 = AtomicU64::new(0);

/// 页面加载轮询间隔
const LOAD_POLL: Duration = Duration::from_millis(200);

/// JS 执行器
///
/// 职责：
/// - 持有 Page 资源
/// - 暴露 eval() 能力
/// - 把选择器操作翻译成页面内的 JS
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 自动接受页面弹出的 alert / confirm
    pub async fn accept_dialogs(&self) -> Result<()> {
        let mut dialogs = self
            .page
            .event_listener::<EventJavascriptDialogOpening>()
            .await?;
        let page = self.page.clone();
        tokio::spawn(async move {
            while let Some(event) = dialogs.next().await {
                debug!("自动接受对话框: {}", event.message);
                if page
                    .execute(HandleJavaScriptDialogParams::new(true))
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });
        Ok(())
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 在匹配到的元素列表 `els` 上执行 `body`
    async fn with_elements<T: DeserializeOwned>(&self, selector: &Selector, body: &str) -> Result<T> {
        let js_code = element_script(selector, body)?;
        self.eval_as(js_code)
            .await
            .with_context(|| format!("执行选择器 {} 失败", selector))
    }
}

/// 生成在页面中解析选择器的脚本
fn element_script(selector: &Selector, body: &str) -> Result<String> {
    Ok(format!(
        r#"
        (() => {{
            const css = {css};
            const pattern = {pattern};
            const re = pattern === null ? null : new RegExp(pattern, 'i');
            const label = (el) => [
                el.innerText,
                typeof el.value === 'string' ? el.value : '',
                el.getAttribute('aria-label'),
                el.getAttribute('alt'),
                el.getAttribute('title'),
            ].filter(Boolean).join(' ').trim();
            const els = Array.from(document.querySelectorAll(css))
                .filter(el => re === null || re.test(label(el)));
            const nth = (i) => {{
                const el = els[i];
                if (!el) throw new Error(`no element #${{i}} for ${{css}}`);
                return el;
            }};
            {body}
        }})()
        "#,
        css = serde_json::to_string(selector.css_str())?,
        pattern = serde_json::to_string(&selector.text_pattern())?,
        body = body,
    ))
}

#[async_trait]
impl PageDriver for JsExecutor {
    async fn goto(&self, url: &str, limit: Duration) -> Result<()> {
        debug!("导航到: {}", url);
        match timeout(limit, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(anyhow!(e)).with_context(|| format!("导航到 {} 失败", url)),
            Err(_) => Err(anyhow!("导航到 {} 超时 ({:?})", url, limit)),
        }
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn wait_for_load(&self, limit: Duration) -> Result<()> {
        let deadline = Instant::now() + limit;
        loop {
            // 导航过程中执行上下文会被销毁，出错时继续轮询
            if let Ok(state) = self.eval_as::<String>("document.readyState").await {
                if state != "loading" {
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                anyhow::bail!("等待页面加载超时 ({:?})", limit);
            }
            sleep(LOAD_POLL).await;
        }
    }

    async fn count(&self, selector: &Selector) -> Result<usize> {
        self.with_elements(selector, "return els.length;").await
    }

    async fn click(&self, selector: &Selector, index: usize) -> Result<()> {
        let body = format!(
            "const el = nth({index}); el.scrollIntoView({{block: 'center'}}); el.click(); return true;"
        );
        self.with_elements::<bool>(selector, &body).await?;
        Ok(())
    }

    async fn fill(&self, selector: &Selector, index: usize, value: &str) -> Result<()> {
        // 使用原生 setter，保证 React 之类的框架能收到 input 事件
        let body = format!(
            r#"
            const el = nth({index});
            el.focus();
            const proto = el instanceof HTMLTextAreaElement
                ? HTMLTextAreaElement.prototype
                : HTMLInputElement.prototype;
            const setter = Object.getOwnPropertyDescriptor(proto, 'value').set;
            setter.call(el, {value});
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return true;
            "#,
            value = serde_json::to_string(value)?,
        );
        self.with_elements::<bool>(selector, &body).await?;
        Ok(())
    }

    async fn input_value(&self, selector: &Selector, index: usize) -> Result<String> {
        let body = format!("const el = nth({index}); return typeof el.value === 'string' ? el.value : '';");
        self.with_elements(selector, &body).await
    }

    async fn attribute(&self, selector: &Selector, index: usize, name: &str) -> Result<Option<String>> {
        let body = format!(
            "return nth({index}).getAttribute({name});",
            name = serde_json::to_string(name)?
        );
        self.with_elements(selector, &body).await
    }

    async fn is_visible(&self, selector: &Selector, index: usize) -> Result<bool> {
        let body = format!(
            r#"
            const el = nth({index});
            const rect = el.getBoundingClientRect();
            const style = getComputedStyle(el);
            return rect.width > 0 && rect.height > 0
                && style.visibility !== 'hidden' && style.display !== 'none';
            "#
        );
        self.with_elements(selector, &body).await
    }

    async fn is_enabled(&self, selector: &Selector, index: usize) -> Result<bool> {
        let body = format!(
            "const el = nth({index}); return !el.disabled && el.getAttribute('aria-disabled') !== 'true';"
        );
        self.with_elements(selector, &body).await
    }

    async fn set_input_files(&self, selector: &Selector, index: usize, path: &Path) -> Result<()> {
        let marker = UPLOAD_MARKER.fetch_add(1, Ordering::Relaxed);
        let body = format!("nth({index}).setAttribute('data-upload-target', '{marker}'); return true;");
        self.with_elements::<bool>(selector, &body).await?;

        let element = self
            .page
            .find_element(format!("[data-upload-target=\"{marker}\"]"))
            .await
            .context("未找到文件输入框")?;

        let absolute = std::fs::canonicalize(path)
            .with_context(|| format!("无法解析文件路径: {}", path.display()))?;
        let mut params = SetFileInputFilesParams::new(vec![absolute.to_string_lossy().to_string()]);
        params.backend_node_id = Some(element.backend_node_id);
        self.page.execute(params).await?;
        Ok(())
    }

    async fn body_text(&self) -> Result<String> {
        self.eval_as("document.body ? document.body.innerText : ''").await
    }

    async fn content(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder().full_page(true).build();
        Ok(self.page.screenshot(params).await?)
    }

    async fn close(&self) -> Result<()> {
        self.page.clone().close().await?;
        Ok(())
    }
}
