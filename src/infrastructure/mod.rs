//! 基础设施层
//!
//! 只有这一层直接接触浏览器。上层通过 `PageDriver` / `BrowserSession`
//! 使用页面能力，通过 `ResilientLocator` 查找元素。

pub mod driver;
pub mod js_executor;
pub mod locator;

pub use driver::{BrowserSession, PageDriver};
pub use js_executor::JsExecutor;
pub use locator::{Located, ResilientLocator, Selector};
