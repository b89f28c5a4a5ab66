//! # Naukri Apply
//!
//! 一个带提交闸门的 Naukri 职位自动申请工具
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageDriver` / `BrowserSession` - 页面能力接口，测试中可替换
//! - `JsExecutor` - 基于 chromiumoxide 的实现
//! - `ResilientLocator` - 按顺序尝试多个选择器，第一个命中的生效
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `SessionService` - 登录 / 个人主页 / 退出登录
//! - `SearchService` - 搜索职位，失败时直接访问搜索地址
//! - `collector` - 收集、去重职位链接
//! - `FormFiller` - 填写申请表单、上传简历
//! - `ResultsWriter` - 写结果 JSON
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个职位"的完整处理流程
//! - `JobCtx` - 上下文封装（职位链接 + 序号）
//! - `ApplyFlow` - 流程编排（打开 → 检测 → 填写 → 决定 → 关闭）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用入口，管理浏览器资源
//! - `orchestrator/pipeline` - 三种运行模式
//! - `orchestrator/job_processor` - 串行处理职位队列
//!
//! ## 提交闸门
//!
//! 只有 `LIVE_APPLY=true` 时才会点击最终提交按钮，否则所有职位都以
//! `dry-run` 结束。
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod pages;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::ChromeSession;
pub use config::{Config, RunMode, WorkflowOptions};
pub use error::{AppError, AppResult};
pub use infrastructure::{BrowserSession, JsExecutor, PageDriver};
pub use models::{ApplicationResult, ApplyStatus, Credentials, JobLink};
pub use orchestrator::{run_apply_pipeline, App, RunOutcome, RunReport};
pub use workflow::{ApplyFlow, JobCtx};
