//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行、清理）
//! - 管理浏览器资源（ChromeSession）
//! - 按运行模式分发
//!
//! ### `pipeline` - 运行模式
//! - Apply / ProfileRefresh / DebugCapture 三条流程
//! - 只依赖 `BrowserSession`，可以在测试中替换浏览器
//!
//! ### `job_processor` - 职位队列处理器
//! - 串行遍历职位链接（Vec<JobLink>）
//! - 创建并复用 ApplyFlow
//! - 输出职位统计信息
//!
//! ### `finalizer` - 收尾
//! - 退出登录、输出汇总、保存结果文件
//!
//! ## 层次关系
//!
//! ```text
//! app (按 RunMode 分发)
//!     ↓
//! pipeline (登录 → 搜索 → 收集)
//!     ↓
//! job_processor (处理 Vec<JobLink>)
//!     ↓
//! workflow::ApplyFlow (处理单个职位)
//!     ↓
//! services (能力层：session / search / collector / form_filler / results_writer)
//!     ↓
//! infrastructure (基础设施：PageDriver / ResilientLocator)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有浏览器会话
//! 2. **向下依赖**：编排层 → workflow → services → infrastructure
//! 3. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod app;
pub mod finalizer;
pub mod job_processor;
pub mod pipeline;

// 重新导出主要类型
pub use app::{App, RunOutcome};
pub use finalizer::{finalize, RunReport};
pub use job_processor::{process_jobs, JobStats};
pub use pipeline::{run_apply_pipeline, run_debug_capture, run_profile_refresh};
