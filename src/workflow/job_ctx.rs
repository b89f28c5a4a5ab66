//! 职位处理上下文
//!
//! 封装"我正在处理第几个职位"这一信息

use std::fmt::Display;

use crate::models::JobLink;

/// 职位处理上下文
#[derive(Debug, Clone)]
pub struct JobCtx {
    pub link: JobLink,

    /// 职位序号（从1开始，仅用于日志显示）
    pub index: usize,

    /// 本次运行的职位总数
    pub total: usize,
}

impl JobCtx {
    pub fn new(link: JobLink, index: usize, total: usize) -> Self {
        Self { link, index, total }
    }

    pub fn url(&self) -> &str {
        self.link.as_str()
    }
}

impl Display for JobCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[职位 {}/{}]", self.index, self.total)
    }
}
