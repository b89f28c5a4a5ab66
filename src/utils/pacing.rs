//! 操作节奏控制
//!
//! 在职位之间插入"固定 + 随机"的停顿，降低被限流的概率

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::debug;

/// 固定时长加上 `[0, jitter)` 的随机时长
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub base: Duration,
    pub jitter: Duration,
}

impl Pacing {
    pub const fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    /// 不停顿
    pub const fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// 计算本次停顿时长
    pub fn next_delay(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.base;
        }
        let extra = rand::thread_rng().gen_range(0..jitter_ms);
        self.base + Duration::from_millis(extra)
    }

    pub async fn pause(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        debug!("停顿 {} ms", delay.as_millis());
        sleep(delay).await;
    }
}
