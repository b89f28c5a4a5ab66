//! 遮挡层处理 - 业务能力层

use tracing::debug;

use crate::error::{Probe, ProbeResult, Warning};
use crate::infrastructure::PageDriver;
use crate::pages::overlay::overlay_families;

/// 尝试关闭 cookie 提示和弹窗
///
/// 返回成功点击的数量；什么都没找到时返回 `Probe::Absent`。
/// 单个点击失败不算错误，只有全部点击都失败时才返回 `Warning`
pub async fn dismiss_overlays(page: &dyn PageDriver) -> ProbeResult<usize> {
    let mut found = 0;
    let mut dismissed = 0;
    let mut last_failure = None;

    for family in overlay_families() {
        let located = match family.locate(page).await {
            Ok(Some(located)) => located,
            Ok(None) => continue,
            Err(e) => {
                last_failure = Some(Warning::new("关闭遮挡层", e));
                continue;
            }
        };
        found += 1;
        match located.click().await {
            Ok(()) => {
                debug!("已关闭遮挡层: {}", located.selector());
                dismissed += 1;
            }
            Err(e) => {
                debug!("关闭遮挡层 {} 失败: {}", located.selector(), e);
                last_failure = Some(Warning::new("关闭遮挡层", e));
            }
        }
    }

    match (dismissed, found, last_failure) {
        (0, 0, None) => Ok(Probe::Absent),
        (0, _, Some(warning)) => Err(warning),
        (n, _, _) => Ok(Probe::Done(n)),
    }
}
