use crate::infrastructure::{ResilientLocator, Selector};

/// 常见遮挡层（cookie 提示、弹窗）的关闭按钮，每组独立尝试
pub fn overlay_families() -> Vec<ResilientLocator> {
    vec![
        ResilientLocator::new(
            "同意按钮",
            vec![Selector::css("button").with_text("Accept|I agree|Got it")],
        ),
        ResilientLocator::new(
            "关闭按钮",
            vec![
                Selector::css(r#"button[aria-label="close"]"#),
                Selector::css(r#"button[aria-label="Close"]"#),
                Selector::css(".close"),
                Selector::css(".close-btn"),
                Selector::css(".cookie-banner button"),
            ],
        ),
        ResilientLocator::new(
            "叉号按钮",
            vec![Selector::css("button").with_text("×|✕")],
        ),
    ]
}
