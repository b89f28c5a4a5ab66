use crate::infrastructure::{ResilientLocator, Selector};

/// 投递成功的提示文本
pub const CONFIRMATION_PATTERN: &str =
    r"(?i)application submitted|applied successfully|application received";

/// 职位详情页与申请表单
pub struct JobPage {
    pub apply_button: ResilientLocator,
    /// 点击申请后出现的表单标志
    pub apply_form: ResilientLocator,
    pub name_input: ResilientLocator,
    pub email_input: ResilientLocator,
    pub phone_input: ResilientLocator,
    pub file_input: ResilientLocator,
    pub submit_button: ResilientLocator,
}

impl JobPage {
    pub fn new() -> Self {
        Self {
            apply_button: ResilientLocator::new(
                "申请按钮",
                vec![
                    Selector::css("button").with_text("Apply"),
                    Selector::css("a").with_text("Apply"),
                    Selector::css("button").with_text("Quick Apply"),
                    Selector::css("a").with_text("Apply Now"),
                ],
            ),
            apply_form: ResilientLocator::new(
                "申请表单",
                vec![
                    Selector::css(r#"input[type="file"]"#),
                    Selector::css("form"),
                    Selector::css("button").with_text("Submit"),
                    Selector::css("button").with_text("Apply"),
                ],
            ),
            name_input: ResilientLocator::new(
                "姓名输入框",
                vec![
                    Selector::css("input[name*=name]"),
                    Selector::css(r#"input[placeholder*="Name"]"#),
                    Selector::css(r#"input[aria-label*="Name"]"#),
                ],
            ),
            email_input: ResilientLocator::new(
                "邮箱输入框",
                vec![
                    Selector::css(r#"input[type="email"]"#),
                    Selector::css("input[name*=email]"),
                    Selector::css(r#"input[placeholder*="Email"]"#),
                ],
            ),
            phone_input: ResilientLocator::new(
                "手机号输入框",
                vec![
                    Selector::css("input[name*=phone]"),
                    Selector::css(r#"input[placeholder*="Mobile"]"#),
                    Selector::css(r#"input[type="tel"]"#),
                ],
            ),
            file_input: ResilientLocator::new(
                "简历上传框",
                vec![Selector::css(r#"input[type="file"]"#)],
            ),
            submit_button: ResilientLocator::new(
                "提交按钮",
                vec![
                    Selector::css("button").with_text("Submit"),
                    Selector::css("button").with_text("Apply"),
                    Selector::css(r#"input[type="submit"]"#),
                ],
            ),
        }
    }
}

impl Default for JobPage {
    fn default() -> Self {
        Self::new()
    }
}
