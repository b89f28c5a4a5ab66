use crate::infrastructure::{ResilientLocator, Selector};

/// 简历上传成功的提示
pub const RESUME_UPLOADED_PATTERN: &str = r"(?i)Resume has been successfully";

/// 个人主页与账户菜单
pub struct ProfilePage {
    pub profile_link: ResilientLocator,
    pub headline_edit: ResilientLocator,
    pub headline_textbox: ResilientLocator,
    pub save_button: ResilientLocator,
    pub resume_input: ResilientLocator,
    /// 右上角头像，点击后展开账户菜单
    pub avatar: ResilientLocator,
    pub logout_link: ResilientLocator,
}

impl ProfilePage {
    pub fn new() -> Self {
        Self {
            profile_link: ResilientLocator::new(
                "个人主页入口",
                vec![
                    Selector::css("a").with_text("View profile|Profile|My Profile"),
                    Selector::css(r#"a[href*="profile"]"#),
                ],
            ),
            headline_edit: ResilientLocator::new(
                "简历标题编辑",
                vec![
                    Selector::css("#lazyResumeHead .edit"),
                    Selector::css("#lazyResumeHead span").with_text("editOneTheme"),
                ],
            ),
            headline_textbox: ResilientLocator::new(
                "简历标题输入框",
                vec![
                    Selector::css(r#"textarea[placeholder*="Minimum 5 words"]"#),
                    Selector::css("#resumeHeadlineTxt"),
                ],
            ),
            save_button: ResilientLocator::new(
                "保存按钮",
                vec![Selector::css("button").with_text("^Save$")],
            ),
            resume_input: ResilientLocator::new(
                "简历上传框",
                vec![Selector::css(r#"input[type="file"]"#)],
            ),
            avatar: ResilientLocator::new(
                "头像",
                vec![Selector::css("img").with_text("profile|user|avatar")],
            ),
            logout_link: ResilientLocator::new(
                "退出登录",
                vec![
                    Selector::css("a").with_text("Logout"),
                    Selector::css(r#"a[href*="logout"]"#),
                ],
            ),
        }
    }
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new()
    }
}
