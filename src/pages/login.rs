use crate::infrastructure::{ResilientLocator, Selector};

/// 登录页
pub struct LoginPage {
    pub username_input: ResilientLocator,
    pub password_input: ResilientLocator,
    pub login_button: ResilientLocator,
    /// 登录成功后出现的个人主页链接
    pub profile_link: ResilientLocator,
}

impl LoginPage {
    pub fn new() -> Self {
        Self {
            username_input: ResilientLocator::new(
                "用户名输入框",
                vec![
                    Selector::css(r#"input[placeholder="Enter Email ID / Username"]"#),
                    Selector::css("#usernameField"),
                    Selector::css(r#"input[type="email"]"#),
                ],
            ),
            password_input: ResilientLocator::new(
                "密码输入框",
                vec![
                    Selector::css(r#"input[placeholder="Enter Password"]"#),
                    Selector::css("#passwordField"),
                    Selector::css(r#"input[type="password"]"#),
                ],
            ),
            login_button: ResilientLocator::new(
                "登录按钮",
                vec![
                    Selector::css("button").with_text("^Login$"),
                    Selector::css(r#"button[type="submit"]"#),
                ],
            ),
            profile_link: ResilientLocator::new(
                "个人主页链接",
                vec![Selector::css("a").with_text("Profile|View profile|My Profile")],
            ),
        }
    }
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new()
    }
}
