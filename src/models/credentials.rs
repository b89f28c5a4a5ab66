use std::fmt;

use serde::Deserialize;

use crate::error::ConfigError;

/// 登录凭据，启动时加载一次，之后只读
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
        let credentials = Self {
            email: email.into(),
            password: password.into(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.email.trim().is_empty() {
            return Err(ConfigError::EmptyCredential { field: "email" });
        }
        if self.password.is_empty() {
            return Err(ConfigError::EmptyCredential { field: "password" });
        }
        Ok(())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// 邮箱 @ 之前的部分，用作申请表单中的姓名
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_fields() {
        assert!(matches!(
            Credentials::new("  ", "pw"),
            Err(ConfigError::EmptyCredential { field: "email" })
        ));
        assert!(matches!(
            Credentials::new("a@b.com", ""),
            Err(ConfigError::EmptyCredential { field: "password" })
        ));
    }

    #[test]
    fn test_display_name() {
        let c = Credentials::new("jane.doe@example.com", "pw").unwrap();
        assert_eq!(c.display_name(), "jane.doe");
    }

    #[test]
    fn test_debug_redacts_password() {
        let c = Credentials::new("jane@example.com", "secret").unwrap();
        let shown = format!("{:?}", c);
        assert!(shown.contains("jane@example.com"));
        assert!(!shown.contains("secret"));
    }
}
