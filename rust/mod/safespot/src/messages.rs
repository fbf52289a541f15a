//! User-facing message catalog.

use std::sync::Arc;

use safespot_flux::{Catalog, I18nStore};

pub const INVALID_CREDENTIALS: &str = "auth/invalid_credentials";
pub const INVALID_EMAIL: &str = "reset/invalid_email";
pub const RESET_SENT: &str = "reset/sent";
pub const ACCOUNT_CREATED: &str = "register/created";

fn catalog() -> Catalog {
    Catalog::new(&[
        (
            INVALID_CREDENTIALS,
            &[("en", "Invalid Username or Password"), ("zh-CN", "用户名或密码错误")],
        ),
        (
            INVALID_EMAIL,
            &[("en", "Please enter a valid email address."), ("zh-CN", "请输入有效的电子邮件地址。")],
        ),
        (
            RESET_SENT,
            &[
                ("en", "Password reset instructions sent to {email}"),
                ("zh-CN", "密码重置说明已发送至 {email}"),
            ],
        ),
        (
            ACCOUNT_CREATED,
            &[("en", "Account created for {email}"), ("zh-CN", "已为 {email} 创建账户")],
        ),
    ])
}

/// Message store with the SafeSpot catalog installed.
pub fn store(locale: &str) -> Arc<I18nStore> {
    let i18n = I18nStore::new(locale);
    i18n.handle("#", Arc::new(catalog()));
    Arc::new(i18n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_messages() {
        let i18n = store("en");
        assert_eq!(i18n.get(INVALID_CREDENTIALS), "Invalid Username or Password");
        assert_eq!(i18n.get(INVALID_EMAIL), "Please enter a valid email address.");
        assert_eq!(
            i18n.get(&format!("{RESET_SENT}?email=user@example.com")),
            "Password reset instructions sent to user@example.com"
        );
    }

    #[test]
    fn chinese_messages() {
        let i18n = store("zh-CN");
        assert_eq!(i18n.get(INVALID_CREDENTIALS), "用户名或密码错误");
    }
}
