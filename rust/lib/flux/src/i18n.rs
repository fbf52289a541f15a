//! I18nStore: synchronous, path-routed message lookup.
//!
//! The UI (and handlers producing user-facing text) read messages by URL:
//! `"reset/sent?email=a@b.co"`. Handlers are registered per path pattern
//! and receive the parsed query plus the active locale.
//!
//! ```ignore
//! let i18n = I18nStore::new("en");
//! i18n.handle("reset/#", Arc::new(Catalog::new(&[
//!     ("reset/sent", &[("en", "Instructions sent to {email}")]),
//! ])));
//! assert_eq!(i18n.get("reset/sent?email=a@b.co"), "Instructions sent to a@b.co");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::topic::Topics;

/// Parsed query string: `email=a@b.co&count=3`.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Parse a query string (without the leading `?`).
    pub fn parse(query: &str) -> Self {
        Self(
            query
                .split('&')
                .filter(|s| !s.is_empty())
                .filter_map(|pair| {
                    let (k, v) = pair.split_once('=')?;
                    Some((k.to_string(), v.to_string()))
                })
                .collect(),
        )
    }

    /// Builder: add a parameter without going through a query string.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replace every `{key}` in `template` with its value.
    ///
    /// Placeholders without a matching parameter are left as-is.
    pub fn fill(&self, template: &str) -> String {
        self.0.iter().fold(template.to_string(), |acc, (k, v)| {
            acc.replace(&format!("{{{k}}}"), v)
        })
    }
}

/// A translation handler, registered per path pattern.
pub trait I18nHandler: Send + Sync + 'static {
    fn translate(&self, path: &str, query: &QueryParams, locale: &str) -> String;
}

impl<F> I18nHandler for F
where
    F: Fn(&str, &QueryParams, &str) -> String + Send + Sync + 'static,
{
    fn translate(&self, path: &str, query: &QueryParams, locale: &str) -> String {
        (self)(path, query, locale)
    }
}

/// Static message table keyed by exact path, then locale.
///
/// Falls back to the `en` template when the locale has no entry, and to
/// the path itself when the path is unknown.
pub struct Catalog {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Catalog {
    pub fn new(entries: &[(&'static str, &[(&'static str, &'static str)])]) -> Self {
        let messages = entries
            .iter()
            .map(|(path, locales)| (*path, locales.iter().copied().collect()))
            .collect();
        Self { messages }
    }
}

impl I18nHandler for Catalog {
    fn translate(&self, path: &str, query: &QueryParams, locale: &str) -> String {
        let Some(locales) = self.messages.get(path) else {
            return path.to_string();
        };
        match locales.get(locale).or_else(|| locales.get("en")) {
            Some(template) => query.fill(template),
            None => path.to_string(),
        }
    }
}

/// Synchronous translation store with pattern-routed handlers.
pub struct I18nStore {
    handlers: Topics<Arc<dyn I18nHandler>>,
    locale: RwLock<String>,
}

impl I18nStore {
    pub fn new(locale: &str) -> Self {
        Self {
            handlers: Topics::new(),
            locale: RwLock::new(locale.to_string()),
        }
    }

    pub fn handle(&self, pattern: &str, handler: Arc<dyn I18nHandler>) {
        self.handlers.insert(pattern, handler);
    }

    /// Translate `"path"` or `"path?key=value&..."`.
    ///
    /// The first matching handler wins. No match returns the path.
    pub fn get(&self, url: &str) -> String {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        self.format(path, &QueryParams::parse(query))
    }

    /// Translate `path` with pre-built parameters. Use this when a value
    /// may itself contain `&` or `=`.
    pub fn format(&self, path: &str, params: &QueryParams) -> String {
        let locale = self.locale();
        match self.handlers.matching(path).first() {
            Some(handler) => handler.translate(path, params, &locale),
            None => path.to_string(),
        }
    }

    pub fn set_locale(&self, locale: &str) {
        *self.locale.write().unwrap_or_else(PoisonError::into_inner) = locale.to_string();
    }

    pub fn locale(&self) -> String {
        self.locale.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(&[
            ("auth/invalid", &[("en", "Invalid Username or Password"), ("zh-CN", "用户名或密码错误")]),
            ("reset/sent", &[("en", "Password reset instructions sent to {email}")]),
        ])
    }

    // ── QueryParams ──

    #[test]
    fn parse_query_params() {
        let q = QueryParams::parse("email=a@b.co&count=3");
        assert_eq!(q.get("email"), Some("a@b.co"));
        assert_eq!(q.get("count"), Some("3"));
        assert_eq!(q.get("missing"), None);
        assert!(QueryParams::parse("").is_empty());
    }

    #[test]
    fn fill_replaces_known_placeholders() {
        let q = QueryParams::parse("email=a@b.co");
        assert_eq!(q.fill("sent to {email} ({other})"), "sent to a@b.co ({other})");
    }

    // ── Catalog ──

    #[test]
    fn catalog_translates_by_locale() {
        let i18n = I18nStore::new("en");
        i18n.handle("#", Arc::new(catalog()));

        assert_eq!(i18n.get("auth/invalid"), "Invalid Username or Password");
        i18n.set_locale("zh-CN");
        assert_eq!(i18n.get("auth/invalid"), "用户名或密码错误");
    }

    #[test]
    fn catalog_falls_back_to_english() {
        let i18n = I18nStore::new("zh-CN");
        i18n.handle("#", Arc::new(catalog()));
        assert_eq!(
            i18n.get("reset/sent?email=user@example.com"),
            "Password reset instructions sent to user@example.com"
        );
    }

    #[test]
    fn unknown_path_returns_path() {
        let i18n = I18nStore::new("en");
        assert_eq!(i18n.get("unknown/key"), "unknown/key");
        i18n.handle("#", Arc::new(catalog()));
        assert_eq!(i18n.get("unknown/key?x=1"), "unknown/key");
    }

    #[test]
    fn format_takes_values_verbatim() {
        let i18n = I18nStore::new("en");
        i18n.handle("#", Arc::new(catalog()));
        let params = QueryParams::default().with("email", "a&b=c@example.com");
        assert_eq!(
            i18n.format("reset/sent", &params),
            "Password reset instructions sent to a&b=c@example.com"
        );
    }

    // ── Closure handlers ──

    #[test]
    fn first_matching_handler_wins() {
        let i18n = I18nStore::new("en");
        i18n.handle("map/+", Arc::new(|path: &str, _: &QueryParams, _: &str| format!("first:{path}")));
        i18n.handle("#", Arc::new(|_: &str, _: &QueryParams, _: &str| "second".to_string()));

        assert_eq!(i18n.get("map/pin"), "first:map/pin");
        assert_eq!(i18n.get("help/faq"), "second");
    }
}
