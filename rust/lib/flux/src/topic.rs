use std::sync::{PoisonError, RwLock};

/// MQTT-style topic pattern.
///
/// Segments are separated by `/`:
/// - `+` matches exactly one segment
/// - `#` matches zero or more trailing segments (only valid last)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Single,
    Multi,
}

impl Pattern {
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('/')
            .map(|s| match s {
                "+" => Segment::Single,
                "#" => Segment::Multi,
                lit => Segment::Literal(lit.to_string()),
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether a concrete topic path matches this pattern.
    pub fn matches(&self, topic: &str) -> bool {
        let mut levels = topic.split('/');
        for segment in &self.segments {
            match segment {
                Segment::Multi => return true,
                Segment::Single => {
                    if levels.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(lit) => match levels.next() {
                    Some(level) if level == lit => {}
                    _ => return false,
                },
            }
        }
        levels.next().is_none()
    }
}

/// Thread-safe registry of values keyed by topic pattern.
///
/// Registration order is preserved, so `matching` returns values in the
/// order they were inserted.
pub struct Topics<T> {
    entries: RwLock<Vec<(Pattern, T)>>,
}

impl<T: Clone> Topics<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, pattern: &str, value: T) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((Pattern::parse(pattern), value));
    }

    /// All values whose pattern matches `topic`.
    pub fn matching(&self, topic: &str) -> Vec<T> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(p, _)| p.matches(topic))
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Remove values registered under exactly `pattern` that satisfy `pred`.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove<F>(&self, pattern: &str, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|(p, v)| !(p.as_str() == pattern && pred(v)));
        entries.len() < before
    }

    /// Whether anything is registered under exactly `pattern`.
    pub fn has_pattern(&self, pattern: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|(p, _)| p.as_str() == pattern)
    }
}

impl<T: Clone> Default for Topics<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pattern_matches_exact_path_only() {
        let p = Pattern::parse("auth/state");
        assert!(p.matches("auth/state"));
        assert!(!p.matches("auth"));
        assert!(!p.matches("auth/state/extra"));
        assert!(!p.matches("auth/notice"));
    }

    #[test]
    fn single_wildcard_matches_one_level() {
        let p = Pattern::parse("auth/+");
        assert!(p.matches("auth/state"));
        assert!(p.matches("auth/validation"));
        assert!(!p.matches("auth"));
        assert!(!p.matches("auth/state/x"));
    }

    #[test]
    fn multi_wildcard_matches_rest() {
        let p = Pattern::parse("map/#");
        assert!(p.matches("map"));
        assert!(p.matches("map/state"));
        assert!(p.matches("map/state/pin"));
        assert!(!p.matches("profile/state"));
        assert!(Pattern::parse("#").matches("anything/at/all"));
    }

    #[test]
    fn similar_prefix_does_not_match() {
        let p = Pattern::parse("auth/#");
        assert!(!p.matches("authorization/state"));
    }

    #[test]
    fn matching_preserves_insertion_order() {
        let topics = Topics::new();
        topics.insert("#", 1);
        topics.insert("auth/state", 2);
        topics.insert("auth/+", 3);
        topics.insert("map/state", 4);

        assert_eq!(topics.matching("auth/state"), vec![1, 2, 3]);
        assert_eq!(topics.matching("map/state"), vec![1, 4]);
    }

    #[test]
    fn remove_by_pattern_and_predicate() {
        let topics = Topics::new();
        topics.insert("auth/state", 1);
        topics.insert("auth/state", 2);
        topics.insert("auth/+", 1);

        assert!(topics.remove("auth/state", |v| *v == 1));
        assert_eq!(topics.matching("auth/state"), vec![2, 1]);
        assert!(!topics.remove("auth/state", |v| *v == 9));
    }

    #[test]
    fn has_pattern_is_exact() {
        let topics = Topics::new();
        topics.insert("auth/+", ());
        assert!(topics.has_pattern("auth/+"));
        assert!(!topics.has_pattern("auth/state"));
    }
}
