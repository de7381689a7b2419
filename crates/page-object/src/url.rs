//! URL templates with `:name` segments.
//!
//! A page describes its location as a template such as
//! `/posts/:postID/comments/:commentID`. Segment values are substituted in
//! insertion order; only the first occurrence of each `:name` token is
//! replaced.

use std::fmt::Display;

/// Ordered segment values for a URL template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSegments {
    entries: Vec<(String, String)>,
}

impl UrlSegments {
    /// Create an empty segment list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment value
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a segment value in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.entries.push((name.into(), value.to_string()));
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of segment values
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no segment values were supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for UrlSegments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut segments = Self::new();
        for (name, value) in iter {
            segments.insert(name, value);
        }
        segments
    }
}

/// Substitute segment values into a URL template.
///
/// Keys missing from the template are ignored and placeholders without a
/// value are left untouched.
#[must_use]
pub fn replace_url_segments(template: &str, segments: &UrlSegments) -> String {
    segments
        .iter()
        .fold(template.to_string(), |url, (name, value)| {
            url.replacen(&format!(":{name}"), value, 1)
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    Literal(String),
    Wildcard,
    Parameter(String),
}

/// Matches concrete URLs against a template.
///
/// `:name` and `*` each consume exactly one path segment. Query strings
/// and fragments are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatcher {
    pattern: String,
    segments: Vec<PatternSegment>,
}

impl UrlMatcher {
    /// Compile a template
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let segments = path_segments(pattern)
            .map(|s| {
                if s == "*" {
                    PatternSegment::Wildcard
                } else if let Some(name) = s.strip_prefix(':') {
                    PatternSegment::Parameter(name.to_string())
                } else {
                    PatternSegment::Literal(s.to_string())
                }
            })
            .collect();

        Self {
            pattern: pattern.to_string(),
            segments,
        }
    }

    /// Whether `url` fits the template
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        let parts: Vec<&str> = path_segments(url).collect();
        parts.len() == self.segments.len()
            && self.segments.iter().zip(&parts).all(|(segment, part)| match segment {
                PatternSegment::Literal(lit) => lit == part,
                PatternSegment::Wildcard | PatternSegment::Parameter(_) => true,
            })
    }

    /// Segment values of a matching URL, in template order
    #[must_use]
    pub fn extract(&self, url: &str) -> Option<UrlSegments> {
        if !self.matches(url) {
            return None;
        }
        Some(
            self.segments
                .iter()
                .zip(path_segments(url))
                .filter_map(|(segment, part)| match segment {
                    PatternSegment::Parameter(name) => Some((name.clone(), part)),
                    _ => None,
                })
                .collect(),
        )
    }

    /// The template
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn path_segments(url: &str) -> impl Iterator<Item = &str> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod substitution_tests {
        use super::*;

        #[test]
        fn test_replaces_named_segments() {
            let segments = UrlSegments::new().with("postID", 1).with("commentID", 2);
            assert_eq!(
                replace_url_segments("/posts/:postID/comments/:commentID", &segments),
                "/posts/1/comments/2"
            );
        }

        #[test]
        fn test_unknown_keys_are_ignored() {
            let segments = UrlSegments::new().with("userID", 7);
            assert_eq!(replace_url_segments("/posts/:postID", &segments), "/posts/:postID");
        }

        #[test]
        fn test_only_first_occurrence_is_replaced() {
            let segments = UrlSegments::new().with("id", 3);
            assert_eq!(replace_url_segments("/a/:id/b/:id", &segments), "/a/3/b/:id");
        }

        #[test]
        fn test_empty_segments_leave_template() {
            assert_eq!(replace_url_segments("/", &UrlSegments::new()), "/");
        }

        #[test]
        fn test_insertion_order_decides_overlap() {
            // `:post` is applied first and eats the prefix of `:postID`
            let segments = UrlSegments::new().with("post", "x").with("postID", 1);
            assert_eq!(replace_url_segments("/:postID", &segments), "/xID");
        }
    }

    mod segments_tests {
        use super::*;

        #[test]
        fn test_collect_from_pairs() {
            let segments: UrlSegments = [("postID", 1), ("commentID", 2)].into_iter().collect();
            assert_eq!(segments.len(), 2);
            let pairs: Vec<_> = segments.iter().collect();
            assert_eq!(pairs, vec![("postID", "1"), ("commentID", "2")]);
        }

        #[test]
        fn test_empty() {
            assert!(UrlSegments::new().is_empty());
        }
    }

    mod matcher_tests {
        use super::*;

        #[test]
        fn test_literal() {
            let matcher = UrlMatcher::new("/login");
            assert!(matcher.matches("/login"));
            assert!(matcher.matches("/login/"));
            assert!(!matcher.matches("/logout"));
        }

        #[test]
        fn test_parameters_and_wildcards() {
            let matcher = UrlMatcher::new("/posts/:postID/*");
            assert!(matcher.matches("/posts/1/edit"));
            assert!(!matcher.matches("/posts/1"));
            assert!(!matcher.matches("/posts/1/edit/more"));
        }

        #[test]
        fn test_query_and_fragment_ignored() {
            let matcher = UrlMatcher::new("/search");
            assert!(matcher.matches("/search?q=rust#top"));
        }

        #[test]
        fn test_extract() {
            let matcher = UrlMatcher::new("/posts/:postID/comments/:commentID");
            let segments = matcher.extract("/posts/1/comments/2").unwrap();
            let pairs: Vec<_> = segments.iter().collect();
            assert_eq!(pairs, vec![("postID", "1"), ("commentID", "2")]);
            assert!(matcher.extract("/posts/1").is_none());
            assert_eq!(matcher.pattern(), "/posts/:postID/comments/:commentID");
        }
    }

    proptest! {
        #[test]
        fn prop_substituted_template_matches_itself(
            post in 0u32..10_000,
            comment in 0u32..10_000,
        ) {
            let template = "/posts/:postID/comments/:commentID";
            let segments = UrlSegments::new().with("postID", post).with("commentID", comment);
            let url = replace_url_segments(template, &segments);
            prop_assert_eq!(UrlMatcher::new(template).extract(&url), Some(segments));
        }

        #[test]
        fn prop_template_without_tokens_is_unchanged(
            path in "/[a-z/]{0,20}",
            name in "[a-zA-Z]{1,8}",
            value in 0u32..10_000,
        ) {
            let segments = UrlSegments::new().with(name, value);
            prop_assert_eq!(replace_url_segments(&path, &segments), path);
        }

        #[test]
        fn prop_single_token_is_substituted(
            prefix in "/[a-z]{1,10}/",
            name in "[a-zA-Z]{1,8}",
            value in 0u32..10_000,
        ) {
            let template = format!("{prefix}:{name}");
            let segments = UrlSegments::new().with(name, value);
            prop_assert_eq!(replace_url_segments(&template, &segments), format!("{prefix}{value}"));
        }
    }
}
