//! Request locations.

use std::collections::BTreeMap;

use serde::Serialize;

/// Path, raw query string and parsed query of a request or history entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    pub pathname: String,
    /// Raw query string including the leading `?`, or empty.
    pub search: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    /// Parse a path with optional query string and fragment.
    ///
    /// The fragment is dropped; a missing leading slash is added. Repeated
    /// query keys keep their last value.
    pub fn parse(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, query),
            None => (url, ""),
        };

        let pathname = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let search = if query.is_empty() {
            String::new()
        } else {
            format!("?{query}")
        };

        let query = url::form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        Self {
            pathname,
            search,
            query,
        }
    }

    /// The path with its query string, as it appears in a request line.
    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_only() {
        let location = Location::parse("/foo");
        assert_eq!(location.pathname, "/foo");
        assert_eq!(location.search, "");
        assert!(location.query.is_empty());
    }

    #[test]
    fn test_parse_query_and_fragment() {
        let location = Location::parse("/params/1?b=2&c=hello+world#top");
        assert_eq!(location.pathname, "/params/1");
        assert_eq!(location.search, "?b=2&c=hello+world");
        assert_eq!(location.query.get("b").map(String::as_str), Some("2"));
        assert_eq!(
            location.query.get("c").map(String::as_str),
            Some("hello world")
        );
    }

    #[test]
    fn test_parse_adds_leading_slash() {
        assert_eq!(Location::parse("foo").pathname, "/foo");
        assert_eq!(Location::parse("").pathname, "/");
    }

    #[test]
    fn test_path_and_query() {
        assert_eq!(Location::parse("/a?x=1").path_and_query(), "/a?x=1");
        assert_eq!(Location::parse("/a").path_and_query(), "/a");
    }
}
