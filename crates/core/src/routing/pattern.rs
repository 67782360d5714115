//! Path pattern compilation, matching and formatting.
//!
//! Syntax:
//! - `/users` - literal text, matched ASCII case-insensitively
//! - `:id` - one path segment, exposed as param `id`
//! - `(...)` - optional group, may nest
//! - `*` - any text, shortest match first, exposed as param `splat`
//! - `**` - any text, longest match first, exposed as param `splat`

use std::collections::BTreeMap;

use super::RouteError;

const SPLAT: &str = "splat";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Param(String),
    Splat { greedy: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Token(Token),
    Optional(Vec<Piece>),
}

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    pieces: Vec<Piece>,
    /// Every way to read the optional groups, groups present first.
    variants: Vec<Vec<Token>>,
}

impl PathPattern {
    /// Compile a pattern, rejecting unbalanced groups and unnamed params.
    pub fn parse(source: &str) -> Result<Self, RouteError> {
        let pieces = parse_pieces(source).map_err(|reason| RouteError::InvalidPattern {
            pattern: source.to_string(),
            reason: reason.to_string(),
        })?;
        let variants = expand(&pieces);

        Ok(Self {
            source: source.to_string(),
            pieces,
            variants,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Match a whole pathname, returning the decoded params.
    ///
    /// A single trailing slash on the pathname is ignored.
    pub fn match_path(&self, pathname: &str) -> Option<BTreeMap<String, String>> {
        let path = match pathname.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => pathname,
        };

        self.variants.iter().find_map(|tokens| {
            let mut captured = Vec::new();
            match_tokens(tokens, path, &mut captured).then(|| {
                captured
                    .into_iter()
                    .map(|(name, value)| (name, decode(value)))
                    .collect()
            })
        })
    }

    /// Build a path from params.
    ///
    /// Optional groups whose params are missing are left out; a missing
    /// required param is an error.
    pub fn format(&self, params: &BTreeMap<String, String>) -> Result<String, RouteError> {
        let mut out = String::new();
        format_pieces(&self.pieces, params, &mut out).map_err(|param| {
            RouteError::MissingParam {
                pattern: self.source.clone(),
                param,
            }
        })?;
        Ok(out)
    }
}

/// Resolve a child path against its parent's full path.
///
/// Absolute child paths stand alone; relative ones are appended.
pub fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), path)
    }
}

fn parse_pieces(source: &str) -> Result<Vec<Piece>, &'static str> {
    let mut stack: Vec<Vec<Piece>> = vec![Vec::new()];
    let mut literal = String::new();
    let mut chars = source.chars().peekable();

    fn flush(literal: &mut String, stack: &mut [Vec<Piece>]) {
        if !literal.is_empty() {
            if let Some(top) = stack.last_mut() {
                top.push(Piece::Token(Token::Literal(std::mem::take(literal))));
            }
        }
    }

    while let Some(c) = chars.next() {
        match c {
            ':' => {
                flush(&mut literal, &mut stack);
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if !(next.is_ascii_alphanumeric() || next == '_') {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                if name.is_empty() {
                    return Err("param without a name");
                }
                if let Some(top) = stack.last_mut() {
                    top.push(Piece::Token(Token::Param(name)));
                }
            }
            '*' => {
                flush(&mut literal, &mut stack);
                let greedy = chars.next_if_eq(&'*').is_some();
                if let Some(top) = stack.last_mut() {
                    top.push(Piece::Token(Token::Splat { greedy }));
                }
            }
            '(' => {
                flush(&mut literal, &mut stack);
                stack.push(Vec::new());
            }
            ')' => {
                flush(&mut literal, &mut stack);
                if stack.len() < 2 {
                    return Err("unbalanced ')'");
                }
                let group = stack.pop().unwrap_or_default();
                if let Some(top) = stack.last_mut() {
                    top.push(Piece::Optional(group));
                }
            }
            other => literal.push(other),
        }
    }

    flush(&mut literal, &mut stack);
    if stack.len() != 1 {
        return Err("unclosed group");
    }
    Ok(stack.pop().unwrap_or_default())
}

fn expand(pieces: &[Piece]) -> Vec<Vec<Token>> {
    let mut variants: Vec<Vec<Token>> = vec![Vec::new()];

    for piece in pieces {
        match piece {
            Piece::Token(token) => {
                for variant in &mut variants {
                    variant.push(token.clone());
                }
            }
            Piece::Optional(group) => {
                let alternatives = expand(group);
                let mut next = Vec::with_capacity(variants.len() * (alternatives.len() + 1));
                for prefix in &variants {
                    for alternative in &alternatives {
                        let mut variant = prefix.clone();
                        variant.extend(alternative.iter().cloned());
                        next.push(variant);
                    }
                    next.push(prefix.clone());
                }
                variants = next;
            }
        }
    }

    variants
}

fn match_tokens<'a>(
    tokens: &[Token],
    input: &'a str,
    captured: &mut Vec<(String, &'a str)>,
) -> bool {
    let Some((token, rest)) = tokens.split_first() else {
        return input.is_empty();
    };

    match token {
        Token::Literal(literal) => match input.get(..literal.len()) {
            Some(head) if head.eq_ignore_ascii_case(literal) => {
                match_tokens(rest, &input[literal.len()..], captured)
            }
            _ => false,
        },
        Token::Param(name) => {
            let limit = input
                .find(|c| matches!(c, '/' | '?' | '#'))
                .unwrap_or(input.len());
            (1..=limit)
                .rev()
                .any(|end| try_capture(name, input, end, rest, captured))
        }
        Token::Splat { greedy } => {
            let ends: Box<dyn Iterator<Item = usize>> = if *greedy {
                Box::new((0..=input.len()).rev())
            } else {
                Box::new(0..=input.len())
            };
            ends.into_iter()
                .any(|end| try_capture(SPLAT, input, end, rest, captured))
        }
    }
}

fn try_capture<'a>(
    name: &str,
    input: &'a str,
    end: usize,
    rest: &[Token],
    captured: &mut Vec<(String, &'a str)>,
) -> bool {
    if !input.is_char_boundary(end) {
        return false;
    }
    captured.push((name.to_string(), &input[..end]));
    if match_tokens(rest, &input[end..], captured) {
        return true;
    }
    captured.pop();
    false
}

fn format_pieces(
    pieces: &[Piece],
    params: &BTreeMap<String, String>,
    out: &mut String,
) -> Result<(), String> {
    for piece in pieces {
        match piece {
            Piece::Token(Token::Literal(literal)) => out.push_str(literal),
            Piece::Token(Token::Param(name)) => {
                let value = params.get(name).ok_or_else(|| name.clone())?;
                out.push_str(&urlencoding::encode(value));
            }
            Piece::Token(Token::Splat { .. }) => {
                out.push_str(params.get(SPLAT).map(String::as_str).unwrap_or_default());
            }
            Piece::Optional(group) => {
                let mut buf = String::new();
                if format_pieces(group, params, &mut buf).is_ok() {
                    out.push_str(&buf);
                }
            }
        }
    }
    Ok(())
}

fn decode(value: &str) -> String {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_literal_match() {
        let pattern = PathPattern::parse("/foo").unwrap();
        assert_eq!(pattern.match_path("/foo"), Some(BTreeMap::new()));
        assert_eq!(pattern.match_path("/FOO"), Some(BTreeMap::new()));
        assert_eq!(pattern.match_path("/foo/"), Some(BTreeMap::new()));
        assert_eq!(pattern.match_path("/foobar"), None);
        assert_eq!(pattern.match_path("/"), None);
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::parse("/").unwrap();
        assert!(pattern.match_path("/").is_some());
        assert!(pattern.match_path("/foo").is_none());
    }

    #[test]
    fn test_param_match() {
        let pattern = PathPattern::parse("/users/:id").unwrap();
        assert_eq!(pattern.match_path("/users/7"), Some(params(&[("id", "7")])));
        assert_eq!(pattern.match_path("/users/"), None);
        assert_eq!(pattern.match_path("/users/7/posts"), None);
    }

    #[test]
    fn test_param_values_are_decoded() {
        let pattern = PathPattern::parse("/tags/:name").unwrap();
        assert_eq!(
            pattern.match_path("/tags/rust%20lang"),
            Some(params(&[("name", "rust lang")]))
        );
    }

    #[test]
    fn test_optional_group() {
        let pattern = PathPattern::parse("/params(/:a)").unwrap();
        assert_eq!(pattern.match_path("/params/1"), Some(params(&[("a", "1")])));
        assert_eq!(pattern.match_path("/params"), Some(BTreeMap::new()));
        assert_eq!(pattern.match_path("/params/1/2"), None);
    }

    #[test]
    fn test_nested_optional_groups() {
        let pattern = PathPattern::parse("/archive(/:year(/:month))").unwrap();
        assert_eq!(
            pattern.match_path("/archive/2024/05"),
            Some(params(&[("year", "2024"), ("month", "05")]))
        );
        assert_eq!(
            pattern.match_path("/archive/2024"),
            Some(params(&[("year", "2024")]))
        );
        assert_eq!(pattern.match_path("/archive"), Some(BTreeMap::new()));
    }

    #[test]
    fn test_splats() {
        let lazy = PathPattern::parse("/files/*.txt").unwrap();
        assert_eq!(
            lazy.match_path("/files/a/b.txt"),
            Some(params(&[("splat", "a/b")]))
        );

        let greedy = PathPattern::parse("/docs/**").unwrap();
        assert_eq!(
            greedy.match_path("/docs/guide/intro"),
            Some(params(&[("splat", "guide/intro")]))
        );
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            PathPattern::parse("/a(/b"),
            Err(RouteError::InvalidPattern { reason, .. }) if reason == "unclosed group"
        ));
        assert!(matches!(
            PathPattern::parse("/a)"),
            Err(RouteError::InvalidPattern { reason, .. }) if reason == "unbalanced ')'"
        ));
        assert!(matches!(
            PathPattern::parse("/a/:"),
            Err(RouteError::InvalidPattern { reason, .. }) if reason == "param without a name"
        ));
    }

    #[test]
    fn test_format() {
        let pattern = PathPattern::parse("/users/:id(/:tab)").unwrap();
        assert_eq!(
            pattern.format(&params(&[("id", "7")])).unwrap(),
            "/users/7"
        );
        assert_eq!(
            pattern.format(&params(&[("id", "7"), ("tab", "posts")])).unwrap(),
            "/users/7/posts"
        );
        assert_eq!(
            pattern.format(&BTreeMap::new()),
            Err(RouteError::MissingParam {
                pattern: "/users/:id(/:tab)".to_string(),
                param: "id".to_string(),
            })
        );
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/users", ":id"), "/users/:id");
        assert_eq!(join("/users/", ":id"), "/users/:id");
        assert_eq!(join("/users", "/about"), "/about");
        assert_eq!(join("/users", ""), "/users");
        assert_eq!(join("/", "foo"), "/foo");
    }
}
