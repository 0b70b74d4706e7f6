//! Textual path parser.
//!
//! Accepts `root.contents[1]`, `$.root.contents[1]`, `$['a b'][0]`. Bracketed
//! integers always become index segments; against a scalar-keyed map they look
//! up the integer key.

use super::ast::{Path, PathSegment};
use crate::error::{DmapError, Result};

/// Parser for textual paths.
pub struct Parser {
    input: String,
    chars: Vec<char>,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given path text.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            chars: input.chars().collect(),
            position: 0,
        }
    }

    /// Parses path text into a [`Path`]. Empty text and `$` both denote the root.
    pub fn parse(input: &str) -> Result<Path> {
        let mut parser = Parser::new(input);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<Path> {
        let mut segments = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some('$') {
            self.next();
        } else if !self.is_eof() && self.peek() != Some('[') {
            segments.push(PathSegment::Key(self.parse_identifier()?));
        }

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('.') => {
                    self.next();
                    self.skip_whitespace();
                    segments.push(PathSegment::Key(self.parse_identifier()?));
                }
                Some('[') => segments.push(self.parse_bracket_expression()?),
                Some(ch) => return Err(self.error(format!("unexpected character '{}'", ch))),
                None => break,
            }
        }

        Ok(Path::new(segments))
    }

    fn error(&self, reason: impl Into<String>) -> DmapError {
        DmapError::InvalidPath {
            input: self.input.clone(),
            position: self.position,
            reason: reason.into(),
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.position += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        self.skip_whitespace();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.next();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{}', found '{}'", expected, ch))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    fn parse_identifier(&mut self) -> Result<String> {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' || (ch == '-' && !name.is_empty()) {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            Err(self.error("expected identifier"))
        } else {
            Ok(name)
        }
    }

    /// Parses `['key']`, `["key"]`, or `[index]`.
    fn parse_bracket_expression(&mut self) -> Result<PathSegment> {
        self.expect('[')?;
        self.skip_whitespace();

        let segment = match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.next();
                PathSegment::Key(self.parse_quoted(quote)?)
            }
            Some('-' | '0'..='9') => PathSegment::Index(self.parse_index()?),
            Some(ch) => return Err(self.error(format!("unexpected character '{}' in brackets", ch))),
            None => return Err(self.error("unterminated bracket")),
        };

        self.expect(']')?;
        Ok(segment)
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String> {
        let mut value = String::new();
        loop {
            match self.next() {
                Some(ch) if ch == quote => return Ok(value),
                Some('\\') => match self.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some(ch @ ('\\' | '\'' | '"')) => value.push(ch),
                    Some(ch) => return Err(self.error(format!("invalid escape '\\{}'", ch))),
                    None => return Err(self.error("unterminated escape")),
                },
                Some(ch) => value.push(ch),
                None => return Err(self.error(format!("missing closing quote {}", quote))),
            }
        }
    }

    fn parse_index(&mut self) -> Result<i64> {
        let start = self.position;
        let mut digits = String::new();
        if self.peek() == Some('-') {
            digits.push('-');
            self.next();
        }
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.next();
            } else {
                break;
            }
        }
        digits.parse::<i64>().map_err(|_| {
            self.position = start;
            self.error(format!("invalid index '{}'", digits))
        })
    }
}

impl std::str::FromStr for Path {
    type Err = DmapError;

    fn from_str(s: &str) -> Result<Self> {
        Parser::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(input: &str) -> Vec<PathSegment> {
        Parser::parse(input).unwrap().into_segments()
    }

    #[test]
    fn test_parse_root() {
        assert!(segments("$").is_empty());
        assert!(segments("").is_empty());
        assert!(segments("  ").is_empty());
    }

    #[test]
    fn test_parse_bare_leading_key() {
        assert_eq!(
            segments("root.contents[1]"),
            vec![
                PathSegment::Key("root".to_string()),
                PathSegment::Key("contents".to_string()),
                PathSegment::Index(1),
            ]
        );
    }

    #[test]
    fn test_parse_dollar_prefix() {
        assert_eq!(
            segments("$.root.title"),
            vec![
                PathSegment::Key("root".to_string()),
                PathSegment::Key("title".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_bracket_notation() {
        assert_eq!(
            segments(r#"$['a b']["c"][0]"#),
            vec![
                PathSegment::Key("a b".to_string()),
                PathSegment::Key("c".to_string()),
                PathSegment::Index(0),
            ]
        );
    }

    #[test]
    fn test_parse_leading_bracket() {
        assert_eq!(segments("[2].name"), vec![PathSegment::Index(2), PathSegment::Key("name".to_string())]);
    }

    #[test]
    fn test_parse_negative_index() {
        assert_eq!(segments("$.items[-1]")[1], PathSegment::Index(-1));
    }

    #[test]
    fn test_parse_escapes() {
        assert_eq!(segments(r"$['it\'s']")[0], PathSegment::Key("it's".to_string()));
    }

    #[test]
    fn test_parse_whitespace_handling() {
        assert_eq!(
            segments("$ . store [ 0 ]"),
            vec![PathSegment::Key("store".to_string()), PathSegment::Index(0)]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Parser::parse("$.").is_err());
        assert!(Parser::parse("$.a[").is_err());
        assert!(Parser::parse("$.a['x").is_err());
        assert!(Parser::parse("$.a[-]").is_err());
        assert!(Parser::parse("$.a[*]").is_err());
        assert!(Parser::parse("$a").is_err());
    }

    #[test]
    fn test_error_position() {
        match Parser::parse("$.a[x]") {
            Err(DmapError::InvalidPath { position, .. }) => assert_eq!(position, 4),
            other => panic!("expected InvalidPath, got {:?}", other),
        }
    }

    #[test]
    fn test_display_round_trip() {
        for input in ["$", "$.root.contents[1]", "$['a b'][-2].c"] {
            assert_eq!(Parser::parse(input).unwrap().to_string(), input);
        }
    }
}
