//! Parsing utilities for the text notation of games

use std::fmt::{self, Display};

/// Implement [`std::str::FromStr`] using parser. Type must have
/// `fn parse(Parser<'_>) -> Result<(Parser<'_>, Self), ParseError>` method implemented.
macro_rules! impl_from_str_via_parser {
    ($t: ident) => {
        impl std::str::FromStr for $t {
            type Err = $crate::parsing::ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::parsing::parse_all(s, $t::parse)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                use std::str::FromStr;

                $t::from_str(&String::deserialize(deserializer)?).map_err(serde::de::Error::custom)
            }
        }
    };
}
pub(crate) use impl_from_str_via_parser;

/// Run `parser` on the whole `input`, allowing surrounding whitespace
pub(crate) fn parse_all<'s, T>(
    input: &'s str,
    parser: impl FnOnce(Parser<'s>) -> Result<(Parser<'s>, T), ParseError>,
) -> Result<T, ParseError> {
    let (p, result) = parser(Parser::new(input).trim_whitespace())?;
    let p = p.trim_whitespace();
    if p.is_empty() {
        Ok(result)
    } else {
        Err(p.error("end of input"))
    }
}

/// Parsing failure with location in the original input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    offset: usize,
    expected: &'static str,
}

impl ParseError {
    /// Byte offset in the input where parsing failed
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Description of what the parser expected at [`Self::offset`]
    pub const fn expected(&self) -> &'static str {
        self.expected
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at byte {}: expected {}",
            self.offset, self.expected
        )
    }
}

impl std::error::Error for ParseError {}

#[must_use]
#[derive(Debug, Clone, Copy)]
/// String parser that tracks its position since construction
pub struct Parser<'s> {
    source: &'s str,
    offset: usize,
}

impl<'s> Parser<'s> {
    /// Create new parser marking the beginning of the input
    pub const fn new(source: &'s str) -> Parser<'s> {
        Parser { source, offset: 0 }
    }

    /// Remaining unparsed input
    pub fn remaining(&self) -> &'s str {
        &self.source[self.offset..]
    }

    /// Check if whole input has been consumed
    pub fn is_empty(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Number of bytes consumed so far
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Construct an error at the current position
    pub const fn error(self, expected: &'static str) -> ParseError {
        ParseError {
            offset: self.offset,
            expected,
        }
    }

    const fn advance(self, bytes: usize) -> Parser<'s> {
        Parser {
            source: self.source,
            offset: self.offset + bytes,
        }
    }

    /// Remove whitespace from the beginning of the input
    pub fn trim_whitespace(self) -> Parser<'s> {
        let rest = self.remaining();
        self.advance(rest.len() - rest.trim_start().len())
    }

    /// Next character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Parse one ascii char if input is non-empty and it matches the `expected`
    pub fn parse_ascii_char(self, expected: char) -> Option<Parser<'s>> {
        debug_assert!(expected.is_ascii());
        (self.peek() == Some(expected)).then(|| self.advance(1))
    }

    /// Like [`Self::parse_ascii_char`] but fails with an error describing `expected`
    pub fn expect_ascii_char(self, expected: char) -> Result<Parser<'s>, ParseError> {
        self.parse_ascii_char(expected).ok_or_else(|| {
            self.error(match expected {
                '{' => "'{'",
                '}' => "'}'",
                '|' => "'|'",
                ',' => "','",
                '(' => "'('",
                ')' => "')'",
                _ => "a delimiter",
            })
        })
    }

    /// Consume `keyword` if the input starts with it
    pub fn expect_keyword(self, keyword: &'static str) -> Result<Parser<'s>, ParseError> {
        if self.remaining().starts_with(keyword) {
            Ok(self.advance(keyword.len()))
        } else {
            Err(self.error(keyword))
        }
    }

    fn digits(&self) -> usize {
        self.remaining()
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count()
    }

    /// Parse unsigned number
    pub fn parse_u32(self) -> Result<(Parser<'s>, u32), ParseError> {
        let len = self.digits();
        if len == 0 {
            return Err(self.error("a natural number"));
        }
        let value = self.remaining()[..len]
            .parse::<u32>()
            .map_err(|_| self.error("a number that fits in 32 bits"))?;
        Ok((self.advance(len), value))
    }

    /// Parse signed number
    pub fn parse_i64(self) -> Result<(Parser<'s>, i64), ParseError> {
        let (p, negative) = match self.parse_ascii_char('-') {
            Some(p) => (p, true),
            None => (self, false),
        };
        let len = p.digits();
        if len == 0 {
            return Err(p.error("an integer"));
        }
        let magnitude = p.remaining()[..len]
            .parse::<i64>()
            .map_err(|_| p.error("a number that fits in 64 bits"))?;
        let value = if negative { -magnitude } else { magnitude };
        Ok((p.advance(len), value))
    }

    /// Parse zero or more comma-separated items using `item` parser, stopping before the first
    /// token that cannot start an item. Whitespace around items and commas is skipped.
    pub fn parse_list<T, F>(self, starts_item: fn(char) -> bool, item: F) -> ListResult<'s, T>
    where
        F: Fn(Parser<'s>) -> Result<(Parser<'s>, T), ParseError>,
    {
        let mut p = self.trim_whitespace();
        let mut acc = Vec::new();
        if !p.peek().is_some_and(starts_item) {
            return Ok((p, acc));
        }
        loop {
            let (next, value) = item(p)?;
            acc.push(value);
            p = next.trim_whitespace();
            match p.parse_ascii_char(',') {
                Some(after_comma) => p = after_comma.trim_whitespace(),
                None => return Ok((p, acc)),
            }
        }
    }
}

/// Result of [`Parser::parse_list`]
pub type ListResult<'s, T> = Result<(Parser<'s>, Vec<T>), ParseError>;
