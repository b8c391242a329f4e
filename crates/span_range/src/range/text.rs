//! Protobuf text format for span ranges.
//!
//! Printing follows the single-line form of the protobuf text printer and
//! skips proto3 default values, so `StaticRange::new(0, 5)` prints as
//! `end_span_number: 5` and the matching config as
//! `static_range { end_span_number: 5 }`.
//!
//! Parsing accepts what the standard text parser accepts for these two
//! messages: `#` comments, fields in any order, an optional `:` before a
//! nested message, `{}` or `<>` around it, optional `,`/`;` separators, and
//! decimal, `0x` hexadecimal or leading-`0` octal integers, with a `-` sign
//! that may stand apart from the digits. A leading zero followed by anything
//! but octal digits is rejected.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{
    error::{RangeConfigError, TextErrorKind},
    range::{Range, RangeConfig, StaticRange},
};

const START_SPAN_NUMBER: &str = "start_span_number";
const END_SPAN_NUMBER: &str = "end_span_number";
const STATIC_RANGE: &str = "static_range";

impl Display for StaticRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        if self.start_span_number != 0 {
            write!(f, "{START_SPAN_NUMBER}: {}", self.start_span_number)?;
            separator = " ";
        }
        if self.end_span_number != 0 {
            write!(f, "{separator}{END_SPAN_NUMBER}: {}", self.end_span_number)?;
        }
        Ok(())
    }
}

impl Display for RangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.range {
            Some(Range::Static(static_range)) if *static_range == StaticRange::default() => {
                write!(f, "{STATIC_RANGE} {{ }}")
            }
            Some(Range::Static(static_range)) => write!(f, "{STATIC_RANGE} {{ {static_range} }}"),
            None => Ok(()),
        }
    }
}

impl FromStr for StaticRange {
    type Err = RangeConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s)?;
        parser.static_range_fields(None)
    }
}

impl FromStr for RangeConfig {
    type Err = RangeConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s)?;
        parser.range_config()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Number(&'a str),
    Symbol(char),
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) | Token::Number(s) => write!(f, "{s}"),
            Token::Symbol(c) => write!(f, "{c}"),
        }
    }
}

fn text_error(offset: usize, kind: TextErrorKind) -> RangeConfigError {
    RangeConfigError::Text { offset, kind }
}

fn tokenize(src: &str) -> Result<Vec<(usize, Token<'_>)>, RangeConfigError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        if c.is_ascii_whitespace() {
            pos += 1;
        } else if c == b'#' {
            while pos < bytes.len() && bytes[pos] != b'\n' {
                pos += 1;
            }
        } else if c.is_ascii_alphabetic() || c == b'_' {
            let start = pos;
            while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                pos += 1;
            }
            tokens.push((start, Token::Ident(&src[start..pos])));
        } else if c.is_ascii_digit() {
            let start = pos;
            pos += 1;
            while pos < bytes.len() && bytes[pos].is_ascii_alphanumeric() {
                pos += 1;
            }
            tokens.push((start, Token::Number(&src[start..pos])));
        } else if matches!(c, b'{' | b'}' | b'<' | b'>' | b':' | b',' | b';' | b'-') {
            tokens.push((pos, Token::Symbol(c as char)));
            pos += 1;
        } else {
            // Report the whole character, not a byte of it.
            let found = src[pos..].chars().next().map(String::from).unwrap_or_default();
            return Err(text_error(pos, TextErrorKind::UnexpectedToken(found)));
        }
    }

    Ok(tokens)
}

fn parse_int32(offset: usize, negative: bool, digits: &str) -> Result<i32, RangeConfigError> {
    let literal = || if negative { format!("-{digits}") } else { digits.to_string() };
    let hex = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X"));
    let magnitude = if let Some(hex) = hex {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(text_error(offset, TextErrorKind::UnexpectedToken(literal())));
        }
        u64::from_str_radix(hex, 16)
    } else if let Some(octal) = digits.strip_prefix('0').filter(|rest| !rest.is_empty()) {
        if !octal.bytes().all(|b| matches!(b, b'0'..=b'7')) {
            return Err(text_error(offset, TextErrorKind::UnexpectedToken(literal())));
        }
        u64::from_str_radix(octal, 8)
    } else {
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(text_error(offset, TextErrorKind::UnexpectedToken(literal())));
        }
        digits.parse::<u64>()
    }
    .map_err(|_| text_error(offset, TextErrorKind::IntegerOutOfRange(literal())))?;

    let value = if negative { -(magnitude as i128) } else { magnitude as i128 };
    i32::try_from(value)
        .map_err(|_| text_error(offset, TextErrorKind::IntegerOutOfRange(literal())))
}

struct Parser<'a> {
    tokens: Vec<(usize, Token<'a>)>,
    next: usize,
    end: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Result<Self, RangeConfigError> {
        Ok(Self { tokens: tokenize(src)?, next: 0, end: src.len() })
    }

    fn peek(&self) -> Option<(usize, Token<'a>)> {
        self.tokens.get(self.next).copied()
    }

    fn bump(&mut self) -> Option<(usize, Token<'a>)> {
        let token = self.peek();
        if token.is_some() {
            self.next += 1;
        }
        token
    }

    fn bump_or_end(&mut self) -> Result<(usize, Token<'a>), RangeConfigError> {
        self.bump().ok_or_else(|| text_error(self.end, TextErrorKind::UnexpectedEnd))
    }

    fn eat_symbol(&mut self, symbol: char) -> bool {
        if let Some((_, Token::Symbol(c))) = self.peek() {
            if c == symbol {
                self.next += 1;
                return true;
            }
        }
        false
    }

    fn eat_separator(&mut self) {
        if !self.eat_symbol(',') {
            self.eat_symbol(';');
        }
    }

    fn expect_symbol(&mut self, symbol: char) -> Result<(), RangeConfigError> {
        match self.bump_or_end()? {
            (_, Token::Symbol(c)) if c == symbol => Ok(()),
            (offset, token) => {
                Err(text_error(offset, TextErrorKind::UnexpectedToken(token.to_string())))
            }
        }
    }

    fn int32(&mut self) -> Result<i32, RangeConfigError> {
        let sign = match self.peek() {
            Some((offset, Token::Symbol('-'))) => Some(offset),
            _ => None,
        };
        if sign.is_some() {
            self.next += 1;
        }
        match self.bump_or_end()? {
            (offset, Token::Number(digits)) => {
                parse_int32(sign.unwrap_or(offset), sign.is_some(), digits)
            }
            (offset, token) => {
                Err(text_error(offset, TextErrorKind::UnexpectedToken(token.to_string())))
            }
        }
    }

    /// Reads `StaticRange` fields until `terminator`, or until the input ends
    /// when there is none.
    fn static_range_fields(
        &mut self,
        terminator: Option<char>,
    ) -> Result<StaticRange, RangeConfigError> {
        let mut start = None;
        let mut end = None;

        loop {
            let (offset, token) = match (self.bump(), terminator) {
                (Some(next), _) => next,
                (None, None) => break,
                (None, Some(_)) => return Err(text_error(self.end, TextErrorKind::UnexpectedEnd)),
            };
            let slot = match token {
                Token::Symbol(c) if Some(c) == terminator => break,
                Token::Ident(START_SPAN_NUMBER) => (&mut start, START_SPAN_NUMBER),
                Token::Ident(END_SPAN_NUMBER) => (&mut end, END_SPAN_NUMBER),
                Token::Ident(name) => {
                    return Err(text_error(offset, TextErrorKind::UnknownField(name.to_string())));
                }
                token => {
                    return Err(text_error(
                        offset,
                        TextErrorKind::UnexpectedToken(token.to_string()),
                    ));
                }
            };
            let (field, name) = slot;
            if field.is_some() {
                return Err(text_error(offset, TextErrorKind::DuplicateField(name)));
            }
            self.expect_symbol(':')?;
            *field = Some(self.int32()?);
            self.eat_separator();
        }

        Ok(StaticRange {
            start_span_number: start.unwrap_or_default(),
            end_span_number: end.unwrap_or_default(),
        })
    }

    fn range_config(&mut self) -> Result<RangeConfig, RangeConfigError> {
        let mut config = RangeConfig::default();

        while let Some((offset, token)) = self.bump() {
            match token {
                Token::Ident(STATIC_RANGE) => {
                    if config.range.is_some() {
                        return Err(text_error(offset, TextErrorKind::DuplicateField(STATIC_RANGE)));
                    }
                    self.eat_symbol(':');
                    let terminator = match self.bump_or_end()? {
                        (_, Token::Symbol('{')) => '}',
                        (_, Token::Symbol('<')) => '>',
                        (offset, token) => {
                            return Err(text_error(
                                offset,
                                TextErrorKind::UnexpectedToken(token.to_string()),
                            ));
                        }
                    };
                    let static_range = self.static_range_fields(Some(terminator))?;
                    config.range = Some(Range::Static(static_range));
                    self.eat_separator();
                }
                Token::Ident(name) => {
                    return Err(text_error(offset, TextErrorKind::UnknownField(name.to_string())));
                }
                token => {
                    return Err(text_error(
                        offset,
                        TextErrorKind::UnexpectedToken(token.to_string()),
                    ));
                }
            }
        }

        Ok(config)
    }
}
