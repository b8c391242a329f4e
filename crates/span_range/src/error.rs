use thiserror::Error;

/// What went wrong while parsing the text format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextErrorKind {
    UnexpectedEnd,
    UnexpectedToken(String),
    UnknownField(String),
    DuplicateField(&'static str),
    IntegerOutOfRange(String),
}

impl std::fmt::Display for TextErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextErrorKind::UnexpectedEnd => write!(f, "unexpected end of input"),
            TextErrorKind::UnexpectedToken(token) => write!(f, "unexpected token `{token}`"),
            TextErrorKind::UnknownField(name) => write!(f, "unknown field `{name}`"),
            TextErrorKind::DuplicateField(name) => {
                write!(f, "non-repeated field `{name}` specified multiple times")
            }
            TextErrorKind::IntegerOutOfRange(literal) => {
                write!(f, "integer `{literal}` does not fit in int32")
            }
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RangeConfigError {
    #[error("Range config error, malformed wire data: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Range config error, output buffer too small: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error(
        "Range config error, length prefix announces {expected} bytes but only {available} remain"
    )]
    Truncated { expected: usize, available: usize },

    #[error("Range config error, invalid text format at offset {offset}: {kind}")]
    Text { offset: usize, kind: TextErrorKind },
}
