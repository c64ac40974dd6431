use std::{error, fmt, io};

/// Classification of a failed parse attempt.
///
/// Every variant is terminal for the current request: the parser never
/// retries internally and never hands out a partially decoded
/// [`Request`](crate::Request). The caller decides whether an error closes
/// the connection or is turned into an HTTP error response.
///
/// Two permissive behaviors are deliberately *not* errors: a trailing query
/// fragment without `=` (dropped), and a missing `content-length` on a
/// body-bearing method (the body stays unset).
#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// The request line failed tokenization: wrong token count, a token over
    /// its size limit, a protocol tag other than the literal `HTTP/1.1`, a
    /// missing CRLF terminator, or the stream ending early.
    MalformedRequestLine,

    /// The method token is none of `GET`, `HEAD`, `POST`, `PUT`, `DELETE`,
    /// `PATCH` (matched case-sensitively).
    UnknownMethod,

    /// More headers than [`header_count`](crate::limits::ReqLimits::header_count)
    /// allows.
    TooManyHeaders,
    /// A header name, value, or whole line exceeded its configured size limit.
    HeaderTooLarge,

    /// A `content-length` value that is not a plain non-negative decimal
    /// integer fitting in `usize`.
    InvalidContentLength,
    /// The declared body length exceeds
    /// [`body_size`](crate::limits::ReqLimits::body_size).
    BodyTooLarge,
    /// The stream closed before the declared body was fully read.
    TruncatedBody {
        /// Bytes announced by `content-length`.
        expected: usize,
        /// Bytes actually read before the stream ended.
        read: usize,
    },

    /// An I/O fault from the underlying stream, passed through unchanged.
    /// Distinct from all malformed-content errors: it means the connection
    /// itself failed, not the bytes on it.
    Stream(StreamError),
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseError::Stream(err) => Some(&err.0),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedRequestLine => {
                write!(f, "Malformed request line")
            }
            ParseError::UnknownMethod => {
                write!(f, "Unknown HTTP method")
            }
            ParseError::TooManyHeaders => {
                write!(f, "Too many request headers")
            }
            ParseError::HeaderTooLarge => {
                write!(f, "Header line exceeds the configured size limit")
            }
            ParseError::InvalidContentLength => {
                write!(f, "Invalid content-length value")
            }
            ParseError::BodyTooLarge => {
                write!(f, "Declared body exceeds the configured size limit")
            }
            ParseError::TruncatedBody { expected, read } => {
                write!(f, "Body truncated: declared {} bytes, read {}", expected, read)
            }
            ParseError::Stream(err) => {
                write!(f, "Stream error: {}", err.0)
            }
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        ParseError::Stream(StreamError(err))
    }
}

/// [`io::Error`] wrapper comparing by [`io::ErrorKind`], which keeps
/// [`ParseError`] usable in `assert_eq!`-style tests.
#[derive(Debug)]
pub struct StreamError(pub io::Error);

impl PartialEq for StreamError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}
