use crate::{
    errors::ParseError,
    http::{
        headers::HeaderStore,
        query::Query,
        types::{self, Method},
    },
    limits::ReqLimits,
};
use memchr::memchr;
use simdutf8::basic::from_utf8;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt};

/// A fully decoded HTTP/1.1 request.
///
/// Owns every buffer it hands out: the target, each query field, each
/// header, and the body live independently of the parser's scratch space
/// and of each other, so the value stays valid however long the caller
/// keeps it.
///
/// One `Request` is meant to be created per connection and refilled by
/// [`Parser::parse`] for every request on it; [`reset`](Self::reset) runs at
/// the start of each parse and clears the previous request's data while
/// keeping the allocations. After a parse returns an error the value holds
/// no meaningful request - treat it as cleared and parse again.
///
/// # Accepted input
///
/// The request line must be `METHOD SP TARGET SP HTTP/1.1 CRLF`, where
/// runs of SP/HTAB separate the three tokens and `HTTP/1.1` is matched as
/// an exact literal. Header lines are `NAME ":" VALUE CRLF` with a nonempty
/// name and leading SP/HTAB stripped from the value; the section ends at
/// the first line that does not match this shape (normally the blank line),
/// whose bytes are consumed so the cursor lands exactly at body start. A
/// body is read only for POST, PUT, DELETE, and PATCH, and only when a
/// `content-length` header declares it. Everything is treated as raw bytes;
/// the line terminator must be exactly CRLF.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    raw_target: Vec<u8>,
    path_len: usize,
    query_fields: Vec<(Vec<u8>, Vec<u8>)>,
    headers: HeaderStore,
    body: Option<Vec<u8>>,
}

impl Request {
    /// Creates an empty request with capacity reserved per `limits`.
    #[inline]
    pub fn new(limits: &ReqLimits) -> Self {
        Request {
            method: Method::Get,
            raw_target: Vec::with_capacity(limits.target_size),
            path_len: 0,
            query_fields: Vec::new(),
            headers: HeaderStore::with_capacity(limits.header_count),
            body: None,
        }
    }

    /// Clears all decoded data while keeping the allocations for reuse.
    ///
    /// Called automatically at the start of every [`Parser::parse`].
    #[inline]
    pub fn reset(&mut self) {
        self.method = Method::Get;
        self.raw_target.clear();
        self.path_len = 0;
        self.query_fields.clear();
        self.headers.clear();
        self.body = None;
    }
}

// Public API
impl Request {
    #[inline(always)]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// The exact bytes between method and protocol version, unmodified
    /// (query component included, nothing decoded).
    #[inline(always)]
    pub fn raw_target(&self) -> &[u8] {
        &self.raw_target
    }

    /// [`raw_target`](Self::raw_target) as `&str`, or `None` when it is not
    /// valid UTF-8.
    #[inline(always)]
    pub fn raw_target_str(&self) -> Option<&str> {
        from_utf8(&self.raw_target).ok()
    }

    /// The target truncated at the first `?`, or the whole target when it
    /// has no query component.
    #[inline(always)]
    pub fn path(&self) -> &[u8] {
        &self.raw_target[..self.path_len]
    }

    /// [`path`](Self::path) as `&str`, or `None` when it is not valid UTF-8.
    #[inline(always)]
    pub fn path_str(&self) -> Option<&str> {
        from_utf8(self.path()).ok()
    }

    /// All query fields in appearance order, duplicates retained.
    ///
    /// Empty when the target has no `?`.
    #[inline(always)]
    pub fn query_fields(&self) -> &[(Vec<u8>, Vec<u8>)] {
        &self.query_fields
    }

    /// Returns the first query field value with the given key, by exact
    /// byte comparison. Uses linear search.
    #[inline]
    pub fn query_field(&self, key: &[u8]) -> Option<&[u8]> {
        self.query_fields
            .iter()
            .find(|(name, _)| name.as_slice() == key)
            .map(|(_, value)| value.as_slice())
    }

    /// [`query_field`](Self::query_field) returning a `&str` view, or
    /// `None` when the field is absent or not valid UTF-8.
    #[inline]
    pub fn query_field_str(&self, key: &str) -> Option<&str> {
        from_utf8(self.query_field(key.as_bytes())?).ok()
    }

    #[inline(always)]
    pub const fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// Shorthand for [`HeaderStore::get`] on [`headers`](Self::headers).
    #[inline(always)]
    pub fn header(&self, name: &[u8]) -> Option<&[u8]> {
        self.headers.get(name)
    }

    /// The request body, if one was declared and fully read.
    ///
    /// `None` and `Some(empty)` differ: a body-bearing method without a
    /// `content-length` header has no body, while `content-length: 0`
    /// yields an empty one.
    #[inline(always)]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

//

/// Single-pass request decoder over a buffered byte stream.
///
/// Owns a reusable line buffer and the [`ReqLimits`] every read is bounded
/// by. One parser serves one logical connection: [`parse`](Self::parse)
/// takes `&mut` on the parser, the stream, and the output request, so
/// concurrent parses on shared state are rejected at compile time. For
/// concurrent connections, give each its own parser, stream, and request.
#[derive(Debug)]
pub struct Parser {
    line: Vec<u8>,
    limits: ReqLimits,
}

enum LineEnd {
    /// CRLF-terminated; terminator stripped from the scratch buffer.
    Crlf,
    /// Bare LF, EOF mid-line, or immediate EOF: nothing line-shaped.
    Broken,
    /// The bounded reader filled up before any LF.
    Overflow,
}

impl Parser {
    /// Creates a parser, pre-allocating its line buffer from `limits`.
    #[inline]
    pub fn new(limits: ReqLimits) -> Self {
        let capacity = limits.estimated_line_buffer();
        Parser {
            line: Vec::with_capacity(capacity),
            limits: limits.precalculate(),
        }
    }

    /// Decodes exactly one request from `stream` into `request`.
    ///
    /// `request` is [`reset`](Request::reset) first, then filled stage by
    /// stage: request line, query fields, headers, body. On success the
    /// stream is positioned at the first byte after this request (the next
    /// request, or EOF). On error the request holds no usable data and the
    /// stream position is unspecified; the caller decides whether to answer
    /// with an HTTP error or drop the connection.
    ///
    /// Each read suspends the calling task until bytes arrive or the stream
    /// ends. There are no internal timeouts - impose them on the stream.
    /// Closing the stream from outside surfaces here as
    /// [`ParseError::Stream`] (or [`ParseError::TruncatedBody`] inside a
    /// declared body), which keeps connection faults distinct from
    /// malformed content.
    pub async fn parse<R>(&mut self, stream: &mut R, request: &mut Request) -> Result<(), ParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        request.reset();

        match self.read_line(stream, self.limits.precalc.request_line).await? {
            LineEnd::Crlf => {}
            LineEnd::Broken | LineEnd::Overflow => return Err(ParseError::MalformedRequestLine),
        }
        self.parse_request_line(request)?;

        loop {
            match self.read_line(stream, self.limits.precalc.header_line).await? {
                LineEnd::Crlf => {}
                LineEnd::Broken => break,
                LineEnd::Overflow => return Err(ParseError::HeaderTooLarge),
            }

            if !self.parse_header_line(request)? {
                break;
            }
        }

        if request.method.has_body() {
            self.read_body(stream, request).await?;
        }

        Ok(())
    }
}

// Request line
impl Parser {
    #[inline]
    fn parse_request_line(&self, request: &mut Request) -> Result<(), ParseError> {
        let mut tokens = self
            .line
            .split(|&byte| byte == b' ' || byte == b'\t')
            .filter(|token| !token.is_empty());

        let method = tokens.next().ok_or(ParseError::MalformedRequestLine)?;
        let target = tokens.next().ok_or(ParseError::MalformedRequestLine)?;
        let version = tokens.next().ok_or(ParseError::MalformedRequestLine)?;

        if tokens.next().is_some() || version != b"HTTP/1.1" {
            return Err(ParseError::MalformedRequestLine);
        }
        if method.len() > self.limits.method_size || target.len() > self.limits.target_size {
            return Err(ParseError::MalformedRequestLine);
        }

        request.method = Method::from_token(method)?;

        request.raw_target.extend_from_slice(target);
        request.path_len = memchr(b'?', target).unwrap_or(target.len());

        if request.path_len < target.len() {
            Query::scan_into(&mut request.query_fields, &target[request.path_len + 1..]);
        }

        Ok(())
    }
}

// Headers
impl Parser {
    /// Records one header line, or reports the end of the section.
    ///
    /// `Ok(false)` means the line did not match `name: value` - a blank
    /// line, a line without `:`, or an empty name - which terminates the
    /// section with the line already consumed.
    #[inline]
    fn parse_header_line(&self, request: &mut Request) -> Result<bool, ParseError> {
        let Some(colon) = memchr(b':', &self.line) else {
            return Ok(false);
        };
        if colon == 0 {
            return Ok(false);
        }

        let name = &self.line[..colon];
        let mut value = &self.line[colon + 1..];
        while let [b' ' | b'\t', rest @ ..] = value {
            value = rest;
        }

        if name.len() > self.limits.header_name_size || value.len() > self.limits.header_value_size
        {
            return Err(ParseError::HeaderTooLarge);
        }
        if request.headers.len() >= self.limits.header_count {
            return Err(ParseError::TooManyHeaders);
        }

        request.headers.set(name, value);
        Ok(true)
    }
}

// Body
impl Parser {
    async fn read_body<R>(&self, stream: &mut R, request: &mut Request) -> Result<(), ParseError>
    where
        R: AsyncRead + Unpin,
    {
        let Some(declared) = request.headers.get(b"content-length") else {
            return Ok(());
        };

        let expected = types::slice_to_usize(declared).ok_or(ParseError::InvalidContentLength)?;
        if expected > self.limits.body_size {
            return Err(ParseError::BodyTooLarge);
        }

        let mut body = vec![0; expected];
        let mut read = 0;
        while read < expected {
            match stream.read(&mut body[read..]).await? {
                0 => return Err(ParseError::TruncatedBody { expected, read }),
                count => read += count,
            }
        }

        request.body = Some(body);
        Ok(())
    }
}

// Line reading
impl Parser {
    /// Reads one line into the scratch buffer through a reader bounded at
    /// `max_content` + 2 terminator bytes. On [`LineEnd::Crlf`] the buffer
    /// holds the line content with the terminator stripped.
    async fn read_line<R>(&mut self, stream: &mut R, max_content: usize) -> Result<LineEnd, ParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        self.line.clear();

        let limit = (max_content + 2) as u64;
        let count = stream
            .take(limit)
            .read_until(b'\n', &mut self.line)
            .await?;

        if self.line.last() != Some(&b'\n') {
            return Ok(match count as u64 == limit {
                true => LineEnd::Overflow,
                false => LineEnd::Broken,
            });
        }
        self.line.pop();

        if self.line.last() != Some(&b'\r') {
            return Ok(LineEnd::Broken);
        }
        self.line.pop();

        Ok(LineEnd::Crlf)
    }
}
