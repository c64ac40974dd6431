//! reqstream - Security-first, single-pass HTTP/1.1 request parser for
//! buffered byte streams
//!
//! Decodes exactly one HTTP/1.1 request per call from any
//! [`tokio::io::AsyncBufRead`] source and fills an owned, reusable
//! [`Request`] value. The parser consumes precisely the bytes belonging to
//! that request (request line + headers + blank line + body, if declared),
//! leaving the stream positioned at the start of the next one, so a single
//! `Parser`/`Request` pair serves a whole keep-alive connection.
//!
//! # Design
//!
//! - **Single pass** - request line, query fields, headers, and body are
//!   decoded in one strictly sequential sweep with no backtracking.
//! - **Owned output** - every decoded field is an independently owned
//!   buffer; nothing borrows from parser scratch space.
//! - **Bounded input** - line lengths, header counts, header sizes, and the
//!   body size are capped through [`limits::ReqLimits`].
//! - **Typed failures** - malformed content, resource-cap violations,
//!   truncated bodies, and stream-level I/O faults are distinct
//!   [`ParseError`] variants. A failed parse never exposes a partial
//!   request.
//! - **Allocation reuse** - [`Request::reset`] runs at the start of every
//!   parse, clearing fields while keeping their allocations.
//!
//! # Examples
//!
//! ```
//! use reqstream::{limits::ReqLimits, Parser, Request};
//! use std::io::Cursor;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let limits = ReqLimits::default();
//!     let mut parser = Parser::new(limits.clone());
//!     let mut request = Request::new(&limits);
//!
//!     let raw = b"POST /api/users?notify=1 HTTP/1.1\r\n\
//!                 Host: localhost\r\n\
//!                 Content-Length: 4\r\n\
//!                 \r\n\
//!                 ping";
//!     let mut stream = Cursor::new(&raw[..]);
//!
//!     parser.parse(&mut stream, &mut request).await.unwrap();
//!
//!     assert_eq!(request.path(), b"/api/users");
//!     assert_eq!(request.query_field(b"notify"), Some(&b"1"[..]));
//!     assert_eq!(request.header(b"content-length"), Some(&b"4"[..]));
//!     assert_eq!(request.body(), Some(&b"ping"[..]));
//! }
//! ```
//!
//! # What this crate is not
//!
//! There is no listener, router, or response writer here; accepting
//! connections and answering requests are the caller's concerns (see
//! `demos/inspector.rs` for a minimal server wiring). Chunked
//! transfer-encoding, HTTP/1.0 and HTTP/2, percent-decoding, header value
//! validation, and TLS are out of scope. Timeouts must be imposed on the
//! stream by the caller; the parser never waits on its own clock.

pub(crate) mod http {
    pub mod headers;
    pub mod query;
    pub(crate) mod request;
    pub(crate) mod types;
}
pub(crate) mod errors;
pub mod limits;

pub use crate::{
    errors::{ParseError, StreamError},
    http::{
        headers::HeaderStore,
        query,
        request::{Parser, Request},
        types::Method,
    },
};
