//! Request parsing limits and line-buffer sizing
//!
//! # Security-First Defaults
//!
//! Default limits are intentionally conservative to prevent:
//! - Resource exhaustion through oversized request lines or headers
//! - Header flooding
//! - Memory overflows from attacker-chosen `content-length` values
//!
//! The parser reads every line through a bounded reader sized from these
//! limits and rejects input past the bound, so a hostile peer can never make
//! it buffer more than `estimated_line_buffer()` bytes of framing plus
//! `body_size` bytes of payload.
//!
//! # Examples
//!
//! ```
//! use reqstream::{limits::ReqLimits, Parser};
//!
//! let parser = Parser::new(ReqLimits {
//!     header_count: 32,      // More headers for complex clients
//!     body_size: 16 * 1024,  // 16KB for larger payloads
//!     ..ReqLimits::default()
//! });
//! # let _ = parser;
//! ```

/// HTTP request parsing limits.
///
/// All sizes are byte counts of raw wire content, terminators excluded.
/// Adjust based on your expected clients; the defaults suit REST-style APIs
/// and internal tools.
#[derive(Debug, Clone)]
pub struct ReqLimits {
    /// Maximum method token length in bytes (default: `9`)
    ///
    /// The longest supported method, `DELETE`, is 6 bytes; the default
    /// leaves headroom without admitting junk tokens of arbitrary length.
    pub method_size: usize,

    /// Maximum target length in bytes, path and query combined (default: `256 B`)
    ///
    /// Covers the entire token after the method (e.g.
    /// `/api/users/123?sort=name&debug`). This bound also caps the query
    /// string, so there is no separate query-field-count limit: a 256-byte
    /// query can hold at most 128 fields.
    pub target_size: usize,

    /// Maximum number of stored headers per request (default: `16 headers`)
    ///
    /// Typical browsers send 10-12 headers. 16 leaves room for custom
    /// headers while preventing header flooding.
    pub header_count: usize,
    /// Maximum header name length in bytes (default: `64 B`)
    pub header_name_size: usize,
    /// Maximum header value length in bytes (default: `512 B`)
    ///
    /// Fits most headers including JWT tokens, cookies, and UUIDs.
    pub header_value_size: usize,

    /// Maximum request body size in bytes (default: `4 KB`)
    ///
    /// Checked against the declared `content-length` before any body byte is
    /// read or allocated.
    pub body_size: usize,

    #[doc(hidden)]
    #[allow(dead_code)]
    pub precalc: ReqLimitsPrecalc,
}

impl Default for ReqLimits {
    fn default() -> Self {
        Self {
            method_size: 9,   // DELETE + headroom
            target_size: 256, // Enough for: /api/v1/users/search?q=test&page=1

            header_count: 16,       // Typical: 10-12 browser headers + 4-6 custom
            header_name_size: 64,   // Fits: x-custom-auth-token-header-name
            header_value_size: 512, // Fits most JWT tokens and cookies

            body_size: 4 * 1024, // Good for JSON API requests, not file uploads

            precalc: ReqLimitsPrecalc::default(),
        }
    }
}

impl ReqLimits {
    /// Returns the scratch-buffer capacity a [`Parser`](crate::Parser) built
    /// from these limits allocates for line reading (the longest admissible
    /// line plus its CRLF terminator).
    #[inline(always)]
    pub fn estimated_line_buffer(&self) -> usize {
        let limits = self.clone().precalculate();
        limits.precalc.request_line.max(limits.precalc.header_line) + 2
    }

    #[inline(always)]
    pub(crate) fn precalculate(mut self) -> Self {
        self.precalc.request_line = self.request_line();
        self.precalc.header_line = self.header_line();

        self
    }

    #[inline(always)]
    // Request line (terminator excluded):
    // DELETE /url/test?id=1 HTTP/1.1
    // |----| |------------| |------|
    // Method     Target     Version
    //
    // Formula: Method + " " + Target + " " + Version(8)
    // In code: method_size + target_size + 10
    fn request_line(&self) -> usize {
        self.method_size + self.target_size + 10
    }

    #[inline(always)]
    // Header line (terminator excluded):
    // authorization: Sample%20Data
    // |-----------|  |-----------|
    //     Name           Value
    //
    // Formula: Name + ": " + Value
    // In code: header_name_size + header_value_size + 2
    fn header_line(&self) -> usize {
        self.header_name_size + self.header_value_size + 2
    }
}

#[doc(hidden)]
#[derive(Debug, Clone, Default)]
pub struct ReqLimitsPrecalc {
    pub(crate) request_line: usize,
    pub(crate) header_line: usize,
}
