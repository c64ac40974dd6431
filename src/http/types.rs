//! Core HTTP protocol types and utilities

use crate::errors::ParseError;

/// Strict decimal parser for `content-length` values.
///
/// Rejects empty input, any non-digit byte (including signs and spaces),
/// and values that overflow `usize`.
#[inline(always)]
pub(crate) fn slice_to_usize(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() {
        return None;
    }

    let mut result: usize = 0;

    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return None;
        }

        result = result
            .checked_mul(10)?
            .checked_add((byte - b'0') as usize)?;
    }

    Some(result)
}

// METHOD

/// HTTP request methods
///
/// The supported set is closed: a request line carrying any other token is
/// rejected with [`ParseError::UnknownMethod`](crate::ParseError::UnknownMethod)
/// during parsing, so a successfully parsed request always holds one of
/// these variants.
///
/// # References
///
/// - [RFC 7231, Section 4](https://datatracker.ietf.org/doc/html/rfc7231#section-4)
/// - [RFC 5789](https://datatracker.ietf.org/doc/html/rfc5789) (PATCH method)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method - transfer a current representation of the target resource
    /// [[RFC7231, Section 4.3.1](https://tools.ietf.org/html/rfc7231#section-4.3.1)]
    Get,
    /// HEAD method - same as GET but without response body
    /// [[RFC7231, Section 4.3.2](https://tools.ietf.org/html/rfc7231#section-4.3.2)]
    Head,
    /// POST method - perform resource-specific processing on the request payload
    /// [[RFC7231, Section 4.3.3](https://tools.ietf.org/html/rfc7231#section-4.3.3)]
    Post,
    /// PUT method - replace all current representations of the target resource with the request payload
    /// [[RFC7231, Section 4.3.4](https://tools.ietf.org/html/rfc7231#section-4.3.4)]
    Put,
    /// DELETE method - remove all current representations of the target resource
    /// [[RFC7231, Section 4.3.5](https://tools.ietf.org/html/rfc7231#section-4.3.5)]
    Delete,
    /// PATCH method - apply partial modifications to a resource
    /// [[RFC5789, Section 2](https://tools.ietf.org/html/rfc5789#section-2)]
    Patch,
}

impl Method {
    #[inline(always)]
    pub(crate) fn from_token(src: &[u8]) -> Result<Self, ParseError> {
        match src {
            b"GET" => Ok(Method::Get),
            b"HEAD" => Ok(Method::Head),
            b"POST" => Ok(Method::Post),
            b"PUT" => Ok(Method::Put),
            b"DELETE" => Ok(Method::Delete),
            b"PATCH" => Ok(Method::Patch),
            _ => Err(ParseError::UnknownMethod),
        }
    }

    /// Returns the canonical token, exactly as it appears on the wire.
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }

    /// Whether this method may carry a `content-length` body.
    ///
    /// Only these methods get their declared body read off the stream; a
    /// `content-length` header on any other method is stored but ignored.
    #[inline(always)]
    pub const fn has_body(&self) -> bool {
        matches!(
            self,
            Method::Post | Method::Put | Method::Delete | Method::Patch
        )
    }
}

#[cfg(test)]
mod types_self {
    use super::*;

    #[test]
    fn method_tokens() {
        #[rustfmt::skip]
        let cases = [
            (&b"GET"[..],    Ok(Method::Get)),
            (&b"HEAD"[..],   Ok(Method::Head)),
            (&b"POST"[..],   Ok(Method::Post)),
            (&b"PUT"[..],    Ok(Method::Put)),
            (&b"DELETE"[..], Ok(Method::Delete)),
            (&b"PATCH"[..],  Ok(Method::Patch)),

            (&b"get"[..],     Err(ParseError::UnknownMethod)),
            (&b"OPTIONS"[..], Err(ParseError::UnknownMethod)),
            (&b"FOO"[..],     Err(ParseError::UnknownMethod)),
            (&b""[..],        Err(ParseError::UnknownMethod)),
        ];

        for (token, expected) in cases {
            assert_eq!(Method::from_token(token), expected);
        }

        for method in [
            Method::Get,
            Method::Head,
            Method::Post,
            Method::Put,
            Method::Delete,
            Method::Patch,
        ] {
            assert_eq!(Method::from_token(method.as_str().as_bytes()), Ok(method));
        }
    }

    #[test]
    fn method_has_body() {
        assert!(!Method::Get.has_body());
        assert!(!Method::Head.has_body());
        assert!(Method::Post.has_body());
        assert!(Method::Put.has_body());
        assert!(Method::Delete.has_body());
        assert!(Method::Patch.has_body());
    }

    #[test]
    fn decimal_values() {
        #[rustfmt::skip]
        let cases = [
            (&b"0"[..],     Some(0)),
            (&b"5"[..],     Some(5)),
            (&b"4096"[..],  Some(4096)),
            (&b"00017"[..], Some(17)),

            (&b""[..],      None),
            (&b" 5"[..],    None),
            (&b"5 "[..],    None),
            (&b"-1"[..],    None),
            (&b"+1"[..],    None),
            (&b"12asd"[..], None),
            (&b"1.5"[..],   None),
            (&b"99999999999999999999999"[..], None),
        ];

        for (bytes, expected) in cases {
            assert_eq!(slice_to_usize(bytes), expected);
        }
    }
}
