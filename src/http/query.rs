//! URL query string decomposition with flexible collection support.

use memchr::{memchr, memchr2, memrchr2};
use std::collections::HashMap;

/// URL query string scanner.
///
/// Decomposes a raw query string into (key, value) byte pairs without
/// decoding anything: `%20` and friends pass through untouched, so the
/// output can also carry `application/x-www-form-urlencoded` form data in
/// its wire form.
///
/// # Scan rules
///
/// The scanner walks left to right looking for `=`. The key is everything
/// between the previous field terminator and the `=`; the value runs until
/// the next terminator or the end of the string. Both `&` and `;` terminate
/// a field, interchangeably. A fragment with no `=` before the next
/// terminator (or the end) is dropped without error. Empty keys and empty
/// values are kept, and duplicate keys are all retained in order.
///
/// # Examples
/// ```rust
/// use reqstream::query::Query;
///
/// let fields: Vec<(&[u8], &[u8])> = Query::scan(b"name=john&age=25");
/// assert_eq!(fields, [(&b"name"[..], &b"john"[..]), (&b"age"[..], &b"25"[..])]);
///
/// // `;` terminates like `&`, fragments without `=` are dropped
/// let fields: Vec<(&[u8], &[u8])> = Query::scan(b"a=1;b=2&debug");
/// assert_eq!(fields, [(&b"a"[..], &b"1"[..]), (&b"b"[..], &b"2"[..])]);
///
/// // No decoding: raw bytes in, raw bytes out
/// let fields: Vec<(&[u8], &[u8])> = Query::scan(b"email=user%40example.com");
/// assert_eq!(fields[0].1, b"user%40example.com");
/// ```
pub struct Query;

impl Query {
    /// Scans a query string into a new collection.
    ///
    /// Accepts an optional leading `?`, so `?a=1` and `a=1` are equivalent.
    ///
    /// # Examples
    /// ```
    /// use reqstream::query::Query;
    /// use std::collections::HashMap;
    ///
    /// // Vec preserves order and duplicates
    /// let fields: Vec<(&[u8], &[u8])> = Query::scan(b"?key=1&key=2");
    /// assert_eq!(fields.len(), 2);
    ///
    /// // HashMap deduplicates (last value remains)
    /// let fields: HashMap<&[u8], &[u8]> = Query::scan(b"?key=1&key=2");
    /// assert_eq!(fields.len(), 1);
    /// assert_eq!(fields[&b"key"[..]], b"2");
    /// ```
    #[inline(always)]
    pub fn scan<'a, C: QueryCollector<'a>>(query: &'a [u8]) -> C {
        let mut result = C::new();
        Self::scan_into(&mut result, query);
        result
    }

    /// Scans a query string into an existing collection, appending to
    /// whatever it already holds. Allows reusing one collection across
    /// scans.
    ///
    /// # Examples
    /// ```
    /// use reqstream::query::Query;
    ///
    /// let mut fields: Vec<(&[u8], &[u8])> = Vec::new();
    ///
    /// Query::scan_into(&mut fields, b"a=1&b=2");
    /// Query::scan_into(&mut fields, b"c=3");
    /// assert_eq!(fields.len(), 3);
    /// ```
    #[inline]
    pub fn scan_into<'a, C: QueryCollector<'a>>(result: &mut C, query: &'a [u8]) {
        let data = match query.first() {
            Some(b'?') => &query[1..],
            Some(_) => query,
            None => return,
        };

        let mut cursor = 0;
        while cursor < data.len() {
            // No '=' ahead: everything left is a keyless fragment, dropped.
            let Some(eq) = memchr(b'=', &data[cursor..]).map(|pos| cursor + pos) else {
                break;
            };

            // The key starts after the last terminator before '='; any
            // keyless fragment in between falls away with it.
            let key_start = memrchr2(b'&', b';', &data[cursor..eq])
                .map(|pos| cursor + pos + 1)
                .unwrap_or(cursor);

            let value_end = memchr2(b'&', b';', &data[eq + 1..])
                .map(|pos| eq + 1 + pos)
                .unwrap_or(data.len());

            result.add_field(&data[key_start..eq], &data[eq + 1..value_end]);
            cursor = value_end + 1;
        }
    }
}

/// A trait for types that can collect scanned query fields.
///
/// Lets callers choose the storage shape: ordered borrowed pairs, owned
/// pairs, or a deduplicating map.
///
/// # Lifetime
/// - `'a`: The lifetime of the input query string bytes
///
/// # Examples
/// ```rust
/// use reqstream::query::QueryCollector;
///
/// struct FieldCount(usize);
///
/// impl<'a> QueryCollector<'a> for FieldCount {
///     fn add_field(&mut self, _key: &'a [u8], _value: &'a [u8]) {
///         self.0 += 1;
///     }
///
///     fn new() -> Self {
///         FieldCount(0)
///     }
/// }
/// ```
pub trait QueryCollector<'a>
where
    Self: Sized,
{
    /// Receives one scanned field, in appearance order.
    fn add_field(&mut self, key: &'a [u8], value: &'a [u8]);

    /// Creates an empty collection.
    fn new() -> Self;
}

// Borrowed pairs - preserves field order, zero-copy
impl<'a> QueryCollector<'a> for Vec<(&'a [u8], &'a [u8])> {
    #[inline(always)]
    fn add_field(&mut self, key: &'a [u8], value: &'a [u8]) {
        self.push((key, value));
    }

    #[inline(always)]
    fn new() -> Self {
        Vec::new()
    }
}

// Owned pairs - preserves field order, detaches from the input buffer
impl<'a> QueryCollector<'a> for Vec<(Vec<u8>, Vec<u8>)> {
    #[inline(always)]
    fn add_field(&mut self, key: &'a [u8], value: &'a [u8]) {
        self.push((key.to_vec(), value.to_vec()));
    }

    #[inline(always)]
    fn new() -> Self {
        Vec::new()
    }
}

// HashMap - deduplicates fields (last wins)
impl<'a> QueryCollector<'a> for HashMap<&'a [u8], &'a [u8]> {
    #[inline(always)]
    fn add_field(&mut self, key: &'a [u8], value: &'a [u8]) {
        self.insert(key, value);
    }

    #[inline(always)]
    fn new() -> Self {
        HashMap::new()
    }
}
