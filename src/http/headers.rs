//! Ordered header storage with lowercase-normalized names.

/// Ordered association list of owned header name/value pairs.
///
/// The store, not the parser, fixes HTTP's case-insensitivity policy: names
/// are normalized to ASCII lowercase when recorded by [`set`](Self::set),
/// and probes compare case-insensitively against that stored form, so
/// `get(b"Content-Length")` and `get(b"content-length")` find the same
/// entry. Values are kept byte-for-byte as received.
///
/// Duplicate names are **last-write-wins**: a repeated `set` replaces the
/// existing entry's value in place, keeping its original position, so
/// insertion order stays stable under overwrites. Lookup is a linear scan
/// returning the first match, which is exact because names are unique after
/// normalization.
///
/// # Examples
/// ```
/// use reqstream::HeaderStore;
///
/// let mut headers = HeaderStore::new();
/// headers.set(b"Host", b"localhost");
/// headers.set(b"Accept", b"*/*");
/// headers.set(b"HOST", b"example.com");
///
/// assert_eq!(headers.get(b"host"), Some(&b"example.com"[..]));
/// assert_eq!(headers.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderStore {
    entries: Vec<HeaderEntry>,
}

#[derive(Debug, Clone, PartialEq)]
struct HeaderEntry {
    name: Vec<u8>,
    value: Vec<u8>,
}

impl HeaderStore {
    /// Creates an empty store.
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` entries.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Records an association, normalizing `name` to ASCII lowercase.
    ///
    /// An entry with the same (normalized) name gets its value replaced in
    /// place; otherwise the pair is appended.
    #[inline]
    pub fn set(&mut self, name: &[u8], value: &[u8]) {
        let mut lowered = name.to_vec();
        lowered.make_ascii_lowercase();

        match self.entries.iter_mut().find(|entry| entry.name == lowered) {
            Some(entry) => {
                entry.value.clear();
                entry.value.extend_from_slice(value);
            }
            None => self.entries.push(HeaderEntry {
                name: lowered,
                value: value.to_vec(),
            }),
        }
    }

    /// Returns the first value whose name matches `name`, compared ASCII
    /// case-insensitively. Uses linear search.
    #[inline]
    pub fn get(&self, name: &[u8]) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(|entry| entry.value.as_slice())
    }

    /// [`get`](Self::get) returning a `&str` view, or `None` when the value
    /// is absent or not valid UTF-8.
    #[inline]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        simdutf8::basic::from_utf8(self.get(name.as_bytes())?).ok()
    }

    /// Number of stored entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates (name, value) pairs in insertion order. Names come back in
    /// their normalized lowercase form.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_slice(), entry.value.as_slice()))
    }

    /// Removes every entry, keeping the backing allocation.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod headers_self {
    use super::*;
    use crate::tools::*;

    #[test]
    fn set_and_get() {
        let mut headers = HeaderStore::new();
        headers.set(b"Host", b"localhost");
        headers.set(b"User-Agent", b"curl");

        assert_eq!(str(headers.get(b"host")), Some("localhost"));
        assert_eq!(str(headers.get(b"user-agent")), Some("curl"));
        assert_eq!(headers.get(b"accept"), None);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn probe_casing() {
        let mut headers = HeaderStore::new();
        headers.set(b"CoNtEnT-LeNgTh", b"5");

        for probe in ["content-length", "Content-Length", "CONTENT-LENGTH"] {
            assert_eq!(headers.get_str(probe), Some("5"));
        }
    }

    #[test]
    fn last_write_wins_in_place() {
        let mut headers = HeaderStore::new();
        headers.set(b"a", b"1");
        headers.set(b"b", b"2");
        headers.set(b"A", b"3");

        assert_eq!(headers.len(), 2);
        assert_eq!(str(headers.get(b"a")), Some("3"));

        let order: Vec<(&str, &str)> = headers.iter().map(str_2).collect();
        assert_eq!(order, [("a", "3"), ("b", "2")]);
    }

    #[test]
    fn values_kept_verbatim() {
        let mut headers = HeaderStore::new();
        headers.set(b"X-Raw", b"  MiXeD CaSe  ");
        headers.set(b"X-Empty", b"");

        assert_eq!(str(headers.get(b"x-raw")), Some("  MiXeD CaSe  "));
        assert_eq!(str(headers.get(b"x-empty")), Some(""));
    }

    #[test]
    fn non_utf8_value() {
        let mut headers = HeaderStore::new();
        headers.set(b"x-bin", &[0xFF, 0xFE]);

        assert_eq!(headers.get(b"x-bin"), Some(&[0xFF, 0xFE][..]));
        assert_eq!(headers.get_str("x-bin"), None);
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut headers = HeaderStore::with_capacity(4);
        headers.set(b"a", b"1");
        headers.clear();

        assert!(headers.is_empty());
        assert_eq!(headers.get(b"a"), None);
    }
}
