use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{Bound, RangeBounds},
    str::FromStr,
    sync::Arc,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{IdError, Result};

/// Domain applied when the raw string has no `:` separator.
pub const DEFAULT_DOMAIN: &str = "minecraft";

/// Character set accepted for the path half of an id.
///
/// Domains always use the strict set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathGrammar {
    /// `[0-9a-z_./-]+`, so nested resource paths like `blocks/stone` are legal
    #[default]
    Resource,
    /// `[0-9a-z_-]+`
    Strict,
}

impl PathGrammar {
    pub const fn pattern(self) -> &'static str {
        match self {
            PathGrammar::Resource => "[0-9a-z_./-]+",
            PathGrammar::Strict => "[0-9a-z_-]+",
        }
    }

    fn allows(self, byte: u8) -> bool {
        match self {
            PathGrammar::Resource => is_legal(byte) || byte == b'.' || byte == b'/',
            PathGrammar::Strict => is_legal(byte),
        }
    }
}

fn is_legal(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'a'..=b'z' | b'_' | b'-')
}

fn separator(raw: &str) -> Option<usize> {
    let index = raw.find(':')?;
    assert!(
        !raw[index + 1..].contains(':'),
        "Namespaced ID can only have at most one colon ':' ({raw})"
    );
    Some(index)
}

/// Extracts the domain: `"minecraft:stone"` gives `"minecraft"`.
/// Without a `:` the default domain is returned.
///
/// # Panics
///
/// If `raw` contains more than one `:`.
pub fn parse_domain(raw: &str) -> &str {
    match separator(raw) {
        Some(index) => &raw[..index],
        None => DEFAULT_DOMAIN,
    }
}

/// Extracts the path: `"minecraft:blocks/stone"` gives `"blocks/stone"`.
/// Without a `:` the whole input is the path.
///
/// # Panics
///
/// If `raw` contains more than one `:`.
pub fn parse_path(raw: &str) -> &str {
    match separator(raw) {
        Some(index) => &raw[index + 1..],
        None => raw,
    }
}

/// Non-panicking split for untrusted input.
pub(crate) fn split(raw: &str) -> Result<(&str, &str)> {
    if raw.matches(':').count() > 1 {
        return Err(IdError::TooManySeparators(raw.to_owned()));
    }
    Ok((parse_domain(raw), parse_path(raw)))
}

pub(crate) fn validate(domain: &str, path: &str, grammar: PathGrammar) -> Result<()> {
    let full = || format!("{domain}:{path}");
    let result = if domain.contains(['.', '/']) {
        Err(IdError::DomainSeparator(full()))
    } else if domain.is_empty() || !domain.bytes().all(is_legal) {
        Err(IdError::IllegalDomain(full()))
    } else if path.is_empty() || !path.bytes().all(|b| grammar.allows(b)) {
        Err(IdError::IllegalPath(full(), grammar.pattern()))
    } else {
        Ok(())
    };
    if let Err(err) = &result {
        tracing::debug!("Rejected namespaced id: {}", err);
    }
    result
}

struct Inner {
    full: Box<str>,
    colon: usize,
}

/// An immutable `domain:path` identifier naming a game resource.
///
/// Clones share one allocation. Equality, ordering and hashing only look at
/// the domain and the path, so an interned id and a free-standing one with
/// the same parts are interchangeable.
///
/// The canonical form is pure ASCII once validated, so character indices and
/// byte indices coincide.
#[derive(Clone)]
pub struct NamespacedId(Arc<Inner>);

impl NamespacedId {
    /// Builds a validated id without going through a registry.
    pub fn new(domain: &str, path: &str) -> Result<Self> {
        Self::with_grammar(domain, path, PathGrammar::default())
    }

    /// Same as [`NamespacedId::new`] on the parts of `raw`.
    ///
    /// # Panics
    ///
    /// If `raw` contains more than one `:`. Use [`str::parse`] for untrusted input.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::new(parse_domain(raw), parse_path(raw))
    }

    pub(crate) fn with_grammar(domain: &str, path: &str, grammar: PathGrammar) -> Result<Self> {
        validate(domain, path, grammar)?;
        let mut full = String::with_capacity(domain.len() + 1 + path.len());
        full.push_str(domain);
        full.push(':');
        full.push_str(path);
        Ok(Self(Arc::new(Inner {
            full: full.into_boxed_str(),
            colon: domain.len(),
        })))
    }

    pub fn domain(&self) -> &str {
        &self.0.full[..self.0.colon]
    }

    pub fn path(&self) -> &str {
        &self.0.full[self.0.colon + 1..]
    }

    /// The canonical `domain:path` form.
    pub fn as_str(&self) -> &str {
        &self.0.full
    }

    pub fn len(&self) -> usize {
        self.0.full.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.full.is_empty()
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.0.full.as_bytes().get(index).map(|&b| b as char)
    }

    /// Slice of the canonical form. Out of bounds or inverted ranges give `None`.
    pub fn sub_sequence<R: RangeBounds<usize>>(&self, range: R) -> Option<&str> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.checked_add(1)?,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.checked_add(1)?,
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len(),
        };
        self.0.full.get(start..end)
    }

    /// Whether both handles point at the same interned allocation.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl PartialEq for NamespacedId {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || (self.domain() == other.domain() && self.path() == other.path())
    }
}

impl Eq for NamespacedId {}

impl Hash for NamespacedId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.domain().hash(state);
        self.path().hash(state);
    }
}

impl PartialOrd for NamespacedId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NamespacedId {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.domain(), self.path()).cmp(&(other.domain(), other.path()))
    }
}

impl fmt::Debug for NamespacedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamespacedId").field(&self.as_str()).finish()
    }
}

impl fmt::Display for NamespacedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for NamespacedId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for NamespacedId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self> {
        let (domain, path) = split(s)?;
        Self::new(domain, path)
    }
}

impl Serialize for NamespacedId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NamespacedId {
    fn deserialize<D: Deserializer<'de>>(de: D) -> std::result::Result<Self, D::Error> {
        <String>::deserialize(de)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
