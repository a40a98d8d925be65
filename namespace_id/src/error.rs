use thiserror::Error;

/// Every variant carries the offending `domain:path` string.
///
/// Multiple `:` separators are a caller bug for [`crate::parse_domain`],
/// [`crate::parse_path`] and the `from_string` constructors, which panic.
/// Only the fallible entry points (`FromStr`, deserialization, config
/// preloading) report them as [`IdError::TooManySeparators`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("Domain cannot contain a dot nor a slash character ({0})")]
    DomainSeparator(String),
    #[error("Illegal character in domain ({0}). Must match [0-9a-z_-]+")]
    IllegalDomain(String),
    #[error("Illegal character in path ({0}). Must match {1}")]
    IllegalPath(String, &'static str),
    #[error("Namespaced ID can only have at most one colon ':' ({0})")]
    TooManySeparators(String),
}

pub type Result<V> = std::result::Result<V, IdError>;
