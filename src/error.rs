pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors that can occur while constructing a constraint store.
///
/// Propagation failure and search exhaustion are *not* errors: the former is
/// reported as a `false` return from arc consistency, the latter as a `None`
/// solution. Only a malformed problem definition is fatal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge references unknown variable {variable}")]
    UnknownVariable { variable: String },

    #[error("variable {variable} was declared without a domain")]
    MissingDomain { variable: String },

    #[error("expected {expected} puzzle cells, found {found}")]
    MalformedPuzzle { expected: usize, found: usize },
}
