use thiserror::Error;

/// Why the identity of a callable could not be decoded.
///
/// Resolution only labels invocation outcomes, so the registry never surfaces
/// this error to its callers; the affected outcome carries no identity instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("malformed signature `{signature}`: {reason}")]
    MalformedSignature {
        signature: String,
        reason: &'static str,
    },

    #[error("no owning module or type in `{type_name}`")]
    MissingOwner { type_name: String },
}
