use thiserror::Error;

/// Why a `%` directive could not be interpreted. The printf engine recovers
/// from every one of these by copying the directive through verbatim.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DirectiveError {
    #[error("pattern ended inside a conversion directive")]
    Truncated,
    #[error("unknown conversion '{}'", char::from(*.0))]
    UnknownConversion(u8),
    #[error("field width or precision out of range")]
    FieldOverflow,
}
