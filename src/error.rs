use thiserror::Error;

/// Errors raised when a key, label list or token does not fit the hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Department ordinal outside `1..=departments`.
    #[error("unknown department {0}")]
    UnknownDepartment(u16),

    /// Class ordinal (or its department) outside the hierarchy.
    #[error("unknown class {department}_{class}")]
    UnknownClass { department: u16, class: u16 },

    /// Subclass ordinal (or its ancestors) outside the hierarchy.
    #[error("unknown subclass {department}_{class}_{subclass}")]
    UnknownSubclass {
        department: u16,
        class: u16,
        subclass: u16,
    },

    /// A hierarchy level was configured with no labels.
    #[error("{0} level has no labels")]
    EmptyLevel(&'static str),

    /// The same label appears twice within one level.
    #[error("duplicate {level} label {label:?}")]
    DuplicateLabel { level: &'static str, label: String },

    /// A level holds more labels than an ordinal can address.
    #[error("{level} level has {len} labels (max {max})")]
    LevelTooLarge {
        level: &'static str,
        len: usize,
        max: usize,
    },

    /// A saved token could not be parsed.
    #[error(transparent)]
    Token(#[from] TokenParseError),
}

/// Errors raised while parsing a `d`, `d_c` or `d_c_s` token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenParseError {
    #[error("empty token")]
    Empty,

    #[error("token {0:?} has more than three parts")]
    TooManyParts(String),

    #[error("token {token:?} has invalid ordinal {part:?}")]
    InvalidOrdinal { token: String, part: String },
}
