use thiserror::Error;

/// Некорректные входные данные. Такие ошибки означают, что вызывающая сторона
/// передала то, что декодер не способен даже интерпретировать: слишком длинное
/// сообщение, деление на нулевой многочлен, позиции стираний вне сообщения.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("message of {len} bytes is too long, GF256 limits a block to 255 bytes")]
    MessageTooLong { len: usize },

    #[error("division by a zero polynomial")]
    ZeroPolynomialDivision,

    #[error("erasure position {position} is out of range for a message of {len} bytes")]
    ErasureOutOfRange { position: usize, len: usize },

    #[error("erasure position {position} is listed more than once")]
    DuplicateErasure { position: usize },
}

/// Кодовое слово не поддаётся исправлению: ошибок и стираний больше, чем
/// позволяет число контрольных символов, либо найденный локатор противоречив.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReedSolomonError {
    #[error("{erasures} erasures exceed {control} control symbols")]
    TooManyErasures { erasures: usize, control: usize },

    #[error(
        "too many errors to correct: {errors} errors and {erasures} erasures \
        do not fit into {control} control symbols"
    )]
    TooManyErrors {
        errors: usize,
        erasures: usize,
        control: usize,
    },

    #[error("error locator degenerated into the zero polynomial")]
    ZeroLocator,

    #[error("error locator does not split into roots over GF256")]
    NoLocatorRoots,

    #[error("found {found} errata positions, locator degree expects {expected}")]
    PositionsMismatch { found: usize, expected: usize },

    #[error("errata position {position} is out of range for a message of {len} bytes")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("locator derivative vanished at errata position {position}")]
    ZeroDerivative { position: usize },

    #[error("syndromes are non-zero after correction, the message is beyond repair")]
    CorrectionFailed,
}
