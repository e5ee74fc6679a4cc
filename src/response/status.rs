use std::fmt;

/// Status code of a reply or of a single shipment in it.
///
/// The API reports HTTP-style codes; the named variants are the ones the
/// client reacts to, anything else is kept in [`StatusCode::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// No status was found in the reply.
    #[default]
    NotSet,
    NoError,
    /// Succeeded with warnings.
    WeakWarning,
    /// Service temporarily unavailable.
    ServiceUnavailable,
    General,
    AuthFailed,
    HardValidationError,
    UnknownShipmentNumber,
    Other(i64),
}

impl StatusCode {
    pub fn code(&self) -> i64 {
        match self {
            Self::NotSet => -1,
            Self::NoError => 200,
            Self::WeakWarning => 1,
            Self::ServiceUnavailable => 500,
            Self::General => 1000,
            Self::AuthFailed => 1001,
            Self::HardValidationError => 1101,
            Self::UnknownShipmentNumber => 2000,
            Self::Other(code) => *code,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            -1 => Self::NotSet,
            200 => Self::NoError,
            1 => Self::WeakWarning,
            500 => Self::ServiceUnavailable,
            1000 => Self::General,
            1001 => Self::AuthFailed,
            1101 => Self::HardValidationError,
            2000 => Self::UnknownShipmentNumber,
            other => Self::Other(other),
        }
    }

    pub fn is_no_error(&self) -> bool {
        *self == Self::NoError
    }
}

impl From<i64> for StatusCode {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_codes_round_trip() {
        for status in [
            StatusCode::NotSet,
            StatusCode::NoError,
            StatusCode::WeakWarning,
            StatusCode::ServiceUnavailable,
            StatusCode::General,
            StatusCode::AuthFailed,
            StatusCode::HardValidationError,
            StatusCode::UnknownShipmentNumber,
        ] {
            assert_eq!(StatusCode::from_code(status.code()), status);
        }
    }

    #[test]
    fn unknown_codes_are_kept() {
        assert_eq!(StatusCode::from_code(400), StatusCode::Other(400));
        assert_eq!(StatusCode::Other(401).code(), 401);
        assert_eq!(StatusCode::from(200).to_string(), "200");
    }
}
