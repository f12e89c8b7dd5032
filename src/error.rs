use std::env;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_geolocation_error(&self) -> bool {
        (200..=299).contains(&self.code)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<ParseIntError> for Error {
    fn from(_: ParseIntError) -> Self {
        invalid_input_error()
    }
}

impl From<ParseFloatError> for Error {
    fn from(_: ParseFloatError) -> Self {
        invalid_input_error()
    }
}

impl From<serde_json::Error> for Error {
    fn from(_: serde_json::Error) -> Self {
        unexpected_error()
    }
}

pub fn invalid_state_error() -> Error {
    Error {
        code: 100,
        message: "invalid state".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

pub fn geolocation_unsupported_error() -> Error {
    Error {
        code: 200,
        message: "geolocation not supported".into(),
    }
}

pub fn permission_denied_error() -> Error {
    Error {
        code: 201,
        message: "geolocation permission denied".into(),
    }
}

pub fn timeout_error() -> Error {
    Error {
        code: 202,
        message: "geolocation timed out".into(),
    }
}

pub fn position_unavailable_error() -> Error {
    Error {
        code: 203,
        message: "position unavailable".into(),
    }
}
