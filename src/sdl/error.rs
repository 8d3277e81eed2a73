use crate::error::{Error, ErrorType};
use std::{error, fmt::Display};

/// Internal error of the SDL parser and the schema builder.
///
/// It's converted into the crate's [Error] once it leaves either stage, which is where source
/// locations and snippets are attached.
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaError {
    SyntaxError(String),
    ValidationError(String),
}

impl SchemaError {
    #[inline]
    pub fn error_type(&self) -> ErrorType {
        match self {
            SchemaError::SyntaxError(_) => ErrorType::SchemaParse,
            SchemaError::ValidationError(_) => ErrorType::SchemaBuild,
        }
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::SyntaxError(s) => write!(f, "{}", s),
            SchemaError::ValidationError(s) => write!(f, "{}", s),
        }
    }
}

impl error::Error for SchemaError {}

impl From<SchemaError> for Error {
    fn from(error: SchemaError) -> Self {
        let error_type = error.error_type();
        Error::new(error.to_string(), error_type)
    }
}

macro_rules! syntax_err {
    ($msg:literal, $($arg:tt)*) => {
        Err(syntax!($msg, $($arg)*))
    };

    ($msg:literal) => {
        Err(syntax!($msg))
    };
}

macro_rules! syntax {
    ($msg:literal, $($arg:tt)*) => {
        SchemaError::SyntaxError(format!($msg, $($arg)*))
    };

    ($msg:literal) => {
        SchemaError::SyntaxError(format!($msg))
    };
}

macro_rules! validation {
    ($msg:literal, $($arg:tt)*) => {
        SchemaError::ValidationError(format!($msg, $($arg)*))
    };

    ($msg:literal) => {
        SchemaError::ValidationError(format!($msg))
    };
}

// Required for macro visibility.
pub(crate) use syntax;
pub(crate) use syntax_err;
pub(crate) use validation;
