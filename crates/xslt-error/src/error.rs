//! The XSLT error value

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::factory::ErrorFactory;
use crate::resources::keys;

/// Underlying failure chained to an [`XsltError`]
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Result type for XSLT compilation and transformation
pub type Result<T> = std::result::Result<T, XsltError>;

/// Which construction path produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Runtime or user error under any resource key
    Generic,
    /// Stylesheet compilation failed at a known line
    CompileWithLocation,
    /// Stylesheet compilation failed with no line information
    CompileWithoutLocation,
}

impl ErrorKind {
    /// Pick the compile kind for an error reported at `line`
    pub fn compile_for_line(line: u32) -> Self {
        if line != 0 {
            ErrorKind::CompileWithLocation
        } else {
            ErrorKind::CompileWithoutLocation
        }
    }

    /// Check whether this kind came from a compile construction path
    pub fn is_compile(self) -> bool {
        !matches!(self, ErrorKind::Generic)
    }

    /// The resource key a compile kind always formats with
    pub fn compile_resource_key(self) -> Option<&'static str> {
        match self {
            ErrorKind::Generic => None,
            ErrorKind::CompileWithLocation => Some(keys::XSLT_COMPILE_ERROR),
            ErrorKind::CompileWithoutLocation => Some(keys::XSLT_COMPILE_ERROR_NO_LOCATION),
        }
    }

    /// Check whether an error of this kind can carry `res`.
    ///
    /// Compile errors built from a plain message use the user exception key
    /// and have no location.
    pub fn accepts_resource_key(self, res: &str) -> bool {
        match self {
            ErrorKind::Generic => true,
            ErrorKind::CompileWithLocation => res == keys::XSLT_COMPILE_ERROR,
            ErrorKind::CompileWithoutLocation => {
                res == keys::XSLT_COMPILE_ERROR_NO_LOCATION || res == keys::XML_USER_EXCEPTION
            }
        }
    }
}

/// Platform error category attached to every error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultCode(i32);

impl ResultCode {
    /// The XML/XSLT failure category
    pub const XML_XSLT: ResultCode = ResultCode(0x8013_1942_u32 as i32);

    /// The code as the platform's signed 32-bit value
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0 as u32)
    }
}

/// An XSLT compilation or transformation failure.
///
/// The message is composed once, when the error is built, from a resource
/// key, its arguments and an optional source position. The error is
/// immutable afterwards: accessors always return exactly what it was
/// constructed with, however the message chose to render it.
///
/// Build one through the associated functions below (which use
/// [`ResourceTable::builtin`](crate::ResourceTable::builtin)) or through an
/// [`ErrorFactory`] over an injected table.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct XsltError {
    pub(crate) kind: ErrorKind,
    pub(crate) res: String,
    pub(crate) args: Vec<String>,
    pub(crate) source_uri: Option<String>,
    pub(crate) line_number: u32,
    pub(crate) line_position: u32,
    pub(crate) message: String,
    pub(crate) result_code: ResultCode,
    #[source]
    pub(crate) cause: Option<Cause>,
}

impl XsltError {
    /// Wrap a plain message under the user exception key
    pub fn new<S: Into<String>>(message: S) -> Self {
        ErrorFactory::builtin().user(message, None)
    }

    /// Wrap a plain message and the failure that caused it
    pub fn with_cause<S, C>(message: S, cause: C) -> Self
    where
        S: Into<String>,
        C: Into<Cause>,
    {
        ErrorFactory::builtin().user(message, Some(cause.into()))
    }

    /// Format `res` with `args`, without a source position
    pub fn create<I, S>(res: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ErrorFactory::builtin().create(res, args)
    }

    /// Format `res` with `args` and chain the failure that caused it
    pub fn create_with_cause<I, S, C>(res: &str, args: I, cause: C) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        C: Into<Cause>,
    {
        ErrorFactory::builtin().create_with_cause(res, args, cause)
    }

    /// The full form: resource key, arguments, position and cause
    pub fn with_location<I, S>(
        res: &str,
        args: I,
        source_uri: Option<&str>,
        line_number: u32,
        line_position: u32,
        cause: Option<Cause>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ErrorFactory::builtin().with_location(
            res,
            args,
            source_uri,
            line_number,
            line_position,
            cause,
        )
    }

    /// A stylesheet compilation failure at the given position
    pub fn compile<C: Into<Cause>>(
        cause: C,
        source_uri: Option<&str>,
        line_number: u32,
        line_position: u32,
    ) -> Self {
        ErrorFactory::builtin().compile(cause, source_uri, line_number, line_position)
    }

    /// A stylesheet compilation failure described by a plain message
    pub fn compile_from_message<S: Into<String>>(message: S) -> Self {
        ErrorFactory::builtin().compile_message(message, None)
    }

    /// A plain-message compilation failure with the failure that caused it
    pub fn compile_from_message_with_cause<S, C>(message: S, cause: C) -> Self
    where
        S: Into<String>,
        C: Into<Cause>,
    {
        ErrorFactory::builtin().compile_message(message, Some(cause.into()))
    }

    /// Which construction path produced this error
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check whether this is a stylesheet compilation failure
    pub fn is_compile_error(&self) -> bool {
        self.kind.is_compile()
    }

    /// The resource key the message was composed from
    pub fn resource_key(&self) -> &str {
        &self.res
    }

    /// Arguments substituted into the message template
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// URI of the document the error was reported against, if known
    pub fn source_uri(&self) -> Option<&str> {
        self.source_uri.as_deref()
    }

    /// One-based line number, or 0 when unknown
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// One-based column number, or 0 when unknown
    pub fn line_position(&self) -> u32 {
        self.line_position
    }

    /// The message composed at construction
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Platform category, always [`ResultCode::XML_XSLT`]
    pub fn result_code(&self) -> ResultCode {
        self.result_code
    }

    /// The directly chained failure
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Walk the whole cause chain, nearest first
    pub fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(StdError::source(self), |&err| err.source())
    }
}

impl Default for XsltError {
    fn default() -> Self {
        XsltError::new("")
    }
}
