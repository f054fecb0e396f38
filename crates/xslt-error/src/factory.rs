//! Construction of [`XsltError`] values over an injected resource table

use std::fmt;

use crate::error::{Cause, ErrorKind, ResultCode, XsltError};
use crate::message::compose_message;
use crate::resources::{keys, ResourceLookup, ResourceTable};

/// Builds errors whose messages are composed from a given [`ResourceLookup`].
///
/// Every path ends in the same full constructor, so the composition rules
/// are identical whichever entry point a caller uses.
#[derive(Clone, Copy)]
pub struct ErrorFactory<'r> {
    resources: &'r dyn ResourceLookup,
}

impl<'r> ErrorFactory<'r> {
    /// Create a factory composing messages from `resources`
    pub fn new(resources: &'r dyn ResourceLookup) -> Self {
        Self { resources }
    }

    /// The table messages are composed from
    pub fn resources(&self) -> &'r dyn ResourceLookup {
        self.resources
    }

    /// Wrap a plain message under [`keys::XML_USER_EXCEPTION`]
    pub fn user<S: Into<String>>(&self, message: S, cause: Option<Cause>) -> XsltError {
        let message: String = message.into();
        self.with_location(keys::XML_USER_EXCEPTION, [message], None, 0, 0, cause)
    }

    /// Format `res` with `args`, without a source position
    pub fn create<I, S>(&self, res: &str, args: I) -> XsltError
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_location(res, args, None, 0, 0, None)
    }

    /// Format `res` with `args` and chain the failure that caused it
    pub fn create_with_cause<I, S, C>(&self, res: &str, args: I, cause: C) -> XsltError
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        C: Into<Cause>,
    {
        self.with_location(res, args, None, 0, 0, Some(cause.into()))
    }

    /// The full form: resource key, arguments, position and cause
    pub fn with_location<I, S>(
        &self,
        res: &str,
        args: I,
        source_uri: Option<&str>,
        line_number: u32,
        line_position: u32,
        cause: Option<Cause>,
    ) -> XsltError
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect();
        self.build(
            ErrorKind::Generic,
            res,
            args,
            source_uri,
            (line_number, line_position),
            cause,
        )
    }

    /// A compilation failure.
    ///
    /// The resource key depends on whether the line is known; either way the
    /// arguments are the URI, line and column, and the same triple stays
    /// queryable through the accessors.
    pub fn compile<C: Into<Cause>>(
        &self,
        cause: C,
        source_uri: Option<&str>,
        line_number: u32,
        line_position: u32,
    ) -> XsltError {
        let kind = ErrorKind::compile_for_line(line_number);
        let res = kind
            .compile_resource_key()
            .unwrap_or(keys::XSLT_COMPILE_ERROR_NO_LOCATION);
        let args = vec![
            source_uri.unwrap_or("").to_owned(),
            line_number.to_string(),
            line_position.to_string(),
        ];
        self.build(
            kind,
            res,
            args,
            source_uri,
            (line_number, line_position),
            Some(cause.into()),
        )
    }

    /// A compilation failure described by a plain message, with no location
    pub fn compile_message<S: Into<String>>(&self, message: S, cause: Option<Cause>) -> XsltError {
        let message: String = message.into();
        self.build(
            ErrorKind::CompileWithoutLocation,
            keys::XML_USER_EXCEPTION,
            vec![message],
            None,
            (0, 0),
            cause,
        )
    }

    fn build(
        &self,
        kind: ErrorKind,
        res: &str,
        args: Vec<String>,
        source_uri: Option<&str>,
        (line_number, line_position): (u32, u32),
        cause: Option<Cause>,
    ) -> XsltError {
        let message = compose_message(
            self.resources,
            res,
            args.as_slice(),
            source_uri,
            line_number,
            line_position,
        );

        XsltError {
            kind,
            res: res.to_owned(),
            args,
            source_uri: source_uri.map(str::to_owned),
            line_number,
            line_position,
            message,
            result_code: ResultCode::XML_XSLT,
            cause,
        }
    }
}

impl ErrorFactory<'static> {
    /// A factory over [`ResourceTable::builtin`]
    pub fn builtin() -> Self {
        Self::new(ResourceTable::builtin())
    }
}

impl Default for ErrorFactory<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for ErrorFactory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorFactory").finish_non_exhaustive()
    }
}
