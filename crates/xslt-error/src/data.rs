//! Serializable snapshots of [`XsltError`]
//!
//! A live cause cannot cross a process boundary, so the snapshot keeps the
//! rendered cause chain instead. Restoring a snapshot keeps its stored
//! message verbatim and rebuilds the chain from those rendered messages.
//! The result code is always the XML/XSLT category, whatever the snapshot
//! says, and a compile kind that does not match its resource key is restored
//! as generic.

use serde::{Deserialize, Serialize};

use crate::error::{Cause, ErrorKind, ResultCode, XsltError};

/// Plain-data form of an [`XsltError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XsltErrorData {
    pub kind: ErrorKind,
    pub res: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
    #[serde(default)]
    pub line_number: u32,
    #[serde(default)]
    pub line_position: u32,
    pub message: String,
    pub result_code: ResultCode,
    /// Rendered cause chain, nearest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

/// A cause restored from its rendered message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DetachedCause {
    message: String,
    #[source]
    next: Option<Box<DetachedCause>>,
}

impl DetachedCause {
    /// Rebuild a chain from rendered messages, nearest first
    pub fn chain<I>(messages: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: DoubleEndedIterator,
    {
        messages.into_iter().rev().fold(None, |next, message| {
            Some(DetachedCause {
                message,
                next: next.map(Box::new),
            })
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl XsltError {
    pub fn to_data(&self) -> XsltErrorData {
        XsltErrorData::from(self)
    }

    /// Serialize the snapshot as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_data())
    }

    /// Restore an error from a JSON snapshot
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<XsltErrorData>(json).map(XsltError::from)
    }
}

impl From<&XsltError> for XsltErrorData {
    fn from(err: &XsltError) -> Self {
        XsltErrorData {
            kind: err.kind(),
            res: err.resource_key().to_owned(),
            args: err.args().to_vec(),
            source_uri: err.source_uri().map(str::to_owned),
            line_number: err.line_number(),
            line_position: err.line_position(),
            message: err.message().to_owned(),
            result_code: err.result_code(),
            causes: err.causes().map(|cause| cause.to_string()).collect(),
        }
    }
}

impl From<XsltErrorData> for XsltError {
    fn from(data: XsltErrorData) -> Self {
        let kind = if data.kind.accepts_resource_key(&data.res) {
            data.kind
        } else {
            tracing::debug!(
                kind = ?data.kind,
                resource_key = %data.res,
                "snapshot kind does not match its resource key, restoring as generic"
            );
            ErrorKind::Generic
        };

        XsltError {
            kind,
            res: data.res,
            args: data.args,
            source_uri: data.source_uri,
            line_number: data.line_number,
            line_position: data.line_position,
            message: data.message,
            result_code: ResultCode::XML_XSLT,
            cause: DetachedCause::chain(data.causes).map(|cause| Box::new(cause) as Cause),
        }
    }
}
