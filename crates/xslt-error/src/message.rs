//! Message composition for located errors

use crate::format::{format_template, FormatError};
use crate::resources::{keys, ResourceLookup};

/// Why a message could not be composed from its templates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("no template for resource key '{0}'")]
    MissingResource(String),

    #[error("malformed template: {0}")]
    Format(#[from] FormatError),
}

/// The placeholder used when a message cannot be composed
pub fn unknown_message(key: &str) -> String {
    format!("UNKNOWN({key})")
}

/// Compose the message for `key`, appending the file position when the line
/// is known.
///
/// The position suffix is never appended to [`keys::XSLT_COMPILE_ERROR`],
/// whose own arguments already carry the location. Line and column are
/// rendered as plain ASCII digits and an absent URI renders as the empty
/// string.
pub fn try_compose_message<R, S>(
    resources: &R,
    key: &str,
    args: &[S],
    source_uri: Option<&str>,
    line: u32,
    column: u32,
) -> Result<String, ComposeError>
where
    R: ResourceLookup + ?Sized,
    S: AsRef<str>,
{
    let mut message = format_resource(resources, key, args)?;

    if key != keys::XSLT_COMPILE_ERROR && line != 0 {
        let line = line.to_string();
        let column = column.to_string();
        let position = format_resource(
            resources,
            keys::XML_ERROR_FILE_POSITION,
            &[source_uri.unwrap_or(""), line.as_str(), column.as_str()],
        )?;
        message.push(' ');
        message.push_str(&position);
    }

    Ok(message)
}

/// Like [`try_compose_message`], but degrades to [`unknown_message`]
/// instead of failing.
pub fn compose_message<R, S>(
    resources: &R,
    key: &str,
    args: &[S],
    source_uri: Option<&str>,
    line: u32,
    column: u32,
) -> String
where
    R: ResourceLookup + ?Sized,
    S: AsRef<str>,
{
    try_compose_message(resources, key, args, source_uri, line, column).unwrap_or_else(|err| {
        tracing::warn!(
            resource_key = key,
            error = %err,
            "falling back to placeholder error message"
        );
        unknown_message(key)
    })
}

fn format_resource<R, S>(resources: &R, key: &str, args: &[S]) -> Result<String, ComposeError>
where
    R: ResourceLookup + ?Sized,
    S: AsRef<str>,
{
    let template = resources
        .template(key)
        .ok_or_else(|| ComposeError::MissingResource(key.to_owned()))?;
    Ok(format_template(template, args)?)
}
