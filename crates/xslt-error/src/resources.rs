//! Message templates addressed by resource key.
//!
//! Error values never reach for ambient global state: every construction
//! path is handed a [`ResourceLookup`]. [`ResourceTable::builtin`] is the
//! English table the convenience constructors fall back to, and tables can
//! be loaded from JSON to localise or extend it.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Resource keys understood by the built-in table
pub mod keys {
    /// Wraps a caller-supplied message verbatim
    pub const XML_USER_EXCEPTION: &str = "Xml_UserException";
    /// Positional suffix appended to located errors
    pub const XML_ERROR_FILE_POSITION: &str = "Xml_ErrorFilePosition";
    /// Compile error whose template already embeds the location
    pub const XSLT_COMPILE_ERROR: &str = "Xslt_CompileError";
    /// Compile error with no known line
    pub const XSLT_COMPILE_ERROR_NO_LOCATION: &str = "Xslt_CompileError2";

    pub const XSLT_INVALID_XPATH: &str = "Xslt_InvalidXPath";
    pub const XSLT_MISSING_ATTRIBUTE: &str = "Xslt_MissingAttribute";
    pub const XSLT_INVALID_ATTR_VALUE: &str = "Xslt_InvalidAttrValue";
    pub const XSLT_NOT_ALLOWED_HERE: &str = "Xslt_NotAllowedHere";
    pub const XSLT_UNKNOWN_XSLT_FUNCTION: &str = "Xslt_UnknownXsltFunction";
    pub const XSLT_INVALID_PREFIX: &str = "Xslt_InvalidPrefix";
    pub const XSLT_NO_NAMED_TEMPLATE: &str = "Xslt_NoNamedTemplate";
    pub const XSLT_DUPLICATE_VARIABLE: &str = "Xslt_DupVarName";
    pub const XSLT_CIRCULAR_REFERENCE: &str = "Xslt_CircularReference";
    pub const XSLT_NO_STYLESHEET_LOADED: &str = "Xslt_NoStylesheetLoaded";
    pub const XSLT_TERMINATED: &str = "Xslt_Terminate";
}

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (keys::XML_USER_EXCEPTION, "{0}"),
    (keys::XML_ERROR_FILE_POSITION, "An error occurred at {0}({1},{2})."),
    (
        keys::XSLT_COMPILE_ERROR,
        "XSLT compile error at {0}({1},{2}). See InnerException for details.",
    ),
    (keys::XSLT_COMPILE_ERROR_NO_LOCATION, "XSLT compile error."),
    (keys::XSLT_INVALID_XPATH, "'{0}' is an invalid XPath expression."),
    (keys::XSLT_MISSING_ATTRIBUTE, "Missing mandatory attribute '{0}'."),
    (
        keys::XSLT_INVALID_ATTR_VALUE,
        "'{1}' is an invalid value for the '{0}' attribute.",
    ),
    (
        keys::XSLT_NOT_ALLOWED_HERE,
        "'{0}' cannot be a child of the '{1}' element.",
    ),
    (
        keys::XSLT_UNKNOWN_XSLT_FUNCTION,
        "'{0}()' is an unknown XSLT function.",
    ),
    (keys::XSLT_INVALID_PREFIX, "Prefix '{0}' is not defined."),
    (
        keys::XSLT_NO_NAMED_TEMPLATE,
        "Named template '{0}' does not exist.",
    ),
    (
        keys::XSLT_DUPLICATE_VARIABLE,
        "Variable or parameter '{0}' was duplicated within the same scope.",
    ),
    (
        keys::XSLT_CIRCULAR_REFERENCE,
        "Stylesheet '{0}' cannot directly or indirectly include or import itself.",
    ),
    (keys::XSLT_NO_STYLESHEET_LOADED, "No stylesheet was loaded."),
    (keys::XSLT_TERMINATED, "Transform terminated: '{0}'."),
];

/// Result type for resource table loading
pub type Result<T> = std::result::Result<T, ResourceError>;

/// Failure to load a resource table
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The table file could not be read
    #[error("Failed to read resource table {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table is not a JSON object of string templates
    #[error("Invalid resource table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only source of message templates.
///
/// Lookups are pure reads, so one table can back any number of concurrent
/// error constructions.
pub trait ResourceLookup: Send + Sync {
    /// Get the template registered for `key`, if any
    fn template(&self, key: &str) -> Option<&str>;

    /// Check whether `key` resolves to a template
    fn contains(&self, key: &str) -> bool {
        self.template(key).is_some()
    }
}

impl<T: ResourceLookup + ?Sized> ResourceLookup for &T {
    fn template(&self, key: &str) -> Option<&str> {
        (**self).template(key)
    }
}

/// A key to template map.
///
/// Serializes as a flat JSON object, e.g.
/// `{"Xslt_CompileError2": "Erreur de compilation XSLT."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceTable {
    templates: HashMap<String, String>,
}

impl ResourceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide English table.
    pub fn builtin() -> &'static ResourceTable {
        static BUILTIN: OnceLock<ResourceTable> = OnceLock::new();
        BUILTIN.get_or_init(|| BUILTIN_TEMPLATES.iter().copied().collect())
    }

    /// Built-in templates with `overrides` layered on top
    pub fn with_overrides(overrides: ResourceTable) -> Self {
        let mut table = Self::builtin().clone();
        table.extend(overrides);
        table
    }

    /// Parse a table from a JSON object
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a table from a JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a table from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            entries = table.len(),
            "loaded resource table"
        );
        Ok(table)
    }

    /// Register or replace a template, returning the previous one
    pub fn insert<K, V>(&mut self, key: K, template: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.templates.insert(key.into(), template.into())
    }

    /// Overlay every entry of `other`, replacing existing keys
    pub fn extend(&mut self, other: ResourceTable) {
        self.templates.extend(other.templates);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over the registered keys in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

impl ResourceLookup for ResourceTable {
    fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for ResourceTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            templates: iter
                .into_iter()
                .map(|(key, template)| (key.into(), template.into()))
                .collect(),
        }
    }
}
