//! Error values for XSLT compilation and transformation.
//!
//! An [`XsltError`] carries a resource key and its arguments, an optional
//! source position (URI, line, column) and an optional underlying cause. Its
//! human-readable message is composed once, at construction, from templates
//! supplied by a [`ResourceLookup`]. Composition never fails: a missing or
//! malformed template degrades to `UNKNOWN(<key>)`.
//!
//! ```rust
//! use xslt_error::{keys, XsltError};
//!
//! let err = XsltError::with_location(
//!     keys::XSLT_INVALID_XPATH,
//!     ["foo("],
//!     Some("style.xsl"),
//!     12,
//!     4,
//!     None,
//! );
//! assert_eq!(
//!     err.message(),
//!     "'foo(' is an invalid XPath expression. An error occurred at style.xsl(12,4)."
//! );
//! ```

pub mod data;
pub mod error;
pub mod factory;
pub mod format;
pub mod message;
pub mod resources;

pub use data::{DetachedCause, XsltErrorData};
pub use error::{Cause, ErrorKind, Result, ResultCode, XsltError};
pub use factory::ErrorFactory;
pub use format::{format_template, FormatError};
pub use message::{compose_message, try_compose_message, unknown_message, ComposeError};
pub use resources::{keys, ResourceError, ResourceLookup, ResourceTable};
