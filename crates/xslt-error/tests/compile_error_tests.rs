//! Compile-phase errors

use std::error::Error as _;

use xslt_error::{keys, ErrorFactory, ErrorKind, ResourceTable, XsltError};

#[test]
fn compile_error_with_line_embeds_location() {
    let err = XsltError::compile("unexpected token", Some("file.xsl"), 10, 5);

    insta::assert_snapshot!(
        err.message(),
        @"XSLT compile error at file.xsl(10,5). See InnerException for details."
    );
    assert_eq!(err.kind(), ErrorKind::CompileWithLocation);
    assert_eq!(err.resource_key(), keys::XSLT_COMPILE_ERROR);
    assert_eq!(err.args(), ["file.xsl", "10", "5"]);
}

#[test]
fn compile_error_without_line_uses_short_template() {
    let err = XsltError::compile("unexpected token", Some("file.xsl"), 0, 0);

    assert_eq!(err.message(), "XSLT compile error.");
    assert_eq!(err.kind(), ErrorKind::CompileWithoutLocation);
    assert_eq!(err.resource_key(), keys::XSLT_COMPILE_ERROR_NO_LOCATION);
    assert_eq!(err.args(), ["file.xsl", "0", "0"]);
}

#[test]
fn compile_error_without_line_ignores_column() {
    let err = XsltError::compile("unexpected token", Some("file.xsl"), 0, 31);

    assert_eq!(err.message(), "XSLT compile error.");
    assert_eq!(err.args(), ["file.xsl", "0", "31"]);
    assert_eq!(err.line_position(), 31);
}

#[test]
fn compile_error_is_not_suffixed_twice() {
    let err = XsltError::compile("bad", Some("dup.xsl"), 3, 8);

    assert_eq!(err.message().matches("dup.xsl(3,8)").count(), 1);
    assert!(!err.message().contains("An error occurred"));
}

#[test]
fn compile_error_keeps_location_queryable() {
    let err = XsltError::compile("bad", Some("nested/dir/a.xsl"), 120, 44);

    assert_eq!(err.source_uri(), Some("nested/dir/a.xsl"));
    assert_eq!(err.line_number(), 120);
    assert_eq!(err.line_position(), 44);
    assert!(err.is_compile_error());
}

#[test]
fn compile_error_without_uri_stores_none() {
    let err = XsltError::compile("bad", None, 2, 1);

    assert_eq!(err.source_uri(), None);
    assert_eq!(err.args(), ["", "2", "1"]);
    assert_eq!(
        err.message(),
        "XSLT compile error at (2,1). See InnerException for details."
    );
}

#[test]
fn compile_error_chains_inner_error() {
    let inner = XsltError::create(keys::XSLT_UNKNOWN_XSLT_FUNCTION, ["node-set"]);
    let err = XsltError::compile(inner, Some("ext.xsl"), 4, 22);

    let source = err.source().expect("compile errors always have a cause");
    assert_eq!(source.to_string(), "'node-set()' is an unknown XSLT function.");
    let inner = source
        .downcast_ref::<XsltError>()
        .expect("cause should be the original XsltError");
    assert_eq!(inner.kind(), ErrorKind::Generic);
}

#[test]
fn localized_compile_templates_are_used() {
    let overrides = ResourceTable::from_iter([
        (
            keys::XSLT_COMPILE_ERROR,
            "Erreur de compilation XSLT dans {0}({1},{2}).",
        ),
        (keys::XSLT_COMPILE_ERROR_NO_LOCATION, "Erreur de compilation XSLT."),
    ]);
    let table = ResourceTable::with_overrides(overrides);
    let factory = ErrorFactory::new(&table);

    let located = factory.compile("x", Some("f.xsl"), 9, 1);
    let unlocated = factory.compile("x", Some("f.xsl"), 0, 0);

    assert_eq!(located.message(), "Erreur de compilation XSLT dans f.xsl(9,1).");
    assert_eq!(unlocated.message(), "Erreur de compilation XSLT.");
}

#[test]
fn compile_error_with_missing_template_degrades() {
    let table = ResourceTable::new();
    let err = ErrorFactory::new(&table).compile("x", Some("f.xsl"), 9, 1);

    assert_eq!(err.message(), "UNKNOWN(Xslt_CompileError)");
    assert_eq!(err.line_number(), 9);
}

#[test]
fn compile_error_from_plain_message() {
    let err = XsltError::compile_from_message("Stylesheet is not well-formed");

    assert_eq!(err.message(), "Stylesheet is not well-formed");
    assert_eq!(err.kind(), ErrorKind::CompileWithoutLocation);
    assert!(err.is_compile_error());
    assert_eq!(err.resource_key(), keys::XML_USER_EXCEPTION);
    assert_eq!(err.source_uri(), None);
    assert_eq!(err.line_number(), 0);
    assert!(err.source().is_none());
}

#[test]
fn compile_error_from_plain_message_keeps_cause() {
    let err = XsltError::compile_from_message_with_cause("Import failed", "missing href");

    assert_eq!(err.message(), "Import failed");
    assert_eq!(
        err.source().map(|cause| cause.to_string()),
        Some("missing href".to_string())
    );
}
