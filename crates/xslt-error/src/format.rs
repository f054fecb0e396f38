//! Positional placeholder substitution for message templates.
//!
//! Templates use composite formatting: `{0}` inserts the first argument,
//! `{1,8}` right-aligns the second argument in eight columns, `{1,-8}`
//! left-aligns it, and `{0:spec}` accepts a format specifier that is ignored
//! because every argument is already a string. `{{` and `}}` are literal
//! braces. Nothing here consults a locale.

use std::iter;

/// Alignment widths at or above this are rejected
pub const MAX_ALIGNMENT: u64 = 1_000_000;

/// Result type for template formatting
pub type Result<T> = std::result::Result<T, FormatError>;

/// A template that cannot be expanded with the given arguments
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A `{` without its closing `}`, or a lone `}`
    #[error("unbalanced brace at position {position}")]
    UnbalancedBrace { position: usize },

    /// Placeholder body is not `index[,alignment][:spec]`
    #[error("invalid placeholder at position {position}")]
    InvalidPlaceholder { position: usize },

    /// Placeholder refers past the end of the argument list
    #[error("placeholder index {index} is out of range for {count} argument(s)")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Expand `template`, substituting each placeholder with the matching argument.
pub fn format_template<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let mut end = None;
                for (i, inner) in chars.by_ref() {
                    match inner {
                        '}' => {
                            end = Some(i);
                            break;
                        }
                        '{' => return Err(FormatError::InvalidPlaceholder { position }),
                        _ => {}
                    }
                }
                let end = end.ok_or(FormatError::UnbalancedBrace { position })?;
                write_item(&mut out, &template[position + 1..end], args, position)?;
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_none() {
                    return Err(FormatError::UnbalancedBrace { position });
                }
                out.push('}');
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

fn write_item<S: AsRef<str>>(
    out: &mut String,
    item: &str,
    args: &[S],
    position: usize,
) -> Result<()> {
    let invalid = FormatError::InvalidPlaceholder { position };

    let head = item.split_once(':').map_or(item, |(head, _spec)| head);
    let (index, alignment) = match head.split_once(',') {
        Some((index, width)) => (index.trim(), Some(width.trim())),
        None => (head.trim(), None),
    };

    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid);
    }
    let index: usize = index.parse().map_err(|_| invalid.clone())?;
    let value = args
        .get(index)
        .ok_or(FormatError::IndexOutOfRange {
            index,
            count: args.len(),
        })?
        .as_ref();

    let width: i64 = match alignment {
        Some(width) => width.parse().map_err(|_| invalid.clone())?,
        None => 0,
    };
    if width.unsigned_abs() >= MAX_ALIGNMENT {
        return Err(invalid);
    }
    let pad = (width.unsigned_abs() as usize).saturating_sub(value.chars().count());

    if width > 0 {
        out.extend(iter::repeat(' ').take(pad));
        out.push_str(value);
    } else {
        out.push_str(value);
        out.extend(iter::repeat(' ').take(pad));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positional_arguments() {
        let out = format_template("{1} before {0}", &["a", "b"]).unwrap();
        assert_eq!(out, "b before a");
    }

    #[test]
    fn repeats_and_skips_arguments() {
        let out = format_template("{0}{0}", &["x", "unused"]).unwrap();
        assert_eq!(out, "xx");
    }

    #[test]
    fn escaped_braces_are_literal() {
        let out = format_template("{{{0}}}", &["v"]).unwrap();
        assert_eq!(out, "{v}");
    }

    #[test]
    fn alignment_pads_on_either_side() {
        assert_eq!(format_template("[{0,4}]", &["ab"]).unwrap(), "[  ab]");
        assert_eq!(format_template("[{0,-4}]", &["ab"]).unwrap(), "[ab  ]");
        assert_eq!(format_template("[{0,1}]", &["ab"]).unwrap(), "[ab]");
    }

    #[test]
    fn oversized_alignment_is_rejected() {
        assert_eq!(
            format_template("{0,99999999999999}", &["x"]).unwrap_err(),
            FormatError::InvalidPlaceholder { position: 0 }
        );
        assert_eq!(
            format_template("a{0,-1000000}", &["x"]).unwrap_err(),
            FormatError::InvalidPlaceholder { position: 1 }
        );
        assert_eq!(format_template("{0,999999}", &["x"]).unwrap().len(), 999_999);
    }

    #[test]
    fn format_spec_is_ignored_for_strings() {
        assert_eq!(format_template("{0:N2}", &["12"]).unwrap(), "12");
    }

    #[test]
    fn template_without_placeholders_ignores_args() {
        assert_eq!(format_template("plain", &["x"]).unwrap(), "plain");
        assert_eq!(format_template::<&str>("plain", &[]).unwrap(), "plain");
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let err = format_template("{2}", &["a", "b"]).unwrap_err();
        assert_eq!(err, FormatError::IndexOutOfRange { index: 2, count: 2 });
    }

    #[test]
    fn malformed_templates_are_errors() {
        assert_eq!(
            format_template("oops {0", &["a"]).unwrap_err(),
            FormatError::UnbalancedBrace { position: 5 }
        );
        assert_eq!(
            format_template("oops }", &["a"]).unwrap_err(),
            FormatError::UnbalancedBrace { position: 5 }
        );
        assert_eq!(
            format_template("{x}", &["a"]).unwrap_err(),
            FormatError::InvalidPlaceholder { position: 0 }
        );
        assert_eq!(
            format_template("{}", &["a"]).unwrap_err(),
            FormatError::InvalidPlaceholder { position: 0 }
        );
    }
}
