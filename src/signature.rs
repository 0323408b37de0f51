/// Signature string tokenizer.
///
/// A signature string is the text produced by Qt's `SIGNAL(...)` and
/// `SLOT(...)` macros: a one-character marker (`2` for signals, `1` for
/// slots) followed by `name(type1,type2,...)`.  This module splits such a
/// string into the method name and the raw text of every parameter type,
/// honouring nested template arguments and parenthesised declarators so
/// that `f(QMap<int,QString>,void(*)(int))` yields exactly two arguments.
///
/// Every failure means "this is not a signature we can resolve" and is
/// reported as `None`; callers treat it as a silent miss.
use memchr::memchr;

use crate::normalize::strip_const_ref;

/// Shortest string that can hold a marker, a one-letter name and `()`.
const MIN_SIGNATURE_LEN: usize = 4;

/// A tokenized signature string, borrowing from the literal it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature<'a> {
    /// The method name, e.g. `"valueChanged"`.
    pub method_name: &'a str,
    /// The argument type fragments in order, trimmed and with a
    /// `const ...&` wrapper removed (e.g. `["int", "QString"]`).
    pub arguments: Vec<&'a str>,
}

impl<'a> Signature<'a> {
    /// Parse a raw signature string such as `"2valueChanged(int)"`.
    ///
    /// Returns `None` when the string is too short, has no well-placed
    /// parenthesis pair, contains unbalanced groups, or carries anything
    /// after the closing parenthesis.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut signature = raw.trim();
        if signature.len() < MIN_SIGNATURE_LEN {
            return None;
        }

        // Anything after an embedded NUL is not part of the signature.
        if let Some(nul) = memchr(0, signature.as_bytes()) {
            signature = signature[..nul].trim();
        }

        let bytes = signature.as_bytes();
        let l_paren = memchr(b'(', bytes)?;
        let r_paren = memchr(b')', bytes)?;
        if r_paren < l_paren || l_paren < 2 {
            return None;
        }

        // Skip the SIGNAL/SLOT marker character.
        let method_name = signature.get(1..l_paren)?.trim();

        let mut arguments = Vec::new();
        let mut arg_pos = l_paren + 1;
        loop {
            let end = find_argument_end(bytes, arg_pos)?;
            let argument = strip_const_ref(signature[arg_pos..end].trim());
            let terminator = bytes[end];
            arg_pos = end + 1;

            if argument.is_empty() && terminator == b')' && arguments.is_empty() {
                // No arguments
                break;
            }
            arguments.push(argument);

            if terminator == b')' {
                break;
            }
        }

        if arg_pos != bytes.len() {
            return None;
        }

        Some(Signature {
            method_name,
            arguments,
        })
    }
}

/// Find the `,` or `)` that ends the argument starting at `start`.
///
/// Parentheses, brackets and braces nest through one depth counter; angle
/// brackets nest through a second one that only moves while the first is
/// zero, so a `>` inside a parenthesised default like `(a>b)` does not close
/// a template.  Returns `None` when the string ends first.
fn find_argument_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut templ_depth = 0usize;
    for (offset, &byte) in bytes.get(start..)?.iter().enumerate() {
        match byte {
            b',' | b')' if depth == 0 && templ_depth == 0 => return Some(start + offset),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'<' if depth == 0 => templ_depth += 1,
            b'>' if depth == 0 => templ_depth = templ_depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &str) -> Option<Vec<&str>> {
        Signature::parse(raw).map(|s| s.arguments)
    }

    #[test]
    fn test_parse_simple_signal() {
        let sig = Signature::parse("2valueChanged(int)").unwrap();
        assert_eq!(sig.method_name, "valueChanged");
        assert_eq!(sig.arguments, vec!["int"]);
    }

    #[test]
    fn test_parse_no_arguments() {
        let sig = Signature::parse("1increment()").unwrap();
        assert_eq!(sig.method_name, "increment");
        assert!(sig.arguments.is_empty());
    }

    #[test]
    fn test_parse_no_arguments_with_inner_space() {
        let sig = Signature::parse("1increment( )").unwrap();
        assert!(sig.arguments.is_empty());
    }

    #[test]
    fn test_template_comma_does_not_split() {
        assert_eq!(
            args("1f(QMap<int,QString>,int)"),
            Some(vec!["QMap<int,QString>", "int"])
        );
    }

    #[test]
    fn test_nested_templates() {
        assert_eq!(
            args("2changed(QHash<QString,QList<int>>,bool)"),
            Some(vec!["QHash<QString,QList<int>>", "bool"])
        );
    }

    #[test]
    fn test_function_pointer_argument() {
        assert_eq!(
            args("1setCallback(void(*)(int,int),int)"),
            Some(vec!["void(*)(int,int)", "int"])
        );
    }

    #[test]
    fn test_greater_than_inside_parentheses_does_not_close_template() {
        assert_eq!(
            args("1f(Foo<(1>2)>,int)"),
            Some(vec!["Foo<(1>2)>", "int"])
        );
    }

    #[test]
    fn test_unbalanced_template_is_rejected() {
        assert_eq!(Signature::parse("1f(QMap<int,QString"), None);
        assert_eq!(Signature::parse("1f(QMap<int,QString)"), None);
    }

    #[test]
    fn test_trailing_characters_are_rejected() {
        assert_eq!(Signature::parse("1f(int) const"), None);
        assert_eq!(Signature::parse("1f(int))"), None);
    }

    #[test]
    fn test_too_short_is_rejected() {
        assert_eq!(Signature::parse("1f("), None);
        assert_eq!(Signature::parse("  f() "), None);
    }

    #[test]
    fn test_paren_too_early_is_rejected() {
        assert_eq!(Signature::parse("1(int)"), None);
        assert_eq!(Signature::parse("(foo)"), None);
    }

    #[test]
    fn test_missing_or_misplaced_paren_is_rejected() {
        assert_eq!(Signature::parse("1foobar"), None);
        assert_eq!(Signature::parse("1foo)bar("), None);
    }

    #[test]
    fn test_const_reference_is_stripped() {
        assert_eq!(
            args("2textChanged(const QString &)"),
            Some(vec!["QString"])
        );
        assert_eq!(
            args("2textChanged(const QString&, const QVariant &)"),
            Some(vec!["QString", "QVariant"])
        );
    }

    #[test]
    fn test_non_const_reference_is_kept() {
        assert_eq!(args("1fill(QString&)"), Some(vec!["QString&"]));
    }

    #[test]
    fn test_const_pointer_is_kept() {
        assert_eq!(args("1setName(const char*)"), Some(vec!["const char*"]));
    }

    #[test]
    fn test_arguments_are_trimmed() {
        let sig = Signature::parse("  1  resize ( int ,  int )  ").unwrap();
        assert_eq!(sig.method_name, "resize");
        assert_eq!(sig.arguments, vec!["int", "int"]);
    }

    #[test]
    fn test_empty_later_argument_is_kept() {
        assert_eq!(args("1f(int,)"), Some(vec!["int", ""]));
    }

    #[test]
    fn test_embedded_nul_truncates() {
        let sig = Signature::parse("2clicked(bool)\0garbage(").unwrap();
        assert_eq!(sig.method_name, "clicked");
        assert_eq!(sig.arguments, vec!["bool"]);
    }

    #[test]
    fn test_round_trip_recovers_name_and_arguments() {
        let cases: &[&[&str]] = &[
            &["int"],
            &["int", "QString"],
            &["QMap<int,QString>", "QList<QPair<int,int>>", "bool"],
            &["void(*)(int)", "QVector<int>"],
            &["unsigned int", "QObject*", "char[4]"],
        ];
        for case in cases {
            let raw = format!("1handler({})", case.join(","));
            let sig = Signature::parse(&raw).unwrap();
            assert_eq!(sig.method_name, "handler");
            assert_eq!(&sig.arguments, case, "round trip of {raw}");
        }
    }
}
