//! Python `%`-style message templates.
//!
//! Checker messages arrive as a template plus arguments, e.g.
//! `"%r imported but unused"` with `["os"]`. Only the conversions the checker
//! uses are supported: `%s`, `%r`, `%d`/`%i` and the `%%` escape. Anything
//! else, including a conversion with no argument left, is copied verbatim.

use crate::finding::FindingArg;

/// Substitutes `args` into `template`.
pub fn render_template(template: &str, args: &[FindingArg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        let Some(conv) = chars.next() else {
            out.push('%');
            break;
        };
        match conv {
            '%' => out.push('%'),
            's' | 'r' | 'd' | 'i' => match args.next() {
                Some(arg) => out.push_str(&convert(conv, arg)),
                None => {
                    out.push('%');
                    out.push(conv);
                }
            },
            other => {
                out.push('%');
                out.push(other);
            }
        }
    }

    out
}

fn convert(conv: char, arg: &FindingArg) -> String {
    match (conv, arg) {
        (_, FindingArg::Int(n)) => n.to_string(),
        ('r', FindingArg::Str(s)) => python_repr(s),
        (_, FindingArg::Str(s)) => s.clone(),
    }
}

/// Formats a string the way Python's `repr()` does.
///
/// Single quotes are preferred; double quotes are used when the string
/// contains a single quote but no double quote.
pub fn python_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7F => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> FindingArg {
        FindingArg::Str(v.to_string())
    }

    #[test]
    fn repr_and_str_conversions() {
        assert_eq!(
            render_template("%r imported but unused", &[s("os")]),
            "'os' imported but unused"
        );
        assert_eq!(
            render_template("undefined name %s", &[s("foo")]),
            "undefined name foo"
        );
    }

    #[test]
    fn integer_arguments() {
        assert_eq!(
            render_template(
                "local variable %r defined as an argument on line %d",
                &[s("x"), FindingArg::Int(12)]
            ),
            "local variable 'x' defined as an argument on line 12"
        );
        assert_eq!(render_template("line %r", &[FindingArg::Int(3)]), "line 3");
    }

    #[test]
    fn percent_escape() {
        assert_eq!(render_template("100%% sure", &[]), "100% sure");
    }

    #[test]
    fn missing_arguments_left_verbatim() {
        assert_eq!(render_template("%r and %r", &[s("a")]), "'a' and %r");
        assert_eq!(render_template("trailing %", &[]), "trailing %");
    }

    #[test]
    fn unsupported_conversion_left_verbatim() {
        assert_eq!(render_template("%x %s", &[s("a")]), "%x a");
    }

    #[test]
    fn extra_arguments_ignored() {
        assert_eq!(render_template("%s", &[s("a"), s("b")]), "a");
    }

    #[test]
    fn repr_quoting() {
        assert_eq!(python_repr("os"), "'os'");
        assert_eq!(python_repr("it's"), "\"it's\"");
        assert_eq!(python_repr("both ' and \""), "'both \\' and \"'");
        assert_eq!(python_repr("a\\b\n"), "'a\\\\b\\n'");
        assert_eq!(python_repr("\x01"), "'\\x01'");
        assert_eq!(python_repr("café"), "'café'");
    }
}
