//! Property-key classification and normalization: identifier validity,
//! deriving function-name candidates from keys, and numeric-radix rewrites.

use super::syntax::{Key, Num};
use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Keywords and future reserved words that cannot name a function
    /// expression, and that generated names must never collide with.
    static ref RESERVED: HashSet<&'static str> = [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "implements",
        "import",
        "in",
        "instanceof",
        "interface",
        "let",
        "new",
        "null",
        "package",
        "private",
        "protected",
        "public",
        "return",
        "static",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
    ]
    .iter()
    .cloned()
    .collect();
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(name)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// True if `s` is shaped like an identifier (reserved words included —
/// `obj.catch` is a legal ES5 member access even though `catch` cannot
/// stand alone).
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => (),
        _ => return false,
    }
    chars.all(is_identifier_char)
}

/// Derive the function-name candidate for a non-computed key, if one
/// exists. Numeric and computed keys never produce a name; string keys are
/// mangled: whitespace deleted, remaining invalid characters replaced with
/// `_`, runs of `_` collapsed (`"foo-bar"` → `foo_bar`, `"a string"` →
/// `astring`).
pub fn candidate_name(key: &Key) -> Option<String> {
    match key {
        Key::Ident(name) => Some(name.clone()),
        Key::Str(s) => mangle(s),
        Key::Num(_) | Key::Computed(_) => None,
    }
}

fn mangle(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_whitespace() {
            continue;
        }
        if is_identifier_char(c) {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    match out.chars().next() {
        Some(c) if !c.is_ascii_digit() => Some(out),
        _ => None,
    }
}

/// Normalize the spelling of a numeric key that is being rewritten: binary
/// and octal radix prefixes become plain decimal integers; decimal, hex,
/// and exponential/float spellings are already valid in the output and
/// pass through verbatim.
pub fn normalize_number(raw: &str) -> String {
    let digits: &str = match raw.get(..2) {
        Some("0b") | Some("0B") => &raw[2..],
        Some("0o") | Some("0O") => &raw[2..],
        _ => return raw.to_string(),
    };
    let radix = match &raw[1..2] {
        "b" | "B" => 2,
        _ => 8,
    };
    match i64::from_str_radix(digits, radix) {
        Ok(n) => n.to_string(),
        // not actually a number in that radix; leave the source spelling
        Err(_) => raw.to_string(),
    }
}

/// The numeric value of a key's raw spelling, for emission in bracket
/// position (`target[65535] = v`).
pub fn number_value(raw: &str) -> Num {
    let normalized = normalize_number(raw);
    if let Some(hex) = normalized
        .strip_prefix("0x")
        .or_else(|| normalized.strip_prefix("0X"))
    {
        if let Ok(n) = i64::from_str_radix(hex, 16) {
            return int_or_float(n as f64);
        }
    }
    match normalized.parse::<f64>() {
        Ok(f) => int_or_float(f),
        Err(_) => Num::Int(0),
    }
}

fn int_or_float(f: f64) -> Num {
    // same heuristic the parser uses: does i32 round-trip the value?
    if (f as i32) as f64 == f {
        Num::Int(f as i32)
    } else {
        Num::Float(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn binary_and_octal_normalize() {
        assert_eq!(normalize_number("0b101"), "5");
        assert_eq!(normalize_number("0o753"), "491");
    }

    #[test]
    fn other_radixes_pass_through() {
        assert_eq!(normalize_number("0xFFFF"), "0xFFFF");
        assert_eq!(normalize_number("12e34"), "12e34");
        assert_eq!(normalize_number(".12e3"), ".12e3");
        assert_eq!(normalize_number("80"), "80");
    }

    #[test]
    fn bracket_values() {
        assert_eq!(number_value("0b101"), Num::Int(5));
        assert_eq!(number_value("0xFFFF"), Num::Int(65535));
        assert_eq!(number_value("80"), Num::Int(80));
    }

    #[test]
    fn string_keys_mangle() {
        assert_eq!(candidate_name(&Key::Str("foo-bar".into())), Some("foo_bar".into()));
        assert_eq!(candidate_name(&Key::Str("a string".into())), Some("astring".into()));
        assert_eq!(candidate_name(&Key::Str("var".into())), Some("var".into()));
        assert_eq!(candidate_name(&Key::Str("--".into())), Some("_".into()));
        assert_eq!(candidate_name(&Key::Str("1up".into())), None);
    }

    #[test]
    fn numeric_keys_have_no_name() {
        assert_eq!(candidate_name(&Key::Num("0b101".into())), None);
    }

    #[test]
    fn identifier_validity() {
        assert!(is_valid_identifier("foo_bar$1"));
        assert!(is_valid_identifier("catch"));
        assert!(!is_valid_identifier("foo-bar"));
        assert!(!is_valid_identifier("1up"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn reserved_words() {
        assert!(is_reserved("catch"));
        assert!(is_reserved("var"));
        assert!(!is_reserved("catch$1"));
    }
}
