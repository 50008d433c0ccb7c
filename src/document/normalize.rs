//! Text normalization for corpus attributes and bodies.
//!
//! Attribute values are unescaped first and escaped once afterwards, so that
//! values coming with pre-existing entities never end up double-escaped.
use std::borrow::Cow;

use lazy_static::lazy_static;
use quick_xml::escape::partial_escape;
use regex::{Captures, Regex};

lazy_static! {
    static ref ENTITY: Regex =
        Regex::new(r"&(lt|gt|amp|quot|apos|#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6});").unwrap();
}

/// Decode predefined and numeric character references.
///
/// Anything else (bare `&`, unknown entities) is left as is.
pub fn unescape(s: &str) -> Cow<'_, str> {
    ENTITY.replace_all(s, |caps: &Captures| {
        let name = &caps[1];
        let decoded = match name {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => {
                let code = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => name[1..].parse::<u32>().ok(),
                };
                code.and_then(char::from_u32)
            }
        };
        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
}

/// Normalize a value for a double-quoted attribute: `"` becomes `'`,
/// and `&`, `<`, `>` are escaped exactly once.
pub fn attribute(s: &str) -> String {
    let unescaped = unescape(s.trim()).replace('"', "'");
    partial_escape(unescaped.as_str()).into_owned()
}

/// Title rule: a title spanning several lines is not a clean title.
pub fn title(s: &str) -> Option<String> {
    if s.contains('\n') || s.contains('\r') {
        None
    } else {
        Some(attribute(s))
    }
}

/// Escape plain body text so it can sit inside an element.
pub fn body(s: &str) -> String {
    partial_escape(s).into_owned()
}
