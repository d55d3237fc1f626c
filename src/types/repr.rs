//! Value rendering for diagnostics. Literals are written in Python notation,
//! e.g. `True`, `None`, `['Allow']` or `"it's"`.

use itertools::Itertools;
use serde_json::{Number, Value};

/// Quotes `s` as a literal. Single quotes unless the text contains a single
/// quote and no double quote.
pub(crate) fn quote_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || ('\u{7f}'..='\u{a0}').contains(&c) => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Renders a value as it is quoted in error messages. A top-level string is
/// written verbatim; strings nested in lists or objects are quoted.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => nested(other),
    }
}

fn nested(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => number(n),
        Value::String(s) => quote_str(s),
        Value::Array(items) => format!("[{}]", items.iter().map(nested).join(", ")),
        Value::Object(map) => format!(
            "{{{}}}",
            map.iter()
                .map(|(k, v)| format!("{}: {}", quote_str(k), nested(v)))
                .join(", ")
        ),
    }
}

// Floats keep a trailing `.0` and switch to exponent form outside [1e-4, 1e16).
fn number(n: &Number) -> String {
    let Some(f) = n.as_f64().filter(|_| n.is_f64()) else {
        return n.to_string();
    };

    let magnitude = f.abs();
    if f == 0.0 || (1e-4..1e16).contains(&magnitude) {
        if f.fract() == 0.0 {
            format!("{f:.1}")
        } else {
            format!("{f}")
        }
    } else {
        let scientific = format!("{f:e}");
        match scientific.split_once('e') {
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().unwrap_or_default();
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exponent.abs())
            }
            None => scientific,
        }
    }
}
