use std::iter::Peekable;
use std::str::Chars;

/// Decode a minimal HTML subset into its text content.
///
/// Tags and their attributes are discarded, character references are
/// decoded, and text is concatenated in document order. Quoted attribute
/// values may contain `>` without ending the tag.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '<' => skip_tag(&mut chars),
            '&' => out.push_str(&decode_entity(&mut chars)),
            _ => out.push(c),
        }
    }

    out
}

fn skip_tag(chars: &mut Peekable<Chars<'_>>) {
    let mut quote: Option<char> = None;
    for c in chars.by_ref() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return,
            None => {}
        }
    }
}

// Longest reference we resolve is a hex codepoint like `#x10ffff`.
const MAX_ENTITY_LEN: usize = 10;

/// Called with the `&` already consumed. Anything that does not form a
/// recognizable reference is returned as literal text.
fn decode_entity(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut name = String::new();
    while name.len() < MAX_ENTITY_LEN {
        match chars.peek() {
            Some(&';') => {
                chars.next();
                return resolve_entity(&name).unwrap_or_else(|| format!("&{name};"));
            }
            Some(&c) if c == '#' || c.is_ascii_alphanumeric() => {
                name.push(c);
                chars.next();
            }
            _ => break,
        }
    }
    format!("&{name}")
}

fn resolve_entity(name: &str) -> Option<String> {
    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        let code = u32::from_str_radix(hex, 16).ok()?;
        return char::from_u32(code).map(String::from);
    }
    if let Some(dec) = name.strip_prefix('#') {
        let code: u32 = dec.parse().ok()?;
        return char::from_u32(code).map(String::from);
    }

    let text = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        _ => return None,
    };
    Some(text.to_string())
}
