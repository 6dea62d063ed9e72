//! Splitting and joining of free-text argument strings
//!
//! The quoting rules are deliberately small: `"` delimits a quoted region in
//! which whitespace is literal, and a doubled quote (`""`) stands for one
//! literal quote character. [`join`] produces strings that [`split`] turns
//! back into the same tokens, which lets a "raw options" field be edited as
//! text and stored as a token list.

const QUOTE: char = '"';

/// Split a string into argument tokens.
///
/// An unterminated quoted region extends to the end of the input and becomes
/// part of the final token. Zero-length tokens are never produced.
pub fn split(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == QUOTE {
            // A doubled quote is a literal quote, except at the start of a
            // token where it opens a region.
            let escapes = quoted || !current.is_empty();
            if escapes && chars.peek() == Some(&QUOTE) {
                chars.next();
                current.push(QUOTE);
            } else {
                quoted = !quoted;
            }
        } else if ch.is_whitespace() && !quoted {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }

    if quoted {
        tracing::debug!("Unterminated quote in arguments: {:?}", input);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Quote a single token so that [`split`] reads it back unchanged.
pub fn quote(token: &str) -> String {
    let escaped = token.replace(QUOTE, "\"\"");
    if escaped.chars().any(|c| c.is_whitespace() || c == QUOTE) {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Join tokens into a single display string.
pub fn join<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| quote(token.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
