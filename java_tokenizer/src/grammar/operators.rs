//! Operator and separator spellings

/// Every operator spelling. Longest match is taken by extending a candidate
/// one character at a time while it stays in this table, so each operator's
/// proper prefixes must also be operators (`>>>=` via `>`, `>>`, `>>>`).
pub const OPERATORS: [&str; 38] = [
    "=", ">", "<", "!", "~", "?", ":", "->", "==", ">=", "<=", "!=", "&&", "||", "++", "--",
    "+", "-", "*", "/", "&", "|", "^", "%", "<<", ">>", ">>>", "+=", "-=", "*=", "/=", "&=",
    "|=", "^=", "%=", "<<=", ">>=", ">>>=",
];

/// Length in characters of `>>>=`
pub const LONGEST_OPERATOR: usize = 4;

/// Length in characters of `...`
pub const LONGEST_SEPARATOR: usize = 3;

/// Multi-character separators, tried before the single-character ones
pub const COMPOUND_SEPARATORS: [&str; 2] = ["...", "::"];

pub const SINGLE_SEPARATORS: [char; 10] = ['(', ')', '{', '}', '[', ']', ';', ',', '@', '.'];

pub fn is_operator(candidate: &str) -> bool {
    OPERATORS.contains(&candidate)
}

pub fn is_single_separator(ch: char) -> bool {
    SINGLE_SEPARATORS.contains(&ch)
}

/// Longest operator that starts `text`, if any
pub fn longest_operator(text: &str) -> Option<&str> {
    let mut matched = None;
    for (offset, ch) in text.char_indices() {
        let end = offset + ch.len_utf8();
        if is_operator(&text[..end]) {
            matched = Some(&text[..end]);
        } else {
            break;
        }
    }
    matched
}

/// Separator that starts `text`, if any
pub fn leading_separator(text: &str) -> Option<&str> {
    if let Some(compound) = COMPOUND_SEPARATORS.iter().find(|s| text.starts_with(**s)) {
        return Some(*compound);
    }
    let ch = text.chars().next()?;
    if is_single_separator(ch) {
        Some(&text[..ch.len_utf8()])
    } else {
        None
    }
}
