//! Character classification used by the scanner

/// Whitespace as the Java language defines it: Unicode space, line and
/// paragraph separators except the no-break spaces, plus the ASCII controls
/// `\t \n \u{B} \u{C} \r` and the information separators `\u{1C}`..`\u{1F}`.
pub fn is_java_whitespace(c: char) -> bool {
    match c {
        '\u{1C}'..='\u{1F}' => true,
        '\u{85}' | '\u{A0}' | '\u{2007}' | '\u{202F}' => false,
        _ => c.is_whitespace(),
    }
}

/// Characters that may begin an identifier.
pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || is_currency_symbol(c) || is_connector_punctuation(c)
}

/// Characters that may continue an identifier. XID_Continue brings in the
/// combining and spacing marks, so decomposed letters such as `e\u{301}`
/// stay inside one identifier.
pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c)
        || c.is_numeric()
        || is_identifier_ignorable(c)
        || unicode_ident::is_xid_continue(c)
}

pub fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_currency_symbol(c: char) -> bool {
    matches!(
        c,
        '$' | '\u{A2}'..='\u{A5}'
            | '\u{58F}'
            | '\u{60B}'
            | '\u{7FE}'
            | '\u{7FF}'
            | '\u{9F2}'
            | '\u{9F3}'
            | '\u{9FB}'
            | '\u{AF1}'
            | '\u{BF9}'
            | '\u{E3F}'
            | '\u{17DB}'
            | '\u{20A0}'..='\u{20C0}'
            | '\u{A838}'
            | '\u{FDFC}'
            | '\u{FE69}'
            | '\u{FF04}'
            | '\u{FFE0}'
            | '\u{FFE1}'
            | '\u{FFE5}'
            | '\u{FFE6}'
    )
}

fn is_connector_punctuation(c: char) -> bool {
    matches!(
        c,
        '_' | '\u{203F}' | '\u{2040}' | '\u{2054}' | '\u{FE33}' | '\u{FE34}' | '\u{FE4D}'..='\u{FE4F}' | '\u{FF3F}'
    )
}

// Controls that are not whitespace, plus format characters.
fn is_identifier_ignorable(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}'
            | '\u{E}'..='\u{1B}'
            | '\u{7F}'..='\u{9F}'
            | '\u{AD}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_follows_java_rules() {
        for c in [' ', '\t', '\n', '\r', '\u{B}', '\u{C}', '\u{1C}', '\u{1F}', '\u{2003}', '\u{2028}', '\u{3000}'] {
            assert!(is_java_whitespace(c), "{:?} should be whitespace", c);
        }
        for c in ['\u{A0}', '\u{2007}', '\u{202F}', '\u{85}', 'a', '\u{0}'] {
            assert!(!is_java_whitespace(c), "{:?} should not be whitespace", c);
        }
    }

    #[test]
    fn identifier_classes() {
        assert!(is_identifier_start('a'));
        assert!(is_identifier_start('_'));
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('é'));
        assert!(is_identifier_start('€'));
        assert!(!is_identifier_start('1'));
        assert!(!is_identifier_start('-'));

        assert!(is_identifier_part('1'));
        assert!(is_identifier_part('\u{200B}'));
        assert!(is_identifier_part('\u{301}'));
        assert!(is_identifier_part('\u{903}'));
        assert!(!is_identifier_start('\u{301}'));
        assert!(!is_identifier_part(' '));
        assert!(!is_identifier_part('.'));
    }
}
