//! Incidental-whitespace removal for text blocks
//!
//! Mirrors `String::stripIndent` from the Java platform: the indentation
//! shared by every non-blank line (and by the closing-delimiter line) is
//! removed, trailing whitespace is dropped from each line and line
//! terminators are normalized to `\n`.

use super::chars::is_java_whitespace;

/// Strip incidental indentation from a text block body.
///
/// A body ending in a line terminator keeps its indentation, because the
/// closing delimiter then sits on its own line at column 1.
pub fn strip_indent(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let ends_with_terminator = text.ends_with('\n') || text.ends_with('\r');
    let lines = split_lines(text);

    let outdent = if ends_with_terminator {
        0
    } else {
        common_indent(&lines)
    };

    let mut result = lines
        .iter()
        .map(|line| strip_line(line, outdent))
        .collect::<Vec<_>>()
        .join("\n");

    if ends_with_terminator {
        result.push('\n');
    }
    result
}

/// Split on `\n`, `\r\n` and `\r`. A trailing terminator does not start an
/// extra line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(idx) => {
                lines.push(&rest[..idx]);
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
            }
            None => {
                lines.push(rest);
                rest = "";
            }
        }
    }
    lines
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| is_java_whitespace(*c)).count()
}

fn is_blank(line: &str) -> bool {
    line.chars().all(is_java_whitespace)
}

fn common_indent(lines: &[&str]) -> usize {
    let mut outdent = lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(usize::MAX);

    // The closing delimiter line counts even when it holds only whitespace.
    if let Some(last) = lines.last() {
        if is_blank(last) {
            outdent = outdent.min(last.chars().count());
        }
    }

    if outdent == usize::MAX {
        0
    } else {
        outdent
    }
}

fn strip_line(line: &str, outdent: usize) -> String {
    if is_blank(line) {
        return String::new();
    }
    let skip = outdent.min(leading_whitespace(line));
    line.chars()
        .skip(skip)
        .collect::<String>()
        .trim_end_matches(is_java_whitespace)
        .to_string()
}
