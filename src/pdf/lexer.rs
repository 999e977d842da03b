//! Operator scanning over raw content stream bytes
//!
//! Only locates operator keywords; operands are skipped, not parsed. This is
//! enough to check that a decode covered the whole stream and to find the
//! last `ET` in content that lopdf cannot decode, such as inline images.

use std::ops::Range;

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b'\0' | b'\t' | b'\n' | b'\x0c' | b'\r' | b' ')
}

fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%')
}

/// Keywords that are operands rather than operators
fn is_operator(token: &[u8]) -> bool {
    match token.first().copied() {
        Some(b'0'..=b'9' | b'+' | b'-' | b'.') | None => false,
        _ => !matches!(token, b"true" | b"false" | b"null"),
    }
}

/// End of the run of regular characters starting at `start`
fn skip_regular(content: &[u8], start: usize) -> usize {
    content[start..]
        .iter()
        .position(|b| is_whitespace(*b) || is_delimiter(*b))
        .map_or(content.len(), |p| start + p)
}

fn skip_comment(content: &[u8], start: usize) -> usize {
    content[start..]
        .iter()
        .position(|b| matches!(b, b'\r' | b'\n'))
        .map_or(content.len(), |p| start + p)
}

/// Skip a `( ... )` string with balanced parentheses and backslash escapes
fn skip_literal_string(content: &[u8], start: usize) -> Result<usize, usize> {
    let mut depth = 0usize;
    let mut pos = start;
    while pos < content.len() {
        match content[pos] {
            b'\\' => pos += 1,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(pos + 1);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    Err(start)
}

fn skip_hex_string(content: &[u8], start: usize) -> Result<usize, usize> {
    content[start..]
        .iter()
        .position(|b| *b == b'>')
        .map(|p| start + p + 1)
        .ok_or(start)
}

/// Offset of the `EI` that closes inline image data starting after `ID`
///
/// `data_start` is the offset right after the `ID` keyword. `EI` only counts
/// when whitespace precedes it and whitespace, a delimiter or the end of the
/// stream follows it.
fn find_inline_image_end(content: &[u8], data_start: usize) -> Result<usize, usize> {
    (data_start + 1..content.len().saturating_sub(1))
        .find(|&i| {
            &content[i..i + 2] == b"EI"
                && is_whitespace(content[i - 1])
                && content
                    .get(i + 2)
                    .map_or(true, |b| is_whitespace(*b) || is_delimiter(*b))
        })
        .ok_or(data_start)
}

/// Byte range of every operator keyword in `content`, in stream order
///
/// Inline image data between `ID` and `EI` is skipped whole. `Err` holds the
/// offset of a string or inline image that never ends.
pub fn operator_spans(content: &[u8]) -> Result<Vec<Range<usize>>, usize> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < content.len() {
        let byte = content[pos];
        pos = match byte {
            b if is_whitespace(b) => pos + 1,
            b'%' => skip_comment(content, pos),
            b'(' => skip_literal_string(content, pos)?,
            b'<' | b'>' if content.get(pos + 1) == Some(&byte) => pos + 2,
            b'<' => skip_hex_string(content, pos)?,
            b'/' => skip_regular(content, pos + 1),
            b if is_delimiter(b) => pos + 1,
            _ => {
                let end = skip_regular(content, pos);
                let token = &content[pos..end];
                if !is_operator(token) {
                    end
                } else if token == b"ID" {
                    spans.push(pos..end);
                    let ei = find_inline_image_end(content, end)?;
                    spans.push(ei..ei + 2);
                    ei + 2
                } else {
                    spans.push(pos..end);
                    end
                }
            }
        };
    }

    Ok(spans)
}

/// Offset just past the last `ET` operator, or 0 when there is none
pub fn after_last_text_object(content: &[u8], spans: &[Range<usize>]) -> usize {
    spans
        .iter()
        .rev()
        .find(|span| &content[span.start..span.end] == b"ET")
        .map_or(0, |span| span.end)
}
