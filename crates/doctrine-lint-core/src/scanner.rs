//! Comment-aware, bracket-balancing text scanning for PHP source.
//!
//! The extractor is pattern based rather than grammar based. These helpers
//! give it the two things plain regexes cannot: skipping over string literals
//! (quoted, heredoc and nowdoc) and finding the close of a nested `(...)`,
//! `[...]` or `{...}` group.

/// Replaces the contents of every comment with spaces.
///
/// Byte offsets and newlines are preserved, so line numbers computed on the
/// masked text match the original source. `#[` starts an attribute, not a
/// comment.
#[must_use]
pub fn mask_comments(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut out = bytes.to_vec();
    let mut i = 0;

    while i < bytes.len() {
        if let Some(end) = literal_end(bytes, i) {
            i = end;
            continue;
        }
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = blank_line_comment(&mut out, bytes, i),
            b'#' if bytes.get(i + 1) != Some(&b'[') => i = blank_line_comment(&mut out, bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = find_block_end(bytes, i + 2);
                blank(&mut out, i, end);
                i = end;
            }
            _ => i += 1,
        }
    }

    // Only whole comments were blanked and their delimiters are ASCII, so the
    // buffer is still valid UTF-8.
    String::from_utf8(out).unwrap_or_else(|_| src.to_owned())
}

fn blank_line_comment(out: &mut [u8], bytes: &[u8], start: usize) -> usize {
    let end = bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| start + p);
    blank(out, start, end);
    end
}

fn find_block_end(bytes: &[u8], from: usize) -> usize {
    let mut j = from;
    while j + 1 < bytes.len() {
        if bytes[j] == b'*' && bytes[j + 1] == b'/' {
            return j + 2;
        }
        j += 1;
    }
    bytes.len()
}

fn blank(out: &mut [u8], start: usize, end: usize) {
    for b in &mut out[start..end] {
        if *b != b'\n' {
            *b = b' ';
        }
    }
}

/// Returns the index just past the string literal starting at `i`, or `None`
/// when no literal starts there.
fn literal_end(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes[i] {
        b'\'' | b'"' => Some(skip_string(bytes, i)),
        b'<' if bytes[i..].starts_with(b"<<<") => skip_heredoc(bytes, i),
        _ => None,
    }
}

/// Returns the index just past the string literal opening at `start`.
///
/// Unterminated strings run to the end of input.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b if b == quote => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

/// Skips a heredoc (`<<<ID`, `<<<"ID"`) or nowdoc (`<<<'ID'`) starting at
/// `start`, up to and including the closing identifier.
///
/// The closing identifier may be indented. An unterminated body runs to the
/// end of input; `None` means `start` does not open a heredoc.
fn skip_heredoc(bytes: &[u8], start: usize) -> Option<usize> {
    let mut j = start + 3;
    while matches!(bytes.get(j), Some(b' ' | b'\t')) {
        j += 1;
    }
    let quote = match bytes.get(j) {
        Some(&q @ (b'\'' | b'"')) => {
            j += 1;
            Some(q)
        }
        _ => None,
    };

    let ident_start = j;
    while bytes
        .get(j)
        .is_some_and(|&b| b.is_ascii_alphanumeric() || b == b'_')
    {
        j += 1;
    }
    let ident = &bytes[ident_start..j];
    if ident.is_empty() || ident[0].is_ascii_digit() {
        return None;
    }
    if let Some(q) = quote {
        if bytes.get(j) != Some(&q) {
            return None;
        }
        j += 1;
    }
    while matches!(bytes.get(j), Some(b' ' | b'\t' | b'\r')) {
        j += 1;
    }
    if bytes.get(j) != Some(&b'\n') {
        return None;
    }

    let mut line_start = j + 1;
    while line_start < bytes.len() {
        let mut k = line_start;
        while matches!(bytes.get(k), Some(b' ' | b'\t')) {
            k += 1;
        }
        if bytes[k..].starts_with(ident) {
            let after = k + ident.len();
            let continues = bytes
                .get(after)
                .is_some_and(|&b| b.is_ascii_alphanumeric() || b == b'_');
            if !continues {
                return Some(after);
            }
        }
        line_start = bytes[k..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |p| k + p + 1);
    }
    Some(bytes.len())
}

/// Finds the bracket closing the one at `open`.
///
/// All three bracket kinds share one depth counter and quoted strings are
/// skipped. Returns `None` when `open` is not a bracket or the group is
/// unbalanced.
#[must_use]
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if !matches!(bytes.get(open), Some(b'(' | b'[' | b'{')) {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        if let Some(end) = literal_end(bytes, i) {
            i = end;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Splits `text` on `sep` wherever it appears outside brackets and strings.
///
/// Pieces are trimmed and empty pieces dropped. The returned slices borrow
/// from `text`, so [`offset_in`] can recover their position.
#[must_use]
pub fn split_top_level(text: &str, sep: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if let Some(end) = literal_end(bytes, i) {
            i = end;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b if b == sep && depth == 0 => {
                pieces.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    pieces.push(&text[start.min(text.len())..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Finds the start of every `#[ ... ]` attribute group in `text[from..to]`.
///
/// Returns `(start, close)` pairs where `start` indexes the `#` and `close`
/// the matching `]`. Scanning stops at the first unbalanced group.
#[must_use]
pub fn attribute_groups(text: &str, from: usize, to: usize) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let to = to.min(bytes.len());
    let mut groups = Vec::new();
    let mut i = from;

    while i < to {
        if let Some(end) = literal_end(bytes, i) {
            i = end;
            continue;
        }
        match bytes[i] {
            b'#' if bytes.get(i + 1) == Some(&b'[') => match matching_close(text, i + 1) {
                Some(close) if close < to => {
                    groups.push((i, close));
                    i = close + 1;
                    continue;
                }
                _ => break,
            },
            _ => {}
        }
        i += 1;
    }

    groups
}

/// Scans one class member starting at `start`.
///
/// A member ends at a top-level `;` or at the `}` closing a top-level `{`
/// body. Returns `(signature_end, member_end, body)` where `body` is the
/// byte range strictly inside the braces.
#[must_use]
pub fn member_extent(
    text: &str,
    start: usize,
    end: usize,
) -> (usize, usize, Option<(usize, usize)>) {
    let bytes = text.as_bytes();
    let end = end.min(bytes.len());
    let mut depth = 0usize;
    let mut i = start;

    while i < end {
        if let Some(end) = literal_end(bytes, i) {
            i = end;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => return (i, i + 1, None),
            b'{' if depth == 0 => {
                return match matching_close(text, i) {
                    Some(close) if close < end => (i, close + 1, Some((i + 1, close))),
                    _ => (i, end, Some((i + 1, end))),
                };
            }
            _ => {}
        }
        i += 1;
    }

    (end, end, None)
}

/// Returns the 1-based line number of byte `offset`.
#[must_use]
pub fn line_at(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    text.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Returns the byte offset of `slice` within `text`.
///
/// `slice` must borrow from `text`; otherwise the result is clamped to
/// `text.len()`.
#[must_use]
pub fn offset_in(text: &str, slice: &str) -> usize {
    let base = text.as_ptr() as usize;
    let ptr = slice.as_ptr() as usize;
    ptr.checked_sub(base).map_or(text.len(), |o| o.min(text.len()))
}
