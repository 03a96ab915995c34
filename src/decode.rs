//! Fixed-point decoding of `-?d?d.d` values into tenths.

/// Decodes a value that starts at `bytes[0]`, returning the scaled value and
/// the number of bytes it occupies. Anything after the fractional digit is
/// left untouched, so `bytes` may run past the end of the record.
///
/// The grammar is not checked. Malformed input yields an unspecified value
/// or panics on a short slice; see [`is_well_formed`].
#[inline]
pub fn decode_prefix(bytes: &[u8]) -> (i16, usize) {
    let (negative, start) = match bytes[0] {
        b'-' => (true, 1),
        _ => (false, 0),
    };

    let first = (bytes[start] - b'0') as i16;
    let (int, point) = if bytes[start + 1] == b'.' {
        (first, start + 1)
    } else {
        (first * 10 + (bytes[start + 1] - b'0') as i16, start + 2)
    };

    let value = int * 10 + (bytes[point + 1] - b'0') as i16;
    let len = point + 2;

    if negative {
        (-value, len)
    } else {
        (value, len)
    }
}

/// Decodes a span that holds exactly one value.
#[inline]
pub fn decode(span: &[u8]) -> i16 {
    decode_prefix(span).0
}

/// Returns true when `span` is exactly `-?d?d.d`.
pub fn is_well_formed(span: &[u8]) -> bool {
    let digits = span.strip_prefix(b"-").unwrap_or(span);
    match digits {
        [a, b'.', b] => a.is_ascii_digit() && b.is_ascii_digit(),
        [a, b, b'.', c] => a.is_ascii_digit() && b.is_ascii_digit() && c.is_ascii_digit(),
        _ => false,
    }
}
