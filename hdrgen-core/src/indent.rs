use std::io::{self, Write};

/// Computes the minimum leading-indentation column width across every
/// non-blank line of a block body, counting a tab as `tab_width` columns
/// and a space as one. A line made up entirely of whitespace (or nothing)
/// before its newline does not count. Returns 0 when `tab_width` is 0
/// (trimming disabled) or the body has no non-blank lines.
pub(crate) fn least_indent(body: &[u8], tab_width: usize) -> usize {
    if tab_width == 0 {
        return 0;
    }
    let mut least = 0usize;
    let mut have_least = false;
    let mut cols = 0usize;
    let mut reading_start = true;

    for &byte in body {
        if reading_start {
            match byte {
                b' ' => cols += 1,
                b'\t' => cols += tab_width,
                b'\n' => cols = 0,
                _ => reading_start = false,
            }
        } else if byte == b'\n' {
            record(&mut least, &mut have_least, cols);
            cols = 0;
            reading_start = true;
        }
    }
    least
}

fn record(least: &mut usize, have_least: &mut bool, cols: usize) {
    if !*have_least || cols < *least {
        *least = cols;
        *have_least = true;
    }
}

/// Writes `body` to `out`, line by line, with `least` columns of leading
/// indentation removed from each line (tab = `tab_width` columns). A tab
/// that straddles the trim boundary is consumed whole and its remaining
/// column span beyond the boundary is not re-emitted.
pub(crate) fn write_trimmed<W: Write>(
    out: &mut W,
    body: &[u8],
    least: usize,
    tab_width: usize,
) -> io::Result<()> {
    if least == 0 {
        return out.write_all(body);
    }
    let mut idx = 0;
    while idx < body.len() {
        let line_start = idx;
        let mut indent_cols = 0usize;
        let mut trim_bytes = 0usize;
        while idx < body.len() && body[idx] != b'\n' {
            if indent_cols < least {
                match body[idx] {
                    b' ' => {
                        indent_cols += 1;
                        trim_bytes += 1;
                    }
                    b'\t' => {
                        indent_cols += tab_width;
                        trim_bytes += 1;
                    }
                    _ => {}
                }
            }
            idx += 1;
        }
        out.write_all(&body[line_start + trim_bytes..idx])?;
        out.write_all(b"\n")?;
        idx += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_indent_picks_minimum() {
        let body = b"    struct S {\n        int a;\n    };\n";
        assert_eq!(least_indent(body, 4), 4);
    }

    #[test]
    fn least_indent_disabled_at_zero_tab_width() {
        let body = b"    struct S {\n        int a;\n    };\n";
        assert_eq!(least_indent(body, 0), 0);
    }

    #[test]
    fn trims_common_indentation() {
        let body = b"    struct S {\n        int a;\n    };\n";
        let least = least_indent(body, 4);
        let mut out = Vec::new();
        write_trimmed(&mut out, body, least, 4).unwrap();
        assert_eq!(out, b"struct S {\n    int a;\n};\n");
    }

    #[test]
    fn verbatim_when_trim_disabled() {
        let body = b"    int a;\n";
        let mut out = Vec::new();
        write_trimmed(&mut out, body, 0, 4).unwrap();
        assert_eq!(out, body);
    }

    #[test]
    fn partial_tab_at_boundary_is_absorbed() {
        // least = 2, but a single tab (tab_width 4) overshoots it; the
        // whole tab byte is consumed and nothing is re-emitted for the
        // two columns past the boundary.
        let body = b"  x;\n\ty;\n";
        let least = least_indent(body, 4);
        assert_eq!(least, 2);
        let mut out = Vec::new();
        write_trimmed(&mut out, body, least, 4).unwrap();
        assert_eq!(out, b"x;\ny;\n");
    }
}
