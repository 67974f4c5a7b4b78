use crate::error::SyntaxErrorKind;

/// Scans a header prefix buffer for a leading attribute sub-expression of
/// the form `:name1,name2,...:` and returns the attribute names found
/// (empty if none), together with the byte offset at which the remaining
/// prefix text begins.
///
/// If no `:` is found at all, the whole buffer is the prefix and no
/// attributes are reported. A `:` with no matching closing `:` is a
/// syntax error.
pub(crate) fn extract_attributes(buf: &[u8]) -> Result<(Vec<String>, usize), SyntaxErrorKind> {
    let mut names = Vec::new();
    let mut parsing = false;
    let mut closed = true;
    let mut last = 0usize;
    let mut remainder_start = 0usize;

    for (i, &byte) in buf.iter().enumerate() {
        if parsing {
            match byte {
                b':' => {
                    closed = true;
                    remainder_start = i + 1;
                    if last != i {
                        names.push(String::from_utf8_lossy(&buf[last..i]).into_owned());
                    }
                    break;
                }
                b',' => {
                    if last != i {
                        names.push(String::from_utf8_lossy(&buf[last..i]).into_owned());
                    }
                    last = i + 1;
                }
                _ => {}
            }
        } else if byte == b':' {
            parsing = true;
            closed = false;
            last = i + 1;
        }
    }

    if parsing && !closed {
        return Err(SyntaxErrorKind::DanglingAttributeColon);
    }
    Ok((names, remainder_start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_colon_is_whole_buffer() {
        let (names, start) = extract_attributes(b"struct_t make(void)").unwrap();
        assert!(names.is_empty());
        assert_eq!(start, 0);
    }

    #[test]
    fn single_attribute() {
        let (names, start) = extract_attributes(b":packed: struct_t make(void)").unwrap();
        assert_eq!(names, vec!["packed"]);
        assert_eq!(&b":packed: struct_t make(void)"[start..], b" struct_t make(void)");
    }

    #[test]
    fn multiple_attributes() {
        let (names, start) = extract_attributes(b":packed,aligned: struct_t").unwrap();
        assert_eq!(names, vec!["packed", "aligned"]);
        assert_eq!(&b":packed,aligned: struct_t"[start..], b" struct_t");
    }

    #[test]
    fn dangling_colon_is_error() {
        let err = extract_attributes(b":packed").unwrap_err();
        assert_eq!(err, SyntaxErrorKind::DanglingAttributeColon);
    }

    #[test]
    fn empty_names_are_not_recorded() {
        let (names, _) = extract_attributes(b"::").unwrap();
        assert!(names.is_empty());
    }
}
