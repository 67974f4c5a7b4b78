use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

/// Writes the opening `#ifndef`/`#define` pair for an include guard,
/// deriving the identifier from the current time (`sec`/`nsec`), as the
/// reference tool derives it from a `timespec`.
///
/// A collision is possible if two guarded headers are produced within
/// the same wall-clock nanosecond; this is a documented, retained quirk
/// rather than a defect (see `DESIGN.md`).
pub fn write_open<W: Write>(dest: &mut W) -> io::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    let ident = format!("gen_{}_{}", now.as_secs(), now.subsec_nanos());
    writeln!(dest, "#ifndef {ident}")?;
    writeln!(dest, "#define {ident}")?;
    Ok(ident)
}

pub fn write_close<W: Write>(dest: &mut W, ident: &str) -> io::Result<()> {
    writeln!(dest, "#endif /* {ident} */")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_wraps_with_matching_identifier() {
        let mut out = Vec::new();
        let ident = write_open(&mut out).unwrap();
        write!(&mut out, "int x;\n").unwrap();
        write_close(&mut out, &ident).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(&format!("#ifndef {ident}\n#define {ident}\n")));
        assert!(text.ends_with(&format!("#endif /* {ident} */\n")));
    }
}
