use std::io::{self, Write};

/// Writes a `#line` directive that re-anchors a downstream compiler's
/// diagnostics to `line` in `source_name`.
pub(crate) fn line_directive<W: Write>(dest: &mut W, line: u64, source_name: &str) -> io::Result<()> {
    writeln!(dest, "#line {line} \"{source_name}\"")
}

/// Writes the GCC `__attribute__` annotations for a list of attribute
/// names, each as ` __attribute__((__name__))`.
pub(crate) fn write_attributes<W: Write>(dest: &mut W, names: &[String]) -> io::Result<()> {
    for name in names {
        write!(dest, " __attribute__((__{name}__))")?;
    }
    Ok(())
}
