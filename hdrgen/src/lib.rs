pub mod cli;
pub mod fs;
pub mod guard;
pub mod logging;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::CommandFactory;

use cli::{Args, Destination};
use hdrgen_core::{Config, Mode};

/// Runs the tool for a fully-parsed CLI invocation. Returns the process
/// exit code; errors that should abort the run are returned as `Err`
/// rather than exiting directly, so `main` stays the only place that
/// calls `process::exit`.
///
/// `bare_invocation` is true only when the process was started with no
/// arguments at all (implicit help, exit 0). An invocation that supplies
/// flags but no source paths is a configuration error instead, matching
/// `iheaders.c`'s `argc == 1` vs. `argc - optind == 0` distinction.
pub fn run(args: Args, bare_invocation: bool) -> Result<i32> {
    if bare_invocation {
        Args::command().print_help().context("writing help text")?;
        return Ok(0);
    }
    if args.paths.is_empty() {
        anyhow::bail!("no source files provided");
    }

    let destination = args.destination().map_err(|e| anyhow::anyhow!(e))?;
    let mode = if args.strip { Mode::Strip } else { Mode::Header };
    tracing::info!(?destination, ?mode, inputs = args.paths.len(), "starting run");

    match (&destination, args.strip) {
        (Destination::Merged(path), _) => {
            let mut out = File::create(path)
                .with_context(|| format!("opening {} for writing", path.display()))?;
            merge(&args, mode, &args.paths, &mut out)?;
        }
        (Destination::Stdout, _) => {
            let mut out = io::stdout().lock();
            merge(&args, mode, &args.paths, &mut out)?;
        }
        (_, true) => {
            for path in &args.paths {
                tracing::debug!(source = %path.display(), "stripping in place");
                strip_in_place(&args, path)?;
            }
        }
        (Destination::PerFile, false) => {
            for path in &args.paths {
                let target = fs::header_target(path, &destination);
                tracing::debug!(source = %path.display(), target = %target.display(), "writing header");
                write_header(&args, path, &target)?;
            }
        }
        (Destination::HeaderDir { .. }, false) => {
            for path in &args.paths {
                let target = fs::header_target(path, &destination);
                if let Some(parent) = target.parent() {
                    fs::create_parents(parent)?;
                }
                tracing::debug!(source = %path.display(), target = %target.display(), "writing header");
                write_header(&args, path, &target)?;
            }
        }
    }

    Ok(0)
}

fn config_for(args: &Args, mode: Mode, source_name: &str) -> Config {
    Config::new(source_name)
        .with_token(args.token.as_bytes())
        .with_tab_width(args.tab_indent)
        .with_mode(mode)
}

fn read_source(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn parse_into(args: &Args, mode: Mode, path: &Path, out: &mut Vec<u8>) -> Result<()> {
    let source = read_source(path)?;
    let config = config_for(args, mode, &path.display().to_string());
    hdrgen_core::parse(source.as_slice(), out, &config)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(())
}

fn write_header(args: &Args, source: &Path, target: &Path) -> Result<()> {
    let mut body = Vec::new();
    parse_into(args, Mode::Header, source, &mut body)?;

    let mut file = File::create(target)
        .with_context(|| format!("opening {} for writing", target.display()))?;
    if args.include_guards {
        let ident = guard::write_open(&mut file)?;
        file.write_all(&body)?;
        guard::write_close(&mut file, &ident)?;
    } else {
        file.write_all(&body)?;
    }
    Ok(())
}

fn strip_in_place(args: &Args, source: &Path) -> Result<()> {
    let mut body = Vec::new();
    parse_into(args, Mode::Strip, source, &mut body)?;
    std::fs::write(source, &body).with_context(|| format!("writing {}", source.display()))?;
    Ok(())
}

/// Merges every path in `paths` into `out`, each entry (including the
/// last) followed by a blank line, matching the original's per-file loop
/// over a single open destination (`fputc('\n', target)` after every
/// `parse()` call, not just between entries). Include guards (header
/// mode only) wrap the whole merge, not each entry.
fn merge<W: Write>(
    args: &Args,
    mode: Mode,
    paths: &[std::path::PathBuf],
    out: &mut W,
) -> Result<()> {
    let guarded = args.include_guards && mode == Mode::Header;
    let ident = if guarded { Some(guard::write_open(out)?) } else { None };

    for path in paths {
        let mut body = Vec::new();
        parse_into(args, mode, path, &mut body)?;
        out.write_all(&body)?;
        out.write_all(b"\n")?;
    }

    if let Some(ident) = ident {
        guard::write_close(out, &ident)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_for_honors_flags() {
        let mut args = test_args();
        args.token = "##".to_string();
        args.tab_indent = 0;
        let cfg = config_for(&args, Mode::Strip, "a.c");
        assert_eq!(cfg.token, b"##");
        assert_eq!(cfg.tab_width, 0);
        assert_eq!(cfg.mode, Mode::Strip);
        assert_eq!(cfg.source_name, "a.c");
    }

    fn test_args() -> Args {
        Args {
            paths: vec![],
            strip: false,
            verbose: false,
            token: "@".to_string(),
            header_dir: None,
            root_dir: None,
            single_output: None,
            stdout: false,
            include_guards: false,
            tab_indent: 4,
        }
    }
}
