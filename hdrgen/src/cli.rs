use std::path::PathBuf;

use clap::Parser;

/// Extracts inline annotation headers from C-like sources, or strips the
/// annotation syntax back out of them.
#[derive(Parser, Debug)]
#[command(name = "hdrgen", version, about)]
pub struct Args {
    /// Source files to process
    pub paths: Vec<PathBuf>,

    /// Strip mode instead of header mode
    #[arg(short = 'p', long)]
    pub strip: bool,

    /// Emit detailed tracing of the parse
    #[arg(short, long)]
    pub verbose: bool,

    /// Sentinel token that opens an annotation
    #[arg(short, long, default_value = "@", value_name = "WORD")]
    pub token: String,

    /// Header output directory
    #[arg(short = 'd', long, value_name = "PATH")]
    pub header_dir: Option<PathBuf>,

    /// Mirror the source tree relative to PATH under --header-dir
    #[arg(short = 'r', long, value_name = "PATH")]
    pub root_dir: Option<PathBuf>,

    /// Merge all inputs into one header file at PATH
    #[arg(short = 's', long, value_name = "PATH")]
    pub single_output: Option<PathBuf>,

    /// Merge all inputs, pipe header to stdout
    #[arg(short = 'O', long)]
    pub stdout: bool,

    /// Wrap produced headers in an include guard
    #[arg(short = 'G', long)]
    pub include_guards: bool,

    /// Tab width for indentation trim (0 disables)
    #[arg(short = 'I', long, default_value_t = 4, value_name = "SIZE")]
    pub tab_indent: usize,
}

/// A destination strategy selected by `-d`/`-r`/`-s`/`-O`, mutually
/// exclusive per the original's `ANY_TWO` option check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// No destination flags: write `<source>.h` beside each source, or
    /// overwrite the source in place when stripping.
    PerFile,
    /// `-d`, optionally `-r`: one header per source, under a directory.
    HeaderDir { header_dir: PathBuf, root_dir: Option<PathBuf> },
    /// `-s PATH`: every input merged into one file.
    Merged(PathBuf),
    /// `-O`: every input merged, written to stdout.
    Stdout,
}

impl Args {
    /// Validates the flag combination and resolves the destination
    /// strategy, or returns a description of the configuration error.
    pub fn destination(&self) -> Result<Destination, String> {
        let set = [
            self.header_dir.is_some() || self.root_dir.is_some(),
            self.single_output.is_some(),
            self.stdout,
        ]
        .into_iter()
        .filter(|&b| b)
        .count();
        if set > 1 {
            return Err(
                "at most one of --header-dir/--root-dir, --single-output, --stdout may be given"
                    .to_string(),
            );
        }
        if self.root_dir.is_some() && self.header_dir.is_none() {
            return Err("--root-dir requires --header-dir".to_string());
        }
        if let Some(path) = &self.single_output {
            return Ok(Destination::Merged(path.clone()));
        }
        if self.stdout {
            return Ok(Destination::Stdout);
        }
        if let Some(header_dir) = &self.header_dir {
            return Ok(Destination::HeaderDir {
                header_dir: header_dir.clone(),
                root_dir: self.root_dir.clone(),
            });
        }
        Ok(Destination::PerFile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
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

    #[test]
    fn defaults_to_per_file() {
        assert_eq!(args().destination().unwrap(), Destination::PerFile);
    }

    #[test]
    fn root_dir_without_header_dir_is_an_error() {
        let mut a = args();
        a.root_dir = Some("src".into());
        assert!(a.destination().is_err());
    }

    #[test]
    fn single_output_and_stdout_conflict() {
        let mut a = args();
        a.single_output = Some("out.h".into());
        a.stdout = true;
        assert!(a.destination().is_err());
    }

    #[test]
    fn header_dir_with_root_dir_mirrors() {
        let mut a = args();
        a.header_dir = Some("out".into());
        a.root_dir = Some("src".into());
        assert_eq!(
            a.destination().unwrap(),
            Destination::HeaderDir { header_dir: "out".into(), root_dir: Some("src".into()) }
        );
    }
}
