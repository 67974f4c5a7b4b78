use std::process;

use clap::Parser;

use hdrgen::cli::Args;

fn main() {
    // A truly bare invocation (no flags, no paths) is implicit `--help`;
    // an invocation with flags but no source paths is a configuration
    // error instead. `Args::parse()` can't tell those apart on its own, so
    // the distinction is captured before it consumes argv.
    let bare_invocation = std::env::args_os().count() <= 1;

    let args = Args::parse();
    hdrgen::logging::init(args.verbose);

    match hdrgen::run(args, bare_invocation) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}
