use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use log::{error, LevelFilter};

use network_sort::{render, RenderMode};

const USAGE: &str = "\
Usage

  sngenerator [-graph] <number of elements>

Output pseudocode, or optionally a graph for a Batcher odd/even sorting network.
";

const INVALID_LENGTH: &str = "Argument must be an integer greater than zero.";

fn parse_args(args: &[String]) -> Option<(RenderMode, &str)> {
    match args {
        [len] => Some((RenderMode::Pseudocode, len.as_str())),
        [flag, len] if flag == "-graph" || flag == "--graph" => Some((RenderMode::Diagram, len.as_str())),
        _ => None,
    }
}

fn parse_len(arg: &str) -> Option<i64> {
    arg.parse().ok().filter(|len| *len >= 1)
}

fn main() -> ExitCode {
    env_logger::builder().filter_level(LevelFilter::Warn).parse_default_env().init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some((mode, len)) = parse_args(&args) else {
        eprint!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let Some(len) = parse_len(len) else {
        eprintln!("{INVALID_LENGTH}");
        return ExitCode::FAILURE;
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match render(&mut out, len, mode).and_then(|()| out.flush().map_err(Into::into)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
