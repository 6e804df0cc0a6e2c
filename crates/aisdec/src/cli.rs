use std::fmt::Display;

use clap::{error::ErrorKind, CommandFactory, Parser};

/// Standard input filename
const STDIN_FILE: &str = "-";

const USAGE_SHORT: &str = r#"
This program accepts AIS NMEA 0183 sentences (!AIVDM or !AIVDO), one per line, and decodes any IMO Area Notices (8:1:22) that are present. Decoded notices are printed one per line.

See --help for more details.
"#;

const USAGE_LONG: &str = r#"
This program accepts AIS NMEA 0183 sentences (!AIVDM or !AIVDO), one per line, and decodes any IMO Area Notices (8:1:22) that are present. Decoded notices are printed one per line.

Multi-sentence messages are reassembled. Receiver metadata which follows the checksum is ignored, and lines which are not AIS sentences are skipped with a warning.

You can decode a logfile with

    aisdec --file nmea.log

or decode live traffic from a receiver which serves sentences over TCP

    nc receiver.local 10110 | aisdec

Notices which have already expired, as of the system clock, are marked "[expired]".

With --strict, the exit status is 2 if any sentence or message could not be decoded.
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING, not even Area Notices
    #[arg(short, long)]
    pub quiet: bool,

    /// Input file (or "-" for stdin)
    ///
    /// The input must be text, with one NMEA sentence per line.
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    pub file: String,

    /// Also print messages which are not Area Notices
    #[arg(short, long)]
    pub all: bool,

    /// Accept sentences with a bad checksum
    #[arg(long)]
    pub no_checksum: bool,

    /// Exit with status 2 if anything fails to decode
    #[arg(long)]
    pub strict: bool,
}

impl Args {
    /// Return true if the user requests input from stdin
    pub fn input_is_stdin(&self) -> bool {
        self.file == STDIN_FILE
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aisdec", "-vv", "--strict"]).expect("bad args");
        assert_eq!(args.verbose, 2);
        assert!(args.strict);
        assert!(!args.all);
        assert!(!args.no_checksum);
        assert!(args.input_is_stdin());
    }
}
