//! Sentence processing loop
//!
//! Each input line is handled in turn:
//!
//! 1. Parse it as an NMEA sentence and verify its checksum.
//!
//! 2. Feed it to the [`Assembler`], which holds fragments until
//!    their message is complete.
//!
//! 3. Decode each complete message and print it.
//!
//! A failure at any step is logged and counted, and processing
//! continues with the next line.

use std::fmt;
use std::io::{self, BufRead, Write};

use aisarea::{Assembler, Message, Sentence};
use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::cli::Args;

/// Counts of what happened to the input
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Non-empty input lines
    pub lines: u64,

    /// Lines which were not AIS sentences
    pub malformed: u64,

    /// Sentences rejected for a bad checksum
    pub bad_checksum: u64,

    /// Fragments which could not be assembled
    pub assembly_failures: u64,

    /// Complete messages decoded
    pub messages: u64,

    /// Area Notices among the `messages`
    pub notices: u64,

    /// Complete messages which failed to decode
    pub decode_failures: u64,
}

impl Stats {
    /// Total failures of any kind
    pub fn failures(&self) -> u64 {
        self.malformed + self.bad_checksum + self.assembly_failures + self.decode_failures
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "read {} lines: decoded {} messages ({} area notices) with {} failures",
            self.lines,
            self.messages,
            self.notices,
            self.failures()
        )
    }
}

/// Run the application
///
/// Reads every line of `input` until it is exhausted and prints
/// decoded messages to `output`, per the command-line `args`.
/// The `clock` reports the current time, which is used to mark
/// expired notices.
///
/// Returns an error only if `input` or `output` fails.
pub fn run<R, W, C>(args: &Args, input: R, output: &mut W, clock: C) -> io::Result<Stats>
where
    R: BufRead,
    W: Write,
    C: Fn() -> DateTime<Utc>,
{
    let cfg = Config {
        quiet: args.quiet,
        all: args.all,
        check: !args.no_checksum,
    };

    let mut stats = Stats::default();
    let mut assembler = Assembler::new();

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        stats.lines += 1;

        if let Some(msg) = receive(&cfg, &line, &mut assembler, &mut stats) {
            print_message(&cfg, &msg, output, &clock())?;
        }
    }

    if assembler.pending() > 0 {
        warn!("input ended with {} incomplete messages", assembler.pending());
    }

    Ok(stats)
}

/// Configuration
#[derive(Clone, Debug)]
struct Config {
    quiet: bool,
    all: bool,
    check: bool,
}

// Process one line; returns a message when one is complete
fn receive(
    cfg: &Config,
    line: &str,
    assembler: &mut Assembler,
    stats: &mut Stats,
) -> Option<Message> {
    let sentence = match Sentence::parse(line) {
        Ok(sentence) => sentence,
        Err(err) => {
            warn!("{}: \"{}\"", err, line.trim());
            stats.malformed += 1;
            return None;
        }
    };

    if cfg.check && !sentence.checksum_ok() {
        warn!("checksum mismatch: \"{}\"", line.trim());
        stats.bad_checksum += 1;
        return None;
    }

    let payload = match assembler.push(&sentence) {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            debug!("waiting for more fragments: \"{}\"", sentence);
            return None;
        }
        Err(err) => {
            warn!("{}: \"{}\"", err, line.trim());
            stats.assembly_failures += 1;
            return None;
        }
    };

    match Message::decode(&payload) {
        Ok(msg) => {
            stats.messages += 1;
            if msg.area_notice().is_some() {
                stats.notices += 1;
            }
            Some(msg)
        }
        Err(err) => {
            warn!("{}: \"{}\"", err, line.trim());
            stats.decode_failures += 1;
            None
        }
    }
}

fn print_message<W>(
    cfg: &Config,
    msg: &Message,
    output: &mut W,
    now: &DateTime<Utc>,
) -> io::Result<()>
where
    W: Write,
{
    if cfg.quiet {
        return Ok(());
    }

    match msg {
        Message::AreaNotice(notice) => {
            if notice.is_expired_at(now) {
                writeln!(output, "{} [expired]", notice)
            } else {
                writeln!(output, "{}", notice)
            }
        }
        other if cfg.all => writeln!(output, "{}", other),
        _ => Ok(()),
    }
}
