use crate::lookup::LookupOutcome;
use crate::threat::ThreatMatches;
use std::io::{self, Write};

#[derive(Debug, PartialEq)]
pub enum Verdict {
    Stdout(String),
    Stderr(String),
}

impl Verdict {
    pub fn write_to<O, E>(&self, out: &mut O, err: &mut E) -> io::Result<()>
        where O: Write, E: Write {
        match self {
            Self::Stdout(line) => writeln!(out, "{line}"),
            Self::Stderr(line) => writeln!(err, "{line}"),
        }
    }
}


pub fn classify(url: &str, outcome: &LookupOutcome) -> Verdict {
    match outcome {
        LookupOutcome::Safe => Verdict::Stdout(format!("Safe URL: {url}")),
        LookupOutcome::Unsafe { matches } => {
            Verdict::Stdout(format!("Unsafe URL: {}", ThreatMatches(matches)))
        },
        LookupOutcome::LookupFailed { error } => Verdict::Stderr(format!("Lookup error: {error}")),
    }
}
