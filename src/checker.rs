use crate::input::UrlReader;
use crate::lookup::{lookup_url, ThreatLookup};
use crate::run_outcome::{Observation, RunOutcome};
use crate::verdict::classify;
use std::io::{BufRead, Write};

pub fn check_urls<R, L, O, E>(input: R, lookup: &L, out: &mut O, err: &mut E) -> RunOutcome
    where R: BufRead, L: ThreatLookup + ?Sized, O: Write, E: Write {
    let mut reader = UrlReader::new(input);
    let mut outcome = RunOutcome::default();

    for url in reader.by_ref() {
        let lookup_outcome = lookup_url(lookup, &url);

        outcome = outcome.observe(&lookup_outcome);

        if let Err(e) = classify(&url, &lookup_outcome).write_to(out, err) {
            writeln!(err, "Unable to write output: {e}").ok();
            return outcome.observe(Observation::WriteFailed);
        }
    }

    if let Err(e) = out.flush() {
        writeln!(err, "Unable to write output: {e}").ok();
        outcome = outcome.observe(Observation::WriteFailed);
    }

    if let Some(e) = reader.error() {
        writeln!(err, "Unable to read input: {e}").ok();
        outcome = outcome.observe(Observation::ReadFailed);
    }

    outcome
}
