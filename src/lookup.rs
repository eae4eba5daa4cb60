use crate::errors::{AppError, AppResult};
use crate::threat::ThreatMatch;

pub trait ThreatLookup {
    // Results are aligned by position with `urls`.
    fn lookup_urls(&self, urls: &[String]) -> AppResult<Vec<Vec<ThreatMatch>>>;
}

#[derive(Debug)]
pub enum LookupOutcome {
    Safe,
    Unsafe { matches: Vec<ThreatMatch> },
    LookupFailed { error: AppError },
}


pub fn lookup_url<L>(lookup: &L, url: &str) -> LookupOutcome
    where L: ThreatLookup + ?Sized {
    let mut results = match lookup.lookup_urls(&[url.into()]) {
        Ok(results) => results,
        Err(error) => return LookupOutcome::LookupFailed { error },
    };

    if results.len() != 1 {
        return LookupOutcome::LookupFailed {
            error: AppError::MisalignedResponse { expected: 1, actual: results.len() }
        };
    }

    match results.pop() {
        Some(matches) if !matches.is_empty() => LookupOutcome::Unsafe { matches },
        _ => LookupOutcome::Safe,
    }
}
