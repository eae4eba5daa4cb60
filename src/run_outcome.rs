use crate::lookup::LookupOutcome;

// Variants are declared in order of increasing severity; `Ord` relies on it.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub enum RunOutcome {
    #[default]
    AllSafe,
    SomeUnsafe,
    SomeLookupFailed,
}

#[derive(Debug)]
pub enum Observation<'a> {
    Lookup(&'a LookupOutcome),
    ReadFailed,
    WriteFailed,
}

impl<'a> From<&'a LookupOutcome> for Observation<'a> {
    fn from(outcome: &'a LookupOutcome) -> Self {
        Self::Lookup(outcome)
    }
}

impl<'a> From<Observation<'a>> for RunOutcome {
    fn from(observation: Observation<'a>) -> Self {
        match observation {
            Observation::Lookup(LookupOutcome::Safe) => Self::AllSafe,
            Observation::Lookup(LookupOutcome::Unsafe { .. }) => Self::SomeUnsafe,
            Observation::Lookup(LookupOutcome::LookupFailed { .. }) => Self::SomeLookupFailed,
            Observation::ReadFailed | Observation::WriteFailed => Self::SomeLookupFailed,
        }
    }
}

impl RunOutcome {
    pub fn observe<'a, O>(self, observation: O) -> Self
        where O: Into<Observation<'a>> {
        self.max(Self::from(observation.into()))
    }

    pub fn fold<'a, I>(observations: I) -> Self
        where I: IntoIterator<Item = Observation<'a>> {
        observations
            .into_iter()
            .fold(Self::default(), |outcome, observation| outcome.observe(observation))
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Self::AllSafe => 0,
            Self::SomeUnsafe => 1,
            Self::SomeLookupFailed => 128,
        }
    }
}
