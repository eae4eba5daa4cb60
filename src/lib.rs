pub mod checker;
pub mod cli;
pub mod errors;
pub mod input;
pub mod lookup;
pub mod persistence;
pub mod run_outcome;
pub mod safe_browsing;
pub mod service;
pub mod service_configuration;
pub mod threat;
pub mod verdict;
