pub mod outcome;

pub use outcome::{ActionOutcome, Failure, SkipReason};
