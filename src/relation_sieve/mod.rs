// src/relation_sieve/mod.rs

pub mod aq_pair;
pub mod report;
pub mod solution_arrays;
pub mod trial_division;

pub use aq_pair::{AQPair, SmallFactorList};
pub use report::TDivReport;
pub use solution_arrays::SolutionArrays;
pub use trial_division::TrialDivision;
