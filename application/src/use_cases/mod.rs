//! Use cases

pub mod run_consensus;
