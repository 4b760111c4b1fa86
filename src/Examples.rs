//! examples of usage of RustedSymbolic
/// Symbolic operations examples
pub mod symbolic_examples;
