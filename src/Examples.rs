//! examples of usage of RustedTaylor
/// Taylor expansion examples
pub mod taylor_examples;
