//! Text heuristics that decide whether an expression is transcendental and which variable it
//! is written in. Kept behind `classify_expression` so a structural check over the parsed tree
//! can replace it without touching the rest of the pipeline.

use crate::symbolic::parse_expr::{is_euler_marker, is_function_name};
use crate::taylor::expansion_config::ExpansionConfig;
use crate::taylor::taylor_errors::TaylorError;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

// a standalone e raised to a power, or a function name
static TRANSCENDENTAL_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[eE](?:\*\*|\^)|exp|sin|cos|tan|tg").expect("valid transcendental regex")
});

// exponent part of a float literal such as 1.5E10
static LITERAL_EXPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[eE][0-9]*$").expect("valid exponent regex"));

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("valid identifier regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub variable: String,
    pub transcendental: bool,
}

pub fn is_transcendental(text: &str) -> bool {
    TRANSCENDENTAL_MARKERS.is_match(text)
}

/// Distinct identifiers of the text that are neither function names nor Euler's `e`,
/// in order of first appearance.
pub fn free_identifiers(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in IDENTIFIER.find_iter(text) {
        let name = m.as_str();
        let after_digit = text[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit() || c == '.');
        if after_digit && LITERAL_EXPONENT.is_match(name) {
            continue;
        }
        if is_function_name(name) || is_euler_marker(name) {
            continue;
        }
        if !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
    }
    found
}

/// Returns the tracked variable and the transcendental flag.
///
/// Zero identifiers fall back to the canonical variable of the config; more than one is
/// rejected with `UnsupportedMultiVariable`.
pub fn classify_expression(
    text: &str,
    config: &ExpansionConfig,
) -> Result<Classification, TaylorError> {
    let transcendental = is_transcendental(text);
    let mut identifiers = free_identifiers(text);
    let variable = match identifiers.len() {
        0 => config.canonical_variable.clone(),
        1 => identifiers.remove(0),
        _ => {
            identifiers.sort();
            return Err(TaylorError::UnsupportedMultiVariable {
                variables: identifiers,
            });
        }
    };
    debug!(
        "classified '{}': variable {}, transcendental {}",
        text, variable, transcendental
    );
    Ok(Classification {
        variable,
        transcendental,
    })
}
