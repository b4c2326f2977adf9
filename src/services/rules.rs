//! Reusable field-level rule primitives.
//!
//! Every numeric, length, and membership check in the engine goes through
//! these helpers so that errors come out uniformly shaped: one
//! `ValidationError` of the matching kind, attributed to the caller's field
//! path. The helpers append to the caller-supplied accumulator and have no
//! other effect.

use std::fmt::Display;

use crate::domain::models::{ValidationErrorKind, ValidationResult};

/// Require a non-blank text value. Returns whether the value is present so
/// callers can skip follow-up length checks on an empty field.
pub fn require_text(
    out: &mut ValidationResult,
    field: &str,
    value: &str,
    what: &str,
) -> bool {
    if value.trim().is_empty() {
        out.push_error(
            field,
            ValidationErrorKind::Required,
            format!("{what} is required"),
        );
        return false;
    }
    true
}

/// Enforce character-count bounds on a text value.
pub fn check_length(
    out: &mut ValidationResult,
    field: &str,
    value: &str,
    what: &str,
    min: usize,
    max: usize,
) {
    let len = value.chars().count();
    if len < min {
        out.push_error(
            field,
            ValidationErrorKind::MinLength,
            format!("{what} must be at least {min} characters, got {len}"),
        );
    } else if len > max {
        out.push_error(
            field,
            ValidationErrorKind::MaxLength,
            format!("{what} must be at most {max} characters, got {len}"),
        );
    }
}

/// Enforce inclusive numeric bounds.
pub fn check_range<T>(
    out: &mut ValidationResult,
    field: &str,
    what: &str,
    value: T,
    min: T,
    max: T,
) where
    T: PartialOrd + Display + Copy,
{
    if value < min || value > max {
        out.push_error(
            field,
            ValidationErrorKind::Range,
            format!("{what} must be between {min} and {max}, got {value}"),
        );
    }
}

/// Enforce membership in a fixed value set.
pub fn check_membership(
    out: &mut ValidationResult,
    field: &str,
    what: &str,
    value: &str,
    allowed: &[&str],
) {
    if !allowed.contains(&value) {
        out.push_error(
            field,
            ValidationErrorKind::Enum,
            format!("{what} '{value}' is not one of: {}", allowed.join(", ")),
        );
    }
}
