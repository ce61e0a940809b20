//! Built-in rules.

use crate::registry::RuleFactory;
use serde::Deserialize;

pub mod no_duplicate_case;
pub mod no_extra_non_null_assertion;
pub mod no_unnecessary_condition;
pub mod no_unnecessary_non_null_assertion;
pub mod no_unnecessary_optional_chain;
pub mod no_unnecessary_type_assertion;
pub mod prefer_nullish_coalescing;
pub mod prefer_ts_expect_error;
pub mod switch_exhaustiveness_check;

mod member_nullability;

/// Every rule shipped with the crate, in registration order.
pub const BUILTIN_RULES: &[(&str, RuleFactory)] = &[
    (
        no_unnecessary_type_assertion::NAME,
        no_unnecessary_type_assertion::create,
    ),
    (
        no_unnecessary_non_null_assertion::NAME,
        no_unnecessary_non_null_assertion::create,
    ),
    (
        no_extra_non_null_assertion::NAME,
        no_extra_non_null_assertion::create,
    ),
    (no_unnecessary_condition::NAME, no_unnecessary_condition::create),
    (
        no_unnecessary_optional_chain::NAME,
        no_unnecessary_optional_chain::create,
    ),
    (
        switch_exhaustiveness_check::NAME,
        switch_exhaustiveness_check::create,
    ),
    (
        prefer_nullish_coalescing::NAME,
        prefer_nullish_coalescing::create,
    ),
    (prefer_ts_expect_error::NAME, prefer_ts_expect_error::create),
    (no_duplicate_case::NAME, no_duplicate_case::create),
];

/// Options of rules that take none. Unknown keys are rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::empty_structs_with_brackets)]
pub struct NoOptions {}

/// Message shared by the rules that are meaningless without
/// `strictNullChecks`.
pub(crate) const NO_STRICT_NULL_CHECK: (&str, &str) = (
    "noStrictNullCheck",
    "This rule requires the `strictNullChecks` compiler option to be turned on to function correctly.",
);
