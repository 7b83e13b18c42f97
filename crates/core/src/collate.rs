//! Locale-aware string comparison
//!
//! Names are ordered with the CLDR root collation at its default (tertiary)
//! strength: case and accents only break ties between otherwise equal
//! strings, punctuation follows the root table order, and expansions such as
//! `ß` → `ss` apply.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

thread_local! {
    static ROOT_COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Compare two strings the way a user-facing sorted list expects
///
/// Falls back to code-point order if the collation data cannot be loaded.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}
