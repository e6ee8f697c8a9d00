// 🧮 Field-wise hashing helper
//
// Entities are compared by value, not by where they live in memory. The hash
// is accumulated field by field (`31 * result + field`) so the same values
// always give the same code, across runs and across processes.

use chrono::{Datelike, NaiveDate};

/// Multiplier used when folding a field into the running hash
pub const HASH_PRIME: i32 = 31;

/// Accumulates a hash code over a sequence of fields.
///
/// Fields are folded in the order they are added, so two entities only hash
/// alike when their fields match position by position.
#[derive(Debug, Clone, Copy)]
pub struct FieldHasher {
    result: i32,
}

impl FieldHasher {
    /// Start a fresh accumulator (seed 1)
    pub fn new() -> Self {
        FieldHasher { result: 1 }
    }

    /// Continue from a parent hash (variant fields on top of base fields)
    pub fn extend(seed: i32) -> Self {
        FieldHasher { result: seed }
    }

    pub fn int(mut self, value: i32) -> Self {
        self.result = self.result.wrapping_mul(HASH_PRIME).wrapping_add(value);
        self
    }

    /// Empty strings hash as 0, like an absent value
    pub fn text(self, value: &str) -> Self {
        self.int(string_hash(value))
    }

    pub fn flag(self, value: bool) -> Self {
        self.int(if value { 1 } else { 0 })
    }

    pub fn date(self, value: NaiveDate) -> Self {
        self.int(value.num_days_from_ce())
    }

    pub fn finish(self) -> i32 {
        self.result
    }
}

impl Default for FieldHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Polynomial string hash over UTF-16 code units (`s[0]*31^(n-1) + ... + s[n-1]`)
pub fn string_hash(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |acc, unit| {
            acc.wrapping_mul(HASH_PRIME).wrapping_add(i32::from(unit))
        })
}
