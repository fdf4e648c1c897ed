//! Byte-sequence comparison strategies and the oracle seam.
//!
//! Both comparators honour the same equality contract: `true` iff the two
//! slices have the same length and identical contents. They differ only in
//! how long they take to say so.
//!
//! - [`VariableTimeComparator`] stops at the first mismatching byte and
//!   waits a fixed delay after every byte that matches. Its running time is
//!   proportional to the length of the matching prefix.
//! - [`ConstantTimeComparator`] uses [`subtle::ConstantTimeEq`], whose
//!   running time depends only on the input length.
//!
//! The attack engine never sees a comparator directly. It queries an
//! [`Oracle`]: either a [`Target`] binding a secret to a comparator, or any
//! `FnMut(&[u8]) -> bool` closure.

use std::time::Duration;

use subtle::ConstantTimeEq;

use crate::config::DelayMode;
use crate::measurement::block_for;

/// Boolean equality over byte sequences.
pub trait Comparator {
    /// Compare `probe` against `secret`.
    ///
    /// Returns `false` when the lengths differ.
    fn compare(&self, secret: &[u8], probe: &[u8]) -> bool;

    /// Short name used in reports.
    fn name(&self) -> &'static str;
}

impl<C: Comparator + ?Sized> Comparator for &C {
    fn compare(&self, secret: &[u8], probe: &[u8]) -> bool {
        (**self).compare(secret, probe)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<C: Comparator + ?Sized> Comparator for Box<C> {
    fn compare(&self, secret: &[u8], probe: &[u8]) -> bool {
        (**self).compare(secret, probe)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Early-exit comparison that leaks the matching prefix length.
#[derive(Debug, Clone, Copy)]
pub struct VariableTimeComparator {
    delay: Duration,
    mode: DelayMode,
}

impl VariableTimeComparator {
    /// Create a comparator that blocks for `delay` after each matching byte.
    pub fn new(delay: Duration, mode: DelayMode) -> Self {
        Self { delay, mode }
    }

    /// The per-byte delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Comparator for VariableTimeComparator {
    fn compare(&self, secret: &[u8], probe: &[u8]) -> bool {
        if probe.len() != secret.len() {
            return false;
        }
        for (a, b) in secret.iter().zip(probe) {
            if a != b {
                return false;
            }
            block_for(self.delay, self.mode);
        }
        true
    }

    fn name(&self) -> &'static str {
        "variable-time"
    }
}

/// Comparison whose running time is independent of the contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantTimeComparator;

impl Comparator for ConstantTimeComparator {
    fn compare(&self, secret: &[u8], probe: &[u8]) -> bool {
        // Length is public; only the contents must not leak.
        if probe.len() != secret.len() {
            return false;
        }
        secret.ct_eq(probe).into()
    }

    fn name(&self) -> &'static str {
        "constant-time"
    }
}

/// A black-box equality check against a hidden secret.
pub trait Oracle {
    /// Ask whether `probe` equals the hidden secret.
    fn query(&mut self, probe: &[u8]) -> bool;
}

impl<F> Oracle for F
where
    F: FnMut(&[u8]) -> bool,
{
    fn query(&mut self, probe: &[u8]) -> bool {
        self(probe)
    }
}

/// A secret bound to the comparator that guards it.
#[derive(Debug, Clone)]
pub struct Target<'a, C> {
    secret: &'a [u8],
    comparator: C,
}

impl<'a, C: Comparator> Target<'a, C> {
    /// Bind `secret` to `comparator`. The secret is only ever read.
    pub fn new(secret: &'a [u8], comparator: C) -> Self {
        Self { secret, comparator }
    }

    /// Length of the hidden secret. Public knowledge for the attacker.
    pub fn secret_len(&self) -> usize {
        self.secret.len()
    }

    /// The comparator guarding the secret.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<C: Comparator> Oracle for Target<'_, C> {
    fn query(&mut self, probe: &[u8]) -> bool {
        self.comparator.compare(self.secret, probe)
    }
}
