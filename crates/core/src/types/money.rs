//! Integer rupee amounts.
//!
//! The store backend prices everything in whole rupees, so money is a `u64`
//! newtype rather than a decimal type. Totals at shop scale are nowhere near
//! the type's width, so plain arithmetic is used throughout.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// An amount of money in whole Indian rupees.
///
/// Displays with the rupee sign and Indian digit grouping
/// (e.g., `₹1,23,456`), matching how the storefront prints prices.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupees(u64);

impl Rupees {
    /// Zero rupees.
    pub const ZERO: Self = Self(0);

    /// Create an amount from whole rupees.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the underlying rupee count.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Difference with a floor of zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for Rupees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Rupees {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Rupees {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * u64::from(quantity))
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u64> for Rupees {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl From<Rupees> for u64 {
    fn from(amount: Rupees) -> Self {
        amount.0
    }
}

impl std::fmt::Display for Rupees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}", group_indian(self.0))
    }
}

/// Format a number with Indian digit grouping: the last three digits form
/// one group, every two digits above that form another (1234567 -> 12,34,567).
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let head_bytes = head.as_bytes();
    let mut start = 0;
    // Leading group may be a single digit when the head has odd length.
    if head_bytes.len() % 2 == 1 {
        groups.push(&head[..1]);
        start = 1;
    }
    while start < head.len() {
        groups.push(&head[start..start + 2]);
        start += 2;
    }
    groups.push(tail);
    groups.join(",")
}
