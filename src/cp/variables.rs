//! Decision variables and their finite domains.

use crate::error::{CspError, Result};
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// A finite set of candidate values.
///
/// Values keep the order in which they were first inserted; duplicates are
/// collapsed. The order matters: without an objective, search tries values
/// in domain order.
///
/// # Examples
///
/// ```
/// use u_csp::cp::Domain;
///
/// let d = Domain::new([3, 1, 3, 2]);
/// assert_eq!(d.values(), &[3, 1, 2]);
/// assert_eq!(Domain::from(1..=3).len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    values: Vec<i64>,
}

impl Domain {
    /// Creates a domain from arbitrary values, dropping repeats.
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        let mut seen = HashSet::new();
        let values = values.into_iter().filter(|v| seen.insert(*v)).collect();
        Self { values }
    }

    /// Creates the contiguous domain `[min, max]`. Empty if `min > max`.
    pub fn range(min: i64, max: i64) -> Self {
        Self {
            values: (min..=max).collect(),
        }
    }

    /// Number of remaining candidates.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the domain has been wiped out.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `value` is still a candidate.
    pub fn contains(&self, value: i64) -> bool {
        self.values.contains(&value)
    }

    /// Remaining candidates in domain order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Candidates by value, in domain order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().copied()
    }

    /// Smallest candidate, `None` when empty.
    pub fn min(&self) -> Option<i64> {
        self.values.iter().copied().min()
    }

    /// Largest candidate, `None` when empty.
    pub fn max(&self) -> Option<i64> {
        self.values.iter().copied().max()
    }

    /// Keeps only the values accepted by `keep`. Returns how many were removed.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(i64) -> bool) -> usize {
        let before = self.values.len();
        self.values.retain(|&v| keep(v));
        before - self.values.len()
    }

    pub(crate) fn remove_at(&mut self, position: usize) -> i64 {
        self.values.remove(position)
    }

    /// Reinserts a value at the position it was removed from.
    ///
    /// Only valid when removals are undone in reverse order.
    pub(crate) fn restore_at(&mut self, position: usize, value: i64) {
        self.values.insert(position, value);
    }
}

impl FromIterator<i64> for Domain {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<RangeInclusive<i64>> for Domain {
    fn from(range: RangeInclusive<i64>) -> Self {
        Self::range(*range.start(), *range.end())
    }
}

impl From<Vec<i64>> for Domain {
    fn from(values: Vec<i64>) -> Self {
        Self::new(values)
    }
}

impl From<&[i64]> for Domain {
    fn from(values: &[i64]) -> Self {
        Self::new(values.iter().copied())
    }
}

impl<const N: usize> From<[i64; N]> for Domain {
    fn from(values: [i64; N]) -> Self {
        Self::new(values)
    }
}

/// A named decision variable.
///
/// Propagation tightens `domain` in place. An assigned value must belong to
/// the domain at the moment it is assigned; search treats a pre-assigned
/// variable as fixed to that value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    /// Variable name (unique identifier within a problem).
    pub name: String,
    /// Remaining candidate values.
    pub domain: Domain,
    /// Committed value, if any.
    pub assigned: Option<i64>,
}

impl Variable {
    /// Creates an unassigned variable.
    pub fn new(name: impl Into<String>, domain: impl Into<Domain>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            assigned: None,
        }
    }

    /// Commits `value`, which must be in the current domain.
    pub fn assign(&mut self, value: i64) -> Result<()> {
        if !self.domain.contains(value) {
            return Err(CspError::ValueNotInDomain {
                variable: self.name.clone(),
                value,
            });
        }
        self.assigned = Some(value);
        Ok(())
    }

    pub fn unassign(&mut self) {
        self.assigned = None;
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    /// The domain search branches over: the assigned value alone when the
    /// variable is fixed (empty if propagation has since removed it).
    pub(crate) fn effective_domain(&self) -> Domain {
        match self.assigned {
            Some(v) if self.domain.contains(v) => Domain { values: vec![v] },
            Some(_) => Domain::default(),
            None => self.domain.clone(),
        }
    }
}
