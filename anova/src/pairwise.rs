//! Pairwise comparison
//!
//! Each requested pair of groups is analysed as an independent two-group
//! dataset and cached under its unordered pair key.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use anova_core::{AnovaError, NumericPath};

use crate::config::{ComparisonMode, SignificanceLevel};
use crate::dataset::GroupDataset;
use crate::decomposition::DecompositionResult;

/// Unordered pair of distinct groups, 1-based, stored with `first < second`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupPair {
    first: usize,
    second: usize,
}

impl GroupPair {
    /// Validate `a` and `b` against a dataset of `groups` groups
    pub fn new(a: usize, b: usize, groups: usize) -> Result<Self, AnovaError> {
        if a == b {
            return Err(AnovaError::SameGroup(a));
        }
        for index in [a, b] {
            if index == 0 || index > groups {
                return Err(AnovaError::GroupIndexOutOfRange { index, groups });
            }
        }
        Ok(Self {
            first: a.min(b),
            second: a.max(b),
        })
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn second(&self) -> usize {
        self.second
    }
}

/// Two-group decomposition of one pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairComparison {
    pub pair: GroupPair,
    pub names: (String, String),
    pub result: DecompositionResult,
}

impl PairComparison {
    /// Analyse `pair` of `dataset` on an owned two-group copy
    pub fn compute(
        dataset: &GroupDataset,
        pair: GroupPair,
        path: NumericPath,
        level: SignificanceLevel,
    ) -> Result<Self, AnovaError> {
        let sub = dataset
            .pair(pair.first - 1, pair.second - 1)
            .ok_or(AnovaError::GroupIndexOutOfRange {
                index: pair.second,
                groups: dataset.group_count(),
            })?;
        let result = DecompositionResult::compute(&sub, path, level)?;
        trace!(first = pair.first, second = pair.second, f = result.f_ratio.float, "pair compared");
        Ok(Self {
            pair,
            names: names_of(dataset, pair),
            result,
        })
    }

    pub fn with_significance(&self, level: SignificanceLevel) -> Self {
        Self {
            result: self.result.with_significance(level),
            ..self.clone()
        }
    }
}

pub(crate) fn names_of(dataset: &GroupDataset, pair: GroupPair) -> (String, String) {
    let name = |index: usize| dataset.name(index - 1).unwrap_or_default().to_string();
    (name(pair.first), name(pair.second))
}

/// Cached comparisons for the requested pairs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PairRegistry {
    members: Vec<bool>,
    entries: IndexMap<GroupPair, PairComparison>,
}

impl PairRegistry {
    /// Compare every pair among the groups `mode` selects.
    ///
    /// With two groups the all-groups result already is the only pair, so
    /// nothing is computed and the registry stays empty.
    pub fn build(
        dataset: &GroupDataset,
        mode: &ComparisonMode,
        path: NumericPath,
        level: SignificanceLevel,
    ) -> Result<Self, AnovaError> {
        let groups = dataset.group_count();
        let members = mode.members(groups)?;
        if groups <= 2 {
            return Ok(Self {
                members: vec![false; groups],
                entries: IndexMap::new(),
            });
        }

        let mut entries = IndexMap::new();
        for i in 1..=groups {
            for j in (i + 1)..=groups {
                if members[i - 1] && members[j - 1] {
                    let pair = GroupPair::new(i, j, groups)?;
                    entries.insert(pair, PairComparison::compute(dataset, pair, path, level)?);
                }
            }
        }

        debug!(path = %path, pairs = entries.len(), "pairwise comparisons");
        Ok(Self { members, entries })
    }

    /// Whether both groups of `pair` were part of the requested comparison
    pub fn covers(&self, pair: GroupPair) -> bool {
        let member = |index: usize| self.members.get(index - 1).copied().unwrap_or(false);
        member(pair.first) && member(pair.second)
    }

    pub fn get(&self, pair: GroupPair) -> Option<&PairComparison> {
        self.entries.get(&pair)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PairComparison> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recompute only the critical F-ratios
    pub fn with_significance(&self, level: SignificanceLevel) -> Self {
        Self {
            members: self.members.clone(),
            entries: self
                .entries
                .iter()
                .map(|(pair, comparison)| (*pair, comparison.with_significance(level)))
                .collect(),
        }
    }
}

impl Serialize for PairRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_groups() -> GroupDataset {
        GroupDataset::from_floats([
            ("A", vec![1.0, 2.0, 3.0]),
            ("B", vec![4.0, 5.0, 6.0]),
            ("C", vec![7.0, 8.0, 9.0]),
            ("D", vec![2.0, 2.5, 4.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_pair_is_symmetric() {
        assert_eq!(GroupPair::new(3, 1, 4).unwrap(), GroupPair::new(1, 3, 4).unwrap());
        let pair = GroupPair::new(4, 2, 4).unwrap();
        assert_eq!((pair.first(), pair.second()), (2, 4));
    }

    #[test]
    fn test_pair_validation() {
        assert_eq!(GroupPair::new(2, 2, 4), Err(AnovaError::SameGroup(2)));
        assert_eq!(
            GroupPair::new(0, 2, 4),
            Err(AnovaError::GroupIndexOutOfRange { index: 0, groups: 4 })
        );
        assert_eq!(
            GroupPair::new(1, 5, 4),
            Err(AnovaError::GroupIndexOutOfRange { index: 5, groups: 4 })
        );
    }

    #[test]
    fn test_all_pairs() {
        let data = four_groups();
        let registry = PairRegistry::build(&data, &ComparisonMode::AllPairs, NumericPath::Float, Default::default()).unwrap();
        assert_eq!(registry.len(), 6);
        let ac = registry.get(GroupPair::new(3, 1, 4).unwrap()).unwrap();
        assert_eq!(ac.names, ("A".to_string(), "C".to_string()));
        assert_eq!(ac.result.groups, 2);
        assert_eq!(ac.result.dof.within, 4);
    }

    #[test]
    fn test_subset() {
        let data = four_groups();
        let mode = ComparisonMode::Subset { groups: vec![1, 2, 4] };
        let registry = PairRegistry::build(&data, &mode, NumericPath::Float, Default::default()).unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.covers(GroupPair::new(4, 1, 4).unwrap()));
        assert!(!registry.covers(GroupPair::new(1, 3, 4).unwrap()));
        assert!(registry.get(GroupPair::new(1, 3, 4).unwrap()).is_none());
    }

    #[test]
    fn test_pair_uses_its_own_means() {
        let data = four_groups();
        let pair = GroupPair::new(1, 2, 4).unwrap();
        let comparison = PairComparison::compute(&data, pair, NumericPath::Float, Default::default()).unwrap();
        // A and B only: grand mean 3.5, SS_between = 2 * 3 * 1.5²
        assert_eq!(comparison.result.grand_mean.float, 3.5);
        assert!((comparison.result.ss_between.float - 13.5).abs() < 1e-12);
        assert!((comparison.result.ss_within.float - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_groups_is_a_no_op() {
        let data = GroupDataset::from_floats([("A", vec![1.0, 2.0]), ("B", vec![3.0, 5.0])]).unwrap();
        let registry = PairRegistry::build(&data, &ComparisonMode::AllPairs, NumericPath::Float, Default::default()).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_serialises_as_list() {
        let data = four_groups();
        let mode = ComparisonMode::SinglePair { first: 2, second: 3 };
        let registry = PairRegistry::build(&data, &mode, NumericPath::Float, Default::default()).unwrap();
        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["pair"]["first"], 2);
        assert_eq!(json[0]["names"][1], "C");
    }
}
