//! Canonical group data
//!
//! Every observation is held in both numeric forms. The form the data was
//! entered in is the source; the other is derived from it once, at
//! construction, and the dataset is immutable afterwards.

use indexmap::IndexMap;
use serde::Serialize;

use anova_core::{AnovaError, Decimal, NumericPath};

/// Observations of one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    floats: Vec<f64>,
    decimals: Vec<Decimal>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.floats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floats.is_empty()
    }

    pub fn floats(&self) -> &[f64] {
        &self.floats
    }

    pub fn decimals(&self) -> &[Decimal] {
        &self.decimals
    }
}

/// Ordered, named groups of observations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDataset {
    groups: IndexMap<String, Group>,
    source: NumericPath,
}

impl GroupDataset {
    /// Groups entered as floating-point values
    pub fn from_floats<I, S>(groups: I) -> Result<Self, AnovaError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut dataset = Self::empty(NumericPath::Float);
        for (name, floats) in groups {
            let name = name.into();
            let mut decimals = Vec::with_capacity(floats.len());
            for (index, &value) in floats.iter().enumerate() {
                if !value.is_finite() {
                    return Err(AnovaError::NonFiniteValue { group: name, index });
                }
                decimals.push(Decimal::from_f64(value)?);
            }
            dataset.insert(name, Group { floats, decimals })?;
        }
        dataset.finish()
    }

    /// Groups entered as exact decimals
    pub fn from_decimals<I, S>(groups: I) -> Result<Self, AnovaError>
    where
        I: IntoIterator<Item = (S, Vec<Decimal>)>,
        S: Into<String>,
    {
        let mut dataset = Self::empty(NumericPath::Decimal);
        for (name, decimals) in groups {
            let name = name.into();
            let mut floats = Vec::with_capacity(decimals.len());
            for (index, value) in decimals.iter().enumerate() {
                match value.to_f64() {
                    Some(f) => floats.push(f),
                    None => return Err(AnovaError::NonFiniteValue { group: name, index }),
                }
            }
            dataset.insert(name, Group { floats, decimals })?;
        }
        dataset.finish()
    }

    /// Groups entered as decimal literals such as `"0.1"` or `"-2.5e3"`
    pub fn parse_decimals<I, S, V, T>(groups: I) -> Result<Self, AnovaError>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for (name, literals) in groups {
            let values = literals
                .into_iter()
                .map(|s| Decimal::parse(s.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push((name.into(), values));
        }
        Self::from_decimals(parsed)
    }

    fn empty(source: NumericPath) -> Self {
        Self {
            groups: IndexMap::new(),
            source,
        }
    }

    fn insert(&mut self, name: String, group: Group) -> Result<(), AnovaError> {
        if group.is_empty() {
            return Err(AnovaError::EmptyGroup(name));
        }
        if self.groups.contains_key(&name) {
            return Err(AnovaError::DuplicateGroup(name));
        }
        self.groups.insert(name, group);
        Ok(())
    }

    fn finish(self) -> Result<Self, AnovaError> {
        if self.groups.is_empty() {
            return Err(AnovaError::NoGroups);
        }
        Ok(self)
    }

    // ========== Queries ==========

    /// Form the observations were entered in
    pub fn source(&self) -> NumericPath {
        self.source
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of observations, N
    pub fn observation_count(&self) -> usize {
        self.groups.values().map(Group::len).sum()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Name of the group at 0-based `index`
    pub fn name(&self, index: usize) -> Option<&str> {
        self.groups.get_index(index).map(|(name, _)| name.as_str())
    }

    /// Group at 0-based `index`
    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get_index(index).map(|(_, group)| group)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Group)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    pub fn float_groups(&self) -> Vec<&[f64]> {
        self.groups.values().map(Group::floats).collect()
    }

    pub fn decimal_groups(&self) -> Vec<&[Decimal]> {
        self.groups.values().map(Group::decimals).collect()
    }

    /// All observations pooled, in group order
    pub fn pooled(&self) -> Group {
        Group {
            floats: self.groups.values().flat_map(|g| g.floats.iter().copied()).collect(),
            decimals: self.groups.values().flat_map(|g| g.decimals.iter().cloned()).collect(),
        }
    }

    /// Independent two-group dataset holding copies of groups `first` and
    /// `second` (0-based), in that order
    pub fn pair(&self, first: usize, second: usize) -> Option<Self> {
        let mut groups = IndexMap::with_capacity(2);
        for index in [first, second] {
            let (name, group) = self.groups.get_index(index)?;
            groups.insert(name.clone(), group.clone());
        }
        if groups.len() != 2 {
            return None;
        }
        Some(Self {
            groups,
            source: self.source,
        })
    }
}
