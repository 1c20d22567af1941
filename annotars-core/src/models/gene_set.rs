use std::collections::BTreeSet;
use std::fmt::{self, Display};

///
/// GeneSet struct, an ordered set of canonical gene symbols.
///
/// Symbols are kept in lexicographic order and deduplicated, so two sets with
/// the same content always compare and iterate identically.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneSet {
    symbols: BTreeSet<String>,
}

impl GeneSet {
    pub fn new() -> Self {
        GeneSet::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>) {
        self.symbols.insert(symbol.into());
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Insert all symbols of another set.
    pub fn extend(&mut self, other: GeneSet) {
        self.symbols.extend(other.symbols);
    }

    pub fn is_subset(&self, other: &GeneSet) -> bool {
        self.symbols.is_subset(&other.symbols)
    }
}

impl FromIterator<String> for GeneSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        GeneSet {
            symbols: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for GeneSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(String::from).collect()
    }
}

impl<'a> IntoIterator for &'a GeneSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl Display for GeneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for symbol in &self.symbols {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{symbol}")?;
            first = false;
        }
        Ok(())
    }
}
