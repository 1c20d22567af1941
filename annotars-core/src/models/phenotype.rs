use std::fmt::{self, Display};

///
/// Phenotype struct, one term of an HPO-like phenotype ontology.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phenotype {
    pub accession: String,
    pub name: String,
}

impl Phenotype {
    pub fn new(accession: impl Into<String>, name: impl Into<String>) -> Self {
        Phenotype {
            accession: accession.into(),
            name: name.into(),
        }
    }
}

impl Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.accession, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        let phenotype = Phenotype::new("HP:0001250", "Seizure");
        assert_eq!(phenotype.to_string(), "HP:0001250 - Seizure");
    }
}
