use std::fmt::Display;

/// A candidate lipid identity as handed over by the lipid database lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lipid {
    pub id: i32,
    pub name: String,
    pub formula: String,
    /// The lipid class, e.g. `PC` or `TG`
    pub lipid_type: String,
    pub carbon_count: u32,
    pub double_bonds_count: u32,
}

impl Lipid {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        formula: impl Into<String>,
        lipid_type: impl Into<String>,
        carbon_count: u32,
        double_bonds_count: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            formula: formula.into(),
            lipid_type: lipid_type.into(),
            carbon_count,
            double_bonds_count,
        }
    }
}

impl Display for Lipid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.formula)
    }
}
