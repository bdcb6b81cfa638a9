//! crates/schemes_connect_core/src/compare.rs
//!
//! Side-by-side comparison of two or three selected schemes.

use crate::domain::Scheme;

pub const MAX_COMPARED: usize = 3;
pub const MIN_COMPARED: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    #[error("At most 3 schemes can be compared at once")]
    SelectionFull,
    #[error("Choose at least 2 schemes (up to 3) to compare; {0} selected")]
    TooFew(usize),
    #[error("Scheme {0} was not found")]
    UnknownScheme(u32),
}

/// What a toggle did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub label: &'static str,
    /// One cell per selected scheme, in selection order.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonColumn {
    pub id: u32,
    pub title: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTable {
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
}

/// The compared attributes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    MatchScore,
    Eligibility,
    WhyRecommended,
    Documents,
    Source,
    ApplyLink,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::MatchScore,
        Attribute::Eligibility,
        Attribute::WhyRecommended,
        Attribute::Documents,
        Attribute::Source,
        Attribute::ApplyLink,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Attribute::MatchScore => "Match Score",
            Attribute::Eligibility => "Eligibility",
            Attribute::WhyRecommended => "Why Recommended",
            Attribute::Documents => "Required Documents",
            Attribute::Source => "Source",
            Attribute::ApplyLink => "Apply Link",
        }
    }

    fn render(&self, scheme: &Scheme) -> String {
        match self {
            Attribute::MatchScore => scheme.confidence.to_string(),
            Attribute::Eligibility => scheme.eligibility.clone(),
            Attribute::WhyRecommended => scheme.why_recommended.clone(),
            Attribute::Documents => scheme.documents.join(", "),
            Attribute::Source => scheme.source.clone(),
            Attribute::ApplyLink => scheme.apply_link.clone(),
        }
    }
}

/// The current comparison selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    selected: Vec<Scheme>,
}

impl Comparison {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[Scheme] {
        &self.selected
    }

    pub fn contains(&self, id: u32) -> bool {
        self.selected.iter().any(|s| s.id == id)
    }

    pub fn can_add(&self) -> bool {
        self.selected.len() < MAX_COMPARED
    }

    /// Deselects the scheme if selected, otherwise selects it when there is room.
    pub fn toggle(&mut self, scheme: &Scheme) -> Result<Toggle, CompareError> {
        if self.remove(scheme.id) {
            return Ok(Toggle::Removed);
        }
        if !self.can_add() {
            return Err(CompareError::SelectionFull);
        }
        self.selected.push(scheme.clone());
        Ok(Toggle::Added)
    }

    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s.id != id);
        self.selected.len() != before
    }

    pub fn table(&self) -> Result<ComparisonTable, CompareError> {
        if self.selected.len() < MIN_COMPARED {
            return Err(CompareError::TooFew(self.selected.len()));
        }

        let columns = self
            .selected
            .iter()
            .map(|s| ComparisonColumn {
                id: s.id,
                title: s.title.clone(),
                category: s.category.clone(),
            })
            .collect();
        let rows = Attribute::ALL
            .iter()
            .map(|attribute| ComparisonRow {
                label: attribute.label(),
                cells: self.selected.iter().map(|s| attribute.render(s)).collect(),
            })
            .collect();

        Ok(ComparisonTable { columns, rows })
    }
}
