//! Exclusive open/closed state for category sections.
//!
//! At most one section is open at a time. Activating a closed section opens
//! it and closes whichever was open; activating the open section closes it.

use serde::Serialize;

use super::grouping::CategoryGroup;

/// Whether a section is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionState {
    Open,
    Closed,
}

/// Accordion over a list of category sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccordionState {
    sections: Vec<String>,
    open: Option<usize>,
}

impl AccordionState {
    /// Create an accordion with every section closed.
    ///
    /// Duplicate names collapse into the first occurrence.
    #[must_use]
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sections: Vec<String> = Vec::new();
        for category in categories {
            let category = category.into();
            if !sections.contains(&category) {
                sections.push(category);
            }
        }
        Self {
            sections,
            open: None,
        }
    }

    /// Create an accordion with one section per group.
    #[must_use]
    pub fn from_groups(groups: &[CategoryGroup]) -> Self {
        Self::new(groups.iter().map(|g| g.category.as_str()))
    }

    /// Replace the sections after the grouping changed. Everything starts
    /// closed.
    pub fn reset(&mut self, groups: &[CategoryGroup]) {
        *self = Self::from_groups(groups);
    }

    /// Toggle a section.
    ///
    /// Returns the section's new state, or `None` (leaving everything as it
    /// was) when no section has that name.
    pub fn activate(&mut self, category: &str) -> Option<SectionState> {
        let target = self.position(category)?;

        if self.open == Some(target) {
            self.open = None;
            Some(SectionState::Closed)
        } else {
            self.open = Some(target);
            Some(SectionState::Open)
        }
    }

    /// Close every section.
    pub const fn close_all(&mut self) {
        self.open = None;
    }

    /// State of one section, `None` if unknown.
    #[must_use]
    pub fn state(&self, category: &str) -> Option<SectionState> {
        let index = self.position(category)?;
        Some(if self.open == Some(index) {
            SectionState::Open
        } else {
            SectionState::Closed
        })
    }

    #[must_use]
    pub fn is_open(&self, category: &str) -> bool {
        self.state(category) == Some(SectionState::Open)
    }

    /// The open section, if any.
    #[must_use]
    pub fn open_section(&self) -> Option<&str> {
        self.open
            .and_then(|i| self.sections.get(i))
            .map(String::as_str)
    }

    /// Every section with its state, in display order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, SectionState)> {
        self.sections.iter().enumerate().map(move |(i, name)| {
            let state = if self.open == Some(i) {
                SectionState::Open
            } else {
                SectionState::Closed
            };
            (name.as_str(), state)
        })
    }

    fn position(&self, category: &str) -> Option<usize> {
        self.sections.iter().position(|s| s == category)
    }
}
