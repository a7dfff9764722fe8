//! Category grouping for the catalog view.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::ProductRecord;

/// Records sharing one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub records: Vec<ProductRecord>,
}

impl CategoryGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Group records by category.
///
/// Groups appear in the order their category is first seen and records keep
/// their input order within a group. Every group is non-empty.
#[must_use]
pub fn group_by_category(records: &[ProductRecord]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        if let Some(group) = index
            .get(record.category.as_str())
            .and_then(|&i| groups.get_mut(i))
        {
            group.records.push(record.clone());
            continue;
        }

        index.insert(record.category.as_str(), groups.len());
        groups.push(CategoryGroup {
            category: record.category.clone(),
            records: vec![record.clone()],
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::tests::record;

    #[test]
    fn test_groups_in_first_seen_order() {
        let records = vec![
            record("1", "Apple", "Fruit", "1"),
            record("2", "Bread", "Bakery", "2"),
            record("3", "Cherry", "Fruit", "3"),
            record("4", "Bagel", "Bakery", "1"),
            record("5", "Jam", "Pantry", "4"),
        ];

        let groups = group_by_category(&records);
        let summary: Vec<(&str, Vec<&str>)> = groups
            .iter()
            .map(|g| {
                (
                    g.category.as_str(),
                    g.records.iter().map(|r| r.name.as_str()).collect(),
                )
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("Fruit", vec!["Apple", "Cherry"]),
                ("Bakery", vec!["Bread", "Bagel"]),
                ("Pantry", vec!["Jam"]),
            ]
        );
    }

    #[test]
    fn test_grouping_preserves_every_record() {
        let records = vec![
            record("1", "Apple", "Fruit", "1"),
            record("2", "Bread", "Bakery", "2"),
            record("3", "Cherry", "Fruit", "3"),
        ];

        let groups = group_by_category(&records);
        let total: usize = groups.iter().map(CategoryGroup::len).sum();

        assert_eq!(total, records.len());
        assert!(groups.iter().all(|g| !g.is_empty()));
    }

    #[test]
    fn test_categories_differing_in_case_are_separate() {
        let records = vec![
            record("1", "Apple", "Fruit", "1"),
            record("2", "Lime", "fruit", "1"),
        ];
        assert_eq!(group_by_category(&records).len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_category(&[]).is_empty());
    }
}
