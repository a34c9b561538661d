use super::model::{Dataset, WorkforceRecord};

// ---------------------------------------------------------------------------
// Filter predicate: one state and one industry
// ---------------------------------------------------------------------------

/// The (state, industry) pair currently chosen in the side panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub region: String,
    pub category: String,
}

impl FilterSelection {
    pub fn new(region: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            category: category.into(),
        }
    }

    /// Default selection for a freshly loaded dataset: the first state and
    /// the first industry in sorted order.
    pub fn first_of(dataset: &Dataset) -> Option<Self> {
        let region = dataset.distinct_regions().iter().next()?;
        let category = dataset.distinct_categories().iter().next()?;
        Some(Self::new(region.clone(), category.clone()))
    }

    /// Whether `record` belongs to this selection.
    pub fn matches(&self, record: &WorkforceRecord) -> bool {
        keys_equal(&record.region, &self.region) && keys_equal(&record.category, &self.category)
    }
}

fn keys_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

/// Return the records that match both keys, in dataset order.
///
/// An empty result is valid: it simply means the intersection is empty.
pub fn filter<'a>(
    dataset: &'a Dataset,
    region: &str,
    category: &str,
) -> Vec<&'a WorkforceRecord> {
    let selection = FilterSelection::new(region, category);
    dataset
        .records()
        .iter()
        .filter(|rec| selection.matches(rec))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            WorkforceRecord::new("Kerala", "Idukki", "Weaving"),
            WorkforceRecord::new("Kerala", "Kollam", "Pottery"),
            WorkforceRecord::new("Assam", "Dhubri", "Weaving"),
            WorkforceRecord::new("Kerala", "Kollam", "Weaving"),
        ])
    }

    #[test]
    fn keeps_matching_rows_in_order() {
        let ds = dataset();
        let rows = filter(&ds, "Kerala", "Weaving");
        let districts: Vec<&str> = rows.iter().map(|r| r.district.as_str()).collect();
        assert_eq!(districts, ["Idukki", "Kollam"]);
    }

    #[test]
    fn match_ignores_case() {
        let ds = dataset();
        assert_eq!(filter(&ds, "KERALA", "weaving").len(), 2);
    }

    #[test]
    fn no_substring_matching() {
        let ds = dataset();
        assert!(filter(&ds, "Ker", "Weaving").is_empty());
    }

    #[test]
    fn unknown_keys_give_empty_subset() {
        let ds = dataset();
        assert!(filter(&ds, "Goa", "Weaving").is_empty());
        assert!(filter(&ds, "Assam", "Pottery").is_empty());
    }

    #[test]
    fn first_selection_is_sorted_minimum() {
        let sel = FilterSelection::first_of(&dataset()).unwrap();
        assert_eq!(sel, FilterSelection::new("Assam", "Pottery"));
        assert!(FilterSelection::first_of(&Dataset::default()).is_none());
    }
}
