use std::collections::HashMap;

use super::filter::filter;
use super::model::{Dataset, WorkerCounts, WorkforceRecord};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Total / rural / urban persons for one worker class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AreaTotals {
    pub total: u64,
    pub rural: u64,
    pub urban: u64,
}

impl AreaTotals {
    fn add(&mut self, counts: &WorkerCounts) {
        self.total += counts.total.persons;
        self.rural += counts.rural.persons;
        self.urban += counts.urban.persons;
    }

    /// Which area holds the larger share. Ties go to urban.
    pub fn majority(&self) -> AreaMajority {
        if self.rural > self.urban {
            AreaMajority::Rural
        } else {
            AreaMajority::Urban
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaMajority {
    Rural,
    Urban,
}

impl AreaMajority {
    pub fn label(self) -> &'static str {
        match self {
            AreaMajority::Rural => "rural",
            AreaMajority::Urban => "urban",
        }
    }
}

/// Male / female sums taken from the "total" area columns.
///
/// These are raw column sums; they are not required to add up to the
/// persons totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenderTotals {
    pub main_male: u64,
    pub main_female: u64,
    pub marginal_male: u64,
    pub marginal_female: u64,
}

/// Main and marginal persons totals for one district.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictTotals {
    pub district: String,
    pub main: u64,
    pub marginal: u64,
}

/// Everything the dashboard shows for one (state, industry) selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    pub main: AreaTotals,
    pub marginal: AreaTotals,
    pub gender: GenderTotals,
    /// One entry per district, in the order districts are first seen.
    pub by_district: Vec<DistrictTotals>,
    /// Number of records that contributed.
    pub record_count: usize,
}

impl AggregateResult {
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    #[cfg(test)]
    pub fn district(&self, name: &str) -> Option<&DistrictTotals> {
        self.by_district.iter().find(|d| d.district == name)
    }

    pub fn main_majority(&self) -> AreaMajority {
        self.main.majority()
    }

    pub fn marginal_majority(&self) -> AreaMajority {
        self.marginal.majority()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Sum the counts of `subset` and group them by district.
pub fn summarize<'a, I>(subset: I) -> AggregateResult
where
    I: IntoIterator<Item = &'a WorkforceRecord>,
{
    let mut result = AggregateResult::default();
    let mut district_slot: HashMap<&'a str, usize> = HashMap::new();

    for rec in subset {
        result.record_count += 1;
        result.main.add(&rec.main);
        result.marginal.add(&rec.marginal);

        result.gender.main_male += rec.main.total.males;
        result.gender.main_female += rec.main.total.females;
        result.gender.marginal_male += rec.marginal.total.males;
        result.gender.marginal_female += rec.marginal.total.females;

        let slot = *district_slot.entry(rec.district.as_str()).or_insert_with(|| {
            result.by_district.push(DistrictTotals {
                district: rec.district.clone(),
                main: 0,
                marginal: 0,
            });
            result.by_district.len() - 1
        });
        let entry = &mut result.by_district[slot];
        entry.main += rec.main.total.persons;
        entry.marginal += rec.marginal.total.persons;
    }

    result
}

/// `filter` followed by `summarize`.
pub fn aggregate(dataset: &Dataset, region: &str, category: &str) -> AggregateResult {
    summarize(filter(dataset, region, category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Area, Measure, Sex, WorkerClass};

    const MAIN_TOTAL: Measure = Measure::new(WorkerClass::Main, Area::Total, Sex::Persons);
    const MAIN_RURAL: Measure = Measure::new(WorkerClass::Main, Area::Rural, Sex::Persons);
    const MAIN_URBAN: Measure = Measure::new(WorkerClass::Main, Area::Urban, Sex::Persons);
    const MARG_TOTAL: Measure = Measure::new(WorkerClass::Marginal, Area::Total, Sex::Persons);
    const MARG_RURAL: Measure = Measure::new(WorkerClass::Marginal, Area::Rural, Sex::Persons);
    const MAIN_MALES: Measure = Measure::new(WorkerClass::Main, Area::Total, Sex::Males);
    const MAIN_FEMALES: Measure = Measure::new(WorkerClass::Main, Area::Total, Sex::Females);
    const MARG_MALES: Measure = Measure::new(WorkerClass::Marginal, Area::Total, Sex::Males);
    const MARG_FEMALES: Measure = Measure::new(WorkerClass::Marginal, Area::Total, Sex::Females);

    fn scenario() -> Dataset {
        Dataset::from_records(vec![
            WorkforceRecord::new("A", "X", "C1")
                .with(MAIN_TOTAL, 10)
                .with(MAIN_RURAL, 6)
                .with(MAIN_URBAN, 4)
                .with(MARG_TOTAL, 2),
            WorkforceRecord::new("A", "Y", "C1")
                .with(MAIN_TOTAL, 5)
                .with(MAIN_RURAL, 5)
                .with(MAIN_URBAN, 0)
                .with(MARG_TOTAL, 1),
        ])
    }

    fn mixed() -> Vec<WorkforceRecord> {
        vec![
            WorkforceRecord::new("A", "X", "C1")
                .with(MAIN_TOTAL, 7)
                .with(MARG_TOTAL, 3)
                .with(MAIN_MALES, 4)
                .with(MAIN_FEMALES, 19),
            WorkforceRecord::new("B", "Z", "C1").with(MAIN_TOTAL, 100),
            WorkforceRecord::new("A", "Y", "C1")
                .with(MAIN_TOTAL, 2)
                .with(MARG_TOTAL, 8)
                .with(MARG_MALES, 1)
                .with(MARG_FEMALES, 6),
            WorkforceRecord::new("A", "X", "C1")
                .with(MAIN_TOTAL, 11)
                .with(MARG_TOTAL, 1)
                .with(MAIN_MALES, 5),
            WorkforceRecord::new("A", "X", "C2").with(MAIN_TOTAL, 50),
        ]
    }

    #[test]
    fn two_district_scenario() {
        let r = aggregate(&scenario(), "A", "C1");
        assert_eq!(r.main, AreaTotals { total: 15, rural: 11, urban: 4 });
        assert_eq!(r.marginal.total, 3);
        assert_eq!(
            r.by_district,
            vec![
                DistrictTotals { district: "X".into(), main: 10, marginal: 2 },
                DistrictTotals { district: "Y".into(), main: 5, marginal: 1 },
            ]
        );
        assert_eq!(r.record_count, 2);
    }

    #[test]
    fn unknown_region_yields_zero_result() {
        let r = aggregate(&scenario(), "Nowhere", "C1");
        assert!(r.is_empty());
        assert_eq!(r.main, AreaTotals::default());
        assert_eq!(r.marginal, AreaTotals::default());
        assert_eq!(r.gender, GenderTotals::default());
        assert!(r.by_district.is_empty());
    }

    #[test]
    fn aggregate_is_idempotent() {
        let ds = Dataset::from_records(mixed());
        assert_eq!(aggregate(&ds, "A", "C1"), aggregate(&ds, "A", "C1"));
    }

    #[test]
    fn district_totals_conserve_sums() {
        let ds = Dataset::from_records(mixed());
        let r = aggregate(&ds, "A", "C1");
        let main: u64 = r.by_district.iter().map(|d| d.main).sum();
        let marginal: u64 = r.by_district.iter().map(|d| d.marginal).sum();
        assert_eq!(main, r.main.total);
        assert_eq!(marginal, r.marginal.total);
        assert_eq!(r.district("X").map(|d| (d.main, d.marginal)), Some((18, 4)));
    }

    #[test]
    fn gender_sums_are_raw_column_sums() {
        let ds = Dataset::from_records(mixed());
        let r = aggregate(&ds, "A", "C1");
        // Main males + females exceed the main total here; no reconciliation.
        assert_eq!(r.gender.main_male, 9);
        assert_eq!(r.gender.main_female, 19);
        assert_eq!(r.gender.marginal_male, 1);
        assert_eq!(r.gender.marginal_female, 6);
        assert_eq!(r.main.total, 20);
    }

    #[test]
    fn row_order_does_not_change_totals() {
        let forward = Dataset::from_records(mixed());
        let mut rows = mixed();
        rows.reverse();
        let backward = Dataset::from_records(rows);

        let a = aggregate(&forward, "A", "C1");
        let b = aggregate(&backward, "A", "C1");
        assert_eq!(a.main, b.main);
        assert_eq!(a.marginal, b.marginal);
        assert_eq!(a.gender, b.gender);

        let mut da = a.by_district.clone();
        let mut db = b.by_district.clone();
        da.sort_by(|x, y| x.district.cmp(&y.district));
        db.sort_by(|x, y| x.district.cmp(&y.district));
        assert_eq!(da, db);
    }

    #[test]
    fn districts_keep_first_seen_order() {
        let ds = Dataset::from_records(mixed());
        let r = aggregate(&ds, "A", "C1");
        let names: Vec<&str> = r.by_district.iter().map(|d| d.district.as_str()).collect();
        assert_eq!(names, ["X", "Y"]);
    }

    #[test]
    fn majority_ties_resolve_to_urban() {
        let r = summarize([
            &WorkforceRecord::new("A", "X", "C1")
                .with(MAIN_RURAL, 3)
                .with(MAIN_URBAN, 3)
                .with(MARG_RURAL, 5),
        ]);
        assert_eq!(r.main_majority(), AreaMajority::Urban);
        assert_eq!(r.marginal_majority(), AreaMajority::Rural);
    }
}
