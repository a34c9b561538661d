use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Worker count schema
// ---------------------------------------------------------------------------

/// Main vs marginal worker classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkerClass {
    Main,
    Marginal,
}

/// Area breakdown of a worker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Area {
    Total,
    Rural,
    Urban,
}

/// Sex breakdown of a worker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sex {
    Persons,
    Males,
    Females,
}

impl WorkerClass {
    pub const ALL: [WorkerClass; 2] = [WorkerClass::Main, WorkerClass::Marginal];

    pub fn label(self) -> &'static str {
        match self {
            WorkerClass::Main => "main",
            WorkerClass::Marginal => "marginal",
        }
    }
}

impl Area {
    pub const ALL: [Area; 3] = [Area::Total, Area::Rural, Area::Urban];

    pub fn label(self) -> &'static str {
        match self {
            Area::Total => "total",
            Area::Rural => "rural",
            Area::Urban => "urban",
        }
    }
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Persons, Sex::Males, Sex::Females];

    pub fn label(self) -> &'static str {
        match self {
            Sex::Persons => "persons",
            Sex::Males => "males",
            Sex::Females => "females",
        }
    }
}

/// One of the eighteen numeric columns of the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Measure {
    pub class: WorkerClass,
    pub area: Area,
    pub sex: Sex,
}

impl Measure {
    pub const fn new(class: WorkerClass, area: Area, sex: Sex) -> Self {
        Self { class, area, sex }
    }

    /// All eighteen measures in source column order.
    pub fn all() -> impl Iterator<Item = Measure> {
        WorkerClass::ALL.into_iter().flat_map(|class| {
            Area::ALL.into_iter().flat_map(move |area| {
                Sex::ALL
                    .into_iter()
                    .map(move |sex| Measure::new(class, area, sex))
            })
        })
    }

    /// Normalized column header, e.g. `main workers - total - persons`.
    pub fn column_name(&self) -> String {
        format!(
            "{} workers - {} - {}",
            self.class.label(),
            self.area.label(),
            self.sex.label()
        )
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column_name())
    }
}

/// Persons / males / females for one area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SexCounts {
    pub persons: u64,
    pub males: u64,
    pub females: u64,
}

impl SexCounts {
    fn slot(&mut self, sex: Sex) -> &mut u64 {
        match sex {
            Sex::Persons => &mut self.persons,
            Sex::Males => &mut self.males,
            Sex::Females => &mut self.females,
        }
    }

    #[cfg(test)]
    fn value(&self, sex: Sex) -> u64 {
        match sex {
            Sex::Persons => self.persons,
            Sex::Males => self.males,
            Sex::Females => self.females,
        }
    }
}

/// Total / rural / urban counts for one worker class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerCounts {
    pub total: SexCounts,
    pub rural: SexCounts,
    pub urban: SexCounts,
}

impl WorkerCounts {
    fn area_mut(&mut self, area: Area) -> &mut SexCounts {
        match area {
            Area::Total => &mut self.total,
            Area::Rural => &mut self.rural,
            Area::Urban => &mut self.urban,
        }
    }

    #[cfg(test)]
    fn area(&self, area: Area) -> &SexCounts {
        match area {
            Area::Total => &self.total,
            Area::Rural => &self.rural,
            Area::Urban => &self.urban,
        }
    }
}

// ---------------------------------------------------------------------------
// WorkforceRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single row: one (state, district, industry) combination with its counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkforceRecord {
    /// State / province name.
    pub region: String,
    pub district: String,
    /// NIC industry name.
    pub category: String,
    pub main: WorkerCounts,
    pub marginal: WorkerCounts,
}

impl WorkforceRecord {
    pub fn new(
        region: impl Into<String>,
        district: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            district: district.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    fn class_mut(&mut self, class: WorkerClass) -> &mut WorkerCounts {
        match class {
            WorkerClass::Main => &mut self.main,
            WorkerClass::Marginal => &mut self.marginal,
        }
    }

    /// Store a count into the field addressed by `measure`.
    pub fn set(&mut self, measure: Measure, value: u64) {
        *self
            .class_mut(measure.class)
            .area_mut(measure.area)
            .slot(measure.sex) = value;
    }

    /// Builder-style variant of [`WorkforceRecord::set`].
    #[cfg(test)]
    pub fn with(mut self, measure: Measure, value: u64) -> Self {
        self.set(measure, value);
        self
    }

    #[cfg(test)]
    pub fn get(&self, measure: Measure) -> u64 {
        let counts = match measure.class {
            WorkerClass::Main => &self.main,
            WorkerClass::Marginal => &self.marginal,
        };
        counts.area(measure.area).value(measure.sex)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed key indices.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<WorkforceRecord>,
    regions: BTreeSet<String>,
    categories: BTreeSet<String>,
}

impl Dataset {
    /// Build key indices from the loaded records.
    pub fn from_records(records: Vec<WorkforceRecord>) -> Self {
        let mut regions = BTreeSet::new();
        let mut categories = BTreeSet::new();
        for rec in &records {
            regions.insert(rec.region.clone());
            categories.insert(rec.category.clone());
        }
        Dataset {
            records,
            regions,
            categories,
        }
    }

    pub fn records(&self) -> &[WorkforceRecord] {
        &self.records
    }

    /// Sorted set of distinct state names.
    pub fn distinct_regions(&self) -> &BTreeSet<String> {
        &self.regions
    }

    /// Sorted set of distinct NIC industry names.
    pub fn distinct_categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
