use crate::models::MonthKey;
use std::collections::BTreeMap;

/// Maps each month to the previous month's closing VWAP.
///
/// Built by shifting the monthly VWAP series forward by one position over the
/// chronologically ordered keys. The shift is positional, not calendar
/// arithmetic: if the input has a gap, month M inherits the value of the
/// month ordered immediately before it, whatever its calendar distance.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: BTreeMap<MonthKey, f64>,
}

impl ReferenceTable {
    pub fn shift_forward(monthly_vwap: &BTreeMap<MonthKey, f64>) -> Self {
        let mut entries = BTreeMap::new();
        // Pair each month with its predecessor's value; the earliest month
        // has no predecessor and therefore no entry.
        for (month, (_, value)) in monthly_vwap.keys().skip(1).zip(monthly_vwap.iter()) {
            entries.insert(*month, *value);
        }
        Self { entries }
    }

    pub fn get(&self, month: MonthKey) -> Option<f64> {
        self.entries.get(&month).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, f64)> + '_ {
        self.entries.iter().map(|(month, value)| (*month, *value))
    }
}

impl FromIterator<(MonthKey, f64)> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = (MonthKey, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
