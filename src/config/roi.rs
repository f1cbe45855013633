//! Minimal ROI schedule

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time-based minimum ROI schedule.
///
/// Maps minutes-since-entry thresholds to the minimum profit ratio that
/// justifies a time-based exit. Serialized in the host's wire form, a JSON
/// map with stringified minute keys: `{"0": 0.10, "30": 0.05}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct RoiTable {
    entries: Vec<(u32, f64)>,
}

impl RoiTable {
    /// Build a schedule; entries are kept sorted by threshold
    pub fn new(mut entries: Vec<(u32, f64)>) -> Self {
        entries.sort_by_key(|(minutes, _)| *minutes);
        Self { entries }
    }

    /// Threshold/ratio pairs in ascending threshold order
    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    /// Check if the schedule has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Minimum acceptable profit ratio after `elapsed_minutes`: the entry
    /// with the greatest threshold not past the elapsed time
    pub fn target_for(&self, elapsed_minutes: u32) -> Option<f64> {
        self.entries
            .iter()
            .rev()
            .find(|(minutes, _)| *minutes <= elapsed_minutes)
            .map(|(_, ratio)| *ratio)
    }
}

impl TryFrom<BTreeMap<String, f64>> for RoiTable {
    type Error = String;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut entries = Vec::with_capacity(map.len());
        for (key, ratio) in map {
            let minutes: u32 = key
                .parse()
                .map_err(|_| format!("ROI threshold '{}' is not a minute count", key))?;
            entries.push((minutes, ratio));
        }
        Ok(Self::new(entries))
    }
}

impl From<RoiTable> for BTreeMap<String, f64> {
    fn from(table: RoiTable) -> Self {
        table
            .entries
            .into_iter()
            .map(|(minutes, ratio)| (minutes.to_string(), ratio))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_picks_greatest_passed_threshold() {
        let roi = RoiTable::new(vec![(0, 0.10), (30, 0.05), (60, 0.03), (120, 0.01)]);
        assert_eq!(roi.target_for(0), Some(0.10));
        assert_eq!(roi.target_for(29), Some(0.10));
        assert_eq!(roi.target_for(30), Some(0.05));
        assert_eq!(roi.target_for(90), Some(0.03));
        assert_eq!(roi.target_for(10_000), Some(0.01));
    }

    #[test]
    fn test_empty_schedule_has_no_target() {
        assert_eq!(RoiTable::default().target_for(60), None);
    }

    #[test]
    fn test_wire_form_round_trip() {
        let roi = RoiTable::new(vec![(30, 0.05), (0, 0.10)]);
        let json = serde_json::to_string(&roi).unwrap();
        assert_eq!(json, r#"{"0":0.1,"30":0.05}"#);

        let parsed: RoiTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, roi);
    }

    #[test]
    fn test_wire_form_rejects_bad_keys() {
        let result: Result<RoiTable, _> = serde_json::from_str(r#"{"abc":0.1}"#);
        assert!(result.is_err());
    }
}
