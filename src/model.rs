use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::taxonomy::CategoryCode;

/// An academic department as configured for the deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u32,
    pub name: String,
}

/// A curriculum regulation code (e.g. "R21"). The set of valid codes and
/// their chronological display order come from configuration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Regulation(pub String);

impl Regulation {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Regulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A course as delivered by the backend. The dashboard only counts courses,
/// so the payload stays an opaque JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseRecord(pub serde_json::Value);

/// Category-keyed course lists for one (department, regulation) pair.
///
/// Keys are kept as wire strings: the backend may send labels outside the
/// eight-code taxonomy, and those must survive deserialization while staying
/// invisible to aggregation. A missing key reads as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap(pub BTreeMap<String, Vec<CourseRecord>>);

impl CategoryMap {
    pub fn count(&self, code: CategoryCode) -> usize {
        self.0.get(code.as_str()).map_or(0, Vec::len)
    }

    pub fn courses(&self, code: CategoryCode) -> &[CourseRecord] {
        self.0.get(code.as_str()).map_or(&[], Vec::as_slice)
    }
}

/// Semester-keyed course lists for the table view, for one
/// (department, regulation) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemesterMap(pub BTreeMap<String, Vec<CourseRecord>>);

impl SemesterMap {
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

/// Category data for every regulation of one department, as returned by the
/// all-regulations endpoint. Keyed by regulation code string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegulationCategorySnapshot(pub BTreeMap<String, CategoryMap>);

impl RegulationCategorySnapshot {
    pub fn get(&self, regulation: &Regulation) -> Option<&CategoryMap> {
        self.0.get(regulation.as_str())
    }
}

/// Category percentage distribution, index-aligned to
/// [`crate::taxonomy::CATEGORY_ORDER`]. All zeros means "no data".
pub type PercentageVector = [f64; 8];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_category_key_counts_as_empty() {
        let map = CategoryMap::default();
        assert_eq!(map.count(CategoryCode::Pcc), 0);
        assert!(map.courses(CategoryCode::Pcc).is_empty());
    }

    #[test]
    fn category_map_deserializes_with_unknown_keys() {
        let map: CategoryMap =
            serde_json::from_str(r#"{"PCC":[{"code":"CS101"}],"LAB":[{},{}]}"#)
                .expect("valid payload");
        assert_eq!(map.count(CategoryCode::Pcc), 1);
        assert_eq!(map.0.get("LAB").map(Vec::len), Some(2));
    }

    #[test]
    fn snapshot_deserializes_nested_category_maps() {
        let snapshot: RegulationCategorySnapshot = serde_json::from_str(
            r#"{"R21":{"BSC":[{"code":"MA101"}]},"R22":{}}"#,
        )
        .expect("valid payload");
        let r21 = snapshot.get(&Regulation("R21".into())).expect("R21 present");
        assert_eq!(r21.count(CategoryCode::Bsc), 1);
        assert!(snapshot.get(&Regulation("R24".into())).is_none());
    }
}
