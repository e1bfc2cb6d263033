use crate::model::{CategoryMap, Department, Regulation, RegulationCategorySnapshot, SemesterMap};

/// Which visualization the dashboard is showing. Switching modes never
/// touches fetched data; both views are fed by the same slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Chart,
    Table,
}

/// A fetch the state machine wants issued, stamped with the generation of
/// the slot it will fill. Completions carrying an older stamp are discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    SemesterData {
        department: Department,
        regulation: Regulation,
        generation: u64,
    },
    CategoryData {
        department: Department,
        regulation: Regulation,
        generation: u64,
    },
    AllRegulationsCategoryData {
        department: Department,
        generation: u64,
    },
}

/// A completed fetch, successful or degraded to the empty form, carrying the
/// generation of the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    SemesterData {
        data: SemesterMap,
        generation: u64,
    },
    CategoryData {
        data: CategoryMap,
        generation: u64,
    },
    AllRegulationsCategoryData {
        data: RegulationCategorySnapshot,
        generation: u64,
    },
}

/// The dashboard's whole mutable state: current selections plus the three
/// fetched data slots. Transitions return the fetches they require instead
/// of issuing them, so the triggering rules are testable without any
/// transport.
///
/// Every slot carries a generation counter, bumped each time a transition
/// schedules (or invalidates) a fetch for it. [`DashboardState::apply`]
/// drops outcomes whose stamp no longer matches, so a slow response for a
/// superseded selection can never overwrite fresher data.
#[derive(Debug)]
pub struct DashboardState {
    pub department: Option<Department>,
    pub regulation: Regulation,
    pub view_mode: ViewMode,
    pub semester_data: SemesterMap,
    pub category_data: CategoryMap,
    pub all_regulations_data: RegulationCategorySnapshot,
    semester_generation: u64,
    category_generation: u64,
    all_regulations_generation: u64,
}

impl DashboardState {
    pub fn new(default_regulation: Regulation) -> Self {
        Self {
            department: None,
            regulation: default_regulation,
            view_mode: ViewMode::Chart,
            semester_data: SemesterMap::default(),
            category_data: CategoryMap::default(),
            all_regulations_data: RegulationCategorySnapshot::default(),
            semester_generation: 0,
            category_generation: 0,
            all_regulations_generation: 0,
        }
    }

    /// Select (or clear) the department. Clearing empties every fetched slot
    /// and requests nothing; selecting requests the all-regulations snapshot
    /// plus the per-regulation semester and category data.
    pub fn select_department(&mut self, department: Option<Department>) -> Vec<FetchRequest> {
        self.department = department;

        let Some(department) = self.department.clone() else {
            // Bumping the generations here also invalidates any fetch still
            // in flight for the previous department.
            self.semester_generation += 1;
            self.category_generation += 1;
            self.all_regulations_generation += 1;
            self.semester_data = SemesterMap::default();
            self.category_data = CategoryMap::default();
            self.all_regulations_data = RegulationCategorySnapshot::default();
            return Vec::new();
        };

        self.all_regulations_generation += 1;
        let mut requests = vec![FetchRequest::AllRegulationsCategoryData {
            department: department.clone(),
            generation: self.all_regulations_generation,
        }];
        requests.extend(self.per_regulation_requests(department));
        requests
    }

    /// Select a regulation. Re-requests the per-regulation data when a
    /// department is selected; the all-regulations snapshot is department
    /// scoped and is never re-requested here.
    pub fn select_regulation(&mut self, regulation: Regulation) -> Vec<FetchRequest> {
        self.regulation = regulation;
        match self.department.clone() {
            Some(department) => self.per_regulation_requests(department),
            None => Vec::new(),
        }
    }

    /// Switch between chart and table. Pure: no fetches, slots untouched.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// Apply a fetch completion. Returns false when the outcome is stale
    /// (its slot has moved on to a newer generation) and was discarded.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::SemesterData { data, generation } => {
                if generation != self.semester_generation {
                    return false;
                }
                self.semester_data = data;
            }
            FetchOutcome::CategoryData { data, generation } => {
                if generation != self.category_generation {
                    return false;
                }
                self.category_data = data;
            }
            FetchOutcome::AllRegulationsCategoryData { data, generation } => {
                if generation != self.all_regulations_generation {
                    return false;
                }
                self.all_regulations_data = data;
            }
        }
        true
    }

    fn per_regulation_requests(&mut self, department: Department) -> Vec<FetchRequest> {
        self.category_generation += 1;
        self.semester_generation += 1;
        vec![
            FetchRequest::CategoryData {
                department: department.clone(),
                regulation: self.regulation.clone(),
                generation: self.category_generation,
            },
            FetchRequest::SemesterData {
                department,
                regulation: self.regulation.clone(),
                generation: self.semester_generation,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CourseRecord;

    fn department(name: &str) -> Department {
        Department {
            id: 1,
            name: name.to_string(),
        }
    }

    fn regulation(code: &str) -> Regulation {
        Regulation(code.to_string())
    }

    fn one_course_category_map() -> CategoryMap {
        let mut map = CategoryMap::default();
        map.0.insert(
            "PCC".to_string(),
            vec![CourseRecord(serde_json::json!({"code": "CS201"}))],
        );
        map
    }

    #[test]
    fn starts_with_no_department_chart_mode() {
        let state = DashboardState::new(regulation("R21"));
        assert!(state.department.is_none());
        assert_eq!(state.regulation.as_str(), "R21");
        assert_eq!(state.view_mode, ViewMode::Chart);
    }

    #[test]
    fn selecting_a_department_requests_all_three_fetches() {
        let mut state = DashboardState::new(regulation("R21"));
        let requests = state.select_department(Some(department("ECE")));

        assert_eq!(requests.len(), 3);
        assert!(matches!(
            &requests[0],
            FetchRequest::AllRegulationsCategoryData { department, .. }
                if department.name == "ECE"
        ));
        assert!(matches!(
            &requests[1],
            FetchRequest::CategoryData { regulation, .. } if regulation.as_str() == "R21"
        ));
        assert!(matches!(
            &requests[2],
            FetchRequest::SemesterData { regulation, .. } if regulation.as_str() == "R21"
        ));
    }

    #[test]
    fn selecting_a_regulation_never_refetches_the_snapshot() {
        let mut state = DashboardState::new(regulation("R21"));
        state.select_department(Some(department("CSE")));

        let requests = state.select_regulation(regulation("R24"));
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|request| !matches!(
            request,
            FetchRequest::AllRegulationsCategoryData { .. }
        )));
        assert!(requests.iter().all(|request| match request {
            FetchRequest::CategoryData { regulation, .. }
            | FetchRequest::SemesterData { regulation, .. } => regulation.as_str() == "R24",
            FetchRequest::AllRegulationsCategoryData { .. } => false,
        }));
    }

    #[test]
    fn selecting_a_regulation_without_department_requests_nothing() {
        let mut state = DashboardState::new(regulation("R21"));
        let requests = state.select_regulation(regulation("R22"));
        assert!(requests.is_empty());
        assert_eq!(state.regulation.as_str(), "R22");
    }

    #[test]
    fn clearing_the_department_empties_slots_without_fetching() {
        let mut state = DashboardState::new(regulation("R21"));
        let requests = state.select_department(Some(department("CSE")));
        for request in requests {
            let applied = match request {
                FetchRequest::CategoryData { generation, .. } => state.apply(
                    FetchOutcome::CategoryData {
                        data: one_course_category_map(),
                        generation,
                    },
                ),
                FetchRequest::SemesterData { generation, .. } => {
                    let mut data = SemesterMap::default();
                    data.0.insert(
                        "1".to_string(),
                        vec![CourseRecord(serde_json::json!({"code": "MA101"}))],
                    );
                    state.apply(FetchOutcome::SemesterData { data, generation })
                }
                FetchRequest::AllRegulationsCategoryData { generation, .. } => {
                    let mut data = RegulationCategorySnapshot::default();
                    data.0.insert("R21".to_string(), one_course_category_map());
                    state.apply(FetchOutcome::AllRegulationsCategoryData { data, generation })
                }
            };
            assert!(applied);
        }
        assert!(!state.category_data.0.is_empty());

        let requests = state.select_department(None);
        assert!(requests.is_empty());
        assert!(state.semester_data.0.is_empty());
        assert!(state.category_data.0.is_empty());
        assert!(state.all_regulations_data.0.is_empty());
    }

    #[test]
    fn toggling_view_mode_preserves_fetched_data() {
        let mut state = DashboardState::new(regulation("R21"));
        let generation = match &state.select_department(Some(department("IT")))[1] {
            FetchRequest::CategoryData { generation, .. } => *generation,
            other => panic!("unexpected request {other:?}"),
        };
        state.apply(FetchOutcome::CategoryData {
            data: one_course_category_map(),
            generation,
        });

        state.set_view_mode(ViewMode::Table);
        state.set_view_mode(ViewMode::Chart);
        assert_eq!(state.category_data, one_course_category_map());
    }

    #[test]
    fn stale_outcome_is_discarded_current_is_applied() {
        let mut state = DashboardState::new(regulation("R21"));
        let stale_generation = match &state.select_department(Some(department("CSE")))[1] {
            FetchRequest::CategoryData { generation, .. } => *generation,
            other => panic!("unexpected request {other:?}"),
        };
        // The user immediately switches regulations; the first category
        // fetch is now superseded.
        let current_generation = match &state.select_regulation(regulation("R22"))[0] {
            FetchRequest::CategoryData { generation, .. } => *generation,
            other => panic!("unexpected request {other:?}"),
        };

        assert!(!state.apply(FetchOutcome::CategoryData {
            data: one_course_category_map(),
            generation: stale_generation,
        }));
        assert!(state.category_data.0.is_empty());

        assert!(state.apply(FetchOutcome::CategoryData {
            data: one_course_category_map(),
            generation: current_generation,
        }));
        assert_eq!(state.category_data, one_course_category_map());
    }

    #[test]
    fn clearing_invalidates_in_flight_fetches() {
        let mut state = DashboardState::new(regulation("R21"));
        let generation = match &state.select_department(Some(department("CSE")))[0] {
            FetchRequest::AllRegulationsCategoryData { generation, .. } => *generation,
            other => panic!("unexpected request {other:?}"),
        };

        state.select_department(None);

        let mut data = RegulationCategorySnapshot::default();
        data.0.insert("R21".to_string(), one_course_category_map());
        assert!(!state.apply(FetchOutcome::AllRegulationsCategoryData { data, generation }));
        assert!(state.all_regulations_data.0.is_empty());
    }
}
