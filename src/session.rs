use tracing::{debug, warn};

use crate::fetch::DataFetcher;
use crate::model::{CategoryMap, Department, Regulation, RegulationCategorySnapshot, SemesterMap};
use crate::state::{DashboardState, FetchOutcome, FetchRequest, ViewMode};

/// One user's dashboard: the selection state machine plus the fetcher that
/// resolves its requests. A single logical actor; requests from one
/// transition are awaited in order, and the state's generation stamps keep
/// late completions from clobbering newer selections.
pub struct DashboardSession {
    pub state: DashboardState,
    fetcher: Box<dyn DataFetcher>,
}

impl DashboardSession {
    pub fn new(fetcher: Box<dyn DataFetcher>, default_regulation: Regulation) -> Self {
        Self {
            state: DashboardState::new(default_regulation),
            fetcher,
        }
    }

    pub async fn select_department(&mut self, department: Option<Department>) {
        let requests = self.state.select_department(department);
        self.resolve(requests).await;
    }

    pub async fn select_regulation(&mut self, regulation: Regulation) {
        let requests = self.state.select_regulation(regulation);
        self.resolve(requests).await;
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.state.set_view_mode(view_mode);
    }

    /// Resolve each request against the fetcher. A failed fetch degrades its
    /// slot to the empty form; the dashboard never dies on a bad backend.
    async fn resolve(&mut self, requests: Vec<FetchRequest>) {
        for request in requests {
            let outcome = match request {
                FetchRequest::SemesterData {
                    department,
                    regulation,
                    generation,
                } => {
                    let data = match self
                        .fetcher
                        .fetch_semester_data(&department, &regulation)
                        .await
                    {
                        Ok(data) => data,
                        Err(err) => {
                            warn!(
                                department = %department.name,
                                regulation = %regulation,
                                error = %err,
                                "semester fetch failed, showing empty data"
                            );
                            SemesterMap::default()
                        }
                    };
                    FetchOutcome::SemesterData { data, generation }
                }
                FetchRequest::CategoryData {
                    department,
                    regulation,
                    generation,
                } => {
                    let data = match self
                        .fetcher
                        .fetch_category_data(&department, &regulation)
                        .await
                    {
                        Ok(data) => data,
                        Err(err) => {
                            warn!(
                                department = %department.name,
                                regulation = %regulation,
                                error = %err,
                                "category fetch failed, showing empty data"
                            );
                            CategoryMap::default()
                        }
                    };
                    FetchOutcome::CategoryData { data, generation }
                }
                FetchRequest::AllRegulationsCategoryData {
                    department,
                    generation,
                } => {
                    let data = match self
                        .fetcher
                        .fetch_all_regulations_category_data(&department)
                        .await
                    {
                        Ok(data) => data,
                        Err(err) => {
                            warn!(
                                department = %department.name,
                                error = %err,
                                "all-regulations fetch failed, showing empty data"
                            );
                            RegulationCategorySnapshot::default()
                        }
                    };
                    FetchOutcome::AllRegulationsCategoryData { data, generation }
                }
            };

            if !self.state.apply(outcome) {
                debug!("discarded a stale fetch completion");
            }
        }
    }
}
