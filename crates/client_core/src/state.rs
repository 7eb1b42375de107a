use shared::domain::{Vehicle, VehicleFilter};

/// Observable state of the registry screen, published on every mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    /// Everything loaded since the last fresh search, in server order.
    pub results: Vec<Vehicle>,
    /// Rows of the most recent page response.
    pub last_page: Vec<Vehicle>,
    pub is_loading: bool,
    /// Server-reported number of matching rows.
    pub total_count: usize,
    pub search_text: String,
    pub filter: VehicleFilter,
}

impl ListState {
    pub fn can_fetch_more(&self) -> bool {
        !self.last_page.is_empty() && self.results.len() < self.total_count
    }

    pub(crate) fn reset_results(&mut self) {
        self.results.clear();
        self.last_page.clear();
        self.total_count = 0;
    }
}
