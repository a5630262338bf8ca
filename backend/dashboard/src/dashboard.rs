use tracing::{error, info, warn};

use crate::{
    error::LoadError,
    filter::{Criteria, PAGE_SIZE, category_options, filter_records, page_slice, total_pages},
    gateway::GatewayClient,
    record::{RawRecord, Record, normalize},
};

/// The gateway never sends more; anything past this is dropped.
pub const MAX_RECORDS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
}

/// Single owner of everything the dashboard shows.
///
/// Mutations go through the transition methods; each one that touches the
/// category, the search term or the source list ends in [`Dashboard::recompute`],
/// so the filtered list and page index are never stale.
#[derive(Debug)]
pub struct Dashboard {
    phase: Phase,
    source: Vec<Record>,
    filtered: Vec<Record>,
    criteria: Criteria,
    page: usize,
    dropdown_open: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            source: Vec::new(),
            filtered: Vec::new(),
            criteria: Criteria::default(),
            page: 1,
            dropdown_open: false,
        }
    }

    /// Runs once. Failures are logged and leave the table empty.
    pub async fn load(&mut self, gateway: &GatewayClient) {
        if self.phase == Phase::Loaded {
            warn!("Ads already loaded, ignoring");
            return;
        }

        let result = gateway.fetch_all_ads().await;
        self.finish_load(result);
    }

    pub(crate) fn finish_load(&mut self, result: Result<Vec<RawRecord>, LoadError>) {
        match result {
            Ok(mut rows) => {
                rows.truncate(MAX_RECORDS);
                self.source = normalize(rows);

                info!(count = self.source.len(), "Fetch of latest ads just completed");
            }
            Err(e) => error!("Error fetching ads: {e}"),
        }

        self.phase = Phase::Loaded;
        self.recompute();
    }

    // Trigger set: category, search term, source list.
    fn recompute(&mut self) {
        self.filtered = filter_records(&self.source, &self.criteria);
        self.page = 1;
    }

    pub fn select_category(&mut self, category: &str) {
        self.dropdown_open = false;
        self.page = 1;

        if self.criteria.category != category {
            self.criteria.category = category.to_string();
            self.recompute();
        }
    }

    pub fn set_search_term(&mut self, term: &str) {
        if self.criteria.search_term != term {
            self.criteria.search_term = term.to_string();
            self.recompute();
        }
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    pub fn previous_page(&mut self) {
        if self.has_previous() {
            self.page -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn source(&self) -> &[Record] {
        &self.source
    }

    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), PAGE_SIZE)
    }

    pub fn page_records(&self) -> &[Record] {
        page_slice(&self.filtered, self.page, PAGE_SIZE)
    }

    pub fn category_options(&self) -> Vec<String> {
        category_options(&self.source)
    }
}
