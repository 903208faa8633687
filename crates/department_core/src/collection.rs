use crate::{
    Department, DepartmentFilter, DepartmentId, DepartmentPage, Effect, FetchFailure, Pagination,
    RequestId,
};

/// Fixed number of departments per page.
pub const PAGE_SIZE: u32 = 12;

/// Result of feeding a listing response into the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageOutcome {
    /// Response belonged to a superseded request and was dropped.
    Stale,
    Applied,
    /// The current page no longer exists; the page was clamped and must be fetched again.
    Clamped,
}

/// What is rendered: the current query, page and the items of that page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Collection {
    effective_query: String,
    page: u32,
    total_pages: u32,
    items: Vec<Department>,
    loading: bool,
    error: Option<String>,
    latest_request: Option<RequestId>,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            effective_query: String::new(),
            page: 1,
            total_pages: 0,
            items: Vec::new(),
            loading: false,
            error: None,
            latest_request: None,
        }
    }
}

impl Collection {
    pub(crate) fn effective_query(&self) -> &str {
        &self.effective_query
    }

    pub(crate) fn page(&self) -> u32 {
        self.page
    }

    pub(crate) fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub(crate) fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }

    pub(crate) fn items(&self) -> &[Department] {
        &self.items
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn find(&self, id: DepartmentId) -> Option<&Department> {
        self.items.iter().find(|department| department.id == id)
    }

    /// A committed search always starts again from the first page.
    pub(crate) fn commit_query(&mut self, query: String) {
        self.effective_query = query;
        self.page = 1;
    }

    /// Moves to `page` if it exists and differs from the current one.
    pub(crate) fn select_page(&mut self, page: u32) -> bool {
        if page == 0 || page > self.last_page() || page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub(crate) fn begin_fetch(&mut self, request_id: RequestId) -> Effect {
        self.loading = true;
        self.error = None;
        self.latest_request = Some(request_id);

        let name = if self.effective_query.is_empty() {
            None
        } else {
            Some(self.effective_query.clone())
        };
        Effect::FetchPage {
            request_id,
            filter: DepartmentFilter { name },
            pagination: Pagination {
                page: self.page - 1,
                size: PAGE_SIZE,
            },
        }
    }

    pub(crate) fn apply(
        &mut self,
        request_id: RequestId,
        result: Result<DepartmentPage, FetchFailure>,
    ) -> PageOutcome {
        if self.latest_request != Some(request_id) {
            return PageOutcome::Stale;
        }
        self.latest_request = None;
        self.loading = false;

        match result {
            Ok(page) => {
                self.error = None;
                self.total_pages = page.page_count.unwrap_or(0);
                if self.page > self.last_page() {
                    // Keep the old items visible while the clamped page loads.
                    self.page = self.last_page();
                    return PageOutcome::Clamped;
                }
                self.items = page.query_result.unwrap_or_default();
                PageOutcome::Applied
            }
            Err(failure) => {
                self.error = Some(failure.message);
                PageOutcome::Applied
            }
        }
    }

    /// Forgets the in-flight request so its response is dropped on arrival.
    pub(crate) fn abandon_request(&mut self) {
        self.latest_request = None;
        self.loading = false;
    }
}
