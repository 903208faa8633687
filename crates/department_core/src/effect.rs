use crate::{DepartmentFilter, DepartmentId, Pagination, RequestId};

/// Work the driver must perform on behalf of the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// List one page. The answer comes back as `Msg::PageLoaded` with the same id.
    FetchPage {
        request_id: RequestId,
        filter: DepartmentFilter,
        pagination: Pagination,
    },
    /// Remove a department. The answer comes back as `Msg::DeleteSettled`.
    DeleteDepartment {
        request_id: RequestId,
        id: DepartmentId,
    },
    NavigateToDepartment { id: DepartmentId },
}
