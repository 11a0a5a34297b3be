// Matching dashboard: result list, pagination, selection and bulk generation.
// Remote calls go through api_client; this module only holds page state.

pub mod bulk;
pub mod page;
pub mod pagination;
pub mod selection;
pub mod sink;

pub use page::DashboardState;
