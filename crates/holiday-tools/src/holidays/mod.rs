//! Public-holiday lookup against the Calendarific API.
//!
//! [`HolidayLookup`] does the work and never fails as a Rust error: every
//! problem is folded into the text handed to the model.
//! [`GetHolidaysTool`] exposes it to a model runtime.

mod api;
mod error;
mod listing;
mod lookup;
mod query;
mod tool;

pub use api::{CalendarificClient, HolidayApi};
pub use error::{FetchError, LookupError};
pub use listing::{HolidayListing, HolidayRecord};
pub use lookup::HolidayLookup;
pub use query::HolidayQuery;
pub use tool::{GetHolidaysTool, TOOL_NAME};

use crate::registry::ToolRegistry;
use std::sync::Arc;

pub fn register_all(registry: &mut ToolRegistry, lookup: Arc<HolidayLookup>) {
    registry.register(Arc::new(GetHolidaysTool::new(lookup))).ok();
}

pub fn create_default_registry(lookup: Arc<HolidayLookup>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_all(&mut registry, lookup);
    registry
}
