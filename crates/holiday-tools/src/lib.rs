pub mod error;
pub mod executor;
pub mod holidays;
pub mod registry;
pub mod traits;

pub use error::{Result, ToolError};
pub use executor::ToolExecutor;
pub use holidays::{
    create_default_registry, register_all, CalendarificClient, FetchError, GetHolidaysTool,
    HolidayApi, HolidayListing, HolidayLookup, HolidayQuery, HolidayRecord, LookupError,
};
pub use registry::ToolRegistry;
pub use traits::{Tool, ToolOutput};

pub mod prelude {
    pub use crate::error::{Result, ToolError};
    pub use crate::executor::ToolExecutor;
    pub use crate::holidays::{
        create_default_registry, GetHolidaysTool, HolidayApi, HolidayListing, HolidayLookup,
        LookupError,
    };
    pub use crate::registry::ToolRegistry;
    pub use crate::traits::{Tool, ToolOutput};
}
