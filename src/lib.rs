pub mod analyzers;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod paginate;
pub mod record;
pub mod registry;

pub use error::{BikeshareError, Result};
pub use filter::{DayFilter, FilterSpec, MonthFilter, filter};
pub use loader::load;
pub use paginate::{PAGE_SIZE, next_page};
pub use record::{Table, TripRecord};
pub use registry::{City, DatasetRegistry};
