pub mod date_key;
pub mod date_range;
pub mod holiday;
pub mod persistence;
pub mod settings;

pub use date_key::{date_key, from_key, ordinal_key};
pub use date_range::DateRange;
pub use holiday::{Holiday, HolidayData, HolidayScope};
pub use persistence::Persistable;
pub use settings::PlannerSettings;
