pub mod catalog;
pub mod config;
pub mod document;
pub mod filter;
pub mod picker;
pub mod presets;
pub mod render;
pub mod selection;

pub use catalog::{Catalog, CatalogError};
pub use config::Config;
pub use document::{Document, Tag, TagFilter};
pub use filter::{FilterState, NameSort, final_documents};
pub use picker::{Endpoint, PickerState, RangePicker, Step};
pub use presets::{Preset, Presets};
pub use selection::{DateRange, DateSelection, Precision, parse_selection_token};
