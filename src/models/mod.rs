pub mod catalog;
pub mod filter_state;
pub mod loaders;
pub mod record;
pub mod route;

pub use catalog::Catalog;
pub use filter_state::{FilterState, RouteScope, ALL_PROVIDERS};
pub use loaders::{load_catalog, load_catalog_dir};
pub use record::{Category, Course, Enrollment, Exam, Filterable, PracticeTest, Subscriber};
pub use route::RouteParams;
