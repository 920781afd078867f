//! CSV catalogs for the registration form: the activities on offer and the
//! shirt colors each design comes in.

mod loader;

pub use loader::{
    ActivityRecord, CatalogLoadError, CatalogLoader, ShirtColorRecord, default_definition,
};
