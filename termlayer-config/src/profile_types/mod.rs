//! Profile records and the collection they are layered into.
//!
//! ## Sub-modules
//!
//! - [`dynamic`]: `LayerOrigin`, which records where a layer came from
//! - [`profile`]: `ProfileSettings`, the `ProfileDraft` → `Profile` lifecycle
//! - [`matchers`]: `ProfileCollection`, first-seen ordering and cross-layer matching

pub mod dynamic;
pub mod matchers;
pub mod profile;

pub use dynamic::LayerOrigin;
pub use matchers::ProfileCollection;
pub use profile::{Profile, ProfileDraft, ProfileId, ProfileSettings};
