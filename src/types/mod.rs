// Shared domain types used by the backend engine, the query-view engine,
// and persistence. None of those layers depends on another for its types.

pub mod criteria;
pub mod record;
pub mod reference;
pub mod snapshot;
pub mod sort;

pub use criteria::*;
pub use record::*;
pub use reference::*;
pub use snapshot::*;
pub use sort::*;
