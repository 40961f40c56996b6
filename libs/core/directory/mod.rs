pub mod filter;
pub mod query;
pub mod role;

pub use filter::{available_categories, Category, FilterAction, FilterState};
pub use query::{merge_by_id, DirectoryQuery};
pub use role::{resolve_role, Role};
