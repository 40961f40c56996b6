pub mod booking;
pub mod business;
pub mod identity;
pub mod task;

pub use booking::BookingRequest;
pub use business::{BusinessId, BusinessRecord, BusinessStatus, BusinessUpdate, ContactInfo};
pub use identity::{AuthBox, AuthProvider, Identity, StaticAuth};
pub use task::{TaskId, TaskRecord, TaskStatus, TaskUpdate};
