//! Database entities.

pub mod activity_log;
pub mod campaign;
pub mod charity;
pub mod donation;
pub mod entity_ref;
pub mod report;
pub mod user;

pub use activity_log::Entity as ActivityLog;
pub use campaign::Entity as Campaign;
pub use charity::Entity as Charity;
pub use donation::Entity as Donation;
pub use entity_ref::EntityRef;
pub use report::Entity as Report;
pub use user::Entity as User;
