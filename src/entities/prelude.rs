pub use super::inventory::Entity as Inventory;
pub use super::offices::Entity as Offices;
pub use super::users::Entity as Users;
