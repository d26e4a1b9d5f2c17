pub mod prelude;

pub mod inventory;
pub mod offices;
pub mod users;
