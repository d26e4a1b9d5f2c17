pub mod inventory;
pub mod office;
pub mod user;
