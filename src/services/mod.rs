pub mod tokens;
pub use tokens::{Claims, TokenError, TokenIssuer, TokenKind};

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, Registration, TokenPair};
pub use auth_service_impl::SeaOrmAuthService;

pub mod inventory_service;
pub mod inventory_service_impl;
pub use inventory_service::{InventoryError, InventoryService, ItemInput};
pub use inventory_service_impl::SeaOrmInventoryService;
