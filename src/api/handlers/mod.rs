pub mod items;
pub mod system;

pub use items::*;
pub use system::*;

use crate::auth::jwt::TokenService;
use crate::db::repository::{ItemRepository, UserRepository};
use std::sync::Arc;

/// Shared application state for handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<UserRepository>,
    pub item_repo: Arc<ItemRepository>,
    pub tokens: Arc<TokenService>,
}
