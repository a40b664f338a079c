// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Service info, health and token acquisition. Anything here must validate
// its own input; there is no identity to lean on.
pub mod auth;
pub mod root;

pub use auth::{login_post, register_post};
pub use root::{health, root};
