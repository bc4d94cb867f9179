pub mod credentials;
pub mod passwords;
pub mod tokens;

pub use tokens::{Claims, TokenService};
