//! Auth-domain models: request descriptors, scopes, secrets, issued tokens, and credentials.

pub mod credentials;
pub mod request;
pub mod scope;
pub mod secret;
pub mod token;

pub use credentials::*;
pub use request::*;
pub use scope::*;
pub use secret::*;
pub use token::*;
