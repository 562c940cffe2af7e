pub mod credential;
pub mod issuer;
pub mod schema;
pub mod util;
