pub mod cookies;
pub(crate) mod extractors;
pub mod token;

pub use token::SessionToken;
