//! Authentication adapters.
//!
//! - `StaticSessionValidator` - Fixed token table, from config or built in tests

mod static_tokens;

pub use static_tokens::StaticSessionValidator;
