mod base64;
mod json;
mod layout;
mod snowflake;

pub use layout::*;
pub use snowflake::*;
