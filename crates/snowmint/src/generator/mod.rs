mod node;
mod status;

pub use node::*;
pub use status::*;
