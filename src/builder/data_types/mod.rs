mod relation;
mod restriction;
mod route_node;
mod type_config;
mod way;

pub use relation::*;
pub use restriction::*;
pub use route_node::*;
pub use type_config::*;
pub use way::*;
