pub mod behavior;
pub mod builder;
pub mod description;
pub mod edge;
pub mod graph;
pub mod node;
pub mod ports;

pub use behavior::*;
pub use builder::*;
pub use description::*;
pub use edge::*;
pub use graph::*;
pub use node::*;
pub use ports::*;
