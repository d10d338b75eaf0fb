pub mod map_generation_service;

pub use map_generation_service::*;
