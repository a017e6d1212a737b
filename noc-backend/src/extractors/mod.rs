// src/extractors/mod.rs
pub mod id;

pub use id::IdPath;
