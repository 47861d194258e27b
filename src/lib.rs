pub mod cache;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod fingerprint;
pub mod fuzzy;
pub mod graph;
pub mod lexmap;
pub mod memo;
pub mod resolution;
pub mod symbols;
pub mod types;
