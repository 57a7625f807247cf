pub mod api;
pub mod config;
pub mod corpus;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod model;
pub mod optimizer;
pub mod placement;
pub mod scorer;
// cmd and reports belong to the binary (main.rs).
