//! Core types, the import graph, and contract file loading for strata.
//!
//! This crate provides the foundational data structures used across all strata crates:
//! - [`types`]: Modules, import paths, and configuration errors
//! - [`graph`]: The [`DependencyGraph`](graph::DependencyGraph) built from import paths
//! - [`config`]: Contract file loading from `layers.yml`

pub mod config;
pub mod graph;
pub mod types;
