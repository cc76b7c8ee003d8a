//! Stratum Core Types and Definitions
//!
//! This crate provides the foundational types shared by every stage of the
//! Stratum pipeline. It includes:
//!
//! - **Geometry**: 3D points and bounding boxes ([`geometry`] module)
//! - **Graph**: The typed diagram graph produced by the parser ([`graph`] module)
//! - **Mesh**: Indexed triangle geometry and polygon triangulation ([`mesh`] module)

pub mod geometry;
pub mod graph;
pub mod mesh;
