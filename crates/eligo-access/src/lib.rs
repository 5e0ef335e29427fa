//! # eligo-access
//!
//! Role-based, deny-by-default access control for the Eligo pipeline.
//!
//! ## Overview
//!
//! This crate provides [`RoleMatrix`], which implements the
//! [`AccessPolicy`](eligo_core::traits::AccessPolicy) trait. Each role
//! carries an explicit allow-list of actions; every action not listed is
//! denied. There are four roles (`admin`, `staff`, `manager`, `user`) and
//! six actions (`view`, `create`, `update`, `delete`, `export`, `print`).
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use eligo_access::RoleMatrix;
//! use eligo_core::traits::AccessPolicy;
//!
//! let matrix = RoleMatrix::standard();
//! // Or load a deployment-specific matrix:
//! // let matrix = RoleMatrix::from_file(Path::new("config/access.toml"))?;
//! ```
//!
//! The matrix itself is pure: services that consult it audit denied
//! attempts at the point of the attempt.

pub mod matrix;

pub use matrix::RoleMatrix;

// ── Tests ────────────────────────────────────────────────────────────────────
