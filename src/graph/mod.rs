//! Graph construction and representation
//!
//! This module validates adjacency input and stores it in a compact form
//! for transition-matrix construction.

pub mod builder;
pub mod csr;
