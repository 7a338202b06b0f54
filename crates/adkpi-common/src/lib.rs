//! Shared utilities for the adkpi workspace.
//!
//! This crate provides Polars `AnyValue` helpers used at the boundary between
//! polars-based loaders and the tagged [`CellValue`](adkpi_model::CellValue) model.

pub mod polars;

pub use polars::{any_to_cell, any_to_string, format_numeric};
