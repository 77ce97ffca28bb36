//! TRANSFAC datasource files.

pub mod matrix;

pub use matrix::{TransfacMatrixReader, TransfacMatrixRecord, MATRIX_SCHEMA};
