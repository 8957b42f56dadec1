pub mod common;
pub mod a001_branch;
pub mod a002_warehouse;
