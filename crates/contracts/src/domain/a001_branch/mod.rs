pub mod aggregate;

pub use aggregate::{Branch, BranchDto, BranchId};
