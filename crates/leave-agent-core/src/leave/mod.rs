//! Leave data service
//!
//! A read-only view over employee leave records and the two lookups the
//! agent exposes as tools. Storage sits behind [`LeaveRepository`] so the
//! service can be backed by the in-memory table or anything else.

mod repository;
mod service;

pub use repository::{EmployeeRecord, InMemoryLeaveRepository, LeaveRepository};
pub use service::{
    LeaveService, ALL_EMPLOYEES, LEAVES_TAKEN_TOOL, LEAVE_BALANCE_TOOL, NOT_FOUND_REASON,
};
