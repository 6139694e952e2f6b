//! Employee record storage

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Leave record of a single employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: u32,
    pub name: String,
    /// Remaining leave days
    pub leave_balance: u32,
    /// Dates (YYYY-MM-DD) on which leave was taken
    pub leaves_taken: Vec<String>,
}

impl EmployeeRecord {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        leave_balance: u32,
        leaves_taken: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            leave_balance,
            leaves_taken: leaves_taken.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read-only access to employee leave records
pub trait LeaveRepository: Send + Sync {
    /// Look up one employee
    fn find(&self, id: u32) -> Option<EmployeeRecord>;

    /// Every employee, ordered by id
    fn all(&self) -> Vec<EmployeeRecord>;
}

/// Fixed in-memory employee table
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaveRepository {
    employees: BTreeMap<u32, EmployeeRecord>,
}

impl InMemoryLeaveRepository {
    pub fn new(records: impl IntoIterator<Item = EmployeeRecord>) -> Self {
        Self {
            employees: records.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    /// The demo table the leave server ships with
    pub fn demo() -> Self {
        Self::new([
            EmployeeRecord::new(1001, "Alice Smith", 15, ["2025-01-01", "2025-02-14"]),
            EmployeeRecord::new(1002, "Bob Johnson", 10, ["2025-01-04"]),
            EmployeeRecord::new(1003, "Charlie Brown", 20, ["2025-04-01", "2025-05-05"]),
        ])
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl LeaveRepository for InMemoryLeaveRepository {
    fn find(&self, id: u32) -> Option<EmployeeRecord> {
        self.employees.get(&id).cloned()
    }

    fn all(&self) -> Vec<EmployeeRecord> {
        self.employees.values().cloned().collect()
    }
}
