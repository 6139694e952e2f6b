//! Leave lookups exposed to the model as tools

use std::sync::Arc;

use serde_json::{json, Map, Value};

use super::repository::{EmployeeRecord, LeaveRepository};
use crate::types::ToolDescriptor;

pub const LEAVE_BALANCE_TOOL: &str = "get_employee_leave_balance";
pub const LEAVES_TAKEN_TOOL: &str = "get_employee_leaves_taken";

/// Employee id selecting every employee
pub const ALL_EMPLOYEES: &str = "all";

pub const NOT_FOUND_REASON: &str = "employee not found";

/// Leave lookups over a [`LeaveRepository`]
///
/// Every lookup answers with a `{"status": ...}` object; an unknown employee
/// is a normal `{"status": "error", "reason": "employee not found"}` payload,
/// not a failure.
#[derive(Clone)]
pub struct LeaveService {
    repository: Arc<dyn LeaveRepository>,
}

impl LeaveService {
    pub fn new(repository: Arc<dyn LeaveRepository>) -> Self {
        Self { repository }
    }

    /// Leave balance for one employee, or for everyone with `"all"`
    pub fn leave_balance(&self, employee_id: &str) -> Value {
        if employee_id.trim() == ALL_EMPLOYEES {
            let balances: Map<String, Value> = self
                .repository
                .all()
                .into_iter()
                .map(|r| (r.id.to_string(), json!(r.leave_balance)))
                .collect();
            return json!({ "status": "success", "leave_balances_all": balances });
        }

        match self.lookup(employee_id) {
            Some(employee) => json!({
                "status": "success",
                "leave_balance": employee.leave_balance,
            }),
            None => not_found(),
        }
    }

    /// Dates on which leave was taken, for one employee or everyone
    pub fn leaves_taken(&self, employee_id: &str) -> Value {
        if employee_id.trim() == ALL_EMPLOYEES {
            let taken: Map<String, Value> = self
                .repository
                .all()
                .into_iter()
                .map(|r| (r.id.to_string(), json!(r.leaves_taken)))
                .collect();
            return json!({ "status": "success", "leave_taken_all": taken });
        }

        match self.lookup(employee_id) {
            Some(employee) => json!({
                "status": "success",
                "leaves_taken": employee.leaves_taken,
            }),
            None => not_found(),
        }
    }

    /// Dispatch a tool call by name; `None` if the tool is not ours
    pub fn call(&self, tool: &str, arguments: &Map<String, Value>) -> Option<Value> {
        let employee_id = employee_id_argument(arguments);
        match tool {
            LEAVE_BALANCE_TOOL => Some(self.leave_balance(&employee_id)),
            LEAVES_TAKEN_TOOL => Some(self.leaves_taken(&employee_id)),
            _ => None,
        }
    }

    /// Descriptors of the tools this service answers
    pub fn tool_descriptors() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new(
                LEAVE_BALANCE_TOOL,
                "Gets the leave balance for an employee.\n\n\
                 Args:\n    employee_id: The ID of the employee or all to return balance for all employees.\n\n\
                 Returns:\n    A dictionary containing the employee's leave balance,\n    \
                 or an error message if the employee is not found.",
            )
            .with_schema(employee_id_schema()),
            ToolDescriptor::new(
                LEAVES_TAKEN_TOOL,
                "Gets the dates for which employee has taken the leaves\n\n\
                 Args:\n    employee_id: The ID of the employee or all to return leaves taken by all employees.\n\n\
                 Returns:\n    A dictionary containing an array of dates on which leaves were taken\n    \
                 or an error message if the employee is not found.",
            )
            .with_schema(employee_id_schema()),
        ]
    }

    fn lookup(&self, employee_id: &str) -> Option<EmployeeRecord> {
        let id = employee_id.trim().parse::<u32>().ok()?;
        self.repository.find(id)
    }
}

impl std::fmt::Debug for LeaveService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaveService").finish_non_exhaustive()
    }
}

fn not_found() -> Value {
    json!({ "status": "error", "reason": NOT_FOUND_REASON })
}

fn employee_id_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "employee_id": { "title": "Employee Id", "type": "string" }
        },
        "required": ["employee_id"]
    })
}

// Models sometimes send the id as a number even though the schema says string.
fn employee_id_argument(arguments: &Map<String, Value>) -> String {
    match arguments.get("employee_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leave::InMemoryLeaveRepository;

    fn service() -> LeaveService {
        LeaveService::new(Arc::new(InMemoryLeaveRepository::demo()))
    }

    #[test]
    fn test_leave_balance() {
        let svc = service();
        assert_eq!(
            svc.leave_balance("1001"),
            json!({"status": "success", "leave_balance": 15})
        );
        assert_eq!(
            svc.leave_balance("9999"),
            json!({"status": "error", "reason": "employee not found"})
        );
    }

    #[test]
    fn test_leave_balance_all() {
        let result = service().leave_balance("all");
        assert_eq!(result["status"], "success");
        assert_eq!(
            result["leave_balances_all"],
            json!({"1001": 15, "1002": 10, "1003": 20})
        );
    }

    #[test]
    fn test_leaves_taken() {
        let svc = service();
        assert_eq!(
            svc.leaves_taken("1002"),
            json!({"status": "success", "leaves_taken": ["2025-01-04"]})
        );
        assert_eq!(
            svc.leaves_taken("all")["leave_taken_all"]["1003"],
            json!(["2025-04-01", "2025-05-05"])
        );
    }

    #[test]
    fn test_non_numeric_id_is_not_found() {
        assert_eq!(service().leaves_taken("alice")["reason"], NOT_FOUND_REASON);
    }

    #[test]
    fn test_call_dispatch() {
        let svc = service();
        let mut args = Map::new();
        args.insert("employee_id".to_string(), json!(1003));

        let result = svc.call(LEAVE_BALANCE_TOOL, &args).unwrap();
        assert_eq!(result["leave_balance"], 20);
        assert!(svc.call("delete_employee", &args).is_none());
    }

    #[test]
    fn test_tool_descriptors() {
        let tools = LeaveService::tool_descriptors();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![LEAVE_BALANCE_TOOL, LEAVES_TAKEN_TOOL]);
        for tool in &tools {
            let schema = tool.parameter_schema.as_ref().unwrap();
            assert_eq!(schema["required"], json!(["employee_id"]));
        }
    }
}
