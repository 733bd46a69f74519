//! Search and selector filters over record snapshots.
//!
//! Search is a case-insensitive substring match; an empty term matches
//! everything. A `None` selector means "all".

use super::{parse_selector, Execution, ExecutionStatus, User, UserRole, Workflow, WorkflowStatus};
use crate::Result;

fn contains_term(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

/// Filter for workflow lists. Searches name and description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowFilter {
    pub search: String,
    pub status: Option<WorkflowStatus>,
}

impl WorkflowFilter {
    /// Build from raw query values, accepting `"all"` as the status selector.
    pub fn parse(search: Option<&str>, status: Option<&str>) -> Result<Self> {
        Ok(Self {
            search: search.unwrap_or_default().to_string(),
            status: status.map(parse_selector).transpose()?.flatten(),
        })
    }

    pub fn matches(&self, workflow: &Workflow) -> bool {
        let term = self.search.to_lowercase();
        let matches_search =
            contains_term(&workflow.name, &term) || contains_term(&workflow.description, &term);
        let matches_status = self.status.map_or(true, |s| workflow.status == s);
        matches_search && matches_status
    }

    pub fn apply(&self, workflows: Vec<Workflow>) -> Vec<Workflow> {
        workflows.into_iter().filter(|w| self.matches(w)).collect()
    }
}

/// Filter for execution lists. Searches workflow name, client and trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionFilter {
    pub search: String,
    pub status: Option<ExecutionStatus>,
}

impl ExecutionFilter {
    pub fn parse(search: Option<&str>, status: Option<&str>) -> Result<Self> {
        Ok(Self {
            search: search.unwrap_or_default().to_string(),
            status: status.map(parse_selector).transpose()?.flatten(),
        })
    }

    pub fn matches(&self, execution: &Execution) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = contains_term(&execution.workflow_name, &term)
            || contains_term(&execution.client, &term)
            || contains_term(&execution.triggered_by, &term);
        let matches_status = self.status.map_or(true, |s| execution.status == s);
        matches_search && matches_status
    }

    pub fn apply(&self, executions: Vec<Execution>) -> Vec<Execution> {
        executions.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// Filter for user lists. Searches name, email and company.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: String,
    pub role: Option<UserRole>,
}

impl UserFilter {
    pub fn parse(search: Option<&str>, role: Option<&str>) -> Result<Self> {
        Ok(Self {
            search: search.unwrap_or_default().to_string(),
            role: role.map(parse_selector).transpose()?.flatten(),
        })
    }

    pub fn matches(&self, user: &User) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = contains_term(&user.name, &term)
            || contains_term(&user.email, &term)
            || contains_term(&user.company, &term);
        let matches_role = self.role.map_or(true, |r| user.role == r);
        matches_search && matches_role
    }

    pub fn apply(&self, users: Vec<User>) -> Vec<User> {
        users.into_iter().filter(|u| self.matches(u)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::UserStatus;
    use crate::FlowdashError;

    fn workflow(id: &str, name: &str, description: &str, status: WorkflowStatus) -> Workflow {
        Workflow {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            status,
            assigned_clients: 1,
            last_execution: "Never".into(),
            execution_count: 0,
            tags: vec![],
            created_at: "2024-01-01".into(),
        }
    }

    fn user(name: &str, email: &str, company: &str, role: UserRole) -> User {
        User {
            id: name.to_lowercase(),
            name: name.into(),
            email: email.into(),
            role,
            company: company.into(),
            status: UserStatus::Active,
            last_login: "now".into(),
            workflows: 0,
            avatar: "XX".into(),
            joined_at: "2024-01-01".into(),
            mfa_enabled: false,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let workflows = vec![
            workflow("1", "Email", "Campaigns", WorkflowStatus::Active),
            workflow("2", "Finance", "Reports", WorkflowStatus::Paused),
        ];
        assert_eq!(WorkflowFilter::default().apply(workflows).len(), 2);
    }

    #[test]
    fn test_workflow_search_covers_description() {
        let workflows = vec![
            workflow("1", "Email", "Campaigns", WorkflowStatus::Active),
            workflow("2", "Finance", "Monthly REPORTS", WorkflowStatus::Paused),
        ];
        let filter = WorkflowFilter::parse(Some("reports"), None).unwrap();
        let result = filter.apply(workflows);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "2");
    }

    #[test]
    fn test_workflow_status_selector() {
        let workflows = vec![
            workflow("1", "Email", "Campaigns", WorkflowStatus::Active),
            workflow("2", "Finance", "Reports", WorkflowStatus::Paused),
        ];
        let filter = WorkflowFilter::parse(None, Some("paused")).unwrap();
        assert_eq!(filter.apply(workflows.clone())[0].id, "2");

        let all = WorkflowFilter::parse(None, Some("all")).unwrap();
        assert_eq!(all.apply(workflows).len(), 2);
    }

    #[test]
    fn test_unknown_selector_is_rejected() {
        let err = WorkflowFilter::parse(None, Some("deleted")).unwrap_err();
        assert!(matches!(err, FlowdashError::InvalidArgument(_)));
        assert!(ExecutionFilter::parse(None, Some("done")).is_err());
        assert!(UserFilter::parse(None, Some("root")).is_err());
    }

    #[test]
    fn test_user_search_and_role() {
        let users = vec![
            user("Sarah", "sarah@acme.test", "Acme", UserRole::Admin),
            user("Mike", "mike@techflow.test", "TechFlow", UserRole::Editor),
            user("Dana", "dana@acme.test", "Acme", UserRole::Editor),
        ];

        let acme_editors = UserFilter::parse(Some("ACME"), Some("editor")).unwrap();
        let result = acme_editors.apply(users);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Dana");
    }
}
