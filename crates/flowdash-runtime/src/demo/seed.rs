use flowdash_core::records::{
    Execution, ExecutionStatus, User, UserRole, UserStatus, Workflow, WorkflowStatus,
};

/// Success rate reported for the demo dataset.
pub const DEMO_SUCCESS_RATE: f64 = 94.2;

#[allow(clippy::too_many_arguments)]
fn workflow(
    id: &str,
    name: &str,
    description: &str,
    status: WorkflowStatus,
    assigned_clients: u32,
    last_execution: &str,
    execution_count: u64,
    tags: &[&str],
    created_at: &str,
) -> Workflow {
    Workflow {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        status,
        assigned_clients,
        last_execution: last_execution.to_string(),
        execution_count,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at: created_at.to_string(),
    }
}

pub fn workflows() -> Vec<Workflow> {
    vec![
        workflow(
            "wf_001",
            "Customer Data Processing",
            "Processes customer data from multiple sources and generates analytics reports",
            WorkflowStatus::Active,
            5,
            "2 hours ago",
            234,
            &["data-processing", "analytics"],
            "2024-01-15",
        ),
        workflow(
            "wf_002",
            "Email Marketing Automation",
            "Automated email campaigns based on user behavior and preferences",
            WorkflowStatus::Active,
            12,
            "15 minutes ago",
            1057,
            &["marketing", "automation"],
            "2024-01-20",
        ),
        workflow(
            "wf_003",
            "Financial Report Generation",
            "Generates monthly financial reports from accounting data",
            WorkflowStatus::Paused,
            3,
            "1 day ago",
            89,
            &["finance", "reporting"],
            "2024-02-01",
        ),
        workflow(
            "wf_004",
            "Inventory Management Sync",
            "Synchronizes inventory data across multiple platforms",
            WorkflowStatus::Active,
            8,
            "30 minutes ago",
            445,
            &["inventory", "sync"],
            "2024-01-10",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: &str,
    name: &str,
    email: &str,
    role: UserRole,
    company: &str,
    status: UserStatus,
    last_login: &str,
    workflows: u32,
    avatar: &str,
    joined_at: &str,
    mfa_enabled: bool,
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        company: company.to_string(),
        status,
        last_login: last_login.to_string(),
        workflows,
        avatar: avatar.to_string(),
        joined_at: joined_at.to_string(),
        mfa_enabled,
    }
}

pub fn users() -> Vec<User> {
    vec![
        user(
            "user_001",
            "Sarah Johnson",
            "sarah.johnson@acmecorp.com",
            UserRole::Admin,
            "Acme Corp",
            UserStatus::Active,
            "2 hours ago",
            8,
            "SJ",
            "2024-01-15",
            true,
        ),
        user(
            "user_002",
            "Michael Chen",
            "m.chen@techflow.com",
            UserRole::Editor,
            "TechFlow Inc",
            UserStatus::Active,
            "1 day ago",
            5,
            "MC",
            "2024-02-01",
            true,
        ),
        user(
            "user_003",
            "Emily Rodriguez",
            "emily@startupxyz.com",
            UserRole::Viewer,
            "StartupXYZ",
            UserStatus::Inactive,
            "1 week ago",
            2,
            "ER",
            "2024-01-20",
            false,
        ),
        user(
            "user_004",
            "David Wilson",
            "d.wilson@enterprise.com",
            UserRole::Editor,
            "Enterprise Ltd",
            UserStatus::Active,
            "30 minutes ago",
            12,
            "DW",
            "2024-01-10",
            true,
        ),
        user(
            "user_005",
            "Lisa Thompson",
            "lisa@datacorp.com",
            UserRole::Viewer,
            "DataCorp",
            UserStatus::Active,
            "4 hours ago",
            3,
            "LT",
            "2024-02-10",
            false,
        ),
    ]
}

pub fn executions() -> Vec<Execution> {
    vec![
        Execution {
            id: "exec_001".into(),
            workflow_id: "wf_001".into(),
            workflow_name: "Customer Data Processing".into(),
            status: ExecutionStatus::Success,
            start_time: Some("2024-06-28 14:30:22".into()),
            end_time: Some("2024-06-28 14:30:24".into()),
            duration: Some("2.3s".into()),
            client: "Acme Corp".into(),
            triggered_by: "sarah.johnson@acmecorp.com".into(),
            input_size: "1.2MB".into(),
            output_size: Some("847KB".into()),
            steps: 8,
            completed_steps: 8,
            error_message: None,
        },
        Execution {
            id: "exec_002".into(),
            workflow_id: "wf_002".into(),
            workflow_name: "Email Marketing Automation".into(),
            status: ExecutionStatus::Running,
            start_time: Some("2024-06-28 14:31:15".into()),
            end_time: None,
            duration: Some("45s".into()),
            client: "TechFlow Inc".into(),
            triggered_by: "m.chen@techflow.com".into(),
            input_size: "524KB".into(),
            output_size: None,
            steps: 12,
            completed_steps: 7,
            error_message: None,
        },
        Execution {
            id: "exec_003".into(),
            workflow_id: "wf_003".into(),
            workflow_name: "Financial Report Generation".into(),
            status: ExecutionStatus::Error,
            start_time: Some("2024-06-28 14:25:10".into()),
            end_time: Some("2024-06-28 14:25:22".into()),
            duration: Some("12s".into()),
            client: "Enterprise Ltd".into(),
            triggered_by: "d.wilson@enterprise.com".into(),
            input_size: "2.1MB".into(),
            output_size: None,
            steps: 15,
            completed_steps: 8,
            error_message: Some("Failed to connect to external API endpoint".into()),
        },
        Execution {
            id: "exec_004".into(),
            workflow_id: "wf_004".into(),
            workflow_name: "Inventory Management Sync".into(),
            status: ExecutionStatus::Success,
            start_time: Some("2024-06-28 14:20:45".into()),
            end_time: Some("2024-06-28 14:20:53".into()),
            duration: Some("8.7s".into()),
            client: "DataCorp".into(),
            triggered_by: "lisa@datacorp.com".into(),
            input_size: "3.5MB".into(),
            output_size: Some("2.8MB".into()),
            steps: 10,
            completed_steps: 10,
            error_message: None,
        },
        Execution {
            id: "exec_005".into(),
            workflow_id: "wf_001".into(),
            workflow_name: "Customer Data Processing".into(),
            status: ExecutionStatus::Queued,
            start_time: None,
            end_time: None,
            duration: None,
            client: "StartupXYZ".into(),
            triggered_by: "emily@startupxyz.com".into(),
            input_size: "890KB".into(),
            output_size: None,
            steps: 8,
            completed_steps: 0,
            error_message: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_sizes() {
        assert_eq!(workflows().len(), 4);
        assert_eq!(users().len(), 5);
        assert_eq!(executions().len(), 5);
    }

    #[test]
    fn test_seed_executions_are_consistent() {
        for execution in executions() {
            assert!(execution.is_consistent(), "{} is inconsistent", execution.id);
        }
    }

    #[test]
    fn test_exactly_one_running_execution() {
        let running = executions()
            .iter()
            .filter(|e| e.status == ExecutionStatus::Running)
            .count();
        assert_eq!(running, 1);
    }
}
