use serde::{Deserialize, Serialize, Serializer};

use super::{Execution, ExecutionStatus, Workflow};

/// Aggregate dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_workflows: usize,
    pub active_executions: usize,
    pub total_users: usize,
    /// Percentage in `0..=100`. Whole values serialize as integers.
    #[serde(serialize_with = "serialize_rate")]
    pub success_rate: f64,
}

fn serialize_rate<S: Serializer>(rate: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if rate.is_finite() && rate.fract() == 0.0 {
        serializer.serialize_i64(*rate as i64)
    } else {
        serializer.serialize_f64(*rate)
    }
}

impl Stats {
    /// Derive stats with a success rate supplied by the caller.
    pub fn with_success_rate(
        workflows: &[Workflow],
        executions: &[Execution],
        total_users: usize,
        success_rate: f64,
    ) -> Self {
        Self {
            total_workflows: workflows.len(),
            active_executions: count_status(executions, ExecutionStatus::Running),
            total_users,
            success_rate,
        }
    }

    /// Derive stats from live collections. The success rate is rounded to a
    /// whole percent and is 0 when there are no executions.
    pub fn from_live(workflows: &[Workflow], executions: &[Execution], total_users: usize) -> Self {
        let succeeded = count_status(executions, ExecutionStatus::Success);
        let success_rate = if executions.is_empty() {
            0.0
        } else {
            (100.0 * succeeded as f64 / executions.len() as f64).round()
        };

        Self::with_success_rate(workflows, executions, total_users, success_rate)
    }
}

fn count_status(executions: &[Execution], status: ExecutionStatus) -> usize {
    executions.iter().filter(|e| e.status == status).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn execution(id: &str, status: ExecutionStatus) -> Execution {
        Execution {
            id: id.into(),
            workflow_id: "wf".into(),
            workflow_name: "wf".into(),
            status,
            start_time: None,
            end_time: None,
            duration: None,
            client: "c".into(),
            triggered_by: "t".into(),
            input_size: "N/A".into(),
            output_size: None,
            steps: 1,
            completed_steps: 0,
            error_message: None,
        }
    }

    #[test]
    fn test_from_live_rounds_success_rate() {
        let executions = vec![
            execution("1", ExecutionStatus::Success),
            execution("2", ExecutionStatus::Success),
            execution("3", ExecutionStatus::Running),
        ];
        let stats = Stats::from_live(&[], &executions, 1);
        assert_eq!(stats.success_rate, 67.0);
        assert_eq!(stats.active_executions, 1);
        assert_eq!(stats.total_workflows, 0);
        assert_eq!(stats.total_users, 1);
    }

    #[test]
    fn test_from_live_without_executions() {
        let stats = Stats::from_live(&[], &[], 1);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.active_executions, 0);
    }

    #[test]
    fn test_whole_success_rate_serializes_as_integer() {
        let json = serde_json::to_string(&Stats::from_live(&[], &[], 1)).unwrap();
        assert_eq!(
            json,
            r#"{"totalWorkflows":0,"activeExecutions":0,"totalUsers":1,"successRate":0}"#
        );

        let executions = vec![
            execution("1", ExecutionStatus::Success),
            execution("2", ExecutionStatus::Success),
            execution("3", ExecutionStatus::Running),
        ];
        let value = serde_json::to_value(Stats::from_live(&[], &executions, 1)).unwrap();
        assert_eq!(value["successRate"], serde_json::json!(67));
    }

    #[test]
    fn test_fractional_success_rate_keeps_fraction() {
        let stats = Stats::with_success_rate(&[], &[], 5, 94.2);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["successRate"], serde_json::json!(94.2));

        let back: Stats = serde_json::from_value(value).unwrap();
        assert_eq!(back, stats);
    }
}
