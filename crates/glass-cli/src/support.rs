use crate::config::RunnerConfig;
use glass_goal::{GoalAssembler, GoalError, GoalSpec};
use glass_kernel::{Landscape, Node};
use serde_json::{Value, json};

/// Exit code for a goal file that cannot be read at all.
pub const EXIT_UNREADABLE: i32 = 2;

pub fn load_config_or_exit(requested: Option<&str>) -> RunnerConfig {
    RunnerConfig::resolve(requested).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn load_goal_or_exit(path: &str) -> GoalSpec {
    GoalSpec::load(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        let code = match e {
            GoalError::ReadFile { .. } => EXIT_UNREADABLE,
            _ => 1,
        };
        std::process::exit(code);
    })
}

pub fn assemble_or_exit(goal: &GoalSpec) -> Landscape {
    GoalAssembler::new().assemble(goal).unwrap_or_else(|e| {
        eprintln!("error: failed to assemble landscape: {e}");
        std::process::exit(1);
    })
}

pub fn goal_title(goal: &GoalSpec) -> &str {
    if goal.goal.is_empty() {
        "(none)"
    } else {
        &goal.goal
    }
}

pub fn status_word(node: &Node) -> &'static str {
    if node.pojar().run() { "ran" } else { "skipped" }
}

pub fn node_report(node: &Node) -> Value {
    json!({
        "position": [node.row(), node.col()],
        "label": node.label(),
        "kinds": node.kinds(),
        "algo": node.pojar().algo().name(),
        "run": node.pojar().run(),
        "belief": node.belief(),
        "measurement": node.measurement(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glass_kernel::{MergeData, NodeKinds, Pojar};

    #[test]
    fn node_report_carries_state() {
        let mut belief = serde_json::Map::new();
        belief.insert("goal".into(), json!("g"));
        let node = Node::new(
            (1, 1),
            NodeKinds::default(),
            Pojar::new(MergeData::new(serde_json::Map::new())).with_run(false),
        )
        .with_belief(belief);

        let report = node_report(&node);
        assert_eq!(report["position"], json!([1, 1]));
        assert_eq!(report["label"], json!("Node(1,1)[navigator/controller/causal]"));
        assert_eq!(report["kinds"]["planning"], json!("navigator"));
        assert_eq!(report["algo"], json!("merge"));
        assert_eq!(report["run"], json!(false));
        assert_eq!(report["belief"], json!({"goal": "g"}));
        assert_eq!(report["measurement"], json!({}));
        assert_eq!(status_word(&node), "skipped");
    }
}
