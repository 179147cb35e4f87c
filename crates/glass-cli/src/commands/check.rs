use crate::support::{assemble_or_exit, goal_title, load_goal_or_exit, node_report};
use serde_json::{Value, json};

pub fn run(goal: String, json_output: bool) {
    let spec = load_goal_or_exit(&goal);
    let landscape = assemble_or_exit(&spec);
    let descriptors = spec.required_node_types.len();
    let ignored = descriptors.saturating_sub(landscape.len());
    let defaulted = landscape.len().saturating_sub(descriptors);

    if json_output {
        let payload = json!({
            "goal": spec.goal,
            "rows": landscape.rows(),
            "cols": landscape.cols(),
            "descriptors": descriptors,
            "nodes": landscape.len(),
            "defaulted": defaulted,
            "ignored": ignored,
            "constraints": spec.constraints,
            "placements": landscape.nodes().map(node_report).collect::<Vec<Value>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|e| {
                eprintln!("error: failed to render json output: {e}");
                std::process::exit(1);
            })
        );
        return;
    }

    println!("Goal: {}", goal_title(&spec));
    println!("Assembled: {landscape}");
    println!("  descriptors: {descriptors}");
    println!("  defaulted:   {defaulted}");
    println!("  ignored:     {ignored}");
    for node in landscape.nodes() {
        println!("  {} algo={}", node.label(), node.pojar().algo().name());
    }
    println!("ok");
}
