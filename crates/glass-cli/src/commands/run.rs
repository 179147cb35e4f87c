use crate::render::render_layout;
use crate::support::{assemble_or_exit, goal_title, load_goal_or_exit, node_report, status_word};
use glass_kernel::Landscape;
use serde_json::{Value, json};

pub struct Args {
    pub goal: String,
    pub verbose: bool,
    pub cycles: u32,
    pub json: bool,
}

pub fn run(args: Args) {
    let goal = load_goal_or_exit(&args.goal);
    let mut landscape = assemble_or_exit(&goal);

    if !args.json {
        println!("Goal: {}", goal_title(&goal));
        println!();
        println!("Assembled: {landscape}");
        println!();
        println!("Layout:");
        println!("{}", render_layout(&landscape));
        println!();
    }

    let _span = tracing::info_span!("glass_run", goal = %args.goal, cycles = args.cycles).entered();
    for cycle in 1..=args.cycles {
        tracing::info!(cycle, "run cycle");
        if let Err(e) = landscape.run() {
            eprintln!("error: run cycle {cycle} failed: {e}");
            std::process::exit(1);
        }
    }

    if args.json {
        let payload = json!({
            "goal": goal.goal,
            "rows": landscape.rows(),
            "cols": landscape.cols(),
            "cycles": args.cycles,
            "nodes": landscape.nodes().map(node_report).collect::<Vec<Value>>(),
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

    println!("Execution complete.");
    println!();
    if args.verbose {
        print_verbose(&landscape);
    } else {
        print_summary(&landscape);
    }
}

fn print_verbose(landscape: &Landscape) {
    for node in landscape.nodes() {
        println!("  {}", node.label());
        println!("    json1 = {}", Value::Object(node.belief().clone()));
        println!("    json2 = {}", Value::Object(node.measurement().clone()));
    }
}

fn print_summary(landscape: &Landscape) {
    println!("Processed {} nodes.", landscape.len());
    for node in landscape.nodes() {
        println!("  {} → {}", node.label(), status_word(node));
    }
}
