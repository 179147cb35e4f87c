use crate::render::render_layout;
use crate::support::{assemble_or_exit, load_goal_or_exit};

pub fn run(goal: String) {
    let spec = load_goal_or_exit(&goal);
    let landscape = assemble_or_exit(&spec);
    println!("{}", render_layout(&landscape));
}
