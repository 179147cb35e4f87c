//! Text rendering of a landscape's grid.

use glass_kernel::Landscape;
use glass_kernel::position::extent;

const VACANT: &str = "[   ]";
const OFF_GRID: &str = "     ";

/// One line per row. Occupied cells show the node's three-letter kind code,
/// vacant valid cells show empty brackets, and positions off the staggered
/// grid are blank. Trailing blanks are trimmed from each line.
pub fn render_layout(landscape: &Landscape) -> String {
    let mut lines = Vec::with_capacity(landscape.rows());
    for row in 0..extent(landscape.rows()) {
        let cells: Vec<String> = (0..extent(landscape.cols()))
            .map(|col| match landscape.get_node(row, col) {
                Some(node) => format!("[{}]", node.kinds().code()),
                None if Landscape::is_valid_position(row, col) => VACANT.to_string(),
                None => OFF_GRID.to_string(),
            })
            .collect();
        lines.push(cells.join(" ").trim_end().to_string());
    }
    lines.join("\n")
}
