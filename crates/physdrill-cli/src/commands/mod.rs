pub mod check;
pub mod explore;
pub mod generate;
pub mod init;
pub mod practice;
pub mod topics;

use comfy_table::Table;

use physdrill_core::model::Difficulty;
use physdrill_core::performance::PivotRow;

/// Topic/kind x difficulty table of performance pivot rows.
pub fn performance_table(rows: Vec<PivotRow>, difficulties: &[Difficulty]) -> Table {
    let mut table = Table::new();
    let mut header = vec!["Topic".to_string(), "Kind".to_string()];
    header.extend(difficulties.iter().map(|d| d.to_string()));
    header.push("Total".to_string());
    table.set_header(header);

    for row in rows {
        let mut cells = vec![row.topic.to_string(), row.kind];
        cells.extend(row.cells);
        cells.push(row.total);
        table.add_row(cells);
    }
    table
}
