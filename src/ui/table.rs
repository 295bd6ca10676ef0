use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use molscout::data::model::FlatRecord;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Union of the keys of the visible records, in first-seen order.
fn column_keys<R: FlatRecord>(records: &[R], visible: &[usize]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for record in visible.iter().filter_map(|&i| records.get(i)) {
        for (key, _) in record.fields() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

/// One label per column; keys the record lacks render as `–`.
fn row_cells<R: FlatRecord>(record: &R, keys: &[String]) -> Vec<String> {
    let fields = record.fields();
    keys.iter()
        .map(|key| {
            fields
                .iter()
                .find(|(k, _)| k == key)
                .map_or_else(|| "–".to_string(), |(_, v)| v.cell_label())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Result table
// ---------------------------------------------------------------------------

/// Render the rows of `records` listed in `visible`.
///
/// Columns are the union of the visible records' keys, so every row has the
/// same number of cells. `tint` colours the first cell of each row.
pub fn record_table<R: FlatRecord>(
    ui: &mut Ui,
    id: &str,
    records: &[R],
    visible: &[usize],
    tint: impl Fn(&R) -> Option<Color32>,
) {
    let header = column_keys(records, visible);
    if header.is_empty() {
        ui.label("No matching molecules.");
        return;
    }

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(280.0)
            .columns(Column::auto().at_least(60.0), header.len())
            .header(20.0, |mut row| {
                for name in &header {
                    row.col(|ui: &mut Ui| {
                        ui.strong(name.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, visible.len(), |mut row| {
                    let Some(record) = records.get(visible[row.index()]) else {
                        return;
                    };
                    let color = tint(record);
                    for (col, label) in row_cells(record, &header).into_iter().enumerate() {
                        row.col(|ui: &mut Ui| {
                            let mut text = RichText::new(label);
                            if let (0, Some(c)) = (col, color) {
                                text = text.color(c);
                            }
                            ui.label(text);
                        });
                    }
                });
            });
    });
}
