//! Plain-text table rendering for ranked flight rows.

use crate::rows::FlightRow;

/// Render rows as a column-aligned table. The `departure_token` column is
/// only added when requested, with an empty cell when the token is absent.
pub fn render_table(rows: &[FlightRow], show_token: bool) -> String {
    let mut headers = vec![
        "group", "rank", "price", "duration", "stops", "depart", "arrive", "route", "airlines",
        "segments",
    ];
    if show_token {
        headers.push("departure_token");
    }

    let lines: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut line = vec![
                row.group.clone(),
                row.rank.to_string(),
                row.price_display(),
                row.duration_display(),
                row.stops.to_string(),
                row.depart.clone(),
                row.arrive.clone(),
                row.route.clone(),
                row.airlines.clone(),
                row.segments.clone(),
            ];
            if show_token {
                line.push(row.departure_token.clone().unwrap_or_default());
            }
            line
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for line in &lines {
        for (index, cell) in line.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(index, cell)| format!("{:<width$}", cell, width = widths[index]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|header| header.to_string()).collect();
    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();

    let mut output = Vec::with_capacity(lines.len() + 2);
    output.push(format_line(&header_cells));
    output.push(format_line(&separator));
    for line in &lines {
        output.push(format_line(line));
    }

    output.join("\n")
}
