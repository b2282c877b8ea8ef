use client_core::{view::TABLE_HEADERS, EmployeeRowView};

const ID_HEADER: &str = "ID";

/// Plain-text rendering of the employee table. The action column becomes the
/// id, since that is what `delete` takes.
pub fn render(rows: &[EmployeeRowView]) -> String {
    let mut header: Vec<&str> = vec![ID_HEADER];
    header.extend(TABLE_HEADERS[1..TABLE_HEADERS.len() - 1].iter().copied());

    let cells: Vec<[&str; 7]> = rows
        .iter()
        .map(|row| {
            [
                row.id.as_str(),
                row.name.as_str(),
                row.extension.as_str(),
                row.email.as_str(),
                row.title.as_str(),
                row.date_hired.as_str(),
                row.currently_employed,
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    for line in &cells {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
