use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

/// Lay out `rows` under `headers` in space-separated columns.
///
/// Widths are measured in chars so descriptions with non-ASCII text stay
/// aligned. The last column is never padded, so no line has trailing spaces.
/// Cells beyond the header count are dropped.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &widths, headers.iter().copied());
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    push_line(&mut out, &widths, rule.iter().map(String::as_str));
    for row in rows {
        push_line(&mut out, &widths, row.iter().map(String::as_str));
    }
    out
}

fn push_line<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let last = widths.len().saturating_sub(1);
    for (i, (cell, &width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        if i < last {
            let pad = width - cell.chars().count();
            out.extend(std::iter::repeat(' ').take(pad));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let rows = [
            row(&["build", "builtin", "Compile"]),
            row(&["dpack-example", "package", "Release build and Debian package"]),
        ];
        let table = render_table(&["ACTION", "KIND", "DESCRIPTION"], &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "ACTION         KIND     DESCRIPTION");
        assert_eq!(lines[1], "-------------  -------  --------------------------------");
        assert_eq!(lines[2], "build          builtin  Compile");
        assert!(lines.iter().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        let rows = [row(&["récord", "x"]), row(&["lint", "y"])];
        let table = render_table(&["NAME", "KIND"], &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[2], "récord  x");
        assert_eq!(lines[3], "lint    y");
    }

    #[test]
    fn empty_rows_still_print_header() {
        let table = render_table(&["ACTION", "KIND"], &[]);
        assert_eq!(table, "ACTION  KIND\n------  ----\n");
    }
}
