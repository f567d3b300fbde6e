use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Print `rows` under `headers` as left-aligned, two-space separated columns.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<String>| cells.join("  ").trim_end().to_string();

    println!(
        "{}",
        line(
            headers
                .iter()
                .zip(&widths)
                .map(|(h, &w)| format!("{h:w$}"))
                .collect()
        )
    );
    println!(
        "{}",
        line(widths.iter().map(|&w| "-".repeat(w)).collect())
    );
    for row in rows {
        println!(
            "{}",
            line(
                row.iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        let w = widths.get(i).copied().unwrap_or(0);
                        format!("{cell:w$}")
                    })
                    .collect()
            )
        );
    }
}

/// Horizontal rule framing printed prompts.
pub fn print_rule() {
    println!("{}", "─".repeat(80));
}
