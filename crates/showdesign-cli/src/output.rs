use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    print!("{}", format_table(headers, &rows));
}

/// Left-aligned columns separated by two spaces, with a dashed rule under the
/// header. Widths count characters, not bytes.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:w$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.to_vec());
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

/// First line of `text`, cut to `max` characters with a trailing ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    let first = text.lines().next().unwrap_or("");
    if first.chars().count() <= max && first.len() == text.len() {
        return first.to_string();
    }
    let cut: String = first.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_columns() {
        let table = format_table(
            &["ID", "TITLE"],
            &[vec!["1".to_string(), "Echoes".to_string()]],
        );
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "ID  TITLE");
        assert_eq!(lines[1], "--  ------");
        assert_eq!(lines[2], "1   Echoes");
    }

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(truncate("Velocity", 20), "Velocity");
    }

    #[test]
    fn truncate_long_or_multiline_text() {
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("Act 1\nAct 2", 40), "Act 1...");
    }
}
