use std::collections::HashMap;

/// Tokenize one data line with the quote-aware scanner: a double quote
/// toggles quoted mode (and is dropped from the output), a comma outside
/// quotes ends the field, everything else is copied verbatim. Doubled quotes
/// inside a quoted field are NOT restored to a literal quote; existing
/// exported data was written against that behavior, so it stays.
fn parse_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == ',' && !in_quotes {
            values.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }

    values.push(current.trim().to_string());
    values
}

/// Parse raw CSV text into one header -> value map per data row.
///
/// The first non-blank line is the header row; blank lines are dropped.
/// Rows shorter than the header map the missing headers to empty strings.
/// Total function: malformed input degrades to best-effort extraction, and
/// anything with fewer than two non-blank lines yields no rows.
pub fn parse_csv(text: &str) -> Vec<HashMap<String, String>> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let headers: Vec<&str> = lines[0].split(',').map(str::trim).collect();

    let mut rows = Vec::with_capacity(lines.len() - 1);
    for line in &lines[1..] {
        let values = parse_line(line);
        let mut row = HashMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            row.insert(
                header.to_string(),
                values.get(i).cloned().unwrap_or_default(),
            );
        }
        rows.push(row);
    }

    rows
}
