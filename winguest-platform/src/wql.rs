use serde_json::Value;
use winguest_core::{Result, WinGuestError, WqlResult, WqlRow};

/// Result set name the session uses for `query`: the class after `FROM`, snake-cased.
pub fn result_set_name(query: &str) -> Option<String> {
    let mut words = query.split_whitespace();
    words.find(|word| word.eq_ignore_ascii_case("from"))?;
    let class = words.next()?;

    let mut name = String::with_capacity(class.len() + 4);
    let mut previous: Option<char> = None;
    for c in class.chars() {
        if c.is_ascii_uppercase() {
            if previous.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
                name.push('_');
            }
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
        previous = Some(c);
    }

    Some(name)
}

/// Turns `ConvertTo-Csv -NoTypeInformation` output of a WQL query run on
/// `machine` into a keyed result set.
///
/// Every column is kept as a string; empty fields become `null`. A row whose
/// field count differs from the header is rejected.
pub fn parse_wql_output(machine: &str, query: &str, output: &str) -> Result<WqlResult> {
    let malformed = |message: String| WinGuestError::CommandFailed {
        machine: machine.to_string(),
        message,
    };

    let result_set = result_set_name(query)
        .ok_or_else(|| malformed(format!("Cannot find the queried class in {query:?}")))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(output.trim().as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| malformed(format!("Unreadable WQL header: {e}")))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| malformed(format!("Malformed WQL row: {e}")))?;
        let row: WqlRow = headers
            .iter()
            .zip(record.iter())
            .map(|(column, field)| {
                let value = if field.is_empty() {
                    Value::Null
                } else {
                    Value::String(field.to_string())
                };
                (column.to_string(), value)
            })
            .collect();
        rows.push(row);
    }

    let mut result = WqlResult::new();
    result.insert(result_set, rows);
    Ok(result)
}
