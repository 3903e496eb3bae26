use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct IdentifierRow {
    pub(crate) line: u64,
    pub(crate) kind: String,
    pub(crate) value: String,
    pub(crate) reference: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<IdentifierRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let row: CsvRow = record.deserialize(Some(&headers))?;
        rows.push(IdentifierRow {
            line,
            kind: row.kind,
            value: row.value,
            reference: row.reference,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    kind: String,
    #[serde(default)]
    value: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    reference: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
