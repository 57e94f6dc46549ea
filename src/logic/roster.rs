//! Roster import: player names from CSV (first column, optional `name` header).

use crate::models::TournamentError;
use std::io::Read;

/// Read player names from CSV. Blank names are skipped; no duplicate checks happen here.
pub fn parse_player_names_csv<R: Read>(reader: R) -> Result<Vec<String>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut names = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| TournamentError::Import(e.to_string()))?;
        let Some(name) = record.get(0) else {
            continue;
        };
        if i == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
