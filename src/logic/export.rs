//! CSV export of the group standings tables.

use crate::models::Tournament;
use std::io;

pub const STANDINGS_HEADER: [&str; 11] = [
    "Group", "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts",
];

/// Write every group's table, in group order, one row per entrant. Goal difference is signed
/// ("+2", "0", "-1").
pub fn write_standings_csv<W: io::Write>(
    tournament: &Tournament,
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(STANDINGS_HEADER)?;
    for (group, rows) in &tournament.standings {
        for (position, row) in rows.iter().enumerate() {
            let goal_difference = if row.goal_difference > 0 {
                format!("+{}", row.goal_difference)
            } else {
                row.goal_difference.to_string()
            };
            wtr.write_record([
                group.clone(),
                (position + 1).to_string(),
                row.entrant.name.clone(),
                row.played.to_string(),
                row.won.to_string(),
                row.drawn.to_string(),
                row.lost.to_string(),
                row.goals_for.to_string(),
                row.goals_against.to_string(),
                goal_difference,
                row.points.to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Standings as a CSV string.
pub fn standings_csv(tournament: &Tournament) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_standings_csv(tournament, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}
