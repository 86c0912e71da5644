//! Setup phase: validate the configuration and generate the initial tournament structure.

use crate::logic::group_play::{generate_groups, initialize_standings};
use crate::logic::knockout::generate_knockout_bracket;
use crate::models::{
    Entrant, KnockoutStage, Tournament, TournamentConfig, TournamentError, TournamentFormat,
    MAX_GROUPS, MIN_ENTRANTS,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Check the setup form: a name, at least two entrants, and for group formats a group count
/// between 1 and the number of entrants (and at most [`MAX_GROUPS`]).
pub fn validate_config(
    config: &TournamentConfig,
    entrant_count: usize,
) -> Result<(), TournamentError> {
    if config.name.trim().is_empty() {
        return Err(TournamentError::MissingTournamentName);
    }
    if entrant_count < MIN_ENTRANTS {
        return Err(TournamentError::NotEnoughEntrants {
            required: MIN_ENTRANTS,
            found: entrant_count,
        });
    }
    if config.format.has_groups()
        && (config.num_groups == 0
            || config.num_groups > MAX_GROUPS
            || config.num_groups > entrant_count)
    {
        return Err(TournamentError::InvalidGroupCount {
            num_groups: config.num_groups,
            entrants: entrant_count,
        });
    }
    Ok(())
}

/// Generate a tournament: shuffle the entrants once with `rng`, then build groups and
/// standings and/or the knockout bracket according to the format.
///
/// The "group" format builds the group stage only; its knockout stays
/// [`KnockoutStage::AwaitingQualifiers`].
pub fn generate_tournament<R: Rng + ?Sized>(
    entrants: &[Entrant],
    mut config: TournamentConfig,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    validate_config(&config, entrants.len())?;
    config.name = config.name.trim().to_string();

    let mut shuffled = entrants.to_vec();
    shuffled.shuffle(rng);

    let format = config.format;
    let include_third_place = config.include_third_place;
    let num_groups = config.num_groups;
    let mut tournament = Tournament::new(config, shuffled);

    if format.has_groups() {
        tournament.groups = generate_groups(&tournament.entrants, num_groups);
        tournament.standings = initialize_standings(&tournament.groups);
    }

    tournament.knockout = match format {
        TournamentFormat::Knockout => KnockoutStage::Bracket {
            rounds: generate_knockout_bracket(&tournament.entrants, include_third_place),
        },
        TournamentFormat::Group => KnockoutStage::AwaitingQualifiers,
        TournamentFormat::GroupOnly => KnockoutStage::None,
    };

    log::info!(
        "Generated tournament {} ({:?}): {} entrants, {} groups, {} knockout rounds",
        tournament.config.name,
        format,
        tournament.entrants.len(),
        tournament.groups.len(),
        tournament.knockout_rounds().len()
    );
    Ok(tournament)
}
