#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Labyrinth.
//!
//! The [`World`] owns the board, the entities, both player records and the
//! portal network. Every mutation flows through [`apply`], which executes a
//! single [`Command`] to completion, including cascading pickups, deaths,
//! teleports and turn hand-over, and reports the results as [`Event`]
//! values. Read access goes through the [`query`] module.

mod board;
mod placement;
mod portals;
mod rules;

use labyrinth_core::{
    CellCoord, Command, Event, GameMode, GameOutcome, PlayerId, DEFAULT_STARTING_SHOTS,
    WELCOME_BANNER,
};
use tracing::debug;

pub use board::{Board, Ray};
pub use portals::PortalGroup;

use placement::PortalCursors;
use portals::PortalNetwork;

/// Tunable parameters applied when the world (re)starts a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    starting_shots: u32,
}

impl Config {
    /// Creates a configuration granting each player `starting_shots` shots.
    #[must_use]
    pub const fn new(starting_shots: u32) -> Self {
        Self { starting_shots }
    }

    /// Shots each player receives at the start of a match.
    #[must_use]
    pub const fn starting_shots(&self) -> u32 {
        self.starting_shots
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_SHOTS)
    }
}

/// Represents the authoritative Labyrinth world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: Config,
    board: Option<Board>,
    mode: GameMode,
    entities: Entities,
    players: [Player; 2],
    portals: PortalNetwork,
    cursors: PortalCursors,
    current: PlayerId,
    teleported_this_turn: bool,
    outcome: Option<GameOutcome>,
}

impl World {
    /// Creates a world without a board using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a world without a board using the provided configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            banner: WELCOME_BANNER,
            config,
            board: None,
            mode: GameMode::BuildMaze,
            entities: Entities::default(),
            players: [
                Player::new(config.starting_shots),
                Player::new(config.starting_shots),
            ],
            portals: PortalNetwork::new(),
            cursors: PortalCursors::new(),
            current: PlayerId::One,
            teleported_this_turn: false,
            outcome: None,
        }
    }

    fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-instance entities placed on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Entities {
    key: Option<CellCoord>,
    exit: Option<CellCoord>,
    hospital: Option<CellCoord>,
    minotaur: Option<CellCoord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Player {
    cell: Option<CellCoord>,
    has_key: bool,
    alive: bool,
    shots_left: u32,
}

impl Player {
    const fn new(shots: u32) -> Self {
        Self {
            cell: None,
            has_key: false,
            alive: true,
            shots_left: shots,
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    debug!(?command, "applying command");
    let first_event = out_events.len();

    match command {
        Command::ConfigureBoard { size } => placement::configure_board(world, size, out_events),
        Command::ClearEntities => placement::clear_entities(world, out_events),
        Command::SetGameMode { mode } => placement::set_game_mode(world, mode, out_events),
        Command::ToggleWall { edge } => placement::toggle_wall(world, edge, out_events),
        Command::Place { tool, cell } => placement::place(world, tool, cell, out_events),
        Command::PlacePortal { portal, cell } => {
            placement::place_portal(world, portal, cell, out_events);
        }
        Command::Erase { cell } => placement::erase(world, cell, out_events),
        Command::Move { direction } => rules::perform_move(world, direction, out_events),
        Command::Shoot { direction } => rules::perform_shoot(world, direction, out_events),
        Command::Knife { target, reach } => {
            rules::perform_knife(world, target, reach, out_events);
        }
        Command::EndTurn => rules::end_turn(world, out_events),
        Command::SkipTurn { reason } => rules::skip_turn(world, reason, out_events),
    }

    debug!(
        emitted = out_events.len() - first_event,
        current = ?world.current,
        "command applied"
    );
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{placement, Board, Config, PortalGroup, World};
    use labyrinth_core::{
        CellCoord, GameMode, GameOutcome, PlayerId, PortalRef, PortalTopology, Requirement,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> Config {
        world.config
    }

    /// Provides read-only access to the board, if one has been configured.
    #[must_use]
    pub fn board(world: &World) -> Option<&Board> {
        world.board.as_ref()
    }

    /// Mode the world currently operates in.
    #[must_use]
    pub fn game_mode(world: &World) -> GameMode {
        world.mode
    }

    /// Cell holding the key, unless it is unplaced or carried.
    #[must_use]
    pub fn key_cell(world: &World) -> Option<CellCoord> {
        world.entities.key
    }

    /// Cell of the exit.
    #[must_use]
    pub fn exit_cell(world: &World) -> Option<CellCoord> {
        world.entities.exit
    }

    /// Cell of the hospital.
    #[must_use]
    pub fn hospital_cell(world: &World) -> Option<CellCoord> {
        world.entities.hospital
    }

    /// Cell of the minotaur, unless it is unplaced or destroyed.
    #[must_use]
    pub fn minotaur_cell(world: &World) -> Option<CellCoord> {
        world.entities.minotaur
    }

    /// Captures the state of one player.
    #[must_use]
    pub fn player(world: &World, id: PlayerId) -> PlayerSnapshot {
        let player = world.player(id);
        PlayerSnapshot {
            id,
            cell: player.cell,
            alive: player.alive,
            has_key: player.has_key,
            shots_left: player.shots_left,
        }
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(world: &World) -> PlayerId {
        world.current
    }

    /// Reports whether a portal already relocated the current player this turn.
    #[must_use]
    pub fn teleported_this_turn(world: &World) -> bool {
        world.teleported_this_turn
    }

    /// Ordered portal groups of one topology.
    #[must_use]
    pub fn portal_groups(world: &World, topology: PortalTopology) -> &[PortalGroup] {
        world.portals.groups(topology)
    }

    /// Portal slot occupying the cell, if any.
    #[must_use]
    pub fn portal_at(world: &World, cell: CellCoord) -> Option<PortalRef> {
        world.portals.portal_at(cell)
    }

    /// Slot the next portal tool placement of the topology will fill.
    #[must_use]
    pub fn portal_cursor(world: &World, topology: PortalTopology) -> PortalRef {
        world.cursors.get(topology)
    }

    /// Terminal outcome, once the game is over.
    #[must_use]
    pub fn outcome(world: &World) -> Option<GameOutcome> {
        world.outcome
    }

    /// Stored game-over message, once the game is over.
    #[must_use]
    pub fn game_over_message(world: &World) -> Option<String> {
        world.outcome.map(|outcome| outcome.to_string())
    }

    /// Requirements for play that the current layout does not satisfy yet.
    #[must_use]
    pub fn missing_requirements(world: &World) -> Vec<Requirement> {
        placement::missing_requirements(world)
    }

    /// Immutable representation of a single player's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PlayerSnapshot {
        /// Identifier of the player.
        pub id: PlayerId,
        /// Cell occupied by the player, `None` while unplaced.
        pub cell: Option<CellCoord>,
        /// Whether the player still takes part in the game.
        pub alive: bool,
        /// Whether the player carries the key.
        pub has_key: bool,
        /// Shots the player has left.
        pub shots_left: u32,
    }
}
