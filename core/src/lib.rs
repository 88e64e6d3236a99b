#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Labyrinth engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! happened. Every event renders as a single human-readable status line via
//! its [`fmt::Display`] implementation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Labyrinth.";

/// Number of shots each player starts a match with unless configured otherwise.
pub const DEFAULT_STARTING_SHOTS: u32 = 2;

/// Smallest board edge length accepted by the world.
pub const MIN_BOARD_SIZE: u32 = 2;

/// Largest board edge length accepted by the world.
pub const MAX_BOARD_SIZE: u32 = 64;

/// Describes the active interaction mode of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Editor mode in which walls between cells are toggled.
    BuildMaze,
    /// Editor mode in which entities, players and portals are placed.
    PlaceEntities,
    /// Turn-based play between the two players.
    Play,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BuildMaze => "BUILD_MAZE",
            Self::PlaceEntities => "PLACE_ENTITIES",
            Self::Play => "PLAY",
        };
        f.write_str(label)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the board with an empty one and clears every placement.
    ConfigureBoard {
        /// Number of cells along each edge of the square board.
        size: u32,
    },
    /// Removes entities, players and portals while keeping the walls.
    ClearEntities,
    /// Requests a transition to the provided game mode.
    SetGameMode {
        /// Mode the world should activate.
        mode: GameMode,
    },
    /// Flips the wall stored at the provided edge.
    ToggleWall {
        /// Edge whose wall bit should be flipped.
        edge: Edge,
    },
    /// Places the entity selected by the tool onto a cell.
    ///
    /// Portal tools fill the slot addressed by the world's placement cursor
    /// for that topology.
    Place {
        /// Tool describing what is being placed.
        tool: PlacementTool,
        /// Cell receiving the placement.
        cell: CellCoord,
    },
    /// Places a portal into an explicit group slot, bypassing the cursor.
    PlacePortal {
        /// Group slot that should hold the portal.
        portal: PortalRef,
        /// Cell receiving the portal.
        cell: CellCoord,
    },
    /// Removes every portal, entity and player occupying the cell.
    Erase {
        /// Cell that should be cleared.
        cell: CellCoord,
    },
    /// Moves the current player a single cell.
    Move {
        /// Direction of travel.
        direction: Direction,
    },
    /// Fires a shot from the current player's cell in a straight line.
    Shoot {
        /// Direction of the shot.
        direction: Direction,
    },
    /// Performs a melee attack against an explicit target cell.
    Knife {
        /// Cell that is attacked.
        target: CellCoord,
        /// Describes how the target cell relates to the attacker.
        reach: KnifeReach,
    },
    /// Finishes the current player's turn.
    EndTurn,
    /// Reports why the current player forfeits the action and ends the turn.
    SkipTurn {
        /// Reason reported for the skipped turn.
        reason: SkipReason,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a fresh board was created.
    BoardConfigured {
        /// Edge length of the new board.
        size: u32,
    },
    /// Reports that a board configuration request was rejected.
    BoardRejected {
        /// Requested edge length.
        size: u32,
    },
    /// Confirms that entities, players and portals were cleared.
    EntitiesCleared,
    /// Announces that the world entered a new game mode.
    GameModeChanged {
        /// Mode that became active.
        mode: GameMode,
    },
    /// Reports that play could not start because the layout is incomplete.
    PlayRejected {
        /// Requirements that are not yet satisfied, in checking order.
        missing: Vec<Requirement>,
    },
    /// Confirms that a wall was toggled.
    WallToggled {
        /// Edge that was flipped.
        edge: Edge,
        /// Whether a wall is present after the toggle.
        present: bool,
    },
    /// Reports that a wall toggle request was rejected.
    WallToggleRejected {
        /// Edge addressed by the request.
        edge: Edge,
        /// Specific reason the toggle failed.
        reason: PlacementError,
    },
    /// Confirms that an entity or player was placed.
    EntityPlaced {
        /// Tool used for the placement.
        tool: PlacementTool,
        /// Cell that received the placement.
        cell: CellCoord,
    },
    /// Confirms that a portal was placed into a group slot.
    PortalPlaced {
        /// Group slot that now holds the portal.
        portal: PortalRef,
        /// Cell that received the portal.
        cell: CellCoord,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Tool used for the attempted placement.
        tool: PlacementTool,
        /// Cell addressed by the request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that an erase request was rejected.
    EraseRejected {
        /// Cell addressed by the request.
        cell: CellCoord,
        /// Specific reason the erase failed.
        reason: PlacementError,
    },
    /// Confirms that a cell was erased.
    CellErased {
        /// Cell that was cleared.
        cell: CellCoord,
    },
    /// Reports that the acting player has no position on the board.
    PlayerUnplaced {
        /// Player that attempted to act.
        player: PlayerId,
    },
    /// Reports that a move was blocked by a wall or the board border.
    MoveBlocked {
        /// Player that attempted to move.
        player: PlayerId,
    },
    /// Confirms that a player stepped into an adjacent cell.
    PlayerMoved {
        /// Player that moved.
        player: PlayerId,
        /// Cell occupied before the step.
        from: CellCoord,
        /// Cell occupied after the step.
        to: CellCoord,
    },
    /// Confirms that a portal relocated a player.
    Teleported {
        /// Player that was relocated.
        player: PlayerId,
        /// Point in the turn at which the portal resolved.
        trigger: TeleportTrigger,
        /// Portal cell the player stood on.
        from: CellCoord,
        /// Destination cell.
        to: CellCoord,
    },
    /// Confirms that a player picked up the key.
    KeyPickedUp {
        /// Player now carrying the key.
        player: PlayerId,
        /// Cell the key was lifted from.
        cell: CellCoord,
    },
    /// Reports that a player reached the exit without the key.
    NeedKey {
        /// Player standing on the exit.
        player: PlayerId,
    },
    /// Reports that a player was defeated.
    PlayerKilled {
        /// Player that was defeated.
        victim: PlayerId,
        /// Cell where the player was defeated.
        cell: CellCoord,
        /// What defeated the player.
        cause: DeathCause,
        /// Hospital cell the player respawned at, or `None` when eliminated.
        respawn: Option<CellCoord>,
    },
    /// Reports that the minotaur was destroyed.
    MinotaurKilled {
        /// Player that destroyed the minotaur.
        by: PlayerId,
        /// Weapon that was used.
        weapon: Weapon,
        /// Cell the minotaur occupied.
        cell: CellCoord,
    },
    /// Reports that a shot hit nothing.
    ShotMissed {
        /// Player that fired.
        player: PlayerId,
        /// Shots remaining after the attempt.
        shots_left: u32,
    },
    /// Reports that a shot was refused because no ammunition remains.
    OutOfShots {
        /// Player that attempted to fire.
        player: PlayerId,
    },
    /// Reports that a knife attack found nothing to hit.
    NoKnifeTarget {
        /// Player that attacked.
        player: PlayerId,
        /// Describes the attacked cell relative to the attacker.
        reach: KnifeReach,
    },
    /// Reports that a player forfeited the action for the turn.
    TurnSkipped {
        /// Player whose turn was skipped.
        player: PlayerId,
        /// Reason for the skip.
        reason: SkipReason,
    },
    /// Announces the player who acts next.
    TurnStarted {
        /// Player whose turn begins.
        player: PlayerId,
        /// Shots that player has left.
        shots_left: u32,
    },
    /// Announces that the game ended.
    GameEnded {
        /// Terminal outcome of the game.
        outcome: GameOutcome,
    },
    /// Reports that an action was refused because the game already ended.
    GameAlreadyOver {
        /// Terminal outcome stored by the world.
        outcome: GameOutcome,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoardConfigured { size } => write!(f, "Board created: {size} x {size}"),
            Self::BoardRejected { size } => write!(
                f,
                "Board size {size} is not supported (expected {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE})"
            ),
            Self::EntitiesCleared => f.write_str("Entities cleared"),
            Self::GameModeChanged { mode } => write!(f, "Mode: {mode}"),
            Self::PlayRejected { missing } => {
                f.write_str("Not ready for play, missing:")?;
                for (index, requirement) in missing.iter().enumerate() {
                    let separator = if index == 0 { " " } else { ", " };
                    write!(f, "{separator}{requirement}")?;
                }
                Ok(())
            }
            Self::WallToggled { edge, present } => {
                let state = if *present { "ON" } else { "OFF" };
                write!(f, "Wall toggled: {edge} -> {state}")
            }
            Self::WallToggleRejected { edge, reason } => {
                write!(f, "Cannot toggle wall {edge}: {reason}")
            }
            Self::EntityPlaced { tool, cell } => write!(f, "Placed {tool} at {cell}"),
            Self::PortalPlaced { portal, cell } => write!(
                f,
                "Placed {} group {} index {} at {cell}",
                portal.topology.tool(),
                portal.group,
                portal.slot
            ),
            Self::PlacementRejected { tool, cell, reason } => {
                write!(f, "Cannot place {tool} at {cell}: {reason}")
            }
            Self::EraseRejected { cell, reason } => write!(f, "Cannot erase {cell}: {reason}"),
            Self::CellErased { cell } => write!(f, "Erased at cell: {cell}"),
            Self::PlayerUnplaced { player } => write!(f, "{player} has no starting position"),
            Self::MoveBlocked { player } => write!(f, "Blocked by wall/border. {player}"),
            Self::PlayerMoved { player, from, to } => write!(f, "{player} moved {from} -> {to}"),
            Self::Teleported {
                player,
                trigger,
                to,
                ..
            } => write!(f, "{player} portal ({trigger}) -> {to}"),
            Self::KeyPickedUp { player, .. } => write!(f, "{player} picked up KEY"),
            Self::NeedKey { .. } => f.write_str("Need KEY to exit!"),
            Self::PlayerKilled {
                victim,
                cell,
                cause,
                respawn,
            } => {
                match cause {
                    DeathCause::Minotaur => write!(f, "{victim} died (MINOTAUR)")?,
                    DeathCause::Attack {
                        by,
                        weapon: Weapon::Gun,
                    } => write!(f, "{by} shot player at {cell}")?,
                    DeathCause::Attack {
                        by,
                        weapon: Weapon::Knife { reach },
                    } => write!(f, "{by} knifed player {reach} at {cell}")?,
                }
                match respawn {
                    Some(hospital) => write!(f, " -> respawn to HOSPITAL {hospital}"),
                    None => f.write_str(" -> NO HOSPITAL (player removed)"),
                }
            }
            Self::MinotaurKilled { by, weapon, cell } => match weapon {
                Weapon::Gun => write!(f, "{by} shot MINOTAUR at {cell}"),
                Weapon::Knife { reach } => write!(f, "{by} knifed MINOTAUR {reach} at {cell}"),
            },
            Self::ShotMissed { player, shots_left } => {
                write!(f, "{player} shot: MISS (shots left {shots_left})")
            }
            Self::OutOfShots { player } => write!(f, "{player}: no shots left"),
            Self::NoKnifeTarget { player, reach } => write!(f, "{player} knife: no target {reach}"),
            Self::TurnSkipped { player, reason } => match reason {
                SkipReason::Voluntary => write!(f, "{player} skipped"),
                SkipReason::KnifeBlocked => f.write_str("Knife blocked by wall/border"),
            },
            Self::TurnStarted { player, shots_left } => {
                write!(f, "Turn: {player} (shots {shots_left})")
            }
            Self::GameEnded { outcome } | Self::GameAlreadyOver { outcome } => {
                write!(f, "{outcome}")
            }
        }
    }
}

/// Cardinal movement directions available on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a fixed order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Location of a single board cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.column, self.row)
    }
}

/// Orientation of a wall segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallOrientation {
    /// Wall between `(column, row)` and `(column + 1, row)`.
    Vertical,
    /// Wall between `(column, row)` and `(column, row + 1)`.
    Horizontal,
}

/// Wall location between two adjacent cells.
///
/// Vertical edges are valid for `column < size - 1` and `row < size`,
/// horizontal edges for `column < size` and `row < size - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    orientation: WallOrientation,
    column: u32,
    row: u32,
}

impl Edge {
    /// Creates an edge with an explicit orientation.
    #[must_use]
    pub const fn new(orientation: WallOrientation, column: u32, row: u32) -> Self {
        Self {
            orientation,
            column,
            row,
        }
    }

    /// Wall between `(column, row)` and `(column + 1, row)`.
    #[must_use]
    pub const fn vertical(column: u32, row: u32) -> Self {
        Self::new(WallOrientation::Vertical, column, row)
    }

    /// Wall between `(column, row)` and `(column, row + 1)`.
    #[must_use]
    pub const fn horizontal(column: u32, row: u32) -> Self {
        Self::new(WallOrientation::Horizontal, column, row)
    }

    /// Orientation of the wall segment.
    #[must_use]
    pub const fn orientation(&self) -> WallOrientation {
        self.orientation
    }

    /// Column index of the segment.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Row index of the segment.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let orientation = match self.orientation {
            WallOrientation::Vertical => "VERTICAL",
            WallOrientation::Horizontal => "HORIZONTAL",
        };
        write!(f, "{orientation}({},{})", self.column, self.row)
    }
}

/// Identifies one of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    /// The player who moves first.
    One,
    /// The player who moves second.
    Two,
}

impl PlayerId {
    /// Both players in turn order.
    pub const ALL: [PlayerId; 2] = [Self::One, Self::Two];

    /// The opposing player.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Index of the player inside two-element arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// Placement tool that positions this player.
    #[must_use]
    pub const fn tool(self) -> PlacementTool {
        match self {
            Self::One => PlacementTool::PlayerOne,
            Self::Two => PlacementTool::PlayerTwo,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = match self {
            Self::One => 1,
            Self::Two => 2,
        };
        write!(f, "Player {number}")
    }
}

/// Teleport topology of a portal group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PortalTopology {
    /// Two linked portals; entering either leads to the other.
    Pair,
    /// Three portals in a ring; slot `i` leads to slot `(i + 1) mod 3`.
    Cycle,
}

impl PortalTopology {
    /// Both topologies in a fixed order.
    pub const ALL: [PortalTopology; 2] = [Self::Pair, Self::Cycle];

    /// Number of slots in each group of this topology.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Pair => 2,
            Self::Cycle => 3,
        }
    }

    /// Placement tool that places portals of this topology.
    #[must_use]
    pub const fn tool(self) -> PlacementTool {
        match self {
            Self::Pair => PlacementTool::PortalPair,
            Self::Cycle => PlacementTool::PortalCycle,
        }
    }
}

/// Reference to a portal slot inside the portal network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortalRef {
    /// Topology of the group that owns the slot.
    pub topology: PortalTopology,
    /// Index of the group within its topology.
    pub group: usize,
    /// Index of the slot within the group.
    pub slot: usize,
}

impl PortalRef {
    /// Creates a new portal reference.
    #[must_use]
    pub const fn new(topology: PortalTopology, group: usize, slot: usize) -> Self {
        Self {
            topology,
            group,
            slot,
        }
    }
}

/// Things an editor may place on the board, in tool progression order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementTool {
    /// The key required to open the exit.
    Key,
    /// The exit cell.
    Exit,
    /// The hospital where defeated players respawn.
    Hospital,
    /// The minotaur that kills players on contact.
    Minotaur,
    /// Starting cell of the first player.
    PlayerOne,
    /// Starting cell of the second player.
    PlayerTwo,
    /// Next slot of the pair portal cursor.
    PortalPair,
    /// Next slot of the cycle portal cursor.
    PortalCycle,
}

impl PlacementTool {
    /// Every tool in progression order.
    pub const ALL: [PlacementTool; 8] = [
        Self::Key,
        Self::Exit,
        Self::Hospital,
        Self::Minotaur,
        Self::PlayerOne,
        Self::PlayerTwo,
        Self::PortalPair,
        Self::PortalCycle,
    ];

    /// Tool that follows this one, staying on the last tool.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Key => Self::Exit,
            Self::Exit => Self::Hospital,
            Self::Hospital => Self::Minotaur,
            Self::Minotaur => Self::PlayerOne,
            Self::PlayerOne => Self::PlayerTwo,
            Self::PlayerTwo => Self::PortalPair,
            Self::PortalPair | Self::PortalCycle => Self::PortalCycle,
        }
    }

    /// Portal topology placed by the tool, if it is a portal tool.
    #[must_use]
    pub const fn portal_topology(self) -> Option<PortalTopology> {
        match self {
            Self::PortalPair => Some(PortalTopology::Pair),
            Self::PortalCycle => Some(PortalTopology::Cycle),
            _ => None,
        }
    }

    /// Player positioned by the tool, if it is a player tool.
    #[must_use]
    pub const fn player(self) -> Option<PlayerId> {
        match self {
            Self::PlayerOne => Some(PlayerId::One),
            Self::PlayerTwo => Some(PlayerId::Two),
            _ => None,
        }
    }
}

impl fmt::Display for PlacementTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Key => "KEY",
            Self::Exit => "EXIT",
            Self::Hospital => "HOSPITAL",
            Self::Minotaur => "MINOTAUR",
            Self::PlayerOne => "PLAYER_1",
            Self::PlayerTwo => "PLAYER_2",
            Self::PortalPair => "PORTAL_PAIR",
            Self::PortalCycle => "PORTAL_CYCLE3",
        };
        f.write_str(label)
    }
}

/// Reasons an editor request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The active game mode does not accept this kind of edit.
    InvalidMode,
    /// The addressed cell or edge lies outside the board.
    OutOfBounds,
    /// A portal may not share a cell with an entity or player.
    OccupiedByEntity,
    /// The cell already hosts a portal.
    OccupiedByPortal,
    /// Key, exit and hospital may not share a cell.
    SpecialConflict,
    /// The minotaur may not share a cell with a player.
    MinotaurConflict,
    /// A player may not be placed on the key.
    PlayerOnKey,
    /// The explicit portal slot does not exist.
    InvalidPortalSlot,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::InvalidMode => "not allowed in the current mode",
            Self::OutOfBounds => "outside the board",
            Self::OccupiedByEntity => "portals cannot share a cell with entities or players",
            Self::OccupiedByPortal => "cell is already occupied by a portal",
            Self::SpecialConflict => "key, exit and hospital cannot share a cell",
            Self::MinotaurConflict => "the minotaur cannot share a cell with a player",
            Self::PlayerOnKey => "players cannot be placed on the key",
            Self::InvalidPortalSlot => "no such portal slot",
        };
        f.write_str(reason)
    }
}

/// Layout elements that must exist before play may start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Requirement {
    /// A board has been configured.
    Board,
    /// The exit is placed.
    Exit,
    /// The key is placed.
    Key,
    /// The hospital is placed.
    Hospital,
    /// The minotaur is placed.
    Minotaur,
    /// The first player is placed.
    PlayerOne,
    /// The second player is placed.
    PlayerTwo,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Board => "BOARD",
            Self::Exit => "EXIT",
            Self::Key => "KEY",
            Self::Hospital => "HOSPITAL",
            Self::Minotaur => "MINOTAUR",
            Self::PlayerOne => "PLAYER_1",
            Self::PlayerTwo => "PLAYER_2",
        };
        f.write_str(label)
    }
}

/// Describes where a knife attack lands relative to the attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnifeReach {
    /// The attacker's own cell.
    OwnCell,
    /// A neighbouring cell reachable without crossing a wall.
    Adjacent,
}

impl fmt::Display for KnifeReach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OwnCell => f.write_str("(self)"),
            Self::Adjacent => f.write_str("(adjacent)"),
        }
    }
}

/// Reasons a turn ends without an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// The player chose to pass.
    Voluntary,
    /// An adjacent knife attack was blocked by a wall or the border.
    KnifeBlocked,
}

/// Point in a turn at which a portal may resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TeleportTrigger {
    /// Right after a legal move.
    Landing,
    /// When the turn is handed to the next player.
    EndOfTurn,
}

impl fmt::Display for TeleportTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Landing => f.write_str("landing"),
            Self::EndOfTurn => f.write_str("end-turn"),
        }
    }
}

/// Weapons available to players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weapon {
    /// A straight-line shot.
    Gun,
    /// A melee attack.
    Knife {
        /// Where the attack landed relative to the attacker.
        reach: KnifeReach,
    },
}

/// What defeated a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// The player walked into the minotaur.
    Minotaur,
    /// The opposing player attacked.
    Attack {
        /// Attacking player.
        by: PlayerId,
        /// Weapon used by the attacker.
        weapon: Weapon,
    },
}

/// Terminal result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// A player carried the key to the exit.
    Won(PlayerId),
    /// Both players were eliminated.
    Draw,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won(player) => write!(f, "{player} WIN (exit + key)"),
            Self::Draw => f.write_str("DRAW (no players left)"),
        }
    }
}
