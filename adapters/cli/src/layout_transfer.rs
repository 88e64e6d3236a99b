//! Single-line maze layout strings for sharing boards between sessions.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use labyrinth_core::{
    CellCoord, Command, Edge, GameMode, PlacementTool, PlayerId, PortalRef, PortalTopology,
    MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
use labyrinth_world::{query, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const LAYOUT_DOMAIN: &str = "labyrinth";
const LAYOUT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded layout payload.
pub(crate) const LAYOUT_HEADER: &str = "labyrinth:v1";
/// Delimiter used to separate the prefix, board dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Walls, entities, players and portals of a board, without any run state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LayoutSnapshot {
    /// Number of cells along each edge of the board.
    pub(crate) size: u32,
    /// Placements captured from the board.
    pub(crate) layout: Layout,
}

/// Serialised body of a layout string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Layout {
    pub(crate) walls: Vec<Edge>,
    pub(crate) key: Option<CellCoord>,
    pub(crate) exit: Option<CellCoord>,
    pub(crate) hospital: Option<CellCoord>,
    pub(crate) minotaur: Option<CellCoord>,
    pub(crate) players: [Option<CellCoord>; 2],
    pub(crate) pair_portals: Vec<Vec<Option<CellCoord>>>,
    pub(crate) cycle_portals: Vec<Vec<Option<CellCoord>>>,
}

impl LayoutSnapshot {
    /// Captures the current layout, or `None` when no board is configured.
    pub(crate) fn capture(world: &World) -> Option<Self> {
        let board = query::board(world)?;
        let groups = |topology: PortalTopology| -> Vec<Vec<Option<CellCoord>>> {
            query::portal_groups(world, topology)
                .iter()
                .map(|group| group.slots().to_vec())
                .collect()
        };

        Some(Self {
            size: board.size(),
            layout: Layout {
                walls: board.walls().collect(),
                key: query::key_cell(world),
                exit: query::exit_cell(world),
                hospital: query::hospital_cell(world),
                minotaur: query::minotaur_cell(world),
                players: PlayerId::ALL.map(|id| query::player(world, id).cell),
                pair_portals: groups(PortalTopology::Pair),
                cycle_portals: groups(PortalTopology::Cycle),
            },
        })
    }

    /// Command batch that rebuilds the layout on a fresh board.
    ///
    /// The batch leaves the world in entity placement mode.
    pub(crate) fn commands(&self) -> Vec<Command> {
        let layout = &self.layout;
        let mut commands = vec![
            Command::ConfigureBoard { size: self.size },
            Command::SetGameMode {
                mode: GameMode::BuildMaze,
            },
        ];
        commands.extend(
            layout
                .walls
                .iter()
                .map(|&edge| Command::ToggleWall { edge }),
        );
        commands.push(Command::SetGameMode {
            mode: GameMode::PlaceEntities,
        });

        let entities = [
            (PlacementTool::Key, layout.key),
            (PlacementTool::Exit, layout.exit),
            (PlacementTool::Hospital, layout.hospital),
            (PlacementTool::Minotaur, layout.minotaur),
            (PlacementTool::PlayerOne, layout.players[0]),
            (PlacementTool::PlayerTwo, layout.players[1]),
        ];
        commands.extend(
            entities
                .into_iter()
                .filter_map(|(tool, cell)| cell.map(|cell| Command::Place { tool, cell })),
        );

        for (topology, groups) in [
            (PortalTopology::Pair, &layout.pair_portals),
            (PortalTopology::Cycle, &layout.cycle_portals),
        ] {
            for (group, slots) in groups.iter().enumerate() {
                for (slot, cell) in slots.iter().enumerate() {
                    if let Some(cell) = *cell {
                        commands.push(Command::PlacePortal {
                            portal: PortalRef::new(topology, group, slot),
                            cell,
                        });
                    }
                }
            }
        }

        commands
    }

    /// Encodes the snapshot into a single-line string suitable for clipboard transfer.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        let json = serde_json::to_vec(&self.layout).map_err(LayoutTransferError::Serialize)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{LAYOUT_HEADER}:{size}x{size}:{encoded}",
            size = self.size
        ))
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let dimensions = parts
            .next()
            .ok_or(LayoutTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != LAYOUT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != LAYOUT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let size = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let layout: Layout =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        Ok(Self { size, layout })
    }
}

/// Errors that can occur while encoding or decoding layout transfer strings.
#[derive(Debug, Error)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("layout string was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded layout.
    #[error("layout string is missing the prefix")]
    MissingPrefix,
    /// The encoded layout did not contain a version segment.
    #[error("layout string is missing the version")]
    MissingVersion,
    /// The encoded layout did not include board dimensions.
    #[error("layout string is missing the board dimensions")]
    MissingDimensions,
    /// The encoded layout did not include the payload segment.
    #[error("layout string is missing the payload")]
    MissingPayload,
    /// The encoded layout used an unexpected prefix segment.
    #[error("layout prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded layout used an unsupported version identifier.
    #[error("layout version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The board dimensions were malformed, not square or out of range.
    #[error("could not parse board dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode layout payload")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse layout payload")]
    InvalidPayload(#[source] serde_json::Error),
    /// The layout could not be serialised.
    #[error("could not serialise layout")]
    Serialize(#[source] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<u32, LayoutTransferError> {
    let invalid = || LayoutTransferError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;

    if columns != rows || !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&columns) {
        return Err(invalid());
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_core::Event;
    use labyrinth_world::apply;

    fn populated_world() -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::ConfigureBoard { size: 5 }, &mut events);
        for edge in [Edge::vertical(1, 1), Edge::horizontal(3, 2)] {
            apply(&mut world, Command::ToggleWall { edge }, &mut events);
        }
        apply(
            &mut world,
            Command::SetGameMode {
                mode: GameMode::PlaceEntities,
            },
            &mut events,
        );
        for (tool, column, row) in [
            (PlacementTool::Key, 4, 4),
            (PlacementTool::Exit, 0, 0),
            (PlacementTool::Hospital, 4, 0),
            (PlacementTool::Minotaur, 2, 2),
            (PlacementTool::PlayerOne, 0, 4),
            (PlacementTool::PlayerTwo, 1, 0),
            (PlacementTool::PortalPair, 1, 1),
            (PlacementTool::PortalPair, 3, 3),
            (PlacementTool::PortalCycle, 0, 2),
        ] {
            let cell = CellCoord::new(column, row);
            apply(&mut world, Command::Place { tool, cell }, &mut events);
        }
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::PlacementRejected { .. })));
        world
    }

    #[test]
    fn captured_layout_survives_transfer_and_replay() {
        let world = populated_world();
        let snapshot = LayoutSnapshot::capture(&world).expect("board present");

        let encoded = snapshot.encode().expect("layout encodes");
        assert!(encoded.starts_with(&format!("{LAYOUT_HEADER}:5x5:")));
        let decoded = LayoutSnapshot::decode(&encoded).expect("layout decodes");
        assert_eq!(decoded, snapshot);

        let mut rebuilt = World::new();
        let mut events = Vec::new();
        for command in decoded.commands() {
            apply(&mut rebuilt, command, &mut events);
        }
        assert_eq!(LayoutSnapshot::capture(&rebuilt), Some(snapshot));
        assert_eq!(query::game_mode(&rebuilt), GameMode::PlaceEntities);
    }

    #[test]
    fn capture_requires_a_board() {
        assert_eq!(LayoutSnapshot::capture(&World::new()), None);
    }

    #[test]
    fn replay_preserves_incomplete_portal_groups() {
        let snapshot = LayoutSnapshot {
            size: 4,
            layout: Layout {
                cycle_portals: vec![vec![None, Some(CellCoord::new(2, 2)), None]],
                ..Layout::default()
            },
        };

        let commands = snapshot.commands();

        assert_eq!(
            commands.last(),
            Some(&Command::PlacePortal {
                portal: PortalRef::new(PortalTopology::Cycle, 0, 1),
                cell: CellCoord::new(2, 2),
            })
        );
    }

    #[test]
    fn decode_rejects_malformed_strings() {
        assert!(matches!(
            LayoutSnapshot::decode("   "),
            Err(LayoutTransferError::EmptyPayload)
        ));
        assert!(matches!(
            LayoutSnapshot::decode("maze:v1:4x4:e30"),
            Err(LayoutTransferError::InvalidPrefix(prefix)) if prefix == "maze"
        ));
        assert!(matches!(
            LayoutSnapshot::decode("labyrinth:v2:4x4:e30"),
            Err(LayoutTransferError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            LayoutSnapshot::decode("labyrinth:v1:4x5:e30"),
            Err(LayoutTransferError::InvalidDimensions(_))
        ));
        assert!(matches!(
            LayoutSnapshot::decode("labyrinth:v1:1x1:e30"),
            Err(LayoutTransferError::InvalidDimensions(_))
        ));
        assert!(matches!(
            LayoutSnapshot::decode("labyrinth:v1:4x4"),
            Err(LayoutTransferError::MissingPayload)
        ));
        assert!(matches!(
            LayoutSnapshot::decode("labyrinth:v1:4x4:!!!"),
            Err(LayoutTransferError::InvalidEncoding(_))
        ));
        assert!(matches!(
            LayoutSnapshot::decode("labyrinth:v1:4x4:bm90IGpzb24"),
            Err(LayoutTransferError::InvalidPayload(_))
        ));
    }
}
