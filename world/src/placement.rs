//! Placement-phase mutations: board setup, walls, entities, portals and readiness.

use labyrinth_core::{
    CellCoord, Edge, Event, GameMode, PlacementError, PlacementTool, PlayerId, PortalRef,
    PortalTopology, Requirement,
};

use crate::{board::Board, portals::PortalError, Entities, Player, World};

/// Next slot the pair and cycle portal tools will fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PortalCursors {
    pair: PortalRef,
    cycle: PortalRef,
}

impl PortalCursors {
    pub(crate) const fn new() -> Self {
        Self {
            pair: PortalRef::new(PortalTopology::Pair, 0, 0),
            cycle: PortalRef::new(PortalTopology::Cycle, 0, 0),
        }
    }

    pub(crate) const fn get(&self, topology: PortalTopology) -> PortalRef {
        match topology {
            PortalTopology::Pair => self.pair,
            PortalTopology::Cycle => self.cycle,
        }
    }

    /// Moves the cursor to the following slot, wrapping into a new group.
    fn advance(&mut self, topology: PortalTopology) {
        let cursor = match topology {
            PortalTopology::Pair => &mut self.pair,
            PortalTopology::Cycle => &mut self.cycle,
        };
        cursor.slot += 1;
        if cursor.slot >= topology.arity() {
            cursor.slot = 0;
            cursor.group += 1;
        }
    }

    /// Moves the cursor past an explicitly filled slot at or beyond it.
    fn follow(&mut self, portal: PortalRef) {
        let cursor = self.get(portal.topology);
        if (portal.group, portal.slot) < (cursor.group, cursor.slot) {
            return;
        }
        match portal.topology {
            PortalTopology::Pair => self.pair = portal,
            PortalTopology::Cycle => self.cycle = portal,
        }
        self.advance(portal.topology);
    }
}

pub(crate) fn configure_board(world: &mut World, size: u32, out_events: &mut Vec<Event>) {
    let Some(board) = Board::new(size) else {
        out_events.push(Event::BoardRejected { size });
        return;
    };

    world.board = Some(board);
    reset_layout(world);
    out_events.push(Event::BoardConfigured { size });
}

pub(crate) fn clear_entities(world: &mut World, out_events: &mut Vec<Event>) {
    reset_layout(world);
    out_events.push(Event::EntitiesCleared);
}

pub(crate) fn set_game_mode(world: &mut World, mode: GameMode, out_events: &mut Vec<Event>) {
    if mode != GameMode::Play {
        world.mode = mode;
        out_events.push(Event::GameModeChanged { mode });
        return;
    }

    let missing = missing_requirements(world);
    if !missing.is_empty() {
        out_events.push(Event::PlayRejected { missing });
        world.mode = GameMode::BuildMaze;
        out_events.push(Event::GameModeChanged {
            mode: GameMode::BuildMaze,
        });
        return;
    }

    reset_run_state(world);
    world.mode = GameMode::Play;
    out_events.push(Event::GameModeChanged { mode });
    out_events.push(Event::TurnStarted {
        player: world.current,
        shots_left: world.player(world.current).shots_left,
    });
}

pub(crate) fn toggle_wall(world: &mut World, edge: Edge, out_events: &mut Vec<Event>) {
    let mode = world.mode;
    let Some(board) = world.board.as_mut() else {
        return;
    };

    if mode != GameMode::BuildMaze {
        out_events.push(Event::WallToggleRejected {
            edge,
            reason: PlacementError::InvalidMode,
        });
        return;
    }

    match board.toggle_wall(edge) {
        Some(present) => out_events.push(Event::WallToggled { edge, present }),
        None => out_events.push(Event::WallToggleRejected {
            edge,
            reason: PlacementError::OutOfBounds,
        }),
    }
}

pub(crate) fn place(
    world: &mut World,
    tool: PlacementTool,
    cell: CellCoord,
    out_events: &mut Vec<Event>,
) {
    if world.board.is_none() {
        return;
    }

    if let Err(reason) = validate(world, tool, cell) {
        out_events.push(Event::PlacementRejected { tool, cell, reason });
        return;
    }

    if let Some(topology) = tool.portal_topology() {
        let portal = world.cursors.get(topology);
        match world.portals.place(portal, cell) {
            Ok(()) => {
                world.cursors.advance(topology);
                out_events.push(Event::PortalPlaced { portal, cell });
            }
            Err(_) => out_events.push(Event::PlacementRejected {
                tool,
                cell,
                reason: PlacementError::OccupiedByPortal,
            }),
        }
        return;
    }

    match tool {
        PlacementTool::Key => world.entities.key = Some(cell),
        PlacementTool::Exit => world.entities.exit = Some(cell),
        PlacementTool::Hospital => world.entities.hospital = Some(cell),
        PlacementTool::Minotaur => world.entities.minotaur = Some(cell),
        PlacementTool::PlayerOne | PlacementTool::PlayerTwo => {
            if let Some(id) = tool.player() {
                let player = world.player_mut(id);
                player.cell = Some(cell);
                player.alive = true;
            }
        }
        PlacementTool::PortalPair | PlacementTool::PortalCycle => return,
    }
    out_events.push(Event::EntityPlaced { tool, cell });
}

pub(crate) fn place_portal(
    world: &mut World,
    portal: PortalRef,
    cell: CellCoord,
    out_events: &mut Vec<Event>,
) {
    if world.board.is_none() {
        return;
    }

    let tool = portal.topology.tool();
    let outcome = validate(world, tool, cell).and_then(|()| {
        world.portals.place(portal, cell).map_err(|error| match error {
            PortalError::Occupied => PlacementError::OccupiedByPortal,
            PortalError::UnknownGroup | PortalError::InvalidSlot => {
                PlacementError::InvalidPortalSlot
            }
        })
    });

    match outcome {
        Ok(()) => {
            world.cursors.follow(portal);
            out_events.push(Event::PortalPlaced { portal, cell });
        }
        Err(reason) => out_events.push(Event::PlacementRejected { tool, cell, reason }),
    }
}

pub(crate) fn erase(world: &mut World, cell: CellCoord, out_events: &mut Vec<Event>) {
    let Some(board) = world.board.as_ref() else {
        return;
    };

    let rejection = if world.mode != GameMode::PlaceEntities {
        Some(PlacementError::InvalidMode)
    } else if !board.contains(cell) {
        Some(PlacementError::OutOfBounds)
    } else {
        None
    };
    if let Some(reason) = rejection {
        out_events.push(Event::EraseRejected { cell, reason });
        return;
    }

    let _ = world.portals.remove_at(cell);
    let entities = &mut world.entities;
    for slot in [
        &mut entities.key,
        &mut entities.exit,
        &mut entities.hospital,
        &mut entities.minotaur,
    ] {
        if *slot == Some(cell) {
            *slot = None;
        }
    }
    for player in &mut world.players {
        if player.cell == Some(cell) {
            player.cell = None;
            player.has_key = false;
        }
    }

    out_events.push(Event::CellErased { cell });
}

/// Checks the mode and the mutual-exclusion rules for placing `tool` on `cell`.
fn validate(world: &World, tool: PlacementTool, cell: CellCoord) -> Result<(), PlacementError> {
    if world.mode != GameMode::PlaceEntities {
        return Err(PlacementError::InvalidMode);
    }
    if !world.board.as_ref().is_some_and(|board| board.contains(cell)) {
        return Err(PlacementError::OutOfBounds);
    }

    let entities = &world.entities;
    let has_key = entities.key == Some(cell);
    let has_exit = entities.exit == Some(cell);
    let has_hospital = entities.hospital == Some(cell);
    let has_minotaur = entities.minotaur == Some(cell);
    let has_player = world.players.iter().any(|player| player.cell == Some(cell));

    if tool.portal_topology().is_some() {
        if has_key || has_exit || has_hospital || has_minotaur || has_player {
            return Err(PlacementError::OccupiedByEntity);
        }
        return Ok(());
    }
    if world.portals.contains(cell) {
        return Err(PlacementError::OccupiedByPortal);
    }

    let special_conflict = match tool {
        PlacementTool::Key => has_exit || has_hospital,
        PlacementTool::Exit => has_key || has_hospital,
        PlacementTool::Hospital => has_key || has_exit,
        _ => false,
    };
    if special_conflict {
        return Err(PlacementError::SpecialConflict);
    }

    let places_player = tool.player().is_some();
    if (tool == PlacementTool::Minotaur && has_player) || (places_player && has_minotaur) {
        return Err(PlacementError::MinotaurConflict);
    }
    if places_player && has_key {
        return Err(PlacementError::PlayerOnKey);
    }

    Ok(())
}

/// Layout elements still missing before play may start, in checking order.
pub(crate) fn missing_requirements(world: &World) -> Vec<Requirement> {
    let entities = &world.entities;
    let checks = [
        (Requirement::Board, world.board.is_some()),
        (Requirement::Exit, entities.exit.is_some()),
        (Requirement::Key, entities.key.is_some()),
        (Requirement::Hospital, entities.hospital.is_some()),
        (Requirement::Minotaur, entities.minotaur.is_some()),
        (
            Requirement::PlayerOne,
            world.player(PlayerId::One).cell.is_some(),
        ),
        (
            Requirement::PlayerTwo,
            world.player(PlayerId::Two).cell.is_some(),
        ),
    ];
    checks
        .into_iter()
        .filter_map(|(requirement, present)| (!present).then_some(requirement))
        .collect()
}

/// Clears every placement and the run state, keeping the board and its walls.
fn reset_layout(world: &mut World) {
    let shots = world.config.starting_shots();
    world.entities = Entities::default();
    world.players = [Player::new(shots), Player::new(shots)];
    world.portals.clear();
    world.cursors = PortalCursors::new();
    world.current = PlayerId::One;
    world.teleported_this_turn = false;
    world.outcome = None;
}

/// Prepares the placed layout for a fresh match.
fn reset_run_state(world: &mut World) {
    let shots = world.config.starting_shots();
    world.outcome = None;
    world.current = PlayerId::One;
    world.teleported_this_turn = false;
    for player in &mut world.players {
        player.shots_left = shots;
        player.has_key = false;
        player.alive = true;
    }
}
