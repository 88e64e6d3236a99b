use labyrinth_core::{
    CellCoord, Command, Edge, Event, GameMode, PlacementError, PlacementTool, PlayerId, PortalRef,
    PortalTopology, Requirement,
};
use labyrinth_world::{apply, query, World};

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, command, &mut events);
    events
}

fn placing_world(size: u32) -> World {
    let mut world = World::new();
    let _ = run(&mut world, Command::ConfigureBoard { size });
    let _ = run(
        &mut world,
        Command::SetGameMode {
            mode: GameMode::PlaceEntities,
        },
    );
    world
}

fn place(world: &mut World, tool: PlacementTool, column: u32, row: u32) -> Vec<Event> {
    run(
        world,
        Command::Place {
            tool,
            cell: CellCoord::new(column, row),
        },
    )
}

fn rejection(events: &[Event]) -> Option<PlacementError> {
    events.iter().find_map(|event| match event {
        Event::PlacementRejected { reason, .. } => Some(*reason),
        _ => None,
    })
}

fn complete_layout(world: &mut World) {
    for (tool, column, row) in [
        (PlacementTool::Key, 3, 3),
        (PlacementTool::Exit, 0, 0),
        (PlacementTool::Hospital, 3, 0),
        (PlacementTool::Minotaur, 2, 2),
        (PlacementTool::PlayerOne, 0, 3),
        (PlacementTool::PlayerTwo, 1, 0),
    ] {
        let events = place(world, tool, column, row);
        assert_eq!(rejection(&events), None, "{tool} should be placeable");
    }
}

#[test]
fn walls_toggle_only_while_building() {
    let mut world = World::new();
    let _ = run(&mut world, Command::ConfigureBoard { size: 4 });
    let edge = Edge::horizontal(1, 1);

    let events = run(&mut world, Command::ToggleWall { edge });
    assert_eq!(
        events,
        vec![Event::WallToggled {
            edge,
            present: true
        }]
    );
    assert_eq!(events[0].to_string(), "Wall toggled: HORIZONTAL(1,1) -> ON");

    let _ = run(
        &mut world,
        Command::SetGameMode {
            mode: GameMode::PlaceEntities,
        },
    );
    let rejected = run(&mut world, Command::ToggleWall { edge });
    assert_eq!(
        rejected,
        vec![Event::WallToggleRejected {
            edge,
            reason: PlacementError::InvalidMode,
        }]
    );
    assert!(query::board(&world).is_some_and(|board| board.has_wall(edge)));
}

#[test]
fn out_of_range_wall_is_rejected() {
    let mut world = World::new();
    let _ = run(&mut world, Command::ConfigureBoard { size: 3 });
    let edge = Edge::vertical(2, 0);

    let events = run(&mut world, Command::ToggleWall { edge });

    assert_eq!(
        events,
        vec![Event::WallToggleRejected {
            edge,
            reason: PlacementError::OutOfBounds,
        }]
    );
}

#[test]
fn placement_requires_entity_mode() {
    let mut world = World::new();
    let _ = run(&mut world, Command::ConfigureBoard { size: 4 });

    let events = place(&mut world, PlacementTool::Key, 1, 1);

    assert_eq!(rejection(&events), Some(PlacementError::InvalidMode));
    assert_eq!(query::key_cell(&world), None);
}

#[test]
fn placement_outside_board_is_rejected() {
    let mut world = placing_world(4);
    let events = place(&mut world, PlacementTool::Exit, 4, 0);
    assert_eq!(rejection(&events), Some(PlacementError::OutOfBounds));
}

#[test]
fn specials_exclude_each_other_but_may_be_replaced_in_place() {
    let mut world = placing_world(4);
    let _ = place(&mut world, PlacementTool::Key, 1, 2);

    let conflict = place(&mut world, PlacementTool::Exit, 1, 2);
    assert_eq!(rejection(&conflict), Some(PlacementError::SpecialConflict));

    let again = place(&mut world, PlacementTool::Key, 1, 2);
    assert_eq!(
        again,
        vec![Event::EntityPlaced {
            tool: PlacementTool::Key,
            cell: CellCoord::new(1, 2),
        }]
    );
    assert_eq!(again[0].to_string(), "Placed KEY at (1,2)");

    let moved = place(&mut world, PlacementTool::Key, 3, 3);
    assert_eq!(rejection(&moved), None);
    assert_eq!(query::key_cell(&world), Some(CellCoord::new(3, 3)));
}

#[test]
fn minotaur_and_players_never_share_a_cell() {
    let mut world = placing_world(4);
    let _ = place(&mut world, PlacementTool::PlayerOne, 0, 0);
    let _ = place(&mut world, PlacementTool::Minotaur, 2, 2);

    assert_eq!(
        rejection(&place(&mut world, PlacementTool::Minotaur, 0, 0)),
        Some(PlacementError::MinotaurConflict)
    );
    assert_eq!(
        rejection(&place(&mut world, PlacementTool::PlayerTwo, 2, 2)),
        Some(PlacementError::MinotaurConflict)
    );
}

#[test]
fn players_cannot_stand_on_the_key() {
    let mut world = placing_world(4);
    let _ = place(&mut world, PlacementTool::Key, 1, 1);

    let events = place(&mut world, PlacementTool::PlayerTwo, 1, 1);

    assert_eq!(rejection(&events), Some(PlacementError::PlayerOnKey));
    assert_eq!(query::player(&world, PlayerId::Two).cell, None);
}

#[test]
fn portals_and_entities_exclude_each_other() {
    let mut world = placing_world(4);
    let _ = place(&mut world, PlacementTool::Hospital, 0, 0);
    let _ = place(&mut world, PlacementTool::PortalPair, 1, 1);

    assert_eq!(
        rejection(&place(&mut world, PlacementTool::PortalPair, 0, 0)),
        Some(PlacementError::OccupiedByEntity)
    );
    assert_eq!(
        rejection(&place(&mut world, PlacementTool::Exit, 1, 1)),
        Some(PlacementError::OccupiedByPortal)
    );
    assert_eq!(
        rejection(&place(&mut world, PlacementTool::PortalCycle, 1, 1)),
        Some(PlacementError::OccupiedByPortal)
    );
}

#[test]
fn portal_tool_fills_cursor_slots_in_order() {
    let mut world = placing_world(4);

    let events: Vec<Event> = [(0, 0), (1, 0), (2, 0)]
        .into_iter()
        .flat_map(|(column, row)| place(&mut world, PlacementTool::PortalPair, column, row))
        .collect();

    assert_eq!(
        events,
        vec![
            Event::PortalPlaced {
                portal: PortalRef::new(PortalTopology::Pair, 0, 0),
                cell: CellCoord::new(0, 0),
            },
            Event::PortalPlaced {
                portal: PortalRef::new(PortalTopology::Pair, 0, 1),
                cell: CellCoord::new(1, 0),
            },
            Event::PortalPlaced {
                portal: PortalRef::new(PortalTopology::Pair, 1, 0),
                cell: CellCoord::new(2, 0),
            },
        ]
    );
    assert_eq!(
        events[2].to_string(),
        "Placed PORTAL_PAIR group 1 index 0 at (2,0)"
    );
    assert_eq!(
        query::portal_cursor(&world, PortalTopology::Pair),
        PortalRef::new(PortalTopology::Pair, 1, 1)
    );
    assert_eq!(query::portal_groups(&world, PortalTopology::Pair).len(), 2);
    assert!(query::portal_groups(&world, PortalTopology::Pair)[0].is_complete());
}

#[test]
fn rejected_portal_does_not_advance_cursor() {
    let mut world = placing_world(4);
    let _ = place(&mut world, PlacementTool::PortalCycle, 1, 1);

    let events = place(&mut world, PlacementTool::PortalCycle, 1, 1);

    assert_eq!(rejection(&events), Some(PlacementError::OccupiedByPortal));
    assert_eq!(
        query::portal_cursor(&world, PortalTopology::Cycle),
        PortalRef::new(PortalTopology::Cycle, 0, 1)
    );
}

#[test]
fn explicit_portal_slots_are_validated() {
    let mut world = placing_world(4);
    let cell = CellCoord::new(2, 2);

    let invalid = run(
        &mut world,
        Command::PlacePortal {
            portal: PortalRef::new(PortalTopology::Pair, 0, 2),
            cell,
        },
    );
    assert_eq!(rejection(&invalid), Some(PlacementError::InvalidPortalSlot));

    let skipped_group = run(
        &mut world,
        Command::PlacePortal {
            portal: PortalRef::new(PortalTopology::Cycle, 1, 0),
            cell,
        },
    );
    assert_eq!(
        rejection(&skipped_group),
        Some(PlacementError::InvalidPortalSlot)
    );

    let portal = PortalRef::new(PortalTopology::Cycle, 0, 2);
    let placed = run(&mut world, Command::PlacePortal { portal, cell });
    assert_eq!(placed, vec![Event::PortalPlaced { portal, cell }]);
    assert_eq!(query::portal_at(&world, cell), Some(portal));
    assert_eq!(
        query::portal_cursor(&world, PortalTopology::Cycle),
        PortalRef::new(PortalTopology::Cycle, 1, 0),
        "the cursor moves past the furthest filled slot",
    );
}

#[test]
fn portal_tool_after_explicit_slots_starts_a_new_group() {
    let mut world = placing_world(4);
    let first = CellCoord::new(0, 0);
    let second = CellCoord::new(3, 3);
    for (slot, cell) in [(0, first), (1, second)] {
        let portal = PortalRef::new(PortalTopology::Pair, 0, slot);
        let events = run(&mut world, Command::PlacePortal { portal, cell });
        assert_eq!(events, vec![Event::PortalPlaced { portal, cell }]);
    }

    let events = place(&mut world, PlacementTool::PortalPair, 1, 2);

    assert_eq!(
        events,
        vec![Event::PortalPlaced {
            portal: PortalRef::new(PortalTopology::Pair, 1, 0),
            cell: CellCoord::new(1, 2),
        }]
    );
    assert_eq!(
        query::portal_at(&world, first),
        Some(PortalRef::new(PortalTopology::Pair, 0, 0))
    );
    assert_eq!(
        query::portal_groups(&world, PortalTopology::Pair)[0].slots(),
        &[Some(first), Some(second)]
    );
    assert_eq!(query::portal_groups(&world, PortalTopology::Pair).len(), 2);
}

#[test]
fn erase_clears_everything_on_the_cell() {
    let mut world = placing_world(4);
    let cell = CellCoord::new(1, 1);
    let _ = place(&mut world, PlacementTool::Hospital, 1, 1);
    let _ = place(&mut world, PlacementTool::PlayerOne, 1, 1);
    let _ = place(&mut world, PlacementTool::PlayerTwo, 1, 1);
    let _ = place(&mut world, PlacementTool::PortalPair, 2, 2);

    let events = run(&mut world, Command::Erase { cell });
    let _ = run(
        &mut world,
        Command::Erase {
            cell: CellCoord::new(2, 2),
        },
    );

    assert_eq!(events, vec![Event::CellErased { cell }]);
    assert_eq!(events[0].to_string(), "Erased at cell: (1,1)");
    assert_eq!(query::hospital_cell(&world), None);
    assert_eq!(query::player(&world, PlayerId::One).cell, None);
    assert_eq!(query::player(&world, PlayerId::Two).cell, None);
    assert_eq!(query::portal_at(&world, CellCoord::new(2, 2)), None);
}

#[test]
fn erase_outside_entity_mode_is_rejected() {
    let mut world = World::new();
    let _ = run(&mut world, Command::ConfigureBoard { size: 3 });
    let cell = CellCoord::new(0, 0);

    let events = run(&mut world, Command::Erase { cell });

    assert_eq!(
        events,
        vec![Event::EraseRejected {
            cell,
            reason: PlacementError::InvalidMode,
        }]
    );
}

#[test]
fn play_is_refused_until_layout_is_complete() {
    let mut world = placing_world(4);
    let _ = place(&mut world, PlacementTool::Key, 3, 3);
    let _ = place(&mut world, PlacementTool::PlayerOne, 0, 3);

    let events = run(
        &mut world,
        Command::SetGameMode {
            mode: GameMode::Play,
        },
    );

    assert_eq!(
        events,
        vec![
            Event::PlayRejected {
                missing: vec![
                    Requirement::Exit,
                    Requirement::Hospital,
                    Requirement::Minotaur,
                    Requirement::PlayerTwo,
                ],
            },
            Event::GameModeChanged {
                mode: GameMode::BuildMaze,
            },
        ]
    );
    assert_eq!(query::game_mode(&world), GameMode::BuildMaze);
}

#[test]
fn starting_play_resets_the_run_state() {
    let mut world = placing_world(4);
    complete_layout(&mut world);

    let events = run(
        &mut world,
        Command::SetGameMode {
            mode: GameMode::Play,
        },
    );

    assert_eq!(
        events,
        vec![
            Event::GameModeChanged {
                mode: GameMode::Play,
            },
            Event::TurnStarted {
                player: PlayerId::One,
                shots_left: 2,
            },
        ]
    );
    assert_eq!(query::game_mode(&world), GameMode::Play);
    assert!(query::missing_requirements(&world).is_empty());
    assert_eq!(query::outcome(&world), None);
    for id in PlayerId::ALL {
        let player = query::player(&world, id);
        assert!(player.alive);
        assert!(!player.has_key);
        assert_eq!(player.shots_left, 2);
    }
}

#[test]
fn clearing_entities_keeps_walls() {
    let mut world = World::new();
    let _ = run(&mut world, Command::ConfigureBoard { size: 4 });
    let edge = Edge::vertical(0, 0);
    let _ = run(&mut world, Command::ToggleWall { edge });
    let _ = run(
        &mut world,
        Command::SetGameMode {
            mode: GameMode::PlaceEntities,
        },
    );
    complete_layout(&mut world);
    let _ = place(&mut world, PlacementTool::PortalPair, 1, 1);

    let events = run(&mut world, Command::ClearEntities);

    assert_eq!(events, vec![Event::EntitiesCleared]);
    assert!(query::board(&world).is_some_and(|board| board.has_wall(edge)));
    assert_eq!(query::key_cell(&world), None);
    assert_eq!(query::player(&world, PlayerId::One).cell, None);
    assert!(query::portal_groups(&world, PortalTopology::Pair).is_empty());
    assert_eq!(
        query::portal_cursor(&world, PortalTopology::Pair),
        PortalRef::new(PortalTopology::Pair, 0, 0)
    );
}

#[test]
fn configuring_a_board_discards_the_previous_layout() {
    let mut world = World::new();
    let _ = run(&mut world, Command::ConfigureBoard { size: 4 });
    let _ = run(
        &mut world,
        Command::ToggleWall {
            edge: Edge::vertical(0, 0),
        },
    );
    let _ = run(
        &mut world,
        Command::SetGameMode {
            mode: GameMode::PlaceEntities,
        },
    );
    complete_layout(&mut world);

    let events = run(&mut world, Command::ConfigureBoard { size: 6 });

    assert_eq!(events, vec![Event::BoardConfigured { size: 6 }]);
    assert_eq!(events[0].to_string(), "Board created: 6 x 6");
    let board = query::board(&world).expect("board");
    assert_eq!(board.size(), 6);
    assert_eq!(board.walls().count(), 0);
    assert_eq!(query::exit_cell(&world), None);
    assert_eq!(query::minotaur_cell(&world), None);
    assert_eq!(query::player(&world, PlayerId::Two).cell, None);
}
