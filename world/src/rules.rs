//! Turn-action state machine: movement, combat, teleports and turn hand-over.

use labyrinth_core::{
    CellCoord, DeathCause, Direction, Event, GameOutcome, KnifeReach, PlayerId, SkipReason,
    TeleportTrigger, Weapon,
};
use tracing::trace;

use crate::World;

/// Resolves the acting player, reporting why the action cannot proceed.
///
/// Returns `None` silently when no board exists.
fn actor(world: &World, out_events: &mut Vec<Event>) -> Option<(PlayerId, CellCoord)> {
    if world.board.is_none() {
        return None;
    }
    if let Some(outcome) = world.outcome {
        out_events.push(Event::GameAlreadyOver { outcome });
        return None;
    }

    let player = world.current;
    match world.player(player).cell {
        Some(cell) => Some((player, cell)),
        None => {
            out_events.push(Event::PlayerUnplaced { player });
            None
        }
    }
}

pub(crate) fn perform_move(world: &mut World, direction: Direction, out_events: &mut Vec<Event>) {
    let Some((player, from)) = actor(world, out_events) else {
        return;
    };
    let Some(to) = world
        .board
        .as_ref()
        .and_then(|board| board.neighbor(from, direction))
    else {
        out_events.push(Event::MoveBlocked { player });
        return;
    };

    world.player_mut(player).cell = Some(to);
    out_events.push(Event::PlayerMoved { player, from, to });

    resolve_teleport(world, player, TeleportTrigger::Landing, out_events);
    let Some(cell) = world.player(player).cell else {
        return;
    };

    if world.entities.key == Some(cell) {
        world.entities.key = None;
        world.player_mut(player).has_key = true;
        out_events.push(Event::KeyPickedUp { player, cell });
    }

    if world.entities.minotaur == Some(cell) {
        kill_player(world, player, cell, DeathCause::Minotaur, out_events);
    }

    // Checked after any respawn; a victim without a hospital stays on the cell.
    let landed = world.player(player).cell;
    if landed.is_some() && world.entities.exit == landed {
        if world.player(player).has_key {
            let outcome = GameOutcome::Won(player);
            world.outcome = Some(outcome);
            out_events.push(Event::GameEnded { outcome });
            return;
        }
        out_events.push(Event::NeedKey { player });
    }

    advance_turn(world, out_events);
}

pub(crate) fn perform_shoot(world: &mut World, direction: Direction, out_events: &mut Vec<Event>) {
    let Some((player, origin)) = actor(world, out_events) else {
        return;
    };

    let shooter = world.player_mut(player);
    if shooter.shots_left == 0 {
        out_events.push(Event::OutOfShots { player });
        return;
    }
    shooter.shots_left -= 1;
    let shots_left = shooter.shots_left;

    let cells: Vec<CellCoord> = world
        .board
        .as_ref()
        .map(|board| board.ray(origin, direction).collect())
        .unwrap_or_default();

    for cell in cells {
        trace!(?player, %cell, "shot passes cell");
        if world.entities.minotaur == Some(cell) {
            kill_minotaur(world, player, Weapon::Gun, cell, out_events);
            return;
        }
        if let Some(victim) = opposing_player_at(world, player, cell) {
            let cause = DeathCause::Attack {
                by: player,
                weapon: Weapon::Gun,
            };
            kill_player(world, victim, cell, cause, out_events);
            return;
        }
    }

    out_events.push(Event::ShotMissed { player, shots_left });
}

pub(crate) fn perform_knife(
    world: &mut World,
    target: CellCoord,
    reach: KnifeReach,
    out_events: &mut Vec<Event>,
) {
    let Some((player, _)) = actor(world, out_events) else {
        return;
    };
    let weapon = Weapon::Knife { reach };

    if world.entities.minotaur == Some(target) {
        kill_minotaur(world, player, weapon, target, out_events);
    } else if let Some(victim) = opposing_player_at(world, player, target) {
        let cause = DeathCause::Attack { by: player, weapon };
        kill_player(world, victim, target, cause, out_events);
    } else {
        out_events.push(Event::NoKnifeTarget { player, reach });
    }
}

pub(crate) fn end_turn(world: &mut World, out_events: &mut Vec<Event>) {
    if actor(world, out_events).is_some() {
        advance_turn(world, out_events);
    }
}

pub(crate) fn skip_turn(world: &mut World, reason: SkipReason, out_events: &mut Vec<Event>) {
    let Some((player, _)) = actor(world, out_events) else {
        return;
    };
    out_events.push(Event::TurnSkipped { player, reason });
    advance_turn(world, out_events);
}

/// Hands the turn over, skipping a single eliminated player.
fn advance_turn(world: &mut World, out_events: &mut Vec<Event>) {
    let finishing = world.current;
    resolve_teleport(world, finishing, TeleportTrigger::EndOfTurn, out_events);

    world.current = finishing.other();
    if !world.player(world.current).alive {
        world.current = world.current.other();
    }
    world.teleported_this_turn = false;

    if !world.player(world.current).alive {
        let outcome = GameOutcome::Draw;
        world.outcome = Some(outcome);
        out_events.push(Event::GameEnded { outcome });
        return;
    }

    out_events.push(Event::TurnStarted {
        player: world.current,
        shots_left: world.player(world.current).shots_left,
    });
}

/// Sends the player through the portal under them, at most once per turn.
fn resolve_teleport(
    world: &mut World,
    player: PlayerId,
    trigger: TeleportTrigger,
    out_events: &mut Vec<Event>,
) {
    if world.teleported_this_turn {
        return;
    }
    let Some(from) = world.player(player).cell else {
        return;
    };
    let Some(to) = world.portals.destination_from(from) else {
        return;
    };

    trace!(?player, ?trigger, %from, %to, "portal resolved");
    world.player_mut(player).cell = Some(to);
    world.teleported_this_turn = true;
    out_events.push(Event::Teleported {
        player,
        trigger,
        from,
        to,
    });
}

fn kill_player(
    world: &mut World,
    victim: PlayerId,
    cell: CellCoord,
    cause: DeathCause,
    out_events: &mut Vec<Event>,
) {
    if world.player(victim).has_key {
        world.player_mut(victim).has_key = false;
        world.entities.key = Some(cell);
    }
    if victim == world.current {
        world.teleported_this_turn = true;
    }

    let respawn = world.entities.hospital;
    let record = world.player_mut(victim);
    match respawn {
        Some(hospital) => {
            record.cell = Some(hospital);
            record.alive = true;
        }
        None => record.alive = false,
    }

    out_events.push(Event::PlayerKilled {
        victim,
        cell,
        cause,
        respawn,
    });
}

fn kill_minotaur(
    world: &mut World,
    by: PlayerId,
    weapon: Weapon,
    cell: CellCoord,
    out_events: &mut Vec<Event>,
) {
    world.entities.minotaur = None;
    out_events.push(Event::MinotaurKilled { by, weapon, cell });
}

/// Living opponent of `player` standing on the cell.
fn opposing_player_at(world: &World, player: PlayerId, cell: CellCoord) -> Option<PlayerId> {
    let other = player.other();
    let record = world.player(other);
    (record.alive && record.cell == Some(cell)).then_some(other)
}
