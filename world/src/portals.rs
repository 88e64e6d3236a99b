//! Teleport network made of portal pairs and portal cycles.

use std::collections::HashMap;

use labyrinth_core::{CellCoord, PortalRef, PortalTopology};

/// Ordered slots of one portal group. Unplaced slots hold `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalGroup {
    slots: Vec<Option<CellCoord>>,
}

impl PortalGroup {
    fn empty(arity: usize) -> Self {
        Self {
            slots: vec![None; arity],
        }
    }

    /// Cells assigned to each slot, in slot order.
    #[must_use]
    pub fn slots(&self) -> &[Option<CellCoord>] {
        &self.slots
    }

    /// Reports whether every slot of the group has been placed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

/// Reasons the portal network may refuse a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PortalError {
    /// The cell already hosts a portal.
    Occupied,
    /// The group index skips over groups that do not exist yet.
    UnknownGroup,
    /// The slot index exceeds the topology's arity.
    InvalidSlot,
}

/// Forward group arrays plus the reverse cell index.
///
/// Both sides are only mutated through [`PortalNetwork::place`],
/// [`PortalNetwork::remove_at`] and [`PortalNetwork::clear`], which keep the
/// reverse index exactly in sync with the occupied forward slots.
#[derive(Clone, Debug, Default)]
pub(crate) struct PortalNetwork {
    pairs: Vec<PortalGroup>,
    cycles: Vec<PortalGroup>,
    cells: HashMap<CellCoord, PortalRef>,
}

impl PortalNetwork {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.pairs.clear();
        self.cycles.clear();
        self.cells.clear();
    }

    pub(crate) fn groups(&self, topology: PortalTopology) -> &[PortalGroup] {
        match topology {
            PortalTopology::Pair => &self.pairs,
            PortalTopology::Cycle => &self.cycles,
        }
    }

    pub(crate) fn portal_at(&self, cell: CellCoord) -> Option<PortalRef> {
        self.cells.get(&cell).copied()
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Installs a portal into the slot, relocating it if the slot was already placed.
    ///
    /// Groups are appended on demand, but only directly after the last existing one.
    pub(crate) fn place(&mut self, portal: PortalRef, cell: CellCoord) -> Result<(), PortalError> {
        if self.cells.contains_key(&cell) {
            return Err(PortalError::Occupied);
        }

        let arity = portal.topology.arity();
        if portal.slot >= arity {
            return Err(PortalError::InvalidSlot);
        }

        let groups = match portal.topology {
            PortalTopology::Pair => &mut self.pairs,
            PortalTopology::Cycle => &mut self.cycles,
        };
        if portal.group > groups.len() {
            return Err(PortalError::UnknownGroup);
        }
        if portal.group == groups.len() {
            groups.push(PortalGroup::empty(arity));
        }

        let previous = groups[portal.group].slots[portal.slot].replace(cell);
        if let Some(previous) = previous {
            let _ = self.cells.remove(&previous);
        }
        let _ = self.cells.insert(cell, portal);

        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Clears the portal on the cell, returning the slot it occupied.
    pub(crate) fn remove_at(&mut self, cell: CellCoord) -> Option<PortalRef> {
        let portal = self.cells.remove(&cell)?;
        let groups = match portal.topology {
            PortalTopology::Pair => &mut self.pairs,
            PortalTopology::Cycle => &mut self.cycles,
        };
        if let Some(slot) = groups
            .get_mut(portal.group)
            .and_then(|group| group.slots.get_mut(portal.slot))
        {
            *slot = None;
        }

        debug_assert!(self.is_consistent());
        Some(portal)
    }

    /// Cell a traveller standing on `cell` is sent to.
    ///
    /// Slot `i` of a group with arity `k` leads to slot `(i + 1) mod k`.
    /// Returns `None` when the cell hosts no portal or the linked slot is unplaced.
    pub(crate) fn destination_from(&self, cell: CellCoord) -> Option<CellCoord> {
        let from = self.portal_at(cell)?;
        let group = self.groups(from.topology).get(from.group)?;
        let next = (from.slot + 1) % group.slots.len();
        group.slots.get(next).copied().flatten()
    }

    /// Checks that the reverse index mirrors the forward slots exactly.
    pub(crate) fn is_consistent(&self) -> bool {
        let mut placed = 0_usize;
        for topology in PortalTopology::ALL {
            for (group_index, group) in self.groups(topology).iter().enumerate() {
                for (slot_index, slot) in group.slots.iter().enumerate() {
                    let Some(cell) = slot else {
                        continue;
                    };
                    placed += 1;
                    let expected = PortalRef::new(topology, group_index, slot_index);
                    if self.cells.get(cell) != Some(&expected) {
                        return false;
                    }
                }
            }
        }
        placed == self.cells.len()
    }
}
