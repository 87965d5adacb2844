//! Shared read-only view of players for systems and observers.
//!
//! [`Players`] bundles the queries every effect needs to turn an activator
//! entity into a player, and a player back into its pawn. It only reads
//! components, so it composes with the mutable queries each subsystem adds
//! next to it.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;

use crate::components::entityref::EntityRef;
use crate::components::identity::DesignerName;
use crate::components::player::{LifeState, PlayerController, PlayerId, PlayerPawn};

#[derive(SystemParam)]
pub struct Players<'w, 's> {
    pub live: Query<'w, 's, &'static DesignerName>,
    pawns: Query<'w, 's, (&'static PlayerPawn, &'static LifeState)>,
    controllers: Query<'w, 's, (Entity, &'static PlayerController)>,
}

impl Players<'_, '_> {
    pub fn is_live(&self, entity: Entity) -> bool {
        self.live.contains(entity)
    }

    pub fn is_valid(&self, handle: EntityRef) -> bool {
        handle.is_valid(&self.live)
    }

    /// Pawn behind `entity`: the entity itself when it is a pawn, or the
    /// current pawn when it is a controller. Both must be live.
    pub fn pawn_behind(&self, entity: Entity) -> Option<Entity> {
        if !self.is_live(entity) {
            return None;
        }
        if self.pawns.contains(entity) {
            return Some(entity);
        }
        let (_, controller) = self.controllers.get(entity).ok()?;
        controller
            .pawn
            .filter(|pawn| self.is_live(*pawn) && self.pawns.contains(*pawn))
    }

    /// Player controlling `entity`, if it is a live pawn or controller of a
    /// connected player.
    pub fn player_of(&self, entity: Entity) -> Option<PlayerId> {
        let pawn = self.pawn_behind(entity)?;
        let (pawn, _) = self.pawns.get(pawn).ok()?;
        self.is_live(pawn.controller).then_some(pawn.player)
    }

    /// Player `entity` belongs to, read from its own pawn or controller
    /// component. Unlike [`player_of`](Self::player_of) the controller need
    /// not be live, so this still answers while a player is being torn down.
    pub fn owner_of(&self, entity: Entity) -> Option<PlayerId> {
        if let Ok((pawn, _)) = self.pawns.get(entity) {
            return Some(pawn.player);
        }
        self.controllers
            .get(entity)
            .ok()
            .map(|(_, controller)| controller.player)
    }

    /// Player and pawn behind `entity`, only while the pawn is alive.
    pub fn alive_player_of(&self, entity: Entity) -> Option<(PlayerId, Entity)> {
        let player = self.player_of(entity)?;
        let pawn = self.pawn_behind(entity)?;
        self.is_alive(pawn).then_some((player, pawn))
    }

    /// True when `pawn` is a live player pawn in the alive state.
    pub fn is_alive(&self, pawn: Entity) -> bool {
        self.is_live(pawn)
            && self
                .pawns
                .get(pawn)
                .is_ok_and(|(_, state)| *state == LifeState::Alive)
    }

    pub fn controller_of(&self, player: PlayerId) -> Option<Entity> {
        self.controllers
            .iter()
            .find(|(entity, controller)| controller.player == player && self.is_live(*entity))
            .map(|(entity, _)| entity)
    }

    /// Current live pawn of `player`.
    pub fn pawn_of(&self, player: PlayerId) -> Option<Entity> {
        let controller = self.controller_of(player)?;
        self.pawn_behind(controller)
    }

    /// Connected players, in ascending id order.
    pub fn connected(&self) -> Vec<PlayerId> {
        let mut players: Vec<PlayerId> = self
            .controllers
            .iter()
            .filter(|(entity, _)| self.is_live(*entity))
            .map(|(_, controller)| controller.player)
            .collect();
        players.sort_unstable();
        players.dedup();
        players
    }

    /// Pawns of connected players that are alive.
    pub fn alive_pawns(&self) -> Vec<(PlayerId, Entity)> {
        self.connected()
            .into_iter()
            .filter_map(|player| {
                let pawn = self.pawn_of(player)?;
                self.is_alive(pawn).then_some((player, pawn))
            })
            .collect()
    }
}
