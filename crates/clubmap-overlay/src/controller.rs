//! Per-championship toggle handling.
//!
//! Turning a championship on walks pools -> engagements -> clubs through a
//! [`ClubSource`], then places every fetched club in one registry critical
//! section. Turning it off withdraws the championship from the registry.
//! Either way the failure list is re-published afterwards.

use std::collections::HashMap;

use clubmap_core::{Championship, Club, ClubSource, Engagement, ToggleEvent};
use futures::future::join_all;
use tokio::sync::Mutex;

use crate::registry::OverlayRegistry;
use crate::surface::{ErrorSurface, MapSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Inactive,
    /// Fetches are in flight. `generation` identifies this load so late
    /// results can be told apart from a newer one.
    Loading { generation: u64 },
    Active,
}

/// What a single [`ToggleEvent`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Activated { placed: usize, failed: usize },
    Deactivated { removed: usize },
    /// Enable for a championship already loading or shown.
    Ignored,
    /// The championship was disabled while its fetches were in flight.
    Discarded,
}

struct Inner<M: MapSurface, E> {
    registry: OverlayRegistry<M>,
    error_surface: E,
    /// Championships absent from the map are `Inactive`.
    states: HashMap<String, ToggleState>,
    next_generation: u64,
}

impl<M: MapSurface, E: ErrorSurface> Inner<M, E> {
    fn state(&self, championship_id: &str) -> ToggleState {
        self.states
            .get(championship_id)
            .copied()
            .unwrap_or(ToggleState::Inactive)
    }

    fn publish_errors(&mut self) {
        let lines = self.registry.render_errors();
        self.error_surface.set_error_list(&lines);
    }
}

pub struct ToggleController<S, M: MapSurface, E> {
    source: S,
    inner: Mutex<Inner<M, E>>,
}

impl<S, M, E> ToggleController<S, M, E>
where
    S: ClubSource,
    M: MapSurface + Send,
    M::Handle: Send,
    E: ErrorSurface + Send,
{
    pub fn new(source: S, registry: OverlayRegistry<M>, error_surface: E) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                registry,
                error_surface,
                states: HashMap::new(),
                next_generation: 0,
            }),
        }
    }

    /// Applies one checkbox change.
    ///
    /// Several events may be handled concurrently; registry updates never
    /// interleave and no lock is held while fetching.
    pub async fn handle(&self, event: ToggleEvent) -> ToggleOutcome {
        if event.enabled {
            self.enable(&event.championship_id).await
        } else {
            self.disable(&event.championship_id).await
        }
    }

    async fn enable(&self, championship_id: &str) -> ToggleOutcome {
        let generation = {
            let mut inner = self.inner.lock().await;
            let state = inner.state(championship_id);
            if state != ToggleState::Inactive {
                tracing::debug!(championship_id, ?state, "championship already enabled, ignoring");
                return ToggleOutcome::Ignored;
            }
            inner.next_generation += 1;
            let generation = inner.next_generation;
            inner
                .states
                .insert(championship_id.to_owned(), ToggleState::Loading { generation });
            generation
        };

        let clubs = self.load_clubs(championship_id).await;

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        if inner.state(championship_id) != (ToggleState::Loading { generation }) {
            tracing::debug!(
                championship_id,
                generation,
                fetched = clubs.len(),
                "championship disabled while loading, discarding results"
            );
            return ToggleOutcome::Discarded;
        }

        let mut placed = 0;
        let mut failed = 0;
        for (club, championship) in &clubs {
            if inner.registry.insert_marker(club, championship).is_some() {
                placed += 1;
            } else {
                failed += 1;
            }
        }
        inner
            .states
            .insert(championship_id.to_owned(), ToggleState::Active);
        inner.publish_errors();

        tracing::info!(championship_id, placed, failed, "championship enabled");
        ToggleOutcome::Activated { placed, failed }
    }

    async fn disable(&self, championship_id: &str) -> ToggleOutcome {
        let mut inner = self.inner.lock().await;
        inner.states.remove(championship_id);
        let removed = inner.registry.remove_championship(championship_id);
        inner.publish_errors();

        tracing::info!(championship_id, removed, "championship disabled");
        ToggleOutcome::Deactivated { removed }
    }

    /// Fetches every club engaged in the championship's first phase, paired
    /// with the championship as named by its engagement.
    ///
    /// Engagements of all pools are fetched concurrently, then all clubs
    /// concurrently. Clubs that could not be fetched are skipped. Order
    /// follows pools, then engagements within a pool.
    async fn load_clubs(&self, championship_id: &str) -> Vec<(Club, Championship)> {
        let poules = self.source.fetch_poules(championship_id).await;

        let engagements: Vec<Engagement> = join_all(
            poules
                .iter()
                .map(|poule| self.source.fetch_engagements(championship_id, poule.stage_number)),
        )
        .await
        .into_iter()
        .flatten()
        .collect();

        let clubs = join_all(
            engagements
                .iter()
                .map(|engagement| self.source.fetch_club(engagement.club_id)),
        )
        .await;

        tracing::debug!(
            championship_id,
            poules = poules.len(),
            engagements = engagements.len(),
            "championship data fetched"
        );

        engagements
            .into_iter()
            .zip(clubs)
            .filter_map(|(engagement, club)| {
                club.map(|club| {
                    (
                        club,
                        Championship::new(championship_id, engagement.competition_name),
                    )
                })
            })
            .collect()
    }

    pub async fn state(&self, championship_id: &str) -> ToggleState {
        self.inner.lock().await.state(championship_id)
    }

    /// Championships currently shown, sorted.
    pub async fn active_championships(&self) -> Vec<String> {
        let inner = self.inner.lock().await;
        let mut active: Vec<String> = inner
            .states
            .iter()
            .filter(|(_, state)| **state == ToggleState::Active)
            .map(|(id, _)| id.clone())
            .collect();
        active.sort();
        active
    }

    /// Runs `f` against the registry while holding the overlay lock.
    pub async fn with_registry<R>(&self, f: impl FnOnce(&OverlayRegistry<M>) -> R) -> R {
        let inner = self.inner.lock().await;
        f(&inner.registry)
    }

    /// Runs `f` against the error surface while holding the overlay lock.
    pub async fn with_error_surface<R>(&self, f: impl FnOnce(&E) -> R) -> R {
        let inner = self.inner.lock().await;
        f(&inner.error_surface)
    }

    /// Consumes the controller, returning the registry and error surface.
    pub fn into_parts(self) -> (OverlayRegistry<M>, E) {
        let inner = self.inner.into_inner();
        (inner.registry, inner.error_surface)
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
