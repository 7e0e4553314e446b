//! The per-run generation context and the activity policy tables.
//!
//! Everything that would otherwise be global — the transport tables, the
//! per-role activity weights, the run seed — lives in one read-only
//! `GenerationContext` value constructed before any family task starts and
//! threaded through every call.

use at_core::{CoreResult, TransportConfig};
use at_model::{ObligationWindow, Role};

use crate::error::GenResult;

// ── RoleWeights ───────────────────────────────────────────────────────────────

/// Relative weights for the daily draw over {stay home, leave early for a
/// pending obligation, discretionary outing}.
#[derive(Copy, Clone, Debug)]
pub struct RoleWeights {
    pub home: f64,
    pub obligation: f64,
    pub outing: f64,
}

impl RoleWeights {
    pub const fn new(home: f64, obligation: f64, outing: f64) -> Self {
        Self { home, obligation, outing }
    }
}

// ── ActivityPolicy ────────────────────────────────────────────────────────────

/// Behavioral tuning for the daily activity engine.
#[derive(Clone, Debug)]
pub struct ActivityPolicy {
    /// Longest continuous stretch a person may spend away from home (ticks).
    pub max_time_away: u32,
    /// Shortest discretionary outing worth making (ticks).
    pub min_outing_ticks: u32,
    /// Ring-search radius for discretionary destinations (cells).
    pub outing_radius: Option<u32>,
    /// Day-relative attendance window for daycare children.
    pub daycare_window: ObligationWindow,
    /// Draw weights per role, indexed by [`role_slot`].
    weights: [RoleWeights; 5],
}

/// Table index for a role's weights.
#[inline]
fn role_slot(role: Role) -> usize {
    match role {
        Role::YoungChild => 0,
        Role::SchoolChild => 1,
        Role::OlderSchoolChild => 2,
        Role::EmployedAdult => 3,
        Role::UnemployedAdult => 4,
    }
}

impl ActivityPolicy {
    #[inline]
    pub fn weights(&self, role: Role) -> RoleWeights {
        self.weights[role_slot(role)]
    }

    /// Replace the weights for one role (demo / experiment tuning).
    pub fn set_weights(&mut self, role: Role, weights: RoleWeights) {
        self.weights[role_slot(role)] = weights;
    }
}

impl Default for ActivityPolicy {
    fn default() -> Self {
        let mut weights = [RoleWeights::new(1.0, 0.0, 0.0); 5];
        weights[role_slot(Role::OlderSchoolChild)] = RoleWeights::new(0.75, 0.05, 0.20);
        weights[role_slot(Role::EmployedAdult)] = RoleWeights::new(0.55, 0.15, 0.30);
        weights[role_slot(Role::UnemployedAdult)] = RoleWeights::new(0.60, 0.0, 0.40);
        Self {
            max_time_away: 60,
            min_outing_ticks: 6,
            outing_radius: Some(20),
            daycare_window: ObligationWindow::new(30, 96),
            weights,
        }
    }
}

// ── GenerationContext ─────────────────────────────────────────────────────────

/// Immutable per-run state shared by every family task.
///
/// Construction validates the transport tables up front: a bad table is a
/// [`GenError::Config`][crate::GenError::Config] before any task starts, not
/// a silent default mid-generation.
#[derive(Clone, Debug)]
pub struct GenerationContext {
    pub transport: TransportConfig,
    pub policy: ActivityPolicy,
    /// Master seed; each family derives its own RNG from this.
    pub seed: u64,
}

impl GenerationContext {
    pub fn new(transport: TransportConfig, policy: ActivityPolicy, seed: u64) -> GenResult<Self> {
        Self::validate_transport(&transport)?;
        Ok(Self { transport, policy, seed })
    }

    fn validate_transport(transport: &TransportConfig) -> CoreResult<()> {
        transport.validate()
    }
}
