//! Persons, families, and the population store.

use std::str::FromStr;

use at_core::{BuildingId, FamilyId, PersonId};

use crate::error::ModelError;

// ── Role ──────────────────────────────────────────────────────────────────────

/// Demographic role tag driving schedule generation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Pre-school child; spends weekdays at the family daycare.
    YoungChild,
    /// School-age child with a fixed school window.
    SchoolChild,
    /// Older school-age child; may make discretionary outings after school.
    OlderSchoolChild,
    /// Adult with a job obligation on weekdays.
    EmployedAdult,
    /// Adult without a fixed obligation.
    UnemployedAdult,
}

impl Role {
    #[inline]
    pub fn is_adult(self) -> bool {
        matches!(self, Role::EmployedAdult | Role::UnemployedAdult)
    }

    #[inline]
    pub fn attends_school(self) -> bool {
        matches!(self, Role::SchoolChild | Role::OlderSchoolChild)
    }

    #[inline]
    pub fn attends_daycare(self) -> bool {
        matches!(self, Role::YoungChild)
    }

    /// Children this role is responsible for escorting never exist; only
    /// adults can carry custody duty.
    #[inline]
    pub fn can_have_custody(self) -> bool {
        self.is_adult()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::YoungChild => "young_child",
            Role::SchoolChild => "school_child",
            Role::OlderSchoolChild => "older_school_child",
            Role::EmployedAdult => "employed_adult",
            Role::UnemployedAdult => "unemployed_adult",
        }
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "young_child" => Ok(Role::YoungChild),
            "school_child" => Ok(Role::SchoolChild),
            "older_school_child" => Ok(Role::OlderSchoolChild),
            "employed_adult" => Ok(Role::EmployedAdult),
            "unemployed_adult" => Ok(Role::UnemployedAdult),
            other => Err(ModelError::Parse(format!("unknown role {other:?}"))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ObligationWindow ──────────────────────────────────────────────────────────

/// Day-relative window of a fixed obligation (job hours, school hours).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObligationWindow {
    /// Day-relative start tick.
    pub start: u32,
    /// Day-relative end tick (exclusive).
    pub end: u32,
}

impl ObligationWindow {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start < end, "obligation window must be non-empty");
        Self { start, end }
    }
}

// ── Person ────────────────────────────────────────────────────────────────────

/// One synthetic resident.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub id: PersonId,
    pub age: u8,
    pub role: Role,
    pub family: FamilyId,
    /// Job for employed adults, school for school-age children.
    pub fixed_building: Option<BuildingId>,
    /// When the person must be at `fixed_building` on weekdays.
    pub obligation: Option<ObligationWindow>,
}

// ── Family ────────────────────────────────────────────────────────────────────

/// A household: members sharing a home, optionally with an assigned daycare.
///
/// Read-only input to schedule generation; created by population assignment,
/// which is outside this core.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Family {
    pub id: FamilyId,
    pub home: BuildingId,
    pub daycare: Option<BuildingId>,
    /// Member ids in insertion order.
    pub members: Vec<PersonId>,
}

// ── Population ────────────────────────────────────────────────────────────────

/// Owner of all persons and families, indexed by their typed ids.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    persons: Vec<Person>,
    families: Vec<Family>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a family and return its id.
    pub fn add_family(&mut self, home: BuildingId, daycare: Option<BuildingId>) -> FamilyId {
        let id = FamilyId(self.families.len() as u32);
        self.families.push(Family { id, home, daycare, members: Vec::new() });
        id
    }

    /// Register a person as a member of `family` and return their id.
    pub fn add_person(
        &mut self,
        family: FamilyId,
        age: u8,
        role: Role,
        fixed_building: Option<BuildingId>,
        obligation: Option<ObligationWindow>,
    ) -> Result<PersonId, ModelError> {
        if family.index() >= self.families.len() {
            return Err(ModelError::FamilyNotFound(family));
        }
        let id = PersonId(self.persons.len() as u32);
        self.persons.push(Person { id, age, role, family, fixed_building, obligation });
        self.families[family.index()].members.push(id);
        Ok(id)
    }

    #[inline]
    pub fn person(&self, id: PersonId) -> &Person {
        &self.persons[id.index()]
    }

    #[inline]
    pub fn family(&self, id: FamilyId) -> &Family {
        &self.families[id.index()]
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// The custodial adult of `family`: the first adult member, but only if
    /// someone in the household actually attends school or daycare.
    pub fn custodian(&self, family: FamilyId) -> Option<PersonId> {
        let fam = self.family(family);
        let has_dependents = fam
            .members
            .iter()
            .any(|&m| self.person(m).role.attends_school() || self.person(m).role.attends_daycare());
        if !has_dependents {
            return None;
        }
        fam.members
            .iter()
            .copied()
            .find(|&m| self.person(m).role.can_have_custody())
    }
}
