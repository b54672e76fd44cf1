//! Trip builder: collects selections and turns them into a [`TripRecord`].
//!
//! A [`TripPlan`] is the in-progress state of the wizard. Its budget summary is
//! recomputed on every call to [`TripPlan::summary`], so whatever a caller shows
//! is always current. Nothing is persisted until [`TripPlan::into_record`] is
//! handed to the store.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::budget::{BudgetInput, BudgetSummary};
use crate::catalog;
use crate::models::*;

/// Destination used when the user leaves the field empty.
pub const DEFAULT_DESTINATION: &str = "Barcelona";
pub const DEFAULT_BUDGET: f64 = 300.0;
pub const DEFAULT_DAYS: u32 = 3;
pub const DEFAULT_PEOPLE: u32 = 2;

/// Budget slider range, in euros.
pub const MIN_BUDGET: f64 = 50.0;
pub const MAX_BUDGET: f64 = 1500.0;
/// Duration slider range, in nights.
pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 14;
/// Traveller stepper range.
pub const MIN_PEOPLE: u32 = 1;
pub const MAX_PEOPLE: u32 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("departure is required")]
    MissingDeparture,

    #[error("budget must be between {min} and {max}, got {0}", min = MIN_BUDGET, max = MAX_BUDGET)]
    InvalidBudget(f64),

    #[error("a trip lasts {min} to {max} nights, got {0}", min = MIN_DAYS, max = MAX_DAYS)]
    InvalidDays(u32),

    #[error("a trip takes {min} to {max} travellers, got {0}", min = MIN_PEOPLE, max = MAX_PEOPLE)]
    InvalidPeople(u32),

    #[error("Flight not found: {0}")]
    UnknownFlight(String),

    #[error("Stay not found: {0}")]
    UnknownStay(String),

    #[error("Activity not found: {0}")]
    UnknownActivity(String),
}

/// Trip builder input as submitted by a client. Missing fields take the
/// builder's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub departure: String,
    pub days: Option<u32>,
    pub budget: Option<f64>,
    pub people: Option<u32>,
    #[serde(default)]
    pub is_couple: bool,
    pub vibes: Option<Vec<String>>,
    pub flight_id: Option<String>,
    pub stay_id: Option<String>,
    #[serde(default)]
    pub selected_places: Vec<String>,
}

/// In-progress trip builder state.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    pub destination: String,
    pub departure: String,
    pub days: u32,
    pub budget: f64,
    pub people: u32,
    pub is_couple: bool,
    vibes: Vec<String>,
    flight_id: String,
    stay_id: String,
    selected_places: Vec<String>,
}

impl Default for TripPlan {
    fn default() -> Self {
        Self {
            destination: String::new(),
            departure: String::new(),
            days: DEFAULT_DAYS,
            budget: DEFAULT_BUDGET,
            people: DEFAULT_PEOPLE,
            is_couple: false,
            vibes: catalog::DEFAULT_VIBES.iter().map(|v| v.to_string()).collect(),
            flight_id: catalog::FLIGHTS[0].id.to_string(),
            stay_id: catalog::STAYS[0].id.to_string(),
            selected_places: Vec::new(),
        }
    }
}

impl TripPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a plan from client input, checking every catalog reference and
    /// the budget, duration and traveller ranges.
    pub fn from_input(input: PlanInput) -> Result<Self, PlanError> {
        let mut plan = Self {
            destination: input.destination,
            departure: input.departure,
            is_couple: input.is_couple,
            ..Self::default()
        };
        if let Some(days) = input.days {
            plan.days = days;
        }
        if let Some(budget) = input.budget {
            plan.budget = budget;
        }
        if let Some(people) = input.people {
            plan.people = people;
        }
        plan.check_ranges()?;
        if let Some(vibes) = input.vibes {
            plan.vibes.clear();
            for vibe in vibes {
                if !plan.vibes.contains(&vibe) {
                    plan.vibes.push(vibe);
                }
            }
        }
        if let Some(flight_id) = input.flight_id {
            plan.select_flight(&flight_id)?;
        }
        if let Some(stay_id) = input.stay_id {
            plan.select_stay(&stay_id)?;
        }
        for place in input.selected_places {
            if !plan.selected_places.contains(&place) {
                plan.toggle_place(&place)?;
            }
        }
        Ok(plan)
    }

    pub fn vibes(&self) -> &[String] {
        &self.vibes
    }

    pub fn selected_places(&self) -> &[String] {
        &self.selected_places
    }

    pub fn flight(&self) -> &'static FlightOption {
        catalog::flight(&self.flight_id).unwrap_or(&catalog::FLIGHTS[0])
    }

    pub fn stay(&self) -> &'static StayOption {
        catalog::stay(&self.stay_id).unwrap_or(&catalog::STAYS[0])
    }

    /// Add the vibe if absent, remove it if present.
    pub fn toggle_vibe(&mut self, vibe: &str) {
        if let Some(pos) = self.vibes.iter().position(|v| v == vibe) {
            self.vibes.remove(pos);
        } else {
            self.vibes.push(vibe.to_string());
        }
    }

    pub fn select_flight(&mut self, id: &str) -> Result<(), PlanError> {
        let flight = catalog::flight(id).ok_or_else(|| PlanError::UnknownFlight(id.to_string()))?;
        self.flight_id = flight.id.to_string();
        Ok(())
    }

    pub fn select_stay(&mut self, id: &str) -> Result<(), PlanError> {
        let stay = catalog::stay(id).ok_or_else(|| PlanError::UnknownStay(id.to_string()))?;
        self.stay_id = stay.id.to_string();
        Ok(())
    }

    /// Add the activity if absent, remove it if present. Returns whether it is
    /// now selected.
    pub fn toggle_place(&mut self, id: &str) -> Result<bool, PlanError> {
        if let Some(pos) = self.selected_places.iter().position(|p| p == id) {
            self.selected_places.remove(pos);
            return Ok(false);
        }
        if catalog::activity(id).is_none() {
            return Err(PlanError::UnknownActivity(id.to_string()));
        }
        self.selected_places.push(id.to_string());
        Ok(true)
    }

    pub fn budget_input(&self) -> BudgetInput {
        BudgetInput {
            flight_price: self.flight().price,
            nightly_rate: self.stay().price,
            nights: self.days,
            activity_prices: catalog::activity_prices(&self.selected_places),
            budget: self.budget,
        }
    }

    pub fn summary(&self) -> BudgetSummary {
        self.budget_input().summarize()
    }

    /// The builder's submit button is enabled once a departure is typed.
    pub fn can_submit(&self) -> bool {
        !self.departure.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.can_submit() {
            return Err(PlanError::MissingDeparture);
        }
        self.check_ranges()
    }

    /// Budget, nights and travellers must sit within what the builder offers.
    pub fn check_ranges(&self) -> Result<(), PlanError> {
        if !(MIN_BUDGET..=MAX_BUDGET).contains(&self.budget) {
            return Err(PlanError::InvalidBudget(self.budget));
        }
        if !(MIN_DAYS..=MAX_DAYS).contains(&self.days) {
            return Err(PlanError::InvalidDays(self.days));
        }
        if !(MIN_PEOPLE..=MAX_PEOPLE).contains(&self.people) {
            return Err(PlanError::InvalidPeople(self.people));
        }
        Ok(())
    }

    /// Freeze the plan into a new record with a fresh id and timestamp.
    pub fn into_record(self) -> Result<TripRecord, PlanError> {
        self.validate()?;

        let summary = self.summary();
        let destination = match self.destination.trim() {
            "" => DEFAULT_DESTINATION.to_string(),
            d => d.to_string(),
        };
        let mut record = TripRecord {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            destination,
            departure: self.departure.trim().to_string(),
            days: self.days,
            budget: self.budget,
            people: self.people,
            is_couple: self.is_couple && self.people == 2,
            vibes: self.vibes.clone(),
            total_cost: 0.0,
            savings: 0.0,
            progress_percent: 0.0,
            is_over_budget: false,
            selected_flight: FlightSnapshot::from(self.flight()),
            selected_stay: StaySnapshot::from(self.stay()),
            selected_places: self.selected_places,
            notes: None,
            place_notes: BTreeMap::new(),
            place_ratings: BTreeMap::new(),
        };
        record.apply_summary(&summary);
        Ok(record)
    }
}
