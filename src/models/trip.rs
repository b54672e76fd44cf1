use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FlightOption, StayOption};
use crate::budget::{BudgetInput, BudgetSummary};
use crate::catalog;

/// Lowest rating a place can hold. A rating of 0 means "unrated" and is never stored.
pub const MIN_RATING: u8 = 1;
/// Highest rating a place can hold.
pub const MAX_RATING: u8 = 5;

/// A saved trip plan.
///
/// Records are created once, when the user finishes the trip builder and saves,
/// and only ever change through explicit annotation calls (notes, place notes,
/// place ratings). The budget fields are derived: the store recomputes them on
/// every read and write, so the persisted values are only a cache for clients
/// that read the raw slot.
///
/// The serialized shape is the persisted format and must stay field-for-field
/// compatible with data already on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub destination: String,
    pub departure: String,
    /// Trip length in nights.
    pub days: u32,
    pub budget: f64,
    pub people: u32,
    /// Only meaningful when `people == 2`.
    pub is_couple: bool,
    pub vibes: Vec<String>,
    pub total_cost: f64,
    pub savings: f64,
    pub progress_percent: f64,
    pub is_over_budget: bool,
    pub selected_flight: FlightSnapshot,
    pub selected_stay: StaySnapshot,
    /// Activity ids from the catalog.
    pub selected_places: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub place_notes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub place_ratings: BTreeMap<String, u8>,
}

impl TripRecord {
    /// Calculator input for this record. Activity prices come from the catalog;
    /// ids the catalog no longer knows cost nothing.
    pub fn budget_input(&self) -> BudgetInput {
        BudgetInput {
            flight_price: self.selected_flight.price,
            nightly_rate: self.selected_stay.price,
            nights: self.days,
            activity_prices: catalog::activity_prices(&self.selected_places),
            budget: self.budget,
        }
    }

    /// Fresh budget summary, ignoring whatever derived values the record carries.
    pub fn summary(&self) -> BudgetSummary {
        self.budget_input().summarize()
    }

    /// Overwrite the derived fields with a fresh computation.
    pub fn refresh_totals(&mut self) {
        let summary = self.summary();
        self.apply_summary(&summary);
    }

    pub(crate) fn apply_summary(&mut self, summary: &BudgetSummary) {
        self.total_cost = summary.total_cost;
        self.savings = summary.savings;
        self.progress_percent = summary.progress_percent;
        self.is_over_budget = summary.is_over_budget;
    }

    /// Whether the persisted derived fields agree with a fresh computation.
    pub fn totals_are_fresh(&self) -> bool {
        let summary = self.summary();
        self.total_cost == summary.total_cost
            && self.savings == summary.savings
            && self.progress_percent == summary.progress_percent
            && self.is_over_budget == summary.is_over_budget
    }

    /// Set or clear the trip-level note. Blank text clears it.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.trim().is_empty());
    }

    /// Set a note on one activity. An empty note removes the entry.
    pub fn set_place_note(&mut self, place_id: &str, note: &str) {
        if note.is_empty() {
            self.place_notes.remove(place_id);
        } else {
            self.place_notes
                .insert(place_id.to_string(), note.to_string());
        }
    }

    /// Rate one activity. A rating of 0 removes the entry.
    ///
    /// Returns `false`, leaving the record untouched, when the rating is above
    /// [`MAX_RATING`].
    pub fn set_place_rating(&mut self, place_id: &str, rating: u8) -> bool {
        match rating {
            0 => {
                self.place_ratings.remove(place_id);
                true
            }
            MIN_RATING..=MAX_RATING => {
                self.place_ratings.insert(place_id.to_string(), rating);
                true
            }
            _ => false,
        }
    }
}

/// The chosen flight, copied by value into the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightSnapshot {
    pub id: String,
    pub airline: String,
    pub time: String,
    pub price: f64,
    pub stops: String,
}

impl From<&FlightOption> for FlightSnapshot {
    fn from(option: &FlightOption) -> Self {
        Self {
            id: option.id.to_string(),
            airline: option.airline.to_string(),
            time: option.time.to_string(),
            price: option.price,
            stops: option.stops.to_string(),
        }
    }
}

/// The chosen lodging, copied by value into the record. `price` is per night.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaySnapshot {
    pub id: String,
    pub name: String,
    pub distance: String,
    pub price: f64,
    pub image: String,
}

impl From<&StayOption> for StaySnapshot {
    fn from(option: &StayOption) -> Self {
        Self {
            id: option.id.to_string(),
            name: option.name.to_string(),
            distance: option.distance.to_string(),
            price: option.price,
            image: option.image.to_string(),
        }
    }
}

/// Input for setting the trip-level note. `None` or blank clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNotesInput {
    pub notes: Option<String>,
}

/// Input for setting a note on one activity. Empty removes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceNoteInput {
    #[serde(default)]
    pub note: String,
}

/// Input for rating one activity. 0 removes the rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRatingInput {
    pub rating: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TripRecord {
        TripRecord {
            id: "trip-1".to_string(),
            created_at: Utc::now(),
            destination: "Barcelona, ES".to_string(),
            departure: "Lisbon, PT".to_string(),
            days: 3,
            budget: 300.0,
            people: 1,
            is_couple: false,
            vibes: vec!["Explore".to_string()],
            total_cost: 0.0,
            savings: 0.0,
            progress_percent: 0.0,
            is_over_budget: false,
            selected_flight: FlightSnapshot::from(&catalog::FLIGHTS[0]),
            selected_stay: StaySnapshot::from(&catalog::STAYS[0]),
            selected_places: vec!["b1".to_string(), "w1".to_string(), "t1".to_string()],
            notes: None,
            place_notes: BTreeMap::new(),
            place_ratings: BTreeMap::new(),
        }
    }

    #[test]
    fn refresh_totals_uses_snapshots_and_catalog_prices() {
        let mut trip = record();
        assert!(!trip.totals_are_fresh());

        trip.refresh_totals();

        assert_eq!(trip.total_cost, 231.0);
        assert_eq!(trip.savings, 69.0);
        assert_eq!(trip.progress_percent, 77.0);
        assert!(!trip.is_over_budget);
        assert!(trip.totals_are_fresh());
    }

    #[test]
    fn unknown_places_cost_nothing() {
        let mut trip = record();
        trip.selected_places = vec!["gone".to_string()];
        trip.refresh_totals();
        assert_eq!(trip.total_cost, 85.0 + 35.0 * 3.0);
    }

    #[test]
    fn zero_rating_removes_entry() {
        let mut trip = record();
        assert!(trip.set_place_rating("b1", 4));
        assert_eq!(trip.place_ratings.get("b1"), Some(&4));

        assert!(trip.set_place_rating("b1", 0));
        assert!(!trip.place_ratings.contains_key("b1"));
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let mut trip = record();
        trip.set_place_rating("b1", 2);
        assert!(!trip.set_place_rating("b1", 6));
        assert_eq!(trip.place_ratings.get("b1"), Some(&2));
    }

    #[test]
    fn empty_place_note_removes_entry() {
        let mut trip = record();
        trip.set_place_note("t1", "book ahead");
        assert_eq!(trip.place_notes.get("t1").map(String::as_str), Some("book ahead"));

        trip.set_place_note("t1", "");
        assert!(trip.place_notes.is_empty());
    }

    #[test]
    fn blank_trip_note_clears_it() {
        let mut trip = record();
        trip.set_notes(Some("pack light".to_string()));
        assert_eq!(trip.notes.as_deref(), Some("pack light"));

        trip.set_notes(Some("   ".to_string()));
        assert!(trip.notes.is_none());
    }

    #[test]
    fn serializes_with_camel_case_and_omits_empty_annotations() {
        let mut trip = record();
        trip.refresh_totals();
        let json = serde_json::to_value(&trip).unwrap();

        assert_eq!(json["isCouple"], false);
        assert_eq!(json["selectedFlight"]["airline"], "StudentAir");
        assert_eq!(json["selectedStay"]["image"], "bg-orange-400/20");
        assert_eq!(json["progressPercent"], 77.0);
        assert!(json.get("notes").is_none());
        assert!(json.get("placeNotes").is_none());
        assert!(json.get("placeRatings").is_none());
    }

    #[test]
    fn deserializes_records_without_optional_fields() {
        let json = r#"{
            "id": "1718000000000",
            "createdAt": "2024-06-10T08:00:00.000Z",
            "destination": "Barcelona",
            "departure": "Paris, FR",
            "days": 3,
            "budget": 300,
            "people": 2,
            "isCouple": true,
            "vibes": ["Food"],
            "totalCost": 231,
            "savings": 69,
            "progressPercent": 77,
            "isOverBudget": false,
            "selectedFlight": {"id": "f1", "airline": "StudentAir", "time": "07:30 - 09:45", "price": 85, "stops": "Direct"},
            "selectedStay": {"id": "s1", "name": "Youth City Hub", "distance": "0.5km center", "price": 35, "image": "bg-orange-400/20"},
            "selectedPlaces": ["b1"]
        }"#;

        let trip: TripRecord = serde_json::from_str(json).unwrap();
        assert_eq!(trip.id, "1718000000000");
        assert!(trip.is_couple);
        assert!(trip.notes.is_none());
        assert!(trip.place_ratings.is_empty());
    }
}
