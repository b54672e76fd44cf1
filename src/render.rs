//! Plain-text rendering of trips for the terminal.

use crate::budget::BudgetSummary;
use crate::catalog;
use crate::models::{ActivityOption, TripRecord};

const BAR_WIDTH: usize = 20;
const FILLED: char = '█';
const EMPTY: char = '░';
const STAR: char = '★';

/// Fixed-width progress bar for a budget summary.
pub fn budget_bar(summary: &BudgetSummary) -> String {
    let filled = (summary.progress_percent / 100.0 * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let mut bar = String::with_capacity(BAR_WIDTH * 3);
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(BAR_WIDTH - filled));
    bar
}

/// One line per trip, for listings.
pub fn trip_line(trip: &TripRecord) -> String {
    let vibes: Vec<&str> = trip.vibes.iter().take(3).map(String::as_str).collect();
    format!(
        "{}  {} → {}  {} nights  €{} / €{}  [{}]",
        trip.id,
        trip.departure,
        trip.destination,
        trip.days,
        trip.total_cost.round(),
        trip.budget,
        vibes.join(", ")
    )
}

/// Full trip details with the itinerary as a tree.
///
/// Example output:
/// ```text
/// Barcelona (from Lisbon, PT), 3 nights, 2 people
/// €231 of €300  ███████████████░░░░░ 77%  Saving €69
///
/// ✈ StudentAir 07:30 - 09:45 (Direct) €85
/// ⌂ Youth City Hub, 0.5km center, €35/night
///
/// Day 1 Morning: Arrival & Local Brunch
/// └── Federal Café €15 ★★★★
///     book a table
/// ```
pub fn render_trip(trip: &TripRecord) -> String {
    let summary = trip.summary();
    let mut output = String::new();

    let couple = if trip.is_couple { " (couple)" } else { "" };
    output.push_str(&format!(
        "{} (from {}), {} nights, {} people{}\n",
        trip.destination, trip.departure, trip.days, trip.people, couple
    ));
    output.push_str(&format!(
        "€{} of €{}  {} {}%  {}\n",
        summary.total_cost.round(),
        trip.budget,
        budget_bar(&summary),
        summary.rounded_percent(),
        summary
    ));

    output.push('\n');
    let flight = &trip.selected_flight;
    output.push_str(&format!(
        "✈ {} {} ({}) €{}\n",
        flight.airline, flight.time, flight.stops, flight.price
    ));
    let stay = &trip.selected_stay;
    output.push_str(&format!(
        "⌂ {}, {}, €{}/night\n",
        stay.name, stay.distance, stay.price
    ));

    let mut shown: Vec<&str> = Vec::new();
    for slot in catalog::ITINERARY {
        let chosen: Vec<&ActivityOption> = catalog::activities_for(slot.id, &trip.selected_stay.id)
            .iter()
            .filter(|a| trip.selected_places.iter().any(|p| p == a.id))
            .collect();
        if chosen.is_empty() {
            continue;
        }

        output.push('\n');
        output.push_str(&format!(
            "Day {} {:?}: {}\n",
            slot.day, slot.period, slot.activity
        ));
        shown.extend(chosen.iter().map(|a| a.id));
        push_activities(&mut output, trip, &chosen);
    }

    // Picks near another stay still count towards the total.
    let others: Vec<&ActivityOption> = trip
        .selected_places
        .iter()
        .filter(|p| !shown.contains(&p.as_str()))
        .filter_map(|p| catalog::activity(p))
        .collect();
    if !others.is_empty() {
        output.push_str("\nOther picks\n");
        push_activities(&mut output, trip, &others);
    }

    if let Some(notes) = &trip.notes {
        output.push_str("\nNotes: ");
        output.push_str(notes);
        output.push('\n');
    }

    output
}

fn push_activities(output: &mut String, trip: &TripRecord, chosen: &[&ActivityOption]) {
    for (i, activity) in chosen.iter().enumerate() {
        let is_last = i == chosen.len() - 1;
        let branch = if is_last { "└── " } else { "├── " };
        let continuation = if is_last { "    " } else { "│   " };

        output.push_str(branch);
        output.push_str(activity.name);
        if activity.price > 0.0 {
            output.push_str(&format!(" €{}", activity.price));
        } else {
            output.push_str(" Free");
        }
        if let Some(&rating) = trip.place_ratings.get(activity.id) {
            output.push(' ');
            output.extend(std::iter::repeat(STAR).take(rating as usize));
        }
        output.push('\n');

        if let Some(note) = trip.place_notes.get(activity.id) {
            output.push_str(continuation);
            output.push_str(note);
            output.push('\n');
        }
    }
}
