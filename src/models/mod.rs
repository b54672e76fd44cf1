//! Domain models for the trip planner.
//!
//! # Core Concepts
//!
//! ## User Data
//!
//! - [`TripRecord`]: One saved trip plan. Holds the user's inputs, snapshots of
//!   the chosen flight and stay, the selected activity ids, and derived budget
//!   fields that are recomputed whenever the record is read or written.
//! - [`FlightSnapshot`] / [`StaySnapshot`]: Copies of catalog options taken at
//!   save time. Later catalog changes never leak into saved records.
//!
//! ## Reference Data
//!
//! Static and read-only, shared by every record through ids:
//!
//! - [`FlightOption`], [`StayOption`]: What the trip builder offers.
//! - [`ItinerarySlot`]: A day/period in the generated itinerary.
//! - [`ActivityOption`]: Something to do in a slot, priced per person.
//! - [`QuickPick`], [`FeedCard`]: Home feed cards.

mod catalog;
mod trip;

pub use catalog::*;
pub use trip::*;
