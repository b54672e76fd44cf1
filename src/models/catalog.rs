use serde::{Deserialize, Serialize};

/// A bookable flight offered by the trip builder.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlightOption {
    pub id: &'static str,
    pub airline: &'static str,
    /// Departure and arrival, e.g. `07:30 - 09:45`.
    pub time: &'static str,
    pub price: f64,
    /// Human label such as `Direct`.
    pub stops: &'static str,
}

/// A lodging option, priced per night.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StayOption {
    pub id: &'static str,
    pub name: &'static str,
    /// Distance label, e.g. `0.5km center`.
    pub distance: &'static str,
    pub price: f64,
    /// Visual hint for the client (a style class in the mobile app).
    pub image: &'static str,
}

/// Time of day an itinerary slot covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Period {
    Morning,
    Afternoon,
}

/// One entry of the generated itinerary. Activities hang off slots.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItinerarySlot {
    pub id: &'static str,
    pub day: u32,
    pub period: Period,
    pub activity: &'static str,
}

/// An optional activity the user can add to a trip.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityOption {
    pub id: &'static str,
    pub name: &'static str,
    pub vibe: &'static str,
    pub dist: &'static str,
    /// Price per person. Zero means free.
    pub price: f64,
}

/// Activities for one itinerary slot, grouped by the stay they are close to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotActivities {
    pub slot_id: &'static str,
    pub stay_id: &'static str,
    pub options: &'static [ActivityOption],
}

/// Destination card on the home feed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuickPick {
    pub title: &'static str,
    pub desc: &'static str,
    pub price: &'static str,
    pub image: &'static str,
}

/// Inspiration card on the home feed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeedCard {
    pub title: &'static str,
    pub desc: &'static str,
    pub tag: &'static str,
    pub image: &'static str,
}

/// Everything the home screen shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFeed {
    pub quick_picks: &'static [QuickPick],
    pub for_you: &'static [FeedCard],
}
