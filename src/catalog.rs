//! Static reference data the trip builder picks from.
//!
//! Nothing here is user data. Records point at activities by id and copy
//! flights and stays by value, so this module can change without touching
//! saved trips.

use crate::models::*;

pub const FLIGHTS: &[FlightOption] = &[
    FlightOption {
        id: "f1",
        airline: "StudentAir",
        time: "07:30 - 09:45",
        price: 85.0,
        stops: "Direct",
    },
    FlightOption {
        id: "f2",
        airline: "BudgetFly",
        time: "14:00 - 16:30",
        price: 110.0,
        stops: "Direct",
    },
];

pub const STAYS: &[StayOption] = &[
    StayOption {
        id: "s1",
        name: "Youth City Hub",
        distance: "0.5km center",
        price: 35.0,
        image: "bg-orange-400/20",
    },
    StayOption {
        id: "s2",
        name: "Budget Inn Central",
        distance: "1.2km center",
        price: 65.0,
        image: "bg-blue-400/20",
    },
];

pub const ITINERARY: &[ItinerarySlot] = &[
    ItinerarySlot {
        id: "brunch",
        day: 1,
        period: Period::Morning,
        activity: "Arrival & Local Brunch",
    },
    ItinerarySlot {
        id: "walking",
        day: 1,
        period: Period::Afternoon,
        activity: "Walking Around",
    },
    ItinerarySlot {
        id: "tourist",
        day: 2,
        period: Period::Morning,
        activity: "Visiting Touristic Attractions",
    },
    ItinerarySlot {
        id: "hike",
        day: 2,
        period: Period::Afternoon,
        activity: "Sunset Hike / Viewpoint",
    },
];

const fn option(
    id: &'static str,
    name: &'static str,
    vibe: &'static str,
    dist: &'static str,
    price: f64,
) -> ActivityOption {
    ActivityOption {
        id,
        name,
        vibe,
        dist,
        price,
    }
}

pub const ACTIVITIES: &[SlotActivities] = &[
    SlotActivities {
        slot_id: "brunch",
        stay_id: "s1",
        options: &[
            option("b1", "Federal Café", "Great coffee", "200m away", 15.0),
            option("b2", "Milk Bar", "Budget friendly", "350m away", 12.0),
            option("b3", "Caravelle", "Tex-Mex fusion", "500m away", 18.0),
            option("b4", "Tropico", "Exotic fruits", "600m away", 20.0),
        ],
    },
    SlotActivities {
        slot_id: "brunch",
        stay_id: "s2",
        options: &[
            option("b5", "EatMyTrip", "Fancy waffles", "400m away", 22.0),
            option("b6", "Brunch & Cake", "Healthy options", "150m away", 18.0),
            option("b7", "Billy Brunch", "Cozy atmosphere", "300m away", 15.0),
            option("b8", "Ugot", "Vintage cakes", "450m away", 10.0),
        ],
    },
    SlotActivities {
        slot_id: "walking",
        stay_id: "s1",
        options: &[
            option("w1", "Gothic Quarter", "History & Mystery", "2km walk", 0.0),
            option("w2", "Port Vell", "Seafront stroll", "1 km walk", 0.0),
            option("w3", "El Born", "Bohemian vibes", "600m walk", 0.0),
            option("w4", "Ciutadella Park", "Green oasis", "900m walk", 0.0),
        ],
    },
    SlotActivities {
        slot_id: "walking",
        stay_id: "s2",
        options: &[
            option("w5", "Modernisme Route", "Gaudi Architecture", "1.5km walk", 0.0),
            option("w6", "Raval Art", "Urban street art", "300m walk", 0.0),
            option("w7", "Passeig de Gràcia", "Luxury shopping", "100m walk", 0.0),
            option("w8", "Plaza Catalunya", "City center hub", "400m walk", 0.0),
        ],
    },
    SlotActivities {
        slot_id: "tourist",
        stay_id: "s1",
        options: &[
            option("t1", "Sagrada Família", "Masterpiece", "Metro 12m", 26.0),
            option("t2", "Park Güell", "Mosaic gardens", "Bus 20m", 10.0),
            option("t3", "Picasso Museum", "Art history", "Walk 15m", 15.0),
            option("t4", "Barceloneta Beach", "Sunny vibes", "Walk 20m", 0.0),
        ],
    },
    SlotActivities {
        slot_id: "tourist",
        stay_id: "s2",
        options: &[
            option("t5", "Sagrada Família", "Masterpiece", "Metro 8m", 26.0),
            option("t6", "Casa Batlló", "Dragon house", "Walk 5m", 35.0),
            option("t7", "La Pedrera", "Quarry facade", "Walk 10m", 25.0),
            option("t8", "Magic Fountain", "Light show", "Metro 15m", 0.0),
        ],
    },
    SlotActivities {
        slot_id: "hike",
        stay_id: "s1",
        options: &[
            option("h1", "Bunkers del Carmel", "Best 360° views", "Bus 25m", 0.0),
            option("h2", "Tibidabo", "Theme park & views", "Bus 40m", 0.0),
            option("h3", "Collserola Park", "Nature trails", "Train 30m", 0.0),
            option("h4", "Carretera de les Aigües", "Flat walking path", "Train 25m", 0.0),
        ],
    },
    SlotActivities {
        slot_id: "hike",
        stay_id: "s2",
        options: &[
            option("h5", "Montjuïc Castle", "Sea views", "Metro 15m", 9.0),
            option("h6", "Olympic Stadium", "Sports history", "Metro 18m", 0.0),
            option("h7", "Botanical Gardens", "Diverse flora", "Bus 20m", 5.0),
            option("h8", "Mirador de l'Alcalde", "Port views", "Metro 15m", 0.0),
        ],
    },
];

/// Autocomplete suggestions for departure and destination.
pub const LOCATIONS: &[&str] = &[
    "Amsterdam, NL",
    "Barcelona, ES",
    "Bali, ID",
    "Bangkok, TH",
    "Berlin, DE",
    "Kyoto, JP",
    "Lisbon, PT",
    "London, UK",
    "Madrid, ES",
    "New York, US",
    "Paris, FR",
    "Rome, IT",
    "Singapore, SG",
    "Tokyo, JP",
];

pub const VIBES: &[&str] = &["Explore", "Party", "Chill", "Culture", "Nature", "Food"];

/// Vibes preselected in a fresh trip builder.
pub const DEFAULT_VIBES: &[&str] = &["Explore", "Food"];

pub const QUICK_PICKS: &[QuickPick] = &[
    QuickPick {
        title: "Bali, Indonesia",
        desc: "Tropical paradise",
        price: "$45/day",
        image: "/images/bali.jpg",
    },
    QuickPick {
        title: "Kyoto, Japan",
        desc: "Cultural heritage",
        price: "$80/day",
        image: "/images/kyoto.jpg",
    },
    QuickPick {
        title: "Lisbon, Portugal",
        desc: "City of light",
        price: "$65/day",
        image: "/images/lisbon.jpg",
    },
];

pub const FOR_YOU: &[FeedCard] = &[
    FeedCard {
        title: "Party time",
        desc: "Work hard, play hard.",
        tag: "Lifestyle",
        image: "/images/party.jpg",
    },
    FeedCard {
        title: "Hidden Beaches",
        desc: "Escape the crowds.",
        tag: "Nature",
        image: "/images/beach.jpg",
    },
];

pub fn flight(id: &str) -> Option<&'static FlightOption> {
    FLIGHTS.iter().find(|f| f.id == id)
}

pub fn stay(id: &str) -> Option<&'static StayOption> {
    STAYS.iter().find(|s| s.id == id)
}

pub fn slot(id: &str) -> Option<&'static ItinerarySlot> {
    ITINERARY.iter().find(|s| s.id == id)
}

/// Every activity across all slots and stays.
pub fn all_activities() -> impl Iterator<Item = &'static ActivityOption> {
    ACTIVITIES.iter().flat_map(|group| group.options.iter())
}

pub fn activity(id: &str) -> Option<&'static ActivityOption> {
    all_activities().find(|a| a.id == id)
}

/// Options for one itinerary slot near one stay. Empty for unknown pairs.
pub fn activities_for(slot_id: &str, stay_id: &str) -> &'static [ActivityOption] {
    ACTIVITIES
        .iter()
        .find(|group| group.slot_id == slot_id && group.stay_id == stay_id)
        .map(|group| group.options)
        .unwrap_or(&[])
}

/// Prices of the given activity ids. Unknown ids are priced at zero.
pub fn activity_prices<S: AsRef<str>>(ids: &[S]) -> Vec<f64> {
    ids.iter()
        .map(|id| activity(id.as_ref()).map_or(0.0, |a| a.price))
        .collect()
}

/// Case-insensitive substring match over [`LOCATIONS`], excluding an exact hit
/// so a completed field stops suggesting itself.
pub fn search_locations(query: &str) -> Vec<&'static str> {
    let needle = query.to_lowercase();
    LOCATIONS
        .iter()
        .copied()
        .filter(|l| l.to_lowercase().contains(&needle) && *l != query)
        .collect()
}

pub fn home_feed() -> HomeFeed {
    HomeFeed {
        quick_picks: QUICK_PICKS,
        for_you: FOR_YOU,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn activity_ids_are_unique() {
        let ids: Vec<_> = all_activities().map(|a| a.id).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), 32);
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn every_slot_has_options_for_every_stay() {
        for slot in ITINERARY {
            for stay in STAYS {
                assert_eq!(activities_for(slot.id, stay.id).len(), 4);
            }
        }
    }

    #[test]
    fn unknown_slot_has_no_options() {
        assert!(activities_for("dinner", "s1").is_empty());
    }

    #[test]
    fn prices_unknown_activities_at_zero() {
        assert_eq!(activity_prices(&["b1", "nope", "t6"]), vec![15.0, 0.0, 35.0]);
    }

    #[test]
    fn looks_up_options_by_id() {
        assert_eq!(flight("f2").map(|f| f.price), Some(110.0));
        assert_eq!(stay("s2").map(|s| s.name), Some("Budget Inn Central"));
        assert_eq!(slot("hike").map(|s| s.day), Some(2));
        assert!(flight("f9").is_none());
    }

    #[test]
    fn searches_locations_case_insensitively() {
        assert_eq!(search_locations("ba"), vec!["Barcelona, ES", "Bali, ID", "Bangkok, TH"]);
        assert_eq!(search_locations("JP"), vec!["Kyoto, JP", "Tokyo, JP"]);
    }

    #[test]
    fn exact_location_is_not_suggested_again() {
        assert!(search_locations("Rome, IT").is_empty());
    }

    #[test]
    fn default_vibes_are_known() {
        assert!(DEFAULT_VIBES.iter().all(|v| VIBES.contains(v)));
    }
}
