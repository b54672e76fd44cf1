use std::sync::Arc;

use speculate2::speculate;
use trip_planner::models::*;
use trip_planner::planner::TripPlan;
use trip_planner::store::*;

fn create_trip(destination: &str, places: &[&str]) -> TripRecord {
    let mut plan = TripPlan::new();
    plan.departure = "Lisbon, PT".to_string();
    plan.destination = destination.to_string();
    for place in places {
        plan.toggle_place(place).expect("Unknown place");
    }
    plan.into_record().expect("Failed to build trip")
}

fn ids(trips: &[TripRecord]) -> Vec<&str> {
    trips.iter().map(|t| t.id.as_str()).collect()
}

speculate! {
    before {
        let store = TripStore::in_memory();
    }

    describe "list" {
        it "returns empty list on a fresh store" {
            assert!(store.list().is_empty());
            assert!(store.try_list().expect("Read failed").is_empty());
        }

        it "returns equal lists on repeated reads" {
            store.save(create_trip("Rome, IT", &["b1"]));
            store.save(create_trip("Paris, FR", &[]));

            assert_eq!(store.list(), store.list());
        }

        it "recomputes stale derived fields on read" {
            let storage = Arc::new(MemoryStorage::new());
            let mut trip = create_trip("Rome, IT", &["t1"]);
            trip.total_cost = 1.0;
            trip.is_over_budget = true;
            let raw = serde_json::to_string(&vec![trip.clone()]).unwrap();
            storage.set_item(STORAGE_KEY, &raw).unwrap();

            let listed = TripStore::from_arc(storage).list();

            assert_eq!(listed[0].total_cost, 85.0 + 105.0 + 26.0);
            assert!(!listed[0].is_over_budget);
            assert!(listed[0].totals_are_fresh());
        }
    }

    describe "get_by_id" {
        it "returns None for unknown id" {
            assert!(store.get_by_id("missing").is_none());
            assert!(matches!(store.try_get("missing"), Err(StoreError::NotFound(_))));
        }

        it "returns the trip by id" {
            let trip = create_trip("Kyoto, JP", &[]);
            store.save(trip.clone());

            assert_eq!(store.get_by_id(&trip.id), Some(trip));
        }
    }

    describe "save" {
        it "round-trips the record" {
            let mut trip = create_trip("Barcelona, ES", &["b1", "w1", "t1"]);
            trip.set_notes(Some("pack light".to_string()));
            trip.set_place_note("b1", "great coffee");
            trip.set_place_rating("t1", 5);

            store.save(trip.clone());

            assert!(store.list().contains(&trip));
        }

        it "prepends new trips" {
            let first = create_trip("Rome, IT", &[]);
            let second = create_trip("Paris, FR", &[]);
            store.save(first.clone());
            let trips = store.save(second.clone());

            assert_eq!(ids(&trips), vec![second.id.as_str(), first.id.as_str()]);
            assert_eq!(store.list(), trips);
        }

        it "refuses a duplicate id and keeps the list" {
            let trip = create_trip("Rome, IT", &[]);
            store.save(trip.clone());

            let mut copy = trip.clone();
            copy.destination = "Elsewhere".to_string();
            let trips = store.save(copy.clone());

            assert_eq!(trips.len(), 1);
            assert_eq!(trips[0].destination, "Rome, IT");
            assert!(matches!(store.try_save(copy), Err(StoreError::DuplicateId(_))));
        }

        it "replaces a malformed slot" {
            let storage = Arc::new(MemoryStorage::new());
            storage.set_item(STORAGE_KEY, "not json").unwrap();
            let store = TripStore::from_arc(storage);

            let trips = store.save(create_trip("Rome, IT", &[]));

            assert_eq!(trips.len(), 1);
            assert_eq!(store.list(), trips);
        }
    }

    describe "update" {
        it "replaces in place" {
            let a = create_trip("A", &[]);
            let b = create_trip("B", &[]);
            let c = create_trip("C", &[]);
            store.save(c.clone());
            store.save(b.clone());
            store.save(a.clone());

            let mut changed = b.clone();
            changed.budget = 500.0;
            changed.set_notes(Some("moved dates".to_string()));
            let trips = store.update(changed.clone());

            assert_eq!(ids(&trips), ids(&[a.clone(), b.clone(), c.clone()]));
            assert_eq!(trips[1].notes.as_deref(), Some("moved dates"));
            assert_eq!(trips[1].budget, 500.0);
            assert_eq!(trips[1].savings, 500.0 - 190.0);
            assert_eq!(trips[0], a);
            assert_eq!(trips[2], c);
        }

        it "is a no-op for an unknown id" {
            let trip = create_trip("Rome, IT", &[]);
            store.save(trip.clone());

            let stranger = create_trip("Paris, FR", &[]);
            let trips = store.update(stranger.clone());

            assert_eq!(trips, vec![trip]);
            assert!(matches!(store.try_update(stranger), Err(StoreError::NotFound(_))));
        }
    }

    describe "delete" {
        it "removes exactly the match" {
            let a = create_trip("A", &[]);
            let b = create_trip("B", &[]);
            let c = create_trip("C", &[]);
            store.save(c.clone());
            store.save(b.clone());
            store.save(a.clone());

            let trips = store.delete(&b.id);

            assert_eq!(trips, vec![a, c]);
            assert_eq!(store.list(), trips);
        }

        it "ignores unknown ids" {
            let trip = create_trip("Rome, IT", &[]);
            store.save(trip.clone());

            assert_eq!(store.delete("missing"), vec![trip]);
        }
    }

    describe "clear" {
        it "empties the store" {
            store.save(create_trip("Rome, IT", &[]));
            store.clear();

            assert!(store.list().is_empty());
            assert!(store.get_by_id("anything").is_none());
        }
    }

    describe "annotations" {
        it "sets and clears the trip note" {
            let trip = create_trip("Rome, IT", &[]);
            store.save(trip.clone());

            let updated = store.set_notes(&trip.id, Some("book museum".to_string())).expect("Trip missing");
            assert_eq!(updated.notes.as_deref(), Some("book museum"));

            store.set_notes(&trip.id, Some(String::new()));
            assert!(store.get_by_id(&trip.id).unwrap().notes.is_none());
        }

        it "removes a place note when set to empty" {
            let trip = create_trip("Rome, IT", &["b1"]);
            store.save(trip.clone());

            store.set_place_note(&trip.id, "b1", "try the pancakes");
            assert_eq!(
                store.get_by_id(&trip.id).unwrap().place_notes.get("b1").map(String::as_str),
                Some("try the pancakes")
            );

            store.set_place_note(&trip.id, "b1", "");
            assert!(store.get_by_id(&trip.id).unwrap().place_notes.is_empty());
        }

        it "removes a place rating when set to zero" {
            let trip = create_trip("Rome, IT", &["b1"]);
            store.save(trip.clone());

            store.set_place_rating(&trip.id, "b1", 4);
            assert_eq!(store.get_by_id(&trip.id).unwrap().place_ratings.get("b1"), Some(&4));

            store.set_place_rating(&trip.id, "b1", 0);
            assert!(store.get_by_id(&trip.id).unwrap().place_ratings.is_empty());
        }

        it "rejects ratings above five" {
            let trip = create_trip("Rome, IT", &["b1"]);
            store.save(trip.clone());
            store.set_place_rating(&trip.id, "b1", 3);

            assert!(store.set_place_rating(&trip.id, "b1", 9).is_none());
            assert!(matches!(
                store.try_set_place_rating(&trip.id, "b1", 9),
                Err(StoreError::InvalidRating(9))
            ));
            assert_eq!(store.get_by_id(&trip.id).unwrap().place_ratings.get("b1"), Some(&3));
        }

        it "returns None for unknown trips" {
            assert!(store.set_notes("missing", Some("x".to_string())).is_none());
            assert!(store.set_place_note("missing", "b1", "x").is_none());
            assert!(store.set_place_rating("missing", "b1", 2).is_none());
            assert!(store.list().is_empty());
        }
    }

    describe "concurrent writers" {
        it "keeps every save made from parallel threads" {
            std::thread::scope(|s| {
                for _ in 0..32 {
                    let store = store.clone();
                    s.spawn(move || {
                        store.try_save(create_trip("Rome, IT", &[])).expect("Save failed");
                    });
                }
            });

            assert_eq!(store.list().len(), 32);
        }

        it "accepts only one of two parallel saves of the same id" {
            for _ in 0..50 {
                let store = TripStore::in_memory();
                let trip = create_trip("Rome, IT", &[]);

                let accepted = std::thread::scope(|s| {
                    let handles: Vec<_> = (0..2)
                        .map(|_| {
                            let store = store.clone();
                            let trip = trip.clone();
                            s.spawn(move || store.try_save(trip).is_ok())
                        })
                        .collect();
                    handles
                        .into_iter()
                        .map(|h| h.join().expect("Writer panicked"))
                        .filter(|ok| *ok)
                        .count()
                });

                assert_eq!(accepted, 1);
                assert_eq!(store.list().len(), 1);
            }
        }

        it "keeps annotations made in parallel with saves" {
            let trip = create_trip("Rome, IT", &["b1", "t1"]);
            store.save(trip.clone());

            std::thread::scope(|s| {
                let annotating = store.clone();
                let id = trip.id.clone();
                s.spawn(move || {
                    for place in ["b1", "t1"] {
                        annotating.try_set_place_rating(&id, place, 5).expect("Rating failed");
                    }
                });
                for _ in 0..8 {
                    let store = store.clone();
                    s.spawn(move || {
                        store.try_save(create_trip("Paris, FR", &[])).expect("Save failed");
                    });
                }
            });

            let trips = store.list();
            assert_eq!(trips.len(), 9);
            let rated = store.get_by_id(&trip.id).expect("Trip missing");
            assert_eq!(rated.place_ratings.len(), 2);
        }
    }

    describe "unavailable storage" {
        it "degrades every operation to empty" {
            let store = TripStore::new(UnavailableStorage);
            let trip = create_trip("Rome, IT", &[]);

            assert!(store.save(trip.clone()).is_empty());
            assert!(store.update(trip.clone()).is_empty());
            assert!(store.delete(&trip.id).is_empty());
            assert!(store.get_by_id(&trip.id).is_none());
            assert!(store.set_notes(&trip.id, None).is_none());
            store.clear();
        }
    }

    describe "persistent adapters" {
        it "keeps trips across file store instances" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let trip = create_trip("Rome, IT", &["h5"]);

            TripStore::new(FileStorage::open(dir.path()).unwrap()).save(trip.clone());
            let reopened = TripStore::new(FileStorage::open(dir.path()).unwrap());

            assert_eq!(reopened.list(), vec![trip]);
        }

        it "keeps trips across sqlite store instances" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("trips.db");
            let trip = create_trip("Rome, IT", &[]);

            TripStore::new(SqliteStorage::open(&path).unwrap()).save(trip.clone());
            let reopened = TripStore::new(SqliteStorage::open(&path).unwrap());

            assert_eq!(reopened.get_by_id(&trip.id), Some(trip));
        }
    }
}
