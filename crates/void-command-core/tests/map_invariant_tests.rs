//! Randomized tests for map invariants.
//!
//! A seeded generator drives long sequences of selections and fleet moves
//! through the store; after every step the grid must still hold each
//! coordinate once, at most one hex may be active, and every fleet must
//! sit on exactly one hex.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use void_command_core::{Element, ElementKind, GameStore, HexCoord, MapSettings};

// =============================================================================
// Test Helpers
// =============================================================================

const FLEETS: [&str; 3] = ["fleet-1", "fleet-2", "fleet-3"];

fn create_store_with_fleets() -> GameStore {
    let mut store = GameStore::default();
    store.initialize_map();
    store.update_hex_element(1, 1, Element::new("fleet-2", ElementKind::Fleet));
    store.update_hex_element(8, 2, Element::new("fleet-3", ElementKind::Fleet));
    store
}

fn random_coord(rng: &mut StdRng) -> (i32, i32) {
    // Reach a little outside the grid to exercise missing hexes
    (rng.gen_range(-2..13), rng.gen_range(-2..13))
}

fn assert_map_invariants(store: &GameStore) {
    let settings = MapSettings::default();
    assert_eq!(store.hexes().len(), settings.hex_count());

    let mut coords: Vec<HexCoord> = store.hexes().iter().map(|h| h.coord).collect();
    coords.sort();
    coords.dedup();
    assert_eq!(coords.len(), settings.hex_count());

    for fleet in FLEETS {
        let holders = store
            .hexes()
            .iter()
            .filter(|h| h.elements.iter().any(|e| e.id == fleet))
            .count();
        assert_eq!(holders, 1, "{} must be on exactly one hex", fleet);
    }

    if let Some(active) = store.active_hex() {
        assert_eq!(store.get_hex(active.coord.x, active.coord.y), Some(active));
    }

    // The home planet never moves
    assert!(store
        .get_hex(5, 4)
        .unwrap()
        .elements
        .iter()
        .any(|e| e.id == "planet-earth"));
}

fn locate(store: &GameStore, id: &str) -> Option<HexCoord> {
    store
        .hexes()
        .iter()
        .find(|h| h.elements.iter().any(|e| e.id == id))
        .map(|h| h.coord)
}

// =============================================================================
// 1. Random Walk Tests
// =============================================================================

mod random_walk {
    use super::*;

    #[test]
    fn test_random_moves_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut store = create_store_with_fleets();

        for _ in 0..500 {
            let fleet = FLEETS[rng.gen_range(0..FLEETS.len())];
            let (tx, ty) = random_coord(&mut rng);
            let from = locate(&store, fleet).unwrap();
            let moved = store.move_fleet(from.x, from.y, tx, ty, fleet);
            let target = HexCoord::new(tx, ty);
            match moved {
                Some(m) => {
                    assert_eq!(m.to, target);
                    assert_eq!(locate(&store, fleet), Some(target));
                }
                None => assert_eq!(locate(&store, fleet), Some(from)),
            }
            assert_map_invariants(&store);
        }
    }

    #[test]
    fn test_random_clicks_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut store = create_store_with_fleets();

        for _ in 0..500 {
            let (x, y) = random_coord(&mut rng);
            let legal = store.is_legal_fleet_destination(x, y);
            let moved = store.select_hex(x, y);
            assert_eq!(moved.is_some(), legal);

            let expected = store.get_hex(x, y).map(|h| h.coord);
            assert_eq!(store.active_hex().map(|h| h.coord), expected);
            assert_map_invariants(&store);
        }
    }

    #[test]
    fn test_adjacent_moves_rotate_to_direction() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut store = create_store_with_fleets();

        for _ in 0..200 {
            let from = locate(&store, "fleet-1").unwrap();
            let neighbors: Vec<HexCoord> = from
                .neighbors()
                .into_iter()
                .filter(|c| store.get_hex(c.x, c.y).is_some())
                .collect();
            let to = neighbors[rng.gen_range(0..neighbors.len())];
            let moved = store.move_fleet(from.x, from.y, to.x, to.y, "fleet-1").unwrap();

            let expected = from.direction_to(&to).map(|d| d.rotation());
            assert_eq!(Some(moved.rotation), expected);
            let element = store
                .get_hex(to.x, to.y)
                .unwrap()
                .elements
                .iter()
                .find(|e| e.id == "fleet-1")
                .cloned()
                .unwrap();
            assert_eq!(element.rotation, Some(moved.rotation));
            assert_map_invariants(&store);
        }
    }
}
