use wasm_bindgen_test::*;

use armory_core::{ArmorCategory, KeyValueStore, StorageKeys, Tracker, TrackerConfig};
use armory_web::dom;
use armory_web::storage::LocalStore;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn clear(keys: &StorageKeys) {
    let store = LocalStore::open();
    for key in [
        &keys.characters,
        &keys.characters_backup,
        &keys.selected_character,
        &keys.legacy_progression,
        &keys.legacy_completed_upgrades,
        &keys.legacy_current_tiers,
    ] {
        store.remove(key).expect("remove key");
    }
}

#[wasm_bindgen_test]
fn local_store_round_trips_text() {
    let store = LocalStore::open();
    assert!(store.is_available());
    store.write("armory-test-key", "{\"a\":1}").expect("write");
    assert_eq!(
        store.read("armory-test-key").expect("read").as_deref(),
        Some("{\"a\":1}")
    );
    store.remove("armory-test-key").expect("remove");
    assert_eq!(store.read("armory-test-key").expect("read"), None);
}

#[wasm_bindgen_test]
fn tracker_progress_survives_reload() {
    let keys = StorageKeys::default();
    clear(&keys);

    let config = TrackerConfig::default_config().with_id_seed(dom::random_seed());
    let mut tracker = Tracker::load(LocalStore::open(), config.clone());
    tracker.add_character("Naji").expect("add character");
    tracker
        .toggle_requirement(
            "Warrior",
            ArmorCategory::Artifact,
            "Pummeler's Mask",
            "Pummeler's Mask",
            "Ancient Papyrus",
        )
        .expect("toggle");

    let reloaded = Tracker::load(LocalStore::open(), config);
    assert_eq!(reloaded.characters().len(), 1);
    assert!(
        reloaded.get_step_progress(
            "Warrior",
            ArmorCategory::Artifact,
            "Pummeler's Mask",
            "Pummeler's Mask"
        )["Ancient Papyrus"]
            .is_set()
    );
    clear(&keys);
}
