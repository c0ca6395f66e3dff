use armory_core::{
    ArmorCategory, CatalogBuilder, CharacterId, KeyValueStore, LEGACY_CHARACTER_NAME, MemoryStore,
    Slot, StorageKeys, Tracker, TrackerConfig, job_views,
};
use serde_json::{Value, json};

const ARTIFACT: &str = include_str!("../../armory-web/static/data/Artifact.json");

fn legacy_store() -> MemoryStore {
    let keys = StorageKeys::default();
    MemoryStore::with_entries([
        (
            keys.legacy_progression,
            json!({
                "Monk": { "Relic": { "Hesychast's Crown": { "Hesychast's Crown": {
                    "Relic Seal": true, "Ancient Beastcoin": 3
                } } } }
            })
            .to_string(),
        ),
        (
            keys.legacy_completed_upgrades,
            json!({ "Warrior": { "Artifact": { "Fighter's Mask": { "Pummeler's Mask": true } } } })
                .to_string(),
        ),
        (
            keys.legacy_current_tiers,
            json!({ "Warrior": { "Artifact": { "Fighter's Mask": "Pummeler's Mask" } } })
                .to_string(),
        ),
    ])
}

fn stored(store: &MemoryStore, key: &str) -> Value {
    serde_json::from_str(&store.raw(key).unwrap()).unwrap()
}

#[test]
fn legacy_state_becomes_default_character() {
    let store = legacy_store();
    let tracker = Tracker::load(store.clone(), TrackerConfig::default_config());

    assert_eq!(tracker.characters().len(), 1);
    let character = tracker.selected_character().unwrap();
    assert_eq!(character.name, LEGACY_CHARACTER_NAME);
    assert!(tracker.is_upgrade_complete(
        "Warrior",
        ArmorCategory::Artifact,
        "Pummeler's Mask",
        "Pummeler's Mask"
    ));
    assert_eq!(
        tracker.current_tier("Warrior", ArmorCategory::Artifact, "Fighter's Mask"),
        Some("Pummeler's Mask")
    );
    let progress = tracker.get_step_progress(
        "Monk",
        ArmorCategory::Relic,
        "Hesychast's Crown",
        "Hesychast's Crown",
    );
    assert!(progress["Relic Seal"].is_set());
    assert_eq!(progress["Ancient Beastcoin"].count(), 3);

    let keys = StorageKeys::default();
    for key in [
        &keys.legacy_progression,
        &keys.legacy_completed_upgrades,
        &keys.legacy_current_tiers,
    ] {
        assert_eq!(stored(&store, key), json!({}));
    }
    let saved = stored(&store, &keys.characters);
    assert_eq!(saved[0]["name"], "Default");
    assert_eq!(
        saved[0]["currentTiers"]["Warrior"]["Artifact"]["Fighter's Mask"],
        "Pummeler's Mask"
    );
    assert_eq!(
        stored(&store, &keys.selected_character),
        Value::String(character.id.to_string())
    );
}

#[test]
fn migrated_checklist_shows_on_the_slot_card() {
    let keys = StorageKeys::default();
    let store = MemoryStore::with_entries([(
        keys.legacy_progression,
        json!({ "Warrior": { "Artifact": { "Pummeler's Mask": { "Pummeler's Mask": {
            "Ancient Papyrus": true, "Gold Beastcoin": 2
        } } } } })
        .to_string(),
    )]);
    let tracker = Tracker::load(store, TrackerConfig::default_config());
    let catalog = CatalogBuilder::from_documents([(ArmorCategory::Artifact, ARTIFACT)])
        .unwrap()
        .catalog;

    let views = job_views(&catalog, tracker.progress(), "Warrior", ArmorCategory::Artifact);
    let head = &views[0];
    assert_eq!(head.slot, Slot::Head);
    assert_eq!(head.name, "Fighter's Mask");
    let step = head.next_step().unwrap();
    assert_eq!(step.name, "Pummeler's Mask");
    assert_eq!(step.rounded_percent(), 100);
    assert!(step.requirements.iter().all(|req| req.satisfied));
    assert_eq!(step.requirements[1].current, 2);
    assert!(step.ready());
}

#[test]
fn migrated_completion_hides_the_step() {
    let tracker = Tracker::load(legacy_store(), TrackerConfig::default_config());
    let catalog = CatalogBuilder::from_documents([(ArmorCategory::Artifact, ARTIFACT)])
        .unwrap()
        .catalog;
    let head = &job_views(&catalog, tracker.progress(), "Warrior", ArmorCategory::Artifact)[0];
    assert_eq!(head.name, "Pummeler's Mask");
    assert!(head.pending.iter().all(|step| step.name != "Pummeler's Mask"));
    assert_eq!(head.next_step().unwrap().name, "Pummeler's Mask +1");
}

#[test]
fn reloading_does_not_migrate_twice() {
    let store = legacy_store();
    let first = Tracker::load(store.clone(), TrackerConfig::default_config());
    let id = first.selected_character_id().cloned().unwrap();
    drop(first);

    let mut second = Tracker::load(store.clone(), TrackerConfig::default_config());
    assert_eq!(second.characters().len(), 1);
    assert_eq!(second.selected_character_id(), Some(&id));
    assert!(!second.migrate_legacy_state().unwrap());
}

#[test]
fn existing_characters_block_migration() {
    let keys = StorageKeys::default();
    let store = legacy_store();
    store
        .write(
            &keys.characters,
            &json!([{ "id": 42, "name": "Iroha" }]).to_string(),
        )
        .unwrap();
    store.write(&keys.selected_character, "42").unwrap();

    let tracker = Tracker::load(store.clone(), TrackerConfig::default_config());
    assert_eq!(tracker.characters().len(), 1);
    assert_eq!(tracker.characters()[0].name, "Iroha");
    assert_eq!(tracker.selected_character_id(), Some(&CharacterId::from("42")));
    assert_ne!(stored(&store, &keys.legacy_progression), json!({}));
}

#[test]
fn failed_migration_write_keeps_legacy_data() {
    let keys = StorageKeys::default();
    let store = legacy_store();
    store.set_fail_writes(true);

    let tracker = Tracker::load(store.clone(), TrackerConfig::default_config());
    assert_eq!(tracker.characters().len(), 1);
    assert!(store.raw(&keys.characters).is_none());
    assert_ne!(stored(&store, &keys.legacy_current_tiers), json!({}));
}

#[test]
fn empty_storage_starts_without_characters() {
    let store = MemoryStore::new();
    let tracker = Tracker::load(store.clone(), TrackerConfig::default_config());
    assert!(tracker.characters().is_empty());
    assert!(tracker.selected_character().is_none());
    assert!(store.raw(&StorageKeys::default().characters).is_none());
}

#[test]
fn unreadable_character_list_is_treated_as_empty() {
    let keys = StorageKeys::default();
    let store = MemoryStore::with_entries([(keys.characters.clone(), "[{broken".to_owned())]);
    let tracker = Tracker::load(store.clone(), TrackerConfig::default_config());
    assert!(tracker.characters().is_empty());
    assert_eq!(store.raw(&keys.characters_backup).as_deref(), Some("[{broken"));
}
