//! File-backed pass: catalog, quest database and locale directory on disk.
mod common;

use common::*;
use expanded_task_text::augment::{on_load, AugmentError};
use expanded_task_text::config::AugmentConfig;
use expanded_task_text::host::{load_quest_database, open_locale_database, write_locale_tables};

#[tokio::test]
async fn augment_and_write_tables() {
    let tmp = writable_fixture();
    let root = tmp.path();

    let quests = load_quest_database(root.join("quests.json")).await.unwrap();
    assert_eq!(quests.len(), 4);

    let mut locales = open_locale_database(root.join("locales"), &AugmentConfig::default())
        .await
        .unwrap();
    let report = on_load(root.join("QuestInfo.json"), &quests, &mut locales)
        .await
        .unwrap();
    assert_eq!(report.quests_augmented, 3);

    let tables = locales.into_realized().unwrap();
    let out = root.join("out");
    assert_eq!(write_locale_tables(&out, &tables).await.unwrap(), 2);

    let written: std::collections::BTreeMap<String, String> =
        serde_json::from_slice(&std::fs::read(out.join("en.json")).unwrap()).unwrap();
    assert!(written[&description_of(CHECKING)].starts_with("This quest is required for Collector\n"));
    // Source tables are not modified on disk.
    let source = fixture_table("en");
    assert_eq!(
        source[&description_of(CHECKING)],
        "Find the bronze pocket watch in the truck."
    );
}

#[tokio::test]
async fn corrupt_catalog_aborts_pass() {
    let tmp = writable_fixture();
    let root = tmp.path();
    std::fs::write(root.join("QuestInfo.json"), r#"[{"id": 5}]"#).unwrap();

    let quests = load_quest_database(root.join("quests.json")).await.unwrap();
    let mut locales = open_locale_database(root.join("locales"), &AugmentConfig::default())
        .await
        .unwrap();
    let result = on_load(root.join("QuestInfo.json"), &quests, &mut locales).await;
    assert!(matches!(result, Err(AugmentError::CatalogParse { .. })));

    // Nothing was queued, so realized tables are the originals.
    let tables = locales.into_realized().unwrap();
    assert_eq!(tables["en"], fixture_table("en"));
}
