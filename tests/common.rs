//! Test utilities & fixtures.
//! Provides access to the quest catalog, quest database and locale tables under `tests/fixtures`.

use expanded_task_text::augment::{LazyLocale, LocaleDatabase, LocaleTable, MongoId, QuestDatabase};
use std::path::{Path, PathBuf};

pub const DEBUT: &str = "5936d90786f7742b1420ba5b";
pub const CHECKING: &str = "59674cd986f7744ab26e32f2";
pub const SHORTAGE: &str = "5967733e86f774602332fc84";
#[allow(dead_code)]
pub const BACKGROUND_CHECK: &str = "5967530a86f77462ba22226b";

/// Return the path to the static fixture directory.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[allow(dead_code)]
pub fn id(raw: &str) -> MongoId {
    MongoId::parse(raw).expect("fixture id")
}

#[allow(dead_code)]
pub fn description_of(quest: &str) -> String {
    format!("{} description", quest)
}

pub fn fixture_table(language: &str) -> LocaleTable {
    let path = fixture_root().join("locales").join(format!("{}.json", language));
    let bytes = std::fs::read(path).expect("read locale fixture");
    serde_json::from_slice(&bytes).expect("parse locale fixture")
}

#[allow(dead_code)]
pub fn fixture_quests() -> QuestDatabase {
    let bytes = std::fs::read(fixture_root().join("quests.json")).expect("read quests fixture");
    serde_json::from_slice(&bytes).expect("parse quests fixture")
}

/// In-memory locale database over the `en` and `fr` fixtures, `en` as reference.
#[allow(dead_code)]
pub fn fixture_locales() -> LocaleDatabase {
    LocaleDatabase::new("en", fixture_table("en"))
        .with_language(LazyLocale::from_table("en", fixture_table("en")))
        .with_language(LazyLocale::from_table("fr", fixture_table("fr")))
}

/// Return a writable copy (temp dir) of the fixture tree.
#[allow(dead_code)]
pub fn writable_fixture() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    let src = fixture_root();

    std::fs::create_dir_all(root.join("locales")).unwrap();
    for file in ["QuestInfo.json", "quests.json"] {
        std::fs::copy(src.join(file), root.join(file)).unwrap();
    }
    for lang in ["en.json", "fr.json"] {
        std::fs::copy(src.join("locales").join(lang), root.join("locales").join(lang)).unwrap();
    }
    tmp
}
