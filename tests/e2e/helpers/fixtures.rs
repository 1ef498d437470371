use kana_audio_gen::domain::vocabulary::{VocabularyItem, VocabularySet};
use std::path::{Path, PathBuf};

pub fn vocabulary_set(name: &str, directory: &str, entries: &[(&str, &str)]) -> VocabularySet {
    VocabularySet {
        name: name.to_string(),
        directory: PathBuf::from(directory),
        language: None,
        items: entries
            .iter()
            .map(|(id, text)| VocabularyItem::new(*id, *text))
            .collect(),
        source: None,
    }
}

/// Write a set as a JSON batch file and return its path
pub fn write_batch_file(dir: &Path, set: &VocabularySet) -> PathBuf {
    let path = dir.join(format!("{}.json", set.name));
    std::fs::write(&path, serde_json::to_string_pretty(set).expect("serialize set"))
        .expect("write batch file");
    path
}
