//! Client-side model for the admin file table: category buckets, search,
//! and size formatting. Filtering is a pure function over the fetched list;
//! nothing here talks to the backend.

use crate::api::FileRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FileCategory {
    #[default]
    All,
    Manual,
    Estimate,
    Knowledge,
}

impl FileCategory {
    pub const ALL: &'static [FileCategory] = &[
        FileCategory::All,
        FileCategory::Manual,
        FileCategory::Estimate,
        FileCategory::Knowledge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::All => "すべて",
            FileCategory::Manual => "マニュアル",
            FileCategory::Estimate => "見積もり",
            FileCategory::Knowledge => "ナレッジ",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            FileCategory::All => "all",
            FileCategory::Manual => "manual",
            FileCategory::Estimate => "estimate",
            FileCategory::Knowledge => "knowledge",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "manual" => FileCategory::Manual,
            "estimate" => FileCategory::Estimate,
            "knowledge" => FileCategory::Knowledge,
            _ => FileCategory::All,
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            FileCategory::All => &[],
            FileCategory::Manual => &["manual", "マニュアル", "取扱"],
            FileCategory::Estimate => &["estimate", "見積"],
            FileCategory::Knowledge => &["faq", "knowledge", "ナレッジ", "qa"],
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        if matches!(self, FileCategory::All) {
            return true;
        }
        let lowered = name.to_lowercase();
        self.keywords().iter().any(|keyword| lowered.contains(keyword))
    }
}

/// Substring match on the name, case-insensitive, combined with the
/// category's keyword membership test.
pub fn filter_files(files: &[FileRecord], query: &str, category: FileCategory) -> Vec<FileRecord> {
    let needle = query.trim().to_lowercase();
    files
        .iter()
        .filter(|file| category.matches(&file.name))
        .filter(|file| needle.is_empty() || file.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn format_bytes(size: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    let size_f = size as f64;
    if size_f >= MIB {
        format!("{:.1} MB", size_f / MIB)
    } else if size_f >= KIB {
        format!("{:.1} KB", size_f / KIB)
    } else {
        format!("{size} B")
    }
}
