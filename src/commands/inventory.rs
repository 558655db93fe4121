use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};

use crate::cli::InventoryArgs;
use crate::model::Category;

/// One classified source file inside a year group.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub filename: String,
    pub path: PathBuf,
    pub category: Category,
}

#[derive(Debug, Clone)]
pub struct SourceGroup {
    pub year_key: String,
    pub files: Vec<SourceFile>,
}

#[derive(Debug, Clone)]
pub struct SourceInventory {
    pub groups: Vec<SourceGroup>,
    pub matched_count: usize,
    pub ignored: Vec<String>,
}

pub fn run(args: InventoryArgs) -> Result<()> {
    let inventory = discover_sources(&args.data_dir)?;

    for ignored in &inventory.ignored {
        warn!(file = %ignored, "file outside naming convention, ignored");
    }

    for group in &inventory.groups {
        for file in &group.files {
            info!(
                year_key = %group.year_key,
                file = %file.filename,
                category = file.category.marker(),
                "classified source file"
            );
        }
    }

    info!(
        groups = inventory.groups.len(),
        matched = inventory.matched_count,
        ignored = inventory.ignored.len(),
        "inventory completed"
    );

    Ok(())
}

/// Enumerates the data directory and clusters matching files by year-key.
///
/// Filenames must match `r<2 digits>_<category>.csv` (case-insensitive) to
/// participate; everything else is collected as ignored. Group order is the
/// first-seen order over the sorted filename list and is kept as-is through
/// manifest emission.
pub fn discover_sources(data_dir: &Path) -> Result<SourceInventory> {
    let pattern = Regex::new(r"(?i)^(r\d{2})_([a-z]+)\.csv$")
        .context("failed to compile source filename regex")?;

    let mut filenames = Vec::new();

    let entries =
        fs::read_dir(data_dir).with_context(|| format!("failed to read {}", data_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", data_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToOwned::to_owned)
            .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))?;

        filenames.push((filename, path));
    }

    filenames.sort_by(|a, b| a.0.cmp(&b.0));

    let mut groups: Vec<SourceGroup> = Vec::new();
    let mut matched_count = 0;
    let mut ignored = Vec::new();

    for (filename, path) in filenames {
        let Some(source) = classify(&pattern, &filename, path) else {
            ignored.push(filename);
            continue;
        };

        matched_count += 1;

        let year_key = filename[..3].to_ascii_lowercase();
        match groups.iter_mut().find(|group| group.year_key == year_key) {
            Some(group) => group.files.push(source),
            None => groups.push(SourceGroup {
                year_key,
                files: vec![source],
            }),
        }
    }

    Ok(SourceInventory {
        groups,
        matched_count,
        ignored,
    })
}

fn classify(pattern: &Regex, filename: &str, path: PathBuf) -> Option<SourceFile> {
    let captures = pattern.captures(filename)?;
    let marker = captures.get(2)?.as_str().to_ascii_lowercase();
    let category = Category::from_marker(&marker)?;

    Some(SourceFile {
        filename: filename.to_owned(),
        path,
        category,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), "stub").unwrap();
    }

    #[test]
    fn groups_follow_sorted_first_seen_order() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "r07_kanteihyoka.csv");
        touch(&dir, "r06_gyousei.csv");
        touch(&dir, "r07_gyousei.csv");

        let inventory = discover_sources(dir.path()).unwrap();

        assert_eq!(inventory.matched_count, 3);
        assert_eq!(inventory.groups.len(), 2);
        assert_eq!(inventory.groups[0].year_key, "r06");
        assert_eq!(inventory.groups[1].year_key, "r07");

        let r07_files: Vec<&str> = inventory.groups[1]
            .files
            .iter()
            .map(|file| file.filename.as_str())
            .collect();
        assert_eq!(r07_files, vec!["r07_gyousei.csv", "r07_kanteihyoka.csv"]);
    }

    #[test]
    fn match_is_case_insensitive_and_keys_are_lowercased() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "R07_GYOUSEI.CSV");
        touch(&dir, "r07_kanteihyoka.csv");

        let inventory = discover_sources(dir.path()).unwrap();

        assert_eq!(inventory.groups.len(), 1);
        assert_eq!(inventory.groups[0].year_key, "r07");
        assert_eq!(inventory.groups[0].files.len(), 2);
        assert_eq!(inventory.groups[0].files[0].category, Category::Gyousei);
    }

    #[test]
    fn unknown_markers_and_stray_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "r07_gyousei.csv");
        touch(&dir, "r07_minpou.csv");
        touch(&dir, "notes.csv");
        touch(&dir, "r7_gyousei.csv");
        fs::create_dir(dir.path().join("r08_gyousei.csv")).unwrap();

        let inventory = discover_sources(dir.path()).unwrap();

        assert_eq!(inventory.matched_count, 1);
        assert_eq!(
            inventory.ignored,
            vec!["notes.csv", "r07_minpou.csv", "r7_gyousei.csv"]
        );
    }

    #[test]
    fn empty_directory_yields_no_groups() {
        let dir = TempDir::new().unwrap();

        let inventory = discover_sources(dir.path()).unwrap();

        assert!(inventory.groups.is_empty());
        assert!(inventory.ignored.is_empty());
    }
}
