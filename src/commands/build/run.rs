use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::BuildArgs;
use crate::commands::inventory::{discover_sources, SourceGroup};
use crate::model::{BundleEntry, Manifest, QuestionRecord, MANIFEST_SCHEMA_VERSION};
use crate::util::{ensure_directory, utc_string, write_json_pretty};

use super::bundle::{sort_records, write_bundle};
use super::manifest::{bundle_title, etag_for, latest_updated_at};
use super::normalize::normalize_row;
use super::parse::{read_question_rows, validate_answer};

pub fn run(args: BuildArgs) -> Result<()> {
    let started = Utc::now();
    let generated_at = utc_string(started);
    let content_version = args
        .content_version
        .clone()
        .unwrap_or_else(|| started.format("%Y.%m.%d").to_string());

    info!(
        data_dir = %args.data_dir.display(),
        dist_dir = %args.dist_dir.display(),
        content_version = %content_version,
        "starting build"
    );

    let inventory = discover_sources(&args.data_dir)?;

    for ignored in &inventory.ignored {
        warn!(file = %ignored, "file outside naming convention, ignored");
    }

    let bundles_dir = args.dist_dir.join("bundles");
    ensure_directory(&bundles_dir)?;

    let mut bundles = Vec::with_capacity(inventory.groups.len());

    for group in &inventory.groups {
        let records = collect_group_records(group, &generated_at)?;
        let artifact = write_bundle(&bundles_dir, &group.year_key, &records)?;

        info!(
            year_key = %group.year_key,
            items = records.len(),
            size = artifact.size,
            path = %artifact.path.display(),
            "wrote bundle"
        );

        bundles.push(BundleEntry {
            id: group.year_key.clone(),
            title: bundle_title(records.first(), records.len()),
            year: records.first().and_then(|record| record.year),
            items: records.len(),
            url: format!("/bundles/{}.jsonl.gz", group.year_key),
            size: artifact.size,
            sha256: artifact.sha256,
            etag: etag_for(&group.year_key, &content_version),
            updated_at: latest_updated_at(&records).unwrap_or_else(|| generated_at.clone()),
        });
    }

    let manifest = Manifest {
        schema_version: MANIFEST_SCHEMA_VERSION.to_owned(),
        content_version,
        generated_at,
        bundles,
    };

    let manifest_path = args.dist_dir.join("manifest.json");
    write_json_pretty(&manifest_path, &manifest)?;

    info!(
        path = %manifest_path.display(),
        bundles = manifest.bundles.len(),
        "build completed"
    );

    Ok(())
}

/// Parses, validates and normalizes every file of one year group, files in
/// sorted filename order, then applies the stable intra-group sort.
fn collect_group_records(group: &SourceGroup, built_at: &str) -> Result<Vec<QuestionRecord>> {
    let mut records = Vec::new();

    for source in &group.files {
        let rows = read_question_rows(&source.path, &source.filename)?;

        for (index, row) in rows.iter().enumerate() {
            let answer = validate_answer(row, &source.filename, index)?;
            records.push(normalize_row(
                row,
                index,
                &group.year_key,
                source.category,
                answer,
                built_at,
            ));
        }

        info!(file = %source.filename, rows = rows.len(), "parsed source file");
    }

    sort_records(&mut records);

    Ok(records)
}
