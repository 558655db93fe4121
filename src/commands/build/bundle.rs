use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::model::QuestionRecord;
use crate::util::sha256_file;

/// Integrity metadata for one written bundle file.
#[derive(Debug, Clone)]
pub struct BundleArtifact {
    pub path: PathBuf,
    pub size: u64,
    pub sha256: String,
}

/// Stable intra-group order: subject first, question number as tie-break.
/// Subjects compare by UTF-8 code point, which is deterministic regardless
/// of the original file order.
pub fn sort_records(records: &mut [QuestionRecord]) {
    records.sort_by(|a, b| {
        a.subject
            .cmp(&b.subject)
            .then(a.question_no.cmp(&b.question_no))
    });
}

/// Serializes the group as newline-joined JSON lines (no trailing newline)
/// and streams them through a gzip encoder to `{yearKey}.jsonl.gz`.
/// Size and digest are taken over the compressed bytes on disk.
pub fn write_bundle(
    bundles_dir: &Path,
    year_key: &str,
    records: &[QuestionRecord],
) -> Result<BundleArtifact> {
    let path = bundles_dir.join(format!("{year_key}.jsonl.gz"));

    let file = File::create(&path)
        .with_context(|| format!("failed to create bundle: {}", path.display()))?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());

    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            encoder
                .write_all(b"\n")
                .with_context(|| format!("failed to write bundle: {}", path.display()))?;
        }

        let line = serde_json::to_vec(record)
            .with_context(|| format!("failed to serialize record '{}'", record.id))?;
        encoder
            .write_all(&line)
            .with_context(|| format!("failed to write bundle: {}", path.display()))?;
    }

    let mut inner = encoder
        .finish()
        .with_context(|| format!("failed to finish gzip stream: {}", path.display()))?;
    inner
        .flush()
        .with_context(|| format!("failed to flush bundle: {}", path.display()))?;
    drop(inner);

    let size = fs::metadata(&path)
        .with_context(|| format!("failed to stat bundle: {}", path.display()))?
        .len();
    let sha256 = sha256_file(&path)?;

    Ok(BundleArtifact { path, size, sha256 })
}
