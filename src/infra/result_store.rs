// ============================================================
// Layer 6 — Attack Result Store
// ============================================================
// Every attack run writes a fresh directory under mias/ whose
// name carries the run metadata (see infra::naming):
//
//   mias/
//     20250101120000__demo__synth50__2__8__0.002__synth50__8__0.912/
//       output.csv   ← content,is_member,score,normalized_score
//       losses.csv   ← population,loss   (member / held_out)
//       roc.csv      ← fpr,tpr,threshold
//
// Existing directories are never touched again.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::mia::AttackSummary;
use crate::domain::traits::{AttackArchive, AttackArtifacts};
use crate::error::{Result, TraceError};
use crate::infra::checkpoint::visible_subdirs;
use crate::infra::naming::decode_attack_dir_name;

pub const OUTPUT_FILE: &str = "output.csv";
pub const LOSSES_FILE: &str = "losses.csv";
pub const ROC_FILE: &str    = "roc.csv";

pub struct AttackResultStore {
    dir: PathBuf,
}

impl AttackResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_of(&self, dir_name: &str) -> PathBuf {
        self.dir.join(dir_name)
    }
}

impl AttackArchive for AttackResultStore {
    fn write(&self, dir_name: &str, artifacts: &AttackArtifacts<'_>) -> Result<()> {
        let out_dir = self.path_of(dir_name);
        fs::create_dir_all(&out_dir).map_err(|e| TraceError::io(e, &out_dir))?;

        let mut output = String::from("content,is_member,score,normalized_score\n");
        for s in artifacts.sentences {
            output.push_str(&format!(
                "{},{},{:.3},{:.3}\n",
                csv_field(&s.content), s.is_member, s.score, s.normalized_score,
            ));
        }
        write_file(&out_dir.join(OUTPUT_FILE), &output)?;

        let mut losses = String::from("population,loss\n");
        for loss in artifacts.member_losses {
            losses.push_str(&format!("member,{loss:.6}\n"));
        }
        for loss in artifacts.held_out_losses {
            losses.push_str(&format!("held_out,{loss:.6}\n"));
        }
        write_file(&out_dir.join(LOSSES_FILE), &losses)?;

        let mut roc = String::from("fpr,tpr,threshold\n");
        for p in artifacts.roc {
            roc.push_str(&format!("{:.6},{:.6},{}\n", p.fpr, p.tpr, p.threshold));
        }
        write_file(&out_dir.join(ROC_FILE), &roc)?;

        tracing::info!("Attack results written to '{}'", out_dir.display());
        Ok(())
    }

    fn list(&self) -> Result<Vec<AttackSummary>> {
        let mut summaries = Vec::new();

        for name in visible_subdirs(&self.dir)? {
            match decode_attack_dir_name(&name) {
                Ok(summary) => summaries.push(summary),
                Err(e) => tracing::warn!("Skipping attack result '{}': {}", name, e),
            }
        }

        summaries.sort_by(|a, b| a.checkpoint.cmp(&b.checkpoint));
        Ok(summaries)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = fs::File::create(path).map_err(|e| TraceError::io(e, path))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| TraceError::io(e, path))
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
