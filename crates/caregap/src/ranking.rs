//! Ranking of members by model score.
//!
//! The model itself runs outside this crate and produces an `ID,SCORE` file.
//! Ranks are assigned here: rank 1 is the highest score and ties keep the
//! order in which the scores were read.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CaregapError, Result};

/// One scored member.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MemberScore {
    #[serde(rename = "ID", alias = "id")]
    pub id: i64,
    #[serde(rename = "SCORE", alias = "score")]
    pub score: f64,
}

/// A scored member with its rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedMember {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "SCORE")]
    pub score: f64,
    #[serde(rename = "RANK")]
    pub rank: usize,
}

/// Order by score descending and assign ranks from 1.
pub fn rank_scores(scores: &[MemberScore]) -> Result<Vec<RankedMember>> {
    if let Some(pos) = scores.iter().position(|s| s.score.is_nan()) {
        return Err(CaregapError::Parse {
            row: pos + 1,
            column: 2,
            message: format!("score for member {} is NaN", scores[pos].id),
        });
    }

    let mut sorted = scores.to_vec();
    // Stable sort; equal scores keep their input order.
    sorted.sort_by(|a, b| b.score.total_cmp(&a.score));

    Ok(sorted
        .into_iter()
        .enumerate()
        .map(|(i, s)| RankedMember {
            id: s.id,
            score: s.score,
            rank: i + 1,
        })
        .collect())
}

/// Read an `ID,SCORE` file.
pub fn read_scores(path: impl AsRef<Path>) -> Result<Vec<MemberScore>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CaregapError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut scores = Vec::new();
    for (row, record) in reader.deserialize::<MemberScore>().enumerate() {
        let score = record?;
        if score.score.is_nan() {
            return Err(CaregapError::Parse {
                row: row + 1,
                column: 2,
                message: format!("score for member {} is NaN", score.id),
            });
        }
        scores.push(score);
    }

    if scores.is_empty() {
        return Err(CaregapError::EmptyData(format!(
            "no scores in '{}'",
            path.display()
        )));
    }
    Ok(scores)
}

/// Write ranked members as `ID,SCORE,RANK`.
pub fn write_results<W: Write>(writer: W, ranked: &[RankedMember]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for member in ranked {
        out.serialize(member)?;
    }
    out.flush().map_err(|e| CaregapError::Io {
        path: "<results>".into(),
        source: e,
    })?;
    Ok(())
}

/// Write ranked members to a file.
pub fn write_results_to_path(path: impl AsRef<Path>, ranked: &[RankedMember]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CaregapError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_results(file, ranked)?;
    info!(path = %path.display(), members = ranked.len(), "Wrote ranked results");
    Ok(())
}
