use crate::round::Round;
use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only log of finished rounds
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one line for a finished round
    pub fn record(&self, category: Option<&str>, round: &Round) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(
            file,
            "[{}] {} {}/{} target={} score={} attempts={}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            category.unwrap_or("-"),
            round.pair().word1,
            round.pair().word2,
            round.target_word(),
            round.score(),
            round.attempts()
        )?;
        Ok(())
    }
}

pub fn journal_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paires-minimales")
        .join("journal.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WordPair;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_record_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("logs/journal.log"));
        let mut rng = StdRng::seed_from_u64(2);

        let mut round = Round::new(0, WordPair::new("pain", "bain"), &mut rng);
        let target = round.target_word().to_string();
        round.record(&target);
        journal.record(Some("p_b"), &round).unwrap();
        journal.record(None, &round).unwrap();

        let content = std::fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(&format!(
            "p_b pain/bain target={} score=1 attempts=1",
            target
        )));
        assert!(lines[1].contains("] - pain/bain"));
    }
}
