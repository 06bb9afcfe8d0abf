//! Asset resolution
//!
//! Maps words and cues to image and sound files under a data root:
//!
//! ```text
//! <root>/images/<word>.png
//! <root>/images/placeholder.png
//! <root>/sounds/<word>.wav
//! <root>/sounds/feedback/intro.wav
//! <root>/sounds/feedback/show_me.wav
//! <root>/sounds/success/*.wav
//! ```

use crate::catalog::Catalog;
use crate::error::{PairsError, PairsResult};
use crate::presentation::Cue;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const PLACEHOLDER_IMAGE: &str = "placeholder";
const INTRO_CUE: &str = "intro";
const SHOW_ME_CUE: &str = "show_me";

/// A resolved image; `is_placeholder` is set when the word had none
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    pub path: PathBuf,
    pub is_placeholder: bool,
}

#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    fn sounds_dir(&self) -> PathBuf {
        self.root.join("sounds")
    }

    pub fn image_path(&self, word: &str) -> PathBuf {
        self.images_dir().join(format!("{}.png", word))
    }

    /// Image for `word`, or the stable placeholder if it is missing
    pub fn image(&self, word: &str) -> ImageHandle {
        let path = self.image_path(word);
        if path.exists() {
            return ImageHandle {
                path,
                is_placeholder: false,
            };
        }
        warn!("🖼️ No image for '{}' at {:?}, using placeholder", word, path);
        ImageHandle {
            path: self.image_path(PLACEHOLDER_IMAGE),
            is_placeholder: true,
        }
    }

    /// Expected location of a cue's sound, whether or not it exists
    pub fn sound_path(&self, cue: &Cue) -> PathBuf {
        let sounds = self.sounds_dir();
        match cue {
            Cue::Word(word) => sounds.join(format!("{}.wav", word)),
            Cue::Success(name) => sounds.join("success").join(format!("{}.wav", name)),
            Cue::Intro => sounds.join("feedback").join(format!("{}.wav", INTRO_CUE)),
            Cue::ShowMe => sounds.join("feedback").join(format!("{}.wav", SHOW_ME_CUE)),
        }
    }

    pub fn sound(&self, cue: &Cue) -> PairsResult<PathBuf> {
        let path = self.sound_path(cue);
        if path.exists() {
            Ok(path)
        } else {
            Err(PairsError::ResourceMissing(path))
        }
    }

    /// Names of the available success cues, sorted
    pub fn success_pool(&self) -> Vec<String> {
        let dir = self.sounds_dir().join("success");
        let mut names: Vec<String> = WalkDir::new(&dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "wav"))
            .filter_map(|e| {
                e.path()
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
            })
            .collect();
        names.sort();
        debug!("Found {} success cues in {:?}", names.len(), dir);
        names
    }

    /// Every image and sound the catalog and feedback cues need but lack
    pub fn missing_assets(&self, catalog: &Catalog) -> Vec<PathBuf> {
        let mut missing = Vec::new();
        for word in catalog.words() {
            let image = self.image_path(word);
            if !image.exists() {
                missing.push(image);
            }
            let sound = self.sound_path(&Cue::Word(word.to_string()));
            if !sound.exists() {
                missing.push(sound);
            }
        }
        for cue in [Cue::Intro, Cue::ShowMe] {
            let sound = self.sound_path(&cue);
            if !sound.exists() {
                missing.push(sound);
            }
        }
        missing
    }
}

pub fn default_assets_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paires-minimales")
        .join("data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, WordPair};
    use std::fs;

    fn fixture() -> (tempfile::TempDir, AssetResolver) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for sub in ["images", "sounds/feedback", "sounds/success"] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }
        fs::write(root.join("images/pain.png"), b"png").unwrap();
        fs::write(root.join("sounds/pain.wav"), b"wav").unwrap();
        fs::write(root.join("sounds/feedback/intro.wav"), b"wav").unwrap();
        fs::write(root.join("sounds/success/youpi.wav"), b"wav").unwrap();
        fs::write(root.join("sounds/success/bravo.wav"), b"wav").unwrap();
        fs::write(root.join("sounds/success/notes.txt"), b"txt").unwrap();
        let resolver = AssetResolver::new(root);
        (dir, resolver)
    }

    #[test]
    fn test_image_and_placeholder() {
        let (_dir, resolver) = fixture();
        let found = resolver.image("pain");
        assert!(!found.is_placeholder);
        assert!(found.path.ends_with("images/pain.png"));

        let missing = resolver.image("bain");
        assert!(missing.is_placeholder);
        assert_eq!(missing.path, resolver.image("poire").path);
    }

    #[test]
    fn test_sound_resolution() {
        let (_dir, resolver) = fixture();
        assert!(resolver.sound(&Cue::Word("pain".into())).is_ok());
        assert!(resolver.sound(&Cue::Intro).is_ok());
        assert!(matches!(
            resolver.sound(&Cue::ShowMe),
            Err(PairsError::ResourceMissing(_))
        ));
        assert!(resolver
            .sound_path(&Cue::Success("bravo".into()))
            .ends_with("sounds/success/bravo.wav"));
    }

    #[test]
    fn test_success_pool_sorted_wav_only() {
        let (_dir, resolver) = fixture();
        assert_eq!(resolver.success_pool(), vec!["bravo", "youpi"]);

        let empty = AssetResolver::new("/nonexistent/paires");
        assert!(empty.success_pool().is_empty());
    }

    #[test]
    fn test_missing_assets() {
        let (_dir, resolver) = fixture();
        let catalog = Catalog::new(vec![Category {
            label: "p_b".to_string(),
            pairs: vec![WordPair::new("pain", "bain")],
        }])
        .unwrap();

        let missing = resolver.missing_assets(&catalog);
        assert_eq!(missing.len(), 3);
        assert!(missing.iter().any(|p| p.ends_with("images/bain.png")));
        assert!(missing.iter().any(|p| p.ends_with("sounds/bain.wav")));
        assert!(missing.iter().any(|p| p.ends_with("feedback/show_me.wav")));
    }
}
