use std::collections::HashMap;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use kira::sound::static_sound::StaticSoundData;
use kira::sound::FromFileError;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::app::{BitmapFont, Image};

mod keys;

pub use keys::{AssetKey, AssetKeyError};

pub const IMAGE_FOLDERS: [&str; 6] = [
    "backgrounds",
    "characters",
    "icons",
    "locations",
    "modules",
    "ui",
];
pub const SOUND_FOLDERS: [&str; 3] = ["music", "sfx", "voice"];
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];
const SOUND_EXTENSIONS: [&str; 3] = ["wav", "ogg", "mp3"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSize {
    Small,
    Medium,
    Large,
    Title,
    Huge,
    Code,
}

impl FontSize {
    pub const ALL: [FontSize; 6] = [
        FontSize::Small,
        FontSize::Medium,
        FontSize::Large,
        FontSize::Title,
        FontSize::Huge,
        FontSize::Code,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
            FontSize::Title => "title",
            FontSize::Huge => "huge",
            FontSize::Code => "code",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.tag() == tag)
    }

    fn glyph_scale(self) -> u32 {
        match self {
            FontSize::Small | FontSize::Code => 2,
            FontSize::Medium => 3,
            FontSize::Large => 4,
            FontSize::Title => 6,
            FontSize::Huge => 8,
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to decode sound {path}: {source}")]
pub struct SoundLoadError {
    path: PathBuf,
    #[source]
    source: FromFileError,
}

#[derive(Clone)]
pub struct Sound {
    data: StaticSoundData,
}

impl Sound {
    pub fn load(path: &Path) -> Result<Self, SoundLoadError> {
        let data = StaticSoundData::from_file(path).map_err(|source| SoundLoadError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { data })
    }

    pub fn data(&self) -> &StaticSoundData {
        &self.data
    }
}

impl fmt::Debug for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sound").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub images_loaded: usize,
    pub sounds_loaded: usize,
    pub failures: usize,
    pub overridden: usize,
}

#[derive(Debug)]
pub struct AssetStore {
    images: HashMap<AssetKey, Image>,
    fonts: HashMap<FontSize, BitmapFont>,
    sounds: HashMap<AssetKey, Sound>,
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore {
    pub fn new() -> Self {
        let fonts = FontSize::ALL
            .into_iter()
            .map(|size| (size, BitmapFont::new(size.glyph_scale())))
            .collect();
        Self {
            images: HashMap::new(),
            fonts,
            sounds: HashMap::new(),
        }
    }

    /// Folders are visited in a fixed alphabetical order and files by name, so a
    /// key present in two folders always resolves to the later one.
    pub fn scan(&mut self, root: &Path) -> ScanReport {
        let mut report = ScanReport::default();

        for folder in IMAGE_FOLDERS {
            let dir = root.join("images").join(folder);
            for path in sorted_files(&dir, &IMAGE_EXTENSIONS) {
                let Some(key) = key_for_path(&path, &mut report) else {
                    continue;
                };
                match Image::load(&path) {
                    Ok(image) => {
                        debug!(key = %key, path = %path.display(), "asset_loaded");
                        if self.images.insert(key.clone(), image).is_some() {
                            warn_overridden(&key, &path, &mut report);
                        }
                        report.images_loaded += 1;
                    }
                    Err(error) => {
                        warn!(path = %path.display(), error = %error, "asset_load_failed");
                        report.failures += 1;
                    }
                }
            }
        }

        for folder in SOUND_FOLDERS {
            let dir = root.join("sounds").join(folder);
            for path in sorted_files(&dir, &SOUND_EXTENSIONS) {
                let Some(key) = key_for_path(&path, &mut report) else {
                    continue;
                };
                match Sound::load(&path) {
                    Ok(sound) => {
                        debug!(key = %key, path = %path.display(), "asset_loaded");
                        if self.sounds.insert(key.clone(), sound).is_some() {
                            warn_overridden(&key, &path, &mut report);
                        }
                        report.sounds_loaded += 1;
                    }
                    Err(error) => {
                        warn!(path = %path.display(), error = %error, "asset_load_failed");
                        report.failures += 1;
                    }
                }
            }
        }

        info!(
            root = %root.display(),
            images = report.images_loaded,
            sounds = report.sounds_loaded,
            failures = report.failures,
            overridden = report.overridden,
            "assets_scanned"
        );
        report
    }

    /// Runs `generate` only when `key` has no image yet.
    pub fn insert_placeholder(&mut self, key: AssetKey, generate: impl FnOnce() -> Image) -> bool {
        if self.images.contains_key(&key) {
            return false;
        }
        debug!(key = %key, "placeholder_generated");
        self.images.insert(key, generate());
        true
    }

    pub fn insert_image(&mut self, key: AssetKey, image: Image) -> Option<Image> {
        self.images.insert(key, image)
    }

    pub fn image(&self, key: &AssetKey) -> Option<&Image> {
        self.images.get(key)
    }

    pub fn sound(&self, key: &AssetKey) -> Option<&Sound> {
        self.sounds.get(key)
    }

    pub fn font(&self, tag: &str) -> BitmapFont {
        self.font_for(FontSize::from_tag(tag).unwrap_or(FontSize::Medium))
    }

    pub fn font_for(&self, size: FontSize) -> BitmapFont {
        self.fonts
            .get(&size)
            .copied()
            .unwrap_or(BitmapFont::new(size.glyph_scale()))
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn sound_count(&self) -> usize {
        self.sounds.len()
    }
}

fn sorted_files(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) => {
            debug!(dir = %dir.display(), error = %error, "asset_folder_skipped");
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(error) => {
                warn!(dir = %dir.display(), error = %error, "asset_entry_unreadable");
                None
            }
        })
        .filter(|path| path.is_file() && has_extension(path, extensions))
        .collect();
    files.sort();
    files
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn key_for_path(path: &Path, report: &mut ScanReport) -> Option<AssetKey> {
    let stem = path.file_stem().and_then(OsStr::to_str).unwrap_or_default();
    match AssetKey::new(stem) {
        Ok(key) => Some(key),
        Err(error) => {
            warn!(path = %path.display(), error = %error, "asset_key_invalid");
            report.failures += 1;
            None
        }
    }
}

fn warn_overridden(key: &AssetKey, path: &Path, report: &mut ScanReport) {
    warn!(key = %key, path = %path.display(), "asset_key_overridden");
    report.overridden += 1;
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write_png(path: &Path, width: u32, height: u32) {
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        image::RgbaImage::new(width, height)
            .save(path)
            .expect("save png");
    }

    fn write_wav(path: &Path, frames: u32) {
        const SAMPLE_RATE: u32 = 8_000;
        let data_len = frames * 2;
        let mut bytes = Vec::with_capacity(44 + data_len as usize);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(44 + data_len as usize, 0);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(path, bytes).expect("write wav");
    }

    fn key(text: &'static str) -> AssetKey {
        AssetKey::from_static(text)
    }

    #[test]
    fn scan_loads_images_by_file_stem() {
        let temp = TempDir::new().expect("tempdir");
        write_png(&temp.path().join("images/icons/python_icon.png"), 4, 4);
        write_png(&temp.path().join("images/backgrounds/space_bg.PNG"), 2, 2);

        let mut store = AssetStore::new();
        let report = store.scan(temp.path());

        assert_eq!(report.images_loaded, 2);
        assert_eq!(report.failures, 0);
        assert_eq!(
            store.image(&key("python_icon")).map(Image::size),
            Some((4, 4))
        );
        assert!(store.image(&key("space_bg")).is_some());
    }

    #[test]
    fn scan_decodes_sounds_by_file_stem() {
        let temp = TempDir::new().expect("tempdir");
        write_wav(&temp.path().join("sounds/sfx/click.wav"), 800);

        let mut store = AssetStore::new();
        let report = store.scan(temp.path());

        assert_eq!(report.sounds_loaded, 1);
        assert_eq!(report.failures, 0);
        assert!(store.sound(&key("click")).is_some());
        assert_eq!(store.sound_count(), 1);
    }

    #[test]
    fn corrupt_files_are_skipped_without_aborting_scan() {
        let temp = TempDir::new().expect("tempdir");
        let ui = temp.path().join("images/ui");
        fs::create_dir_all(&ui).expect("create ui");
        fs::write(ui.join("broken.png"), b"garbage").expect("write broken");
        write_png(&ui.join("ok.png"), 1, 1);
        let sfx = temp.path().join("sounds/sfx");
        fs::create_dir_all(&sfx).expect("create sfx");
        fs::write(sfx.join("click.wav"), b"not audio").expect("write sound");

        let mut store = AssetStore::new();
        let report = store.scan(temp.path());

        assert_eq!(report.failures, 2);
        assert!(store.image(&key("broken")).is_none());
        assert!(store.image(&key("ok")).is_some());
        assert!(store.sound(&key("click")).is_none());
    }

    #[test]
    fn unrecognized_extensions_and_root_files_are_ignored() {
        let temp = TempDir::new().expect("tempdir");
        let icons = temp.path().join("images/icons");
        fs::create_dir_all(&icons).expect("create icons");
        fs::write(icons.join("notes.txt"), b"hello").expect("write txt");
        write_png(&temp.path().join("images/loose.png"), 1, 1);

        let mut store = AssetStore::new();
        let report = store.scan(temp.path());

        assert_eq!(report, ScanReport::default());
        assert_eq!(store.image_count(), 0);
    }

    #[test]
    fn duplicate_key_resolves_to_alphabetically_later_folder() {
        let temp = TempDir::new().expect("tempdir");
        write_png(&temp.path().join("images/backgrounds/dup.png"), 2, 2);
        write_png(&temp.path().join("images/ui/dup.png"), 3, 3);

        let mut store = AssetStore::new();
        let report = store.scan(temp.path());

        assert_eq!(report.overridden, 1);
        assert_eq!(store.image(&key("dup")).map(Image::size), Some((3, 3)));
    }

    #[test]
    fn invalid_file_stem_is_skipped() {
        let temp = TempDir::new().expect("tempdir");
        write_png(&temp.path().join("images/ui/my icon.png"), 1, 1);

        let mut store = AssetStore::new();
        let report = store.scan(temp.path());

        assert_eq!(report.failures, 1);
        assert_eq!(store.image_count(), 0);
    }

    #[test]
    fn missing_root_yields_empty_store() {
        let temp = TempDir::new().expect("tempdir");
        let mut store = AssetStore::new();
        let report = store.scan(&temp.path().join("nope"));

        assert_eq!(report, ScanReport::default());
    }

    #[test]
    fn placeholder_only_fills_absent_keys() {
        let mut store = AssetStore::new();
        let real = Image::from_rgba(1, 1, vec![1, 2, 3, 255]).expect("image");
        store.insert_image(key("player"), real.clone());

        let mut generated = 0;
        let inserted_existing = store.insert_placeholder(key("player"), || {
            generated += 1;
            Image::from_rgba(2, 2, vec![0; 16]).expect("image")
        });
        let inserted_missing = store.insert_placeholder(key("portal"), || {
            Image::from_rgba(2, 2, vec![0; 16]).expect("image")
        });

        assert!(!inserted_existing);
        assert!(inserted_missing);
        assert_eq!(generated, 0);
        assert_eq!(store.image(&key("player")), Some(&real));
        assert!(store.image(&key("portal")).is_some());
    }

    #[test]
    fn unknown_font_tag_falls_back_to_medium() {
        let store = AssetStore::new();
        assert_eq!(store.font("tiny"), store.font_for(FontSize::Medium));
        assert_eq!(store.font("huge"), store.font_for(FontSize::Huge));
        assert_ne!(store.font("small"), store.font("huge"));
    }
}
