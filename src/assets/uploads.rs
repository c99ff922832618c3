use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::core::TraitCategory;
use crate::foundation::error::{ForgeError, ForgeResult};

/// Background file name inside an asset directory.
pub const BACKGROUND_FILE: &str = "background.png";
/// Body file name inside an asset directory.
pub const BODY_FILE: &str = "body.png";
/// Subdirectory holding shiny weapon variants.
pub const SHINY_WEAPON_DIR: &str = "shiny_weapon";

#[derive(Clone, PartialEq, Eq)]
/// One uploaded file: its file name and undecoded bytes.
pub struct UploadedFile {
    /// File name as uploaded, extension included. Used verbatim as the layer key.
    pub name: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl UploadedFile {
    /// Wrap in-memory bytes under `name`.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, keeping only its file name as the upload name.
    pub fn read(path: &Path) -> ForgeResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ForgeError::asset(format!("'{}' has no file name", path.display()))
            })?;
        let bytes =
            std::fs::read(path).with_context(|| format!("read asset '{}'", path.display()))?;
        Ok(Self { name, bytes })
    }
}

#[derive(Clone, Debug, Default)]
/// Raw, undecoded inputs for [`crate::AssetRegistry::build`].
pub struct AssetUploads {
    /// Background image; required.
    pub background: Option<UploadedFile>,
    /// Body image; required.
    pub body: Option<UploadedFile>,
    /// Files per trait category; every category needs at least one.
    pub traits: BTreeMap<TraitCategory, Vec<UploadedFile>>,
    /// Optional shiny weapon variants, named like their base weapon.
    pub shiny_weapon: Vec<UploadedFile>,
}

impl AssetUploads {
    /// Empty upload set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one file to `category`.
    pub fn push_trait(&mut self, category: TraitCategory, file: UploadedFile) {
        self.traits.entry(category).or_default().push(file);
    }

    /// Files uploaded for `category` (empty when none).
    pub fn trait_files(&self, category: TraitCategory) -> &[UploadedFile] {
        self.traits.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Collect uploads from an asset directory.
    ///
    /// Layout:
    /// ```text
    /// <root>/background.png
    /// <root>/body.png
    /// <root>/{boots,clothing,eyes,gloves,helmet,weapon}/*.png
    /// <root>/shiny_weapon/*.png        (optional)
    /// ```
    ///
    /// Absent files and directories are left empty so that
    /// [`crate::AssetRegistry::build`] can report every missing slot at once.
    pub fn from_dir(root: impl AsRef<Path>) -> ForgeResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ForgeError::asset(format!(
                "asset directory '{}' does not exist",
                root.display()
            )));
        }

        let mut out = Self {
            background: read_optional(&root.join(BACKGROUND_FILE))?,
            body: read_optional(&root.join(BODY_FILE))?,
            ..Self::default()
        };
        for category in TraitCategory::ALL {
            let files = read_png_dir(&root.join(category.as_str()))?;
            if !files.is_empty() {
                out.traits.insert(category, files);
            }
        }
        out.shiny_weapon = read_png_dir(&root.join(SHINY_WEAPON_DIR))?;

        tracing::debug!(
            root = %root.display(),
            trait_files = out.traits.values().map(Vec::len).sum::<usize>(),
            shiny_files = out.shiny_weapon.len(),
            "collected uploads from asset directory"
        );
        Ok(out)
    }
}

fn read_optional(path: &Path) -> ForgeResult<Option<UploadedFile>> {
    if path.is_file() {
        UploadedFile::read(path).map(Some)
    } else {
        Ok(None)
    }
}

fn read_png_dir(dir: &Path) -> ForgeResult<Vec<UploadedFile>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("list directory '{}'", dir.display()))?
    {
        let entry = entry.with_context(|| format!("list directory '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_file() && has_png_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(|p| UploadedFile::read(p)).collect()
}

fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/uploads.rs"]
mod tests;
