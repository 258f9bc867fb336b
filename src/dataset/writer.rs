use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use crate::{
    dataset::split::Split,
    foundation::error::CardsceneResult,
    labels::projector::{LabelLine, format_labels},
};

/// `images/<split>/scene_NNNNNN.png` plus `labels/<split>/scene_NNNNNN.txt` under a root.
#[derive(Clone, Debug)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create every split directory up front so workers never race on `create_dir_all`.
    pub fn create_dirs(&self) -> CardsceneResult<()> {
        for split in Split::ALL {
            for kind in ["images", "labels"] {
                let dir = self.root.join(kind).join(split.as_str());
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("create output dir '{}'", dir.display()))?;
            }
        }
        Ok(())
    }

    pub fn image_path(&self, split: Split, index: usize) -> PathBuf {
        self.root
            .join("images")
            .join(split.as_str())
            .join(format!("{}.png", scene_stem(index)))
    }

    pub fn label_path(&self, split: Split, index: usize) -> PathBuf {
        self.root
            .join("labels")
            .join(split.as_str())
            .join(format!("{}.txt", scene_stem(index)))
    }

    pub fn write_scene(
        &self,
        split: Split,
        index: usize,
        image: &RgbaImage,
        labels: &[LabelLine],
    ) -> CardsceneResult<()> {
        write_png(&self.image_path(split, index), image)?;
        write_labels(&self.label_path(split, index), labels)
    }
}

pub fn scene_stem(index: usize) -> String {
    format!("scene_{index:06}")
}

pub fn write_png(path: &Path, image: &RgbaImage) -> CardsceneResult<()> {
    image::save_buffer_with_format(
        path,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// One line per label; an empty file when nothing stayed visible.
pub fn write_labels(path: &Path, labels: &[LabelLine]) -> CardsceneResult<()> {
    std::fs::write(path, format_labels(labels))
        .with_context(|| format!("write labels '{}'", path.display()))?;
    Ok(())
}
