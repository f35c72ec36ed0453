//! Reading and writing the index file.

use crate::model::Model;
use quarry_core::{Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

impl Model {
    /// Serialize the model to `path` as JSON.
    ///
    /// The file is written next to its destination and renamed into place, so
    /// a reader never observes a half-written index.
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        {
            let file = File::create(&tmp)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
        }
        std::fs::rename(&tmp, path)?;

        info!("Index saved to {} ({} documents)", path.display(), self.len());
        Ok(())
    }

    /// Load a model previously written by [`Model::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let model: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Index(format!("{}: {}", path.display(), e)))?;

        info!("Index loaded from {} ({} documents)", path.display(), model.len());
        Ok(model)
    }

    /// Load `path` if it exists, otherwise start from an empty model.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }
}
