use std::{path::Path, sync::Arc};

use crate::foundation::error::{AdframeError, AdframeResult};

/// A single font face used for every text run of a render.
///
/// Cheap to clone; the font bytes are shared.
#[derive(Clone)]
pub struct Typeface {
    bytes: Arc<Vec<u8>>,
    index: u32,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface")
            .field("family", &self.family)
            .field("index", &self.index)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl Typeface {
    /// Load the first face found in TrueType/OpenType (or collection) data.
    pub fn from_bytes(bytes: Vec<u8>) -> AdframeResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes.clone());
        let face = db
            .faces()
            .next()
            .ok_or_else(|| AdframeError::font("no font faces found in font data"))?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .ok_or_else(|| AdframeError::font("font face has no family name"))?;
        let index = face.index;
        Ok(Self::assemble(bytes, index, family))
    }

    pub fn from_path(path: impl AsRef<Path>) -> AdframeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| AdframeError::font(format!("read '{}': {e}", path.display())))?;
        Self::from_bytes(bytes)
    }

    /// Best bold sans-serif face installed on this machine, falling back to any face.
    pub fn system_sans() -> AdframeResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let families = [usvg::fontdb::Family::SansSerif];
        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight::BOLD,
            ..Default::default()
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))
            .ok_or_else(|| AdframeError::font("no system fonts available"))?;

        let family = db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| AdframeError::font("system font face has no family name"))?;
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| AdframeError::font("system font data could not be read"))?;

        tracing::debug!(family = %family, "resolved system sans-serif face");
        Ok(Self::assemble(bytes, index, family))
    }

    fn assemble(bytes: Vec<u8>, index: u32, family: String) -> Self {
        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), index);
        Self {
            bytes: Arc::new(bytes),
            index,
            family,
            font,
        }
    }

    /// Family name as reported by the font's name table.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Face index within a font collection (0 for single-face files).
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
