//! Reference data: the country catalog and the message pools.
//!
//! The form treats this as injected, read-only input. The default set is
//! embedded in the binary; a RON file with the same layout can replace it.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::str;

use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::country::CountryCatalog;
use crate::error::{DialerError, DialerResult};
use crate::messages::MessagePools;

pub const DEFAULT_REFERENCE_ASSET: &str = "reference/default.ron";

#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "reference/*"]
#[exclude = "*.DS_Store"]
struct ReferenceAssets;

fn asset_str<A: RustEmbed>(path: &str) -> DialerResult<Cow<'static, str>> {
    let file = A::get(path).ok_or_else(|| DialerError::MissingAsset(path.to_string()))?;
    match file.data {
        Cow::Borrowed(bytes) => Ok(Cow::Borrowed(str::from_utf8(bytes)?)),
        Cow::Owned(bytes) => Ok(Cow::Owned(
            String::from_utf8(bytes).map_err(|e| e.utf8_error())?,
        )),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub countries: CountryCatalog,
    pub messages: MessagePools,
}

impl ReferenceData {
    pub fn new(countries: CountryCatalog, messages: MessagePools) -> Self {
        Self {
            countries,
            messages,
        }
    }

    /// Parse and validate RON text.
    pub fn from_ron_str(text: &str) -> DialerResult<Self> {
        let data: Self = ron::from_str(text)?;
        data.countries.validate()?;
        data.messages.validate()?;
        Ok(data)
    }
}

/// Anything that can hand the form its reference data.
pub trait ReferenceProvider {
    fn load(&self) -> DialerResult<ReferenceData>;

    /// Short origin label for logs.
    fn describe(&self) -> String;
}

/// The data set compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedReference;

impl ReferenceProvider for EmbeddedReference {
    fn load(&self) -> DialerResult<ReferenceData> {
        let text = asset_str::<ReferenceAssets>(DEFAULT_REFERENCE_ASSET)?;
        let data = ReferenceData::from_ron_str(&text)?;
        debug!(countries = data.countries.len(), "loaded embedded reference data");
        Ok(data)
    }

    fn describe(&self) -> String {
        format!("embedded:{DEFAULT_REFERENCE_ASSET}")
    }
}

/// A user supplied RON file.
#[derive(Debug, Clone)]
pub struct FileReference {
    path: PathBuf,
}

impl FileReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReferenceProvider for FileReference {
    fn load(&self) -> DialerResult<ReferenceData> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| DialerError::Io {
            path: self.path.clone(),
            source,
        })?;
        let data = ReferenceData::from_ron_str(&text)?;
        debug!(
            path = %self.path.display(),
            countries = data.countries.len(),
            "loaded reference data from file"
        );
        Ok(data)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
