use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::InputError;
use crate::input::reader::open_maybe_gz;

/// Figure-wide text settings, `{ "cmsText": string }` on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(rename = "cmsText", default = "default_cms_text")]
    pub cms_text: String,
}

fn default_cms_text() -> String {
    "Simulation Preliminary".to_string()
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            cms_text: default_cms_text(),
        }
    }
}

impl StyleConfig {
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let reader = open_maybe_gz(path)?;
        serde_json::from_reader(reader).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn caption(&self) -> String {
        if self.cms_text.is_empty() {
            "CMS".to_string()
        } else {
            format!("CMS {}", self.cms_text)
        }
    }
}
