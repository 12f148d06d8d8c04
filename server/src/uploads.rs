use std::fs;
use std::path::PathBuf;

use errors::Error;

use crate::config::CONFIG;

/// Attachment store over the upload folder: allowlisted extensions,
/// sanitised names, numeric suffixing on collision.
pub struct Storage {
    upload_folder: PathBuf,
    allowed_extensions: Vec<String>,
}

impl Storage {
    pub fn from_config() -> Storage {
        Storage {
            upload_folder: CONFIG.upload_folder.clone(),
            allowed_extensions: CONFIG.allowed_extensions.clone(),
        }
    }

    pub fn allowed_file(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, extension)) => self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(extension)),
            None => false,
        }
    }

    /// Writes the payload under a sanitised name, appending `_1`, `_2`, ...
    /// before the extension until the name is free, and returns the stored
    /// name.
    pub fn store(&self, desired_name: &str, data: &[u8]) -> Result<String, Error> {
        fs::create_dir_all(&self.upload_folder)?;

        let safe = sanitize(desired_name);
        let (base, extension) = match safe.rsplit_once('.') {
            Some((base, extension)) => (base.to_string(), format!(".{}", extension)),
            None => (safe.clone(), String::new()),
        };

        let mut name = safe;
        let mut counter = 1;
        while self.upload_folder.join(&name).exists() {
            name = format!("{}_{}{}", base, counter, extension);
            counter += 1;
        }

        fs::write(self.upload_folder.join(&name), data)?;

        Ok(name)
    }
}

/// Keeps the basename only, replaces anything outside `[A-Za-z0-9._-]`, and
/// strips leading dots so the stored name cannot escape the upload folder.
pub fn sanitize(filename: &str) -> String {
    let basename = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or("");

    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}
