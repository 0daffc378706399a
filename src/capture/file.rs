//! File saving for thumbs-up drawings.

use super::types::CaptureError;
use crate::config::CaptureConfig;
use crate::draw::Raster;
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Suffixed names tried before giving up on a crowded template.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save drawings to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
    /// Image format extension.
    pub format: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Handscriber"),
            filename_template: "drawing_%Y-%m-%d_%H%M%S".to_string(),
            format: "png".to_string(),
        }
    }
}

impl From<&CaptureConfig> for FileSaveConfig {
    fn from(config: &CaptureConfig) -> Self {
        Self {
            save_directory: expand_tilde(&config.save_directory),
            filename_template: config.filename_template.clone(),
            format: config.format.clone(),
        }
    }
}

/// Generate a file stem (no extension) from the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
pub fn generate_stem(template: &str) -> String {
    Local::now().format(template).to_string()
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, CaptureError> {
    if !directory.exists() {
        log::info!("Creating drawing directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Create a file that did not exist before, appending `_1`, `_2`, ... to the
/// stem when the templated name is taken. Existing drawings are never
/// overwritten.
fn create_unique_file(directory: &Path, stem: &str, format: &str) -> io::Result<(File, PathBuf)> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let filename = if attempt == 0 {
            format!("{}.{}", stem, format)
        } else {
            format!("{}_{}.{}", stem, attempt, format)
        };
        let path = directory.join(filename);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free file name for '{}' in {}", stem, directory.display()),
    ))
}

/// Encode the canvas as PNG and write it to a new file.
///
/// # Returns
/// Path to the saved file
pub fn save_canvas(canvas: &Raster, config: &FileSaveConfig) -> Result<PathBuf, CaptureError> {
    let mut image_data = Vec::new();
    canvas.write_png(&mut image_data)?;

    let directory = ensure_directory_exists(&config.save_directory)?;
    let stem = generate_stem(&config.filename_template);
    let (mut file, file_path) = create_unique_file(&directory, &stem, &config.format)?;

    log::info!(
        "Saving drawing to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );

    file.write_all(&image_data)?;
    file.flush()?;
    drop(file);

    let written_size = fs::metadata(&file_path)?.len();
    log::debug!("File written: {} bytes", written_size);

    // User read/write only
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
