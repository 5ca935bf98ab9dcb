//! Certificate template configuration loading.
//!
//! Templates are declarative records: field positions, fonts, colours, and
//! format strings, with no logic. The builtin set ships embedded in the
//! crate; operators can point the registry at their own TOML file to
//! replace it.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Top-level shape of a template configuration file.
#[derive(Debug, Deserialize)]
pub struct TemplateFile {
    /// Every template the file defines
    pub templates: Vec<CertificateTemplate>,
}

/// A named certificate layout.
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateTemplate {
    /// Registry key used by `composeCertificate` callers
    pub id: String,
    /// Layout versions this template record satisfies
    #[serde(default = "default_versions")]
    pub versions: Vec<u32>,
    /// MIME type the composed output should be served as
    #[serde(default = "default_media_type")]
    pub media_type: String,
    /// Page width in millimetres
    pub page_width: f64,
    /// Page height in millimetres
    pub page_height: f64,
    /// Text fields drawn onto the page
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// One positioned text field of a certificate template.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    /// Field name; also the default placeholder key
    pub name: String,
    /// X position in millimetres from the left edge
    pub x: f64,
    /// Y position in millimetres from the bottom edge
    pub y: f64,
    /// Font size in points
    pub size: f64,
    /// Builtin font name (e.g. "times-bold", "helvetica")
    #[serde(default = "default_font")]
    pub font: String,
    /// Fill colour as a hex string, e.g. "#1A237E"
    #[serde(default = "default_color")]
    pub color: String,
    /// Format template; `{key}` placeholders resolve from the field-value
    /// map, e.g. `"Venue: {venue} ({mode})"`
    #[serde(default)]
    pub format: Option<String>,
    /// Render the interpolated text in uppercase
    #[serde(default)]
    pub uppercase: bool,
    /// Additional spacing between characters, in points
    #[serde(default)]
    pub letter_spacing: f64,
    /// Rotation in degrees, counter-clockwise (watermarks)
    #[serde(default)]
    pub rotation: f64,
    /// Opacity in `0.0..=1.0`; below 1.0 the fill colour is faded
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_versions() -> Vec<u32> {
    vec![1]
}

fn default_media_type() -> String {
    "application/pdf".to_string()
}

fn default_font() -> String {
    "helvetica".to_string()
}

fn default_color() -> String {
    "#000000".to_string()
}

fn default_opacity() -> f64 {
    1.0
}

impl FieldSpec {
    /// The format template for this field, defaulting to the bare
    /// placeholder named after the field.
    #[must_use]
    pub fn format_template(&self) -> String {
        self.format
            .clone()
            .unwrap_or_else(|| format!("{{{}}}", self.name))
    }
}

/// Parses a template configuration from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] when the TOML is invalid or required fields
/// are missing.
pub fn parse_templates(contents: &str) -> Result<TemplateFile> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse template configuration: {e}"),
    })
}

/// Loads a template configuration from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] when the file cannot be read or parsed.
pub fn load_templates<P: AsRef<Path>>(path: P) -> Result<TemplateFile> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read template file: {e}"),
    })?;
    parse_templates(&contents)
}
