//! Certificate template registry.
//!
//! Resolves template ids to their declarative layout records and recommends
//! a template for an event type from a fixed lookup table. The registry is
//! plain in-memory data: loaded once at startup, never mutated.

/// Template configuration structures and TOML loading
pub mod config;

use crate::errors::{Error, Result};
use std::path::Path;
use tracing::info;

pub use config::{CertificateTemplate, FieldSpec};

/// Embedded builtin template set.
const BUILTIN_TEMPLATES: &str = include_str!("builtin.toml");

/// Template id the recommendation table falls back to.
pub const DEFAULT_TEMPLATE: &str = "classic";

/// In-memory certificate template registry.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<CertificateTemplate>,
}

impl TemplateRegistry {
    /// Builds the registry from the embedded builtin template set.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the embedded configuration fails to
    /// parse, which would indicate a packaging defect.
    pub fn builtin() -> Result<Self> {
        let file = config::parse_templates(BUILTIN_TEMPLATES)?;
        Ok(Self {
            templates: file.templates,
        })
    }

    /// Builds the registry from an operator-supplied TOML file.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = config::load_templates(path.as_ref())?;
        info!(
            path = %path.as_ref().display(),
            count = file.templates.len(),
            "loaded certificate templates from file"
        );
        Ok(Self {
            templates: file.templates,
        })
    }

    /// Looks a template up by id.
    #[must_use]
    pub fn get(&self, template_id: &str) -> Option<&CertificateTemplate> {
        self.templates.iter().find(|t| t.id == template_id)
    }

    /// Registered template ids, in configuration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.id.as_str())
    }

    /// Resolves a template id, optionally checking an explicitly requested
    /// layout version against the template's supported set.
    ///
    /// # Errors
    /// [`Error::TemplateNotFound`] for an unknown id;
    /// [`Error::UnsupportedTemplateVersion`] when `requested_version` is
    /// not in the template's supported versions.
    pub fn resolve(
        &self,
        template_id: &str,
        requested_version: Option<u32>,
    ) -> Result<&CertificateTemplate> {
        let template = self.get(template_id).ok_or_else(|| Error::TemplateNotFound {
            template_id: template_id.to_string(),
        })?;

        if let Some(version) = requested_version {
            if !template.versions.contains(&version) {
                return Err(Error::UnsupportedTemplateVersion {
                    template_id: template_id.to_string(),
                    version,
                });
            }
        }

        Ok(template)
    }

    /// Recommends a template id for an event type.
    ///
    /// An explicit preference wins whenever it names a registered template.
    /// Otherwise a fixed table applies: workshop/training map to `classic`,
    /// seminar/conference to `formal`, competition/hackathon to `modern`,
    /// and anything else to the default.
    #[must_use]
    pub fn recommend(&self, event_type: &str, preference: Option<&str>) -> String {
        if let Some(preferred) = preference {
            if self.get(preferred).is_some() {
                return preferred.to_string();
            }
        }

        let recommended = match event_type.trim().to_lowercase().as_str() {
            "workshop" | "training" => "classic",
            "seminar" | "conference" => "formal",
            "competition" | "hackathon" => "modern",
            _ => DEFAULT_TEMPLATE,
        };
        recommended.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_builtin_registry_parses() {
        let registry = TemplateRegistry::builtin().unwrap();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, vec!["classic", "formal", "modern"]);
    }

    #[test]
    fn test_resolve_known_template() {
        let registry = TemplateRegistry::builtin().unwrap();
        let template = registry.resolve("classic", None).unwrap();
        assert_eq!(template.id, "classic");
        assert!(!template.fields.is_empty());
    }

    #[test]
    fn test_resolve_unknown_template() {
        let registry = TemplateRegistry::builtin().unwrap();
        let result = registry.resolve("ornate", None);
        assert!(matches!(
            result.unwrap_err(),
            Error::TemplateNotFound { template_id } if template_id == "ornate"
        ));
    }

    #[test]
    fn test_resolve_version_checking() {
        let registry = TemplateRegistry::builtin().unwrap();
        assert!(registry.resolve("classic", Some(2)).is_ok());

        let result = registry.resolve("formal", Some(2));
        assert!(matches!(
            result.unwrap_err(),
            Error::UnsupportedTemplateVersion { version: 2, .. }
        ));
    }

    #[test]
    fn test_recommend_table() {
        let registry = TemplateRegistry::builtin().unwrap();
        assert_eq!(registry.recommend("workshop", None), "classic");
        assert_eq!(registry.recommend("Training", None), "classic");
        assert_eq!(registry.recommend("seminar", None), "formal");
        assert_eq!(registry.recommend("conference", None), "formal");
        assert_eq!(registry.recommend("hackathon", None), "modern");
        assert_eq!(registry.recommend("competition", None), "modern");
        assert_eq!(registry.recommend("orientation", None), "classic");
    }

    #[test]
    fn test_recommend_preference_wins_when_registered() {
        let registry = TemplateRegistry::builtin().unwrap();
        assert_eq!(registry.recommend("workshop", Some("modern")), "modern");
        // Unregistered preference falls back to the table.
        assert_eq!(registry.recommend("seminar", Some("ornate")), "formal");
    }
}
