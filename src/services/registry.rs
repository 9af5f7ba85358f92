//! Site registry keyed by institution identifier.

use std::collections::BTreeMap;

use crate::error::{AppError, Result};
use crate::models::{Config, SiteDescriptor};
use crate::services::selectors::CompiledSite;

/// Compiled site descriptors, looked up by id.
#[derive(Debug, Default)]
pub struct SiteRegistry {
    sites: BTreeMap<String, CompiledSite>,
}

impl SiteRegistry {
    /// Registry holding the built-in descriptors.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::default();
        registry.register(SiteDescriptor::seas())?;
        registry.register(SiteDescriptor::som())?;
        Ok(registry)
    }

    /// Built-in descriptors plus those from the config, which win on id clashes.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::builtin()?;
        for descriptor in &config.sites {
            if registry.contains(&descriptor.id) {
                log::info!("Config overrides built-in site '{}'", descriptor.id);
            }
            registry.register(descriptor.clone())?;
        }
        Ok(registry)
    }

    /// Compile and add a descriptor, replacing any with the same id.
    pub fn register(&mut self, descriptor: SiteDescriptor) -> Result<()> {
        let key = normalize_id(&descriptor.id);
        if key.is_empty() {
            return Err(AppError::config("Site descriptor has an empty id"));
        }
        let site = CompiledSite::compile(descriptor)?;
        self.sites.insert(key, site);
        Ok(())
    }

    /// Look up a site by id (case-insensitive).
    pub fn get(&self, id: &str) -> Result<&CompiledSite> {
        self.sites.get(&normalize_id(id)).ok_or_else(|| {
            AppError::config(format!(
                "Unknown site '{}'. Known sites: {}",
                id,
                self.ids().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sites.contains_key(&normalize_id(id))
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    /// Registered sites in id order.
    pub fn sites(&self) -> impl Iterator<Item = &CompiledSite> {
        self.sites.values()
    }
}

fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NameFormat;

    #[test]
    fn builtin_has_both_schools() {
        let registry = SiteRegistry::builtin().unwrap();
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["seas", "som"]);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = SiteRegistry::builtin().unwrap();
        assert_eq!(registry.get("SEAS").unwrap().id(), "seas");
    }

    #[test]
    fn unknown_site_is_config_error() {
        let registry = SiteRegistry::builtin().unwrap();
        let err = registry.get("law").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("seas, som"));
    }

    #[test]
    fn config_sites_override_builtin() {
        let mut override_seas = SiteDescriptor::seas();
        override_seas.name_format = NameFormat::Heading;
        let mut extra = SiteDescriptor::som();
        extra.id = "law".to_string();

        let config = Config {
            sites: vec![override_seas, extra],
            ..Config::default()
        };
        let registry = SiteRegistry::from_config(&config).unwrap();

        assert_eq!(registry.ids().count(), 3);
        assert_eq!(
            registry.get("seas").unwrap().descriptor.name_format,
            NameFormat::Heading
        );
        assert!(registry.contains("law"));
    }

    #[test]
    fn invalid_config_site_is_rejected() {
        let mut broken = SiteDescriptor::seas();
        broken.id = "broken".to_string();
        broken.selectors.profile_link = "a[[".to_string();

        let config = Config {
            sites: vec![broken],
            ..Config::default()
        };
        assert!(SiteRegistry::from_config(&config).is_err());
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut registry = SiteRegistry::default();
        let mut descriptor = SiteDescriptor::seas();
        descriptor.id = "  ".to_string();
        assert!(registry.register(descriptor).is_err());
    }
}
