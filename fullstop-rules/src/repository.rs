//! Profile repository with a read-through cache
//!
//! Profiles are built on first lookup and published into the cache; once
//! published, an entry is only replaced through `&mut self` registration,
//! which cannot race with readers.

use crate::config::LanguageConfig;
use crate::embedded::{embedded_config, normalize_code, resolution_chain, EMBEDDED_CONFIGS};
use crate::error::{Result, RulesError};
use fullstop_core::LanguageProfile;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Source of language profiles
pub trait RuleRepository: Send + Sync {
    /// Resolve a language code to its profile
    fn lookup(&self, code: &str) -> Result<Arc<LanguageProfile>>;

    /// Codes this repository can resolve directly, sorted
    fn available_languages(&self) -> Vec<String>;
}

/// Embedded tables plus registered external files
#[derive(Debug, Default)]
pub struct ProfileRepository {
    cache: RwLock<HashMap<String, Arc<LanguageProfile>>>,
    registered: Vec<String>,
}

impl ProfileRepository {
    /// Repository over the embedded tables only
    pub fn new() -> Self {
        Self::default()
    }

    /// Load, validate and register an external TOML file under its
    /// `metadata.code`, shadowing any embedded table with that code
    pub fn register_file(&mut self, path: impl AsRef<Path>) -> Result<Arc<LanguageProfile>> {
        let config = LanguageConfig::from_file(path.as_ref())?;
        self.register_config(&config)
    }

    /// Validate and register an already parsed table
    pub fn register_config(&mut self, config: &LanguageConfig) -> Result<Arc<LanguageProfile>> {
        let profile = Arc::new(config.to_profile()?);
        let code = profile.code().to_string();
        log::debug!("registered external rules for '{code}'");

        let cache = self.cache.get_mut().unwrap_or_else(PoisonError::into_inner);
        // aliases resolved earlier may point at the shadowed profile
        cache.retain(|_, cached| cached.code() != code);
        cache.insert(code.clone(), Arc::clone(&profile));

        if !self.registered.contains(&code) {
            self.registered.push(code);
        }
        Ok(profile)
    }

    /// Number of published cache entries (aliases included)
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn cached(&self, code: &str) -> Option<Arc<LanguageProfile>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
    }

    fn publish(&self, code: &str, profile: Arc<LanguageProfile>) -> Arc<LanguageProfile> {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(code.to_string()).or_insert_with(|| {
            log::debug!("published profile '{}' under '{code}'", profile.code());
            profile
        }))
    }

    fn build_embedded(code: &str) -> Option<Result<LanguageProfile>> {
        let toml_content = embedded_config(code)?;
        Some(
            LanguageConfig::from_toml_str(toml_content, &format!("embedded:{code}"))
                .and_then(|config| {
                    if config.metadata.code != code {
                        return Err(RulesError::invalid_rules(
                            code,
                            format!("config code mismatch: got {}", config.metadata.code),
                        ));
                    }
                    config.to_profile()
                }),
        )
    }
}

impl RuleRepository for ProfileRepository {
    fn lookup(&self, code: &str) -> Result<Arc<LanguageProfile>> {
        let normalized = normalize_code(code);
        if let Some(profile) = self.cached(&normalized) {
            return Ok(profile);
        }

        for candidate in resolution_chain(&normalized) {
            let profile = match self.cached(&candidate) {
                Some(profile) => profile,
                None => match Self::build_embedded(&candidate) {
                    Some(built) => self.publish(&candidate, Arc::new(built?)),
                    None => continue,
                },
            };

            if candidate != normalized {
                log::debug!("language '{normalized}' resolved to '{candidate}'");
                return Ok(self.publish(&normalized, profile));
            }
            return Ok(profile);
        }

        Err(RulesError::UnknownLanguage { code: normalized })
    }

    fn available_languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = EMBEDDED_CONFIGS
            .iter()
            .map(|(code, _)| code.to_string())
            .chain(self.registered.iter().cloned())
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }
}

impl<R: RuleRepository + ?Sized> RuleRepository for Arc<R> {
    fn lookup(&self, code: &str) -> Result<Arc<LanguageProfile>> {
        (**self).lookup(code)
    }

    fn available_languages(&self) -> Vec<String> {
        (**self).available_languages()
    }
}
