use std::path::Path;

use secrecy::ExposeSecret;
use url::Url;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Missing provider API keys are deliberately not checked here: they
    /// fail only the endpoint that needs them, at request time.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL, model name or tuning value is invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_identity()?;
        self.validate_providers()?;
        Ok(())
    }

    /// Non-fatal problems worth reporting once logging is up
    ///
    /// Covers a missing identity service and every provider section without
    /// an API key.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.identity.is_none() {
            warnings.push("no [identity] section configured, every authenticated request will fail".to_owned());
        }

        for (section, key) in [
            ("story", &self.story.api_key),
            ("imagegen", &self.imagegen.api_key),
            ("stt", &self.stt.api_key),
            ("tts", &self.tts.api_key),
        ] {
            if key.as_ref().is_none_or(|key| key.expose_secret().is_empty()) {
                warnings.push(format!(
                    "[{section}] has no API key configured, the endpoint will answer with an error"
                ));
            }
        }

        warnings
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let prefix = &self.server.path_prefix;

        if !prefix.is_empty() && !prefix.starts_with('/') {
            anyhow::bail!("server.path_prefix must start with '/' (got '{prefix}')");
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_identity(&self) -> anyhow::Result<()> {
        let Some(ref identity) = self.identity else {
            return Ok(());
        };

        ensure_http("identity.url", &identity.url)?;

        if identity.service_key.expose_secret().is_empty() {
            anyhow::bail!("identity.service_key must not be empty");
        }

        if identity.timeout_seconds == 0 {
            anyhow::bail!("identity.timeout_seconds must be greater than 0");
        }

        Ok(())
    }

    fn validate_providers(&self) -> anyhow::Result<()> {
        ensure_http("story.base_url", &self.story.base_url)?;
        ensure_http("imagegen.base_url", &self.imagegen.base_url)?;
        ensure_http("stt.base_url", &self.stt.base_url)?;
        ensure_http("tts.base_url", &self.tts.base_url)?;

        for (field, value) in [
            ("story.model", &self.story.model),
            ("imagegen.model", &self.imagegen.model),
            ("stt.model", &self.stt.model),
            ("stt.correction_model", &self.stt.correction_model),
            ("tts.model", &self.tts.model),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{field} must not be empty");
            }
        }

        if !(0.0..=2.0).contains(&self.story.temperature) {
            anyhow::bail!("story.temperature must be between 0 and 2");
        }

        if self.story.max_tokens == 0 {
            anyhow::bail!("story.max_tokens must be greater than 0");
        }

        if self.imagegen.steps == 0 {
            anyhow::bail!("imagegen.steps must be greater than 0");
        }

        if !(0.0..=1.0).contains(&self.telemetry.sampling_rate) {
            anyhow::bail!("telemetry.sampling_rate must be between 0 and 1");
        }

        Ok(())
    }
}

fn ensure_http(field: &str, url: &Url) -> anyhow::Result<()> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => anyhow::bail!("{field} must be an http(s) URL (got scheme '{other}')"),
    }
}
