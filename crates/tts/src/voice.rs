use dreamfairy_config::VoiceOverrides;
use strum::{AsRefStr, EnumString};

/// Character voices a story can be narrated in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum VoiceType {
    #[default]
    Narrator,
    Child,
    Fairy,
}

/// Maps voice types to provider voice identifiers
#[derive(Debug, Clone)]
pub struct VoiceTable {
    narrator: String,
    child: String,
    fairy: String,
}

impl Default for VoiceTable {
    fn default() -> Self {
        Self {
            narrator: "21m00Tcm4TlvDq8ikWAM".to_owned(),
            child: "jBpfuIE2acCO8z3wKNLl".to_owned(),
            fairy: "EXAVITQu4vr4xnIxQaOD".to_owned(),
        }
    }
}

impl VoiceTable {
    /// Built-in voices with any configured replacements applied
    pub fn with_overrides(overrides: &VoiceOverrides) -> Self {
        let defaults = Self::default();
        let pick = |custom: Option<&str>, default: String| {
            custom
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map_or(default, str::to_owned)
        };

        Self {
            narrator: pick(overrides.narrator.as_deref(), defaults.narrator),
            child: pick(overrides.child.as_deref(), defaults.child),
            fairy: pick(overrides.fairy.as_deref(), defaults.fairy),
        }
    }

    pub fn voice_id(&self, voice: VoiceType) -> &str {
        match voice {
            VoiceType::Narrator => &self.narrator,
            VoiceType::Child => &self.child,
            VoiceType::Fairy => &self.fairy,
        }
    }
}
