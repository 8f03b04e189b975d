use strum::{EnumString, IntoStaticStr};

/// Story languages supported by the app
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[default]
    #[strum(serialize = "en")]
    English,
    #[strum(serialize = "tl")]
    Tagalog,
    #[strum(serialize = "zh")]
    Mandarin,
    #[strum(serialize = "yue")]
    Cantonese,
}

impl Language {
    /// Resolve a client-supplied code, defaulting to English when absent or unknown
    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(|code| code.trim().parse().ok()).unwrap_or_default()
    }

    /// ISO-style code as sent by the client
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Name used when instructing a language model
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Tagalog => "Tagalog (Filipino)",
            Self::Mandarin => "Mandarin Chinese using simplified characters",
            Self::Cantonese => "Cantonese using traditional characters",
        }
    }
}
