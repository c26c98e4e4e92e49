//! Display languages and the localized strings the service itself emits.
//!
//! Only strings produced server-side live here: persona names, the chat
//! welcome and fallback utterances, mood labels and error messages. UI
//! strings belong to the client.

use serde::{Deserialize, Serialize};

/// Supported display languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
}

impl Language {
    /// Resolve a language tag such as `"tr"` or `"en-US"`.
    ///
    /// Unknown or missing tags fall back to the default language.
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::default();
        };
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "tr" => Language::Tr,
            "en" => Language::En,
            _ => Self::default(),
        }
    }

    /// Two-letter tag for this language.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
        }
    }

    /// English name of the language, used inside prompts.
    pub fn english_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Tr => "Turkish",
        }
    }

    /// The localized message table for this language.
    pub fn messages(&self) -> &'static Messages {
        match self {
            Language::En => &EN,
            Language::Tr => &TR,
        }
    }
}

/// Localized strings for one language.
#[derive(Debug)]
pub struct Messages {
    /// How the persona signs its letters.
    pub persona_name: &'static str,
    /// Welcome line; `{name}` and `{mood}` are substituted.
    pub chat_welcome: &'static str,
    /// Said in persona when a chat reply could not be produced.
    pub chat_fallback: &'static str,
    pub invalid_input: &'static str,
    pub generic_error: &'static str,
    pub missing_api_key: &'static str,
    pub rate_limit_error: &'static str,
    pub quota_exceeded_error: &'static str,
    pub authentication_error: &'static str,
    pub service_unavailable_error: &'static str,
    /// Retry guidance; `{seconds}` is substituted.
    pub retry_in_seconds: &'static str,
    /// Labels for the ten fixed mood tags, in `Mood::ALL` order.
    pub mood_labels: [&'static str; 10],
}

impl Messages {
    /// Rate-limit message with the wait time appended when known.
    pub fn rate_limited(&self, retry_after_secs: Option<u64>) -> String {
        match retry_after_secs {
            Some(seconds) => format!(
                "{} {}",
                self.rate_limit_error,
                self.retry_in_seconds
                    .replace("{seconds}", &seconds.to_string())
            ),
            None => self.rate_limit_error.to_string(),
        }
    }
}

static EN: Messages = Messages {
    persona_name: "Your Inner Voice",
    chat_welcome: "Hello {name}! I'm your Inner Voice, here to listen and support you. I understand you're feeling {mood} today. What would you like to talk about?",
    chat_fallback: "I'm sorry, I'm having trouble responding right now. Please try again.",
    invalid_input: "Invalid form data",
    generic_error: "Failed to generate response. Please try again.",
    missing_api_key: "OpenRouter API key is not configured",
    rate_limit_error: "Rate limit exceeded. Please wait a moment before trying again.",
    quota_exceeded_error: "API quota exceeded. Please check your account or try again later.",
    authentication_error: "Authentication failed. Please check the configuration.",
    service_unavailable_error: "Service is temporarily unavailable. Please try again later.",
    retry_in_seconds: "Please try again in {seconds} seconds.",
    mood_labels: [
        "happy", "sad", "anxious", "stressed", "excited", "confused", "lonely", "grateful",
        "angry", "hopeful",
    ],
};

static TR: Messages = Messages {
    persona_name: "İç Sesin",
    chat_welcome: "Merhaba {name}! Ben senin İç Sesin, seni dinlemek ve desteklemek için buradayım. Bugün {mood} hissettiğini anlıyorum. Ne hakkında konuşmak istersin?",
    chat_fallback: "Üzgünüm, şu anda yanıt vermekte zorlanıyorum. Lütfen tekrar deneyin.",
    invalid_input: "Geçersiz form verisi",
    generic_error: "Yanıt oluşturulamadı. Lütfen tekrar deneyin.",
    missing_api_key: "OpenRouter API anahtarı yapılandırılmamış",
    rate_limit_error: "İstek sınırı aşıldı. Lütfen bir süre bekledikten sonra tekrar deneyin.",
    quota_exceeded_error: "API kotası aşıldı. Lütfen hesabınızı kontrol edin veya daha sonra tekrar deneyin.",
    authentication_error: "Kimlik doğrulama başarısız. Lütfen yapılandırmayı kontrol edin.",
    service_unavailable_error: "Hizmet geçici olarak kullanılamıyor. Lütfen daha sonra tekrar deneyin.",
    retry_in_seconds: "Lütfen {seconds} saniye sonra tekrar deneyin.",
    mood_labels: [
        "mutlu",
        "üzgün",
        "endişeli",
        "stresli",
        "heyecanlı",
        "kafası karışık",
        "yalnız",
        "minnettar",
        "kızgın",
        "umutlu",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Language::from_tag(Some("tr")), Language::Tr);
        assert_eq!(Language::from_tag(Some("TR")), Language::Tr);
        assert_eq!(Language::from_tag(Some("en-US")), Language::En);
        assert_eq!(Language::from_tag(Some("de")), Language::En);
        assert_eq!(Language::from_tag(Some("")), Language::En);
        assert_eq!(Language::from_tag(None), Language::En);
    }

    #[test]
    fn test_tag_round_trip() {
        for language in [Language::En, Language::Tr] {
            assert_eq!(Language::from_tag(Some(language.tag())), language);
        }
    }

    #[test]
    fn test_rate_limited_message() {
        let messages = Language::En.messages();
        assert_eq!(
            messages.rate_limited(Some(30)),
            "Rate limit exceeded. Please wait a moment before trying again. Please try again in 30 seconds."
        );
        assert_eq!(messages.rate_limited(None), messages.rate_limit_error);

        let turkish = Language::Tr.messages().rate_limited(Some(5));
        assert!(turkish.contains("5 saniye"));
    }

    #[test]
    fn test_persona_names() {
        assert_eq!(Language::En.messages().persona_name, "Your Inner Voice");
        assert_eq!(Language::Tr.messages().persona_name, "İç Sesin");
    }
}
