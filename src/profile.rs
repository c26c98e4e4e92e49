//! The user profile collected by the form, and its validation rules.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FieldIssue, ValidationError};
use crate::i18n::Language;

/// Longest accepted name or surname, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Mood tags offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Stressed,
    Excited,
    Confused,
    Lonely,
    Grateful,
    Angry,
    Hopeful,
    /// Free-text mood supplied in `custom_mood`.
    Other,
}

impl Mood {
    /// The ten fixed tags, in display order.
    pub const ALL: [Mood; 10] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Stressed,
        Mood::Excited,
        Mood::Confused,
        Mood::Lonely,
        Mood::Grateful,
        Mood::Angry,
        Mood::Hopeful,
    ];

    /// Wire tag of this mood.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Stressed => "stressed",
            Mood::Excited => "excited",
            Mood::Confused => "confused",
            Mood::Lonely => "lonely",
            Mood::Grateful => "grateful",
            Mood::Angry => "angry",
            Mood::Hopeful => "hopeful",
            Mood::Other => "other",
        }
    }

    /// Localized label, or `None` for `Other` which has no fixed wording.
    pub fn label(&self, language: Language) -> Option<&'static str> {
        Self::ALL
            .iter()
            .position(|mood| mood == self)
            .map(|index| language.messages().mood_labels[index])
    }
}

/// Profile submitted with every generate and chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub surname: String,
    pub date_of_birth: NaiveDate,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_mood: Option<String>,
}

impl UserProfile {
    /// Check the profile against the form rules.
    ///
    /// Collects every failing field rather than stopping at the first.
    /// `custom_mood` is only checked when the mood is `Other`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        check_name(&mut issues, "name", "Name", &self.name);
        check_name(&mut issues, "surname", "Surname", &self.surname);

        if self.date_of_birth > Utc::now().date_naive() {
            issues.push(FieldIssue {
                field: "dateOfBirth".to_string(),
                message: "Date of birth cannot be in the future".to_string(),
            });
        }

        if self.mood == Mood::Other
            && self
                .custom_mood
                .as_deref()
                .is_none_or(|mood| mood.trim().is_empty())
        {
            issues.push(FieldIssue {
                field: "customMood".to_string(),
                message: "Please specify your mood when selecting \"Other\"".to_string(),
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// The mood to talk about: the tag, or the trimmed custom text for `Other`.
    pub fn effective_mood(&self) -> &str {
        match self.mood {
            Mood::Other => self.custom_mood.as_deref().map(str::trim).unwrap_or(""),
            mood => mood.as_str(),
        }
    }

    /// Effective mood as it should read in the given language.
    pub fn localized_mood(&self, language: Language) -> &str {
        match self.mood.label(language) {
            Some(label) => label,
            None => self.effective_mood(),
        }
    }

    /// Approximate age in years: `current_year - birth_year`.
    pub fn age_in(&self, current_year: i32) -> i32 {
        current_year - self.date_of_birth.year()
    }

    /// Approximate age as of today (UTC).
    pub fn age(&self) -> i32 {
        self.age_in(Utc::now().year())
    }

    /// Name and surname joined for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.trim(), self.surname.trim())
    }
}

fn check_name(issues: &mut Vec<FieldIssue>, field: &str, label: &str, value: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(FieldIssue {
            field: field.to_string(),
            message: format!("{label} is required"),
        });
    } else if trimmed.chars().count() > MAX_NAME_LEN {
        issues.push(FieldIssue {
            field: field.to_string(),
            message: format!("{label} must be less than {MAX_NAME_LEN} characters"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(mood: Mood, custom_mood: Option<&str>) -> UserProfile {
        UserProfile {
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 15).expect("valid date"),
            mood,
            custom_mood: custom_mood.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_profile() {
        assert!(profile(Mood::Happy, None).validate().is_ok());
        assert!(profile(Mood::Other, Some("restless")).validate().is_ok());
    }

    #[test]
    fn test_other_requires_custom_mood() {
        for custom in [None, Some(""), Some("   "), Some("\t\n")] {
            let err = profile(Mood::Other, custom)
                .validate()
                .expect_err("custom mood must be required");
            assert!(err.has_field("customMood"));
        }
    }

    #[test]
    fn test_custom_mood_ignored_for_fixed_tags() {
        let p = profile(Mood::Sad, Some("   "));
        assert!(p.validate().is_ok());
        assert_eq!(p.effective_mood(), "sad");

        let p = profile(Mood::Sad, Some("elated"));
        assert_eq!(p.effective_mood(), "sad");
    }

    #[test]
    fn test_missing_names_reports_all_fields() {
        let mut p = profile(Mood::Happy, None);
        p.name = " ".to_string();
        p.surname = String::new();

        let err = p.validate().expect_err("names are required");
        assert_eq!(err.issues.len(), 2);
        assert!(err.has_field("name"));
        assert!(err.has_field("surname"));
    }

    #[test]
    fn test_name_too_long() {
        let mut p = profile(Mood::Happy, None);
        p.name = "a".repeat(MAX_NAME_LEN + 1);
        assert!(p.validate().expect_err("too long").has_field("name"));
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let mut p = profile(Mood::Happy, None);
        p.date_of_birth = Utc::now().date_naive() + chrono::Days::new(30);
        assert!(p.validate().expect_err("future").has_field("dateOfBirth"));
    }

    #[test]
    fn test_effective_mood_other_is_trimmed() {
        let p = profile(Mood::Other, Some("  a bit lost  "));
        assert_eq!(p.effective_mood(), "a bit lost");
        assert_eq!(p.localized_mood(Language::Tr), "a bit lost");
    }

    #[test]
    fn test_localized_mood() {
        let p = profile(Mood::Lonely, None);
        assert_eq!(p.localized_mood(Language::En), "lonely");
        assert_eq!(p.localized_mood(Language::Tr), "yalnız");
    }

    #[test]
    fn test_age_uses_year_difference() {
        let p = profile(Mood::Happy, None);
        assert_eq!(p.age_in(2024), 34);
        assert_eq!(p.age(), Utc::now().year() - 1990);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "name": "Ada",
            "surname": "Lovelace",
            "dateOfBirth": "1990-06-15",
            "mood": "other",
            "customMood": "curious"
        }"#;

        let p: UserProfile = serde_json::from_str(json).expect("valid profile json");
        assert_eq!(p.mood, Mood::Other);
        assert_eq!(p.custom_mood.as_deref(), Some("curious"));
        assert_eq!(p.date_of_birth.year(), 1990);
    }

    #[test]
    fn test_unknown_mood_rejected() {
        let json = r#"{"name":"A","surname":"B","dateOfBirth":"1990-01-01","mood":"meh"}"#;
        assert!(serde_json::from_str::<UserProfile>(json).is_err());
    }
}
