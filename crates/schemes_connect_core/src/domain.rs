//! crates/schemes_connect_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application: the citizen
//! profile (as typed into the form and as accepted for a recommendation),
//! the local auth record, scheme records and chat transcript entries.
//!
//! Serde shapes follow the backend wire format and the persisted local
//! records, both of which use camelCase keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Closed Profile Options
//=========================================================================================

/// Error returned when a form label does not name any known option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a recognised option")]
pub struct UnknownOption(pub String);

/// Declares a closed set of form options with their exact display labels.
///
/// The labels double as the wire values sent to the recommendation backend,
/// so they must match the backend's expectations character for character.
macro_rules! form_options {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every option, in form order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|option| option.label().eq_ignore_ascii_case(s))
                    .ok_or_else(|| UnknownOption(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

form_options!(Gender {
    Male => "Male",
    Female => "Female",
    Other => "Other",
    PreferNotToSay => "Prefer not to say",
});

form_options!(
    /// Annual household income range.
    IncomeBracket {
        Below2_5L => "Below 2.5L",
        From2_5LTo5L => "2.5L - 5L",
        From5LTo10L => "5L - 10L",
        Above10L => "Above 10L",
    }
);

form_options!(CasteCategory {
    General => "General",
    Obc => "OBC",
    Sc => "SC",
    St => "ST",
    Ews => "EWS",
    Other => "Other",
});

form_options!(Disability {
    Yes => "Yes",
    No => "No",
});

//=========================================================================================
// Profile
//=========================================================================================

/// The required fields of a profile, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Age,
    Gender,
    Income,
    Occupation,
    Location,
    CasteCategory,
    Disability,
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileField::Age => "age",
            ProfileField::Gender => "gender",
            ProfileField::Income => "income",
            ProfileField::Occupation => "occupation",
            ProfileField::Location => "location",
            ProfileField::CasteCategory => "casteCategory",
            ProfileField::Disability => "disability",
        };
        f.write_str(name)
    }
}

fn field_list(fields: &[ProfileField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a draft could not be accepted as a complete profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("missing required profile fields: {}", field_list(.0))]
    Missing(Vec<ProfileField>),
    #[error("invalid value for {field}: '{value}'")]
    Invalid { field: ProfileField, value: String },
}

/// Youngest and oldest ages the profile form accepts.
pub const AGE_RANGE: std::ops::RangeInclusive<u8> = 1..=120;

/// A profile exactly as entered into the form.
///
/// Any field may be blank. Drafts are what gets persisted, so an incomplete
/// profile survives a save/load cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub income: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub caste_category: String,
    #[serde(default)]
    pub disability: String,
}

impl ProfileDraft {
    /// Required fields that are still blank, in form order.
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        [
            (ProfileField::Age, &self.age),
            (ProfileField::Gender, &self.gender),
            (ProfileField::Income, &self.income),
            (ProfileField::Occupation, &self.occupation),
            (ProfileField::Location, &self.location),
            (ProfileField::CasteCategory, &self.caste_category),
            (ProfileField::Disability, &self.disability),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Accepts the draft as a complete profile, mapping every option field
    /// into its closed type.
    pub fn validate(&self) -> Result<UserProfile, ProfileValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ProfileValidationError::Missing(missing));
        }

        let invalid = |field: ProfileField, value: &str| ProfileValidationError::Invalid {
            field,
            value: value.trim().to_string(),
        };

        let age = self
            .age
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|age| AGE_RANGE.contains(age))
            .ok_or_else(|| invalid(ProfileField::Age, &self.age))?;
        let gender = self
            .gender
            .parse::<Gender>()
            .map_err(|_| invalid(ProfileField::Gender, &self.gender))?;
        let income = self
            .income
            .parse::<IncomeBracket>()
            .map_err(|_| invalid(ProfileField::Income, &self.income))?;
        let caste_category = self
            .caste_category
            .parse::<CasteCategory>()
            .map_err(|_| invalid(ProfileField::CasteCategory, &self.caste_category))?;
        let disability = self
            .disability
            .parse::<Disability>()
            .map_err(|_| invalid(ProfileField::Disability, &self.disability))?;

        let full_name = self
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Ok(UserProfile {
            full_name,
            age,
            gender,
            income,
            occupation: self.occupation.trim().to_string(),
            location: self.location.trim().to_string(),
            caste_category,
            disability,
        })
    }
}

/// A complete, validated citizen profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub full_name: Option<String>,
    pub age: u8,
    pub gender: Gender,
    pub income: IncomeBracket,
    pub occupation: String,
    pub location: String,
    pub caste_category: CasteCategory,
    pub disability: Disability,
}

impl UserProfile {
    /// Converts back into the form representation.
    pub fn to_draft(&self) -> ProfileDraft {
        ProfileDraft {
            full_name: self.full_name.clone(),
            age: self.age.to_string(),
            gender: self.gender.label().to_string(),
            income: self.income.label().to_string(),
            occupation: self.occupation.clone(),
            location: self.location.clone(),
            caste_category: self.caste_category.label().to_string(),
            disability: self.disability.label().to_string(),
        }
    }
}

/// The body of `POST /api/recommend`. The full name is never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub age: String,
    pub gender: String,
    pub income: String,
    pub occupation: String,
    pub location: String,
    pub caste_category: String,
    pub disability: String,
}

impl From<&UserProfile> for RecommendationRequest {
    fn from(profile: &UserProfile) -> Self {
        Self {
            age: profile.age.to_string(),
            gender: profile.gender.label().to_string(),
            income: profile.income.label().to_string(),
            occupation: profile.occupation.clone(),
            location: profile.location.clone(),
            caste_category: profile.caste_category.label().to_string(),
            disability: profile.disability.label().to_string(),
        }
    }
}

//=========================================================================================
// Auth
//=========================================================================================

// The locally persisted login record. There is no token: the record is the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub email: String,
    pub name: String,
    pub is_logged_in: bool,
}

//=========================================================================================
// Schemes
//=========================================================================================

/// A match score between 0 and 100 inclusive.
///
/// Out-of-range or fractional values from the backend are clamped and
/// rounded when deserialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Confidence(u8);

impl Confidence {
    pub const MAX: u8 = 100;

    pub fn new(raw: f64) -> Self {
        if raw.is_nan() {
            return Self(0);
        }
        Self(raw.round().clamp(0.0, f64::from(Self::MAX)) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<u8> for Confidence {
    fn from(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Confidence::new)
    }
}

/// A government welfare scheme record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub apply_link: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub why_recommended: String,
    #[serde(default)]
    pub confidence: Confidence,
}

//=========================================================================================
// Conversation
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the assistant transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sources: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            sources,
            timestamp: Utc::now(),
        }
    }
}

/// The response of `POST /api/ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// The response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

//=========================================================================================
// Language
//=========================================================================================

/// Response language selected for the assistant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Marathi,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Marathi];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Marathi => "mr",
        }
    }

    /// Locale tag handed to speech synthesis.
    pub fn locale(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Marathi => "mr-IN",
        }
    }

    /// Directive prepended to questions so the backend answers in this language.
    pub fn instruction(&self) -> &'static str {
        match self {
            Language::English => "",
            Language::Hindi => "कृपया उत्तर हिंदी में दें।\n\n",
            Language::Marathi => "कृपया उत्तर मराठीत द्या.\n\n",
        }
    }

    /// Shown instead of an answer the backend could not give.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Language::English => "Sorry, I don’t have information on this right now or I’m having trouble connecting to the server. Please try again later.",
            Language::Hindi => "माफ़ कीजिए, मुझे इस प्रश्न की जानकारी उपलब्ध नहीं है या सर्वर से जुड़ने में समस्या आ रही है। कृपया थोड़ी देर बाद पुनः प्रयास करें।",
            Language::Marathi => "माफ करा, या प्रश्नाबद्दल मला माहिती उपलब्ध नाही किंवा सर्व्हरशी जोडण्यात अडचण येत आहे. कृपया थोड्या वेळाने पुन्हा प्रयत्न करा.",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Language::English => "Ask about government schemes...",
            Language::Hindi => "सरकारी योजनाओं के बारे में पूछें...",
            Language::Marathi => "शासकीय योजनांबद्दल विचारा...",
        }
    }
}

impl FromStr for Language {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "hi" | "hindi" => Ok(Language::Hindi),
            "mr" | "marathi" => Ok(Language::Marathi),
            _ => Err(UnknownOption(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
