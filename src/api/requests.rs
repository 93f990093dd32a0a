use serde::Deserialize;
use uuid::Uuid;

use crate::api::validation::{optional_date, present, required, required_date, FieldError, Validator};
use crate::database::models::{parse_skills, Education, Experience, ProfilePatch, Social};

/// Form-style field coercion. A field of an unexpected JSON type never
/// rejects the whole body; at worst it reads as absent.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Strings, numbers and booleans all read as text
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar))
    }

    /// A comma separated string, or a JSON list joined back into one
    pub fn list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Array(items)) => Some(items.into_iter().filter_map(scalar).collect::<Vec<_>>().join(",")),
            other => other.and_then(scalar),
        })
    }

    /// `true`/`false` as booleans, strings or numbers
    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Bool(b)) => Some(b),
            Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" | "" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }
}

/// Body of `POST /api/profile`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub website: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub bio: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub skills: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub githubusername: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub youtube: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub twitter: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub instagram: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub linkedin: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub facebook: Option<String>,
}

impl ProfileRequest {
    /// Check required fields and keep only the ones actually supplied
    pub fn into_patch(self) -> Result<ProfilePatch, Vec<FieldError>> {
        let (((), status), skills) = Validator::new()
            .check(required("status", self.status, "Status is required"))
            .check(required("skills", self.skills, "Skills is required"))
            .finish()?;

        Ok(ProfilePatch {
            company: present(self.company),
            website: present(self.website),
            location: present(self.location),
            status: Some(status),
            skills: Some(parse_skills(&skills)),
            bio: present(self.bio),
            githubusername: present(self.githubusername),
            social: Social {
                youtube: present(self.youtube),
                twitter: present(self.twitter),
                facebook: present(self.facebook),
                linkedin: present(self.linkedin),
                instagram: present(self.instagram),
            },
        })
    }
}

/// Body of `PUT /api/profile/experience`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExperienceRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub from: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub to: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub current: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

impl ExperienceRequest {
    pub fn into_entry(self) -> Result<Experience, Vec<FieldError>> {
        let (((((), title), company), from), to) = Validator::new()
            .check(required("title", self.title, "Title is required"))
            .check(required("company", self.company, "Company is required"))
            .check(required_date("from", self.from, "from date is required", "from date is invalid"))
            .check(optional_date("to", self.to, "to date is invalid"))
            .finish()?;

        Ok(Experience {
            id: Uuid::new_v4(),
            title,
            company,
            location: present(self.location),
            from,
            to,
            current: self.current.unwrap_or(false),
            description: present(self.description),
        })
    }
}

/// Body of `PUT /api/profile/education`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EducationRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub school: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub degree: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub fieldofstudy: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub from: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub to: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub current: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

impl EducationRequest {
    pub fn into_entry(self) -> Result<Education, Vec<FieldError>> {
        let ((((((), school), degree), fieldofstudy), from), to) = Validator::new()
            .check(required("school", self.school, "School is required"))
            .check(required("degree", self.degree, "Degree is required"))
            .check(required("fieldofstudy", self.fieldofstudy, "Field of study is required"))
            .check(required_date("from", self.from, "from date is required", "from date is invalid"))
            .check(optional_date("to", self.to, "to date is invalid"))
            .finish()?;

        Ok(Education {
            id: Uuid::new_v4(),
            school,
            degree,
            fieldofstudy,
            from,
            to,
            current: self.current.unwrap_or(false),
            description: present(self.description),
        })
    }
}
