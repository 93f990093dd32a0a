use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserSummary;

/// Owner reference: a bare id as stored, or the joined owner fields when
/// the profile was loaded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(Uuid),
    Populated(UserSummary),
}

impl UserRef {
    pub fn id(&self) -> Uuid {
        match self {
            UserRef::Id(id) => *id,
            UserRef::Populated(summary) => summary.id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    /// Overwrite only the platforms present in `patch`
    fn merge(&mut self, patch: Social) {
        let Social { youtube, twitter, facebook, linkedin, instagram } = patch;
        merge_field(&mut self.youtube, youtube);
        merge_field(&mut self.twitter, twitter);
        merge_field(&mut self.facebook, facebook);
        merge_field(&mut self.linkedin, linkedin);
        merge_field(&mut self.instagram, instagram);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user: UserRef,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub social: Social,
    pub date: DateTime<Utc>,
}

/// Sparse update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub skills: Option<Vec<String>>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: Social,
}

impl Profile {
    /// Build a fresh profile for `owner` from the fields present in `patch`
    pub fn create(owner: Uuid, patch: ProfilePatch) -> Self {
        let mut profile = Self {
            id: Uuid::new_v4(),
            user: UserRef::Id(owner),
            company: None,
            website: None,
            location: None,
            status: String::new(),
            skills: Vec::new(),
            bio: None,
            githubusername: None,
            experience: Vec::new(),
            education: Vec::new(),
            social: Social::default(),
            date: Utc::now(),
        };
        profile.apply(patch);
        profile
    }

    pub fn owner(&self) -> Uuid {
        self.user.id()
    }

    pub fn apply(&mut self, patch: ProfilePatch) {
        let ProfilePatch { company, website, location, status, skills, bio, githubusername, social } = patch;
        merge_field(&mut self.company, company);
        merge_field(&mut self.website, website);
        merge_field(&mut self.location, location);
        merge_field(&mut self.bio, bio);
        merge_field(&mut self.githubusername, githubusername);
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(skills) = skills {
            self.skills = skills;
        }
        self.social.merge(social);
    }

    pub fn populate(mut self, owner: Option<UserSummary>) -> Self {
        if let Some(summary) = owner {
            self.user = UserRef::Populated(summary);
        }
        self
    }

    /// Newest entries go first
    pub fn add_experience(&mut self, entry: Experience) {
        self.experience.insert(0, entry);
    }

    /// Returns whether an entry was removed; an unknown id leaves the list as is.
    pub fn remove_experience(&mut self, id: Uuid) -> bool {
        match self.experience.iter().position(|e| e.id == id) {
            Some(index) => {
                self.experience.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn add_education(&mut self, entry: Education) {
        self.education.insert(0, entry);
    }

    pub fn remove_education(&mut self, id: Uuid) -> bool {
        match self.education.iter().position(|e| e.id == id) {
            Some(index) => {
                self.education.remove(index);
                true
            }
            None => false,
        }
    }
}

fn merge_field(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Split a comma-separated skills string into trimmed, non-empty items
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
