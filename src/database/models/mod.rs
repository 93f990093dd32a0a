pub mod profile;
pub mod user;

pub use profile::{parse_skills, Education, Experience, Profile, ProfilePatch, Social, UserRef};
pub use user::{User, UserSummary};
