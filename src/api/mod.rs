pub mod requests;
pub mod validation;

pub use requests::{EducationRequest, ExperienceRequest, ProfileRequest};
pub use validation::{FieldError, Validator};
