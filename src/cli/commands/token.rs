use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(config: &AppConfig, user_id: Uuid, hours: Option<u64>, output_format: OutputFormat) -> anyhow::Result<()> {
    let hours = hours.unwrap_or(config.security.jwt_expiry_hours);
    let claims = Claims::new(user_id, hours);
    let expires = claims.exp;
    let token = generate_jwt(&claims, &config.security.jwt_secret)?;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "token": token, "user_id": user_id, "exp": expires })),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
