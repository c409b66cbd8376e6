// Mints a development access token.
//
// Usage: mint-token [sub] [role]
// The signing secret comes from JWT_SECRET (default "dev-secret").

use std::env;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

#[derive(Serialize)]
struct Claims {
    sub: String,
    role: String,
    exp: i64,
}

fn main() {
    let mut args = env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "user-1".to_string());
    let role = args.next().unwrap_or_else(|| "user".to_string());
    let secret = env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret".to_string());

    let claims = Claims {
        sub,
        role,
        exp: (Utc::now() + Duration::hours(24)).timestamp(),
    };

    match encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    ) {
        Ok(token) => println!("{token}"),
        Err(error) => {
            eprintln!("failed to mint token: {error}");
            std::process::exit(1);
        }
    }
}
