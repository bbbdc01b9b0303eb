use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::officers::{self, NewOfficer};
use crate::errors::{AppError, AppResult};
use crate::models::officer::Officer;
use pbkdf2::pbkdf2_hmac;
use regex::Regex;
use rusqlite::Connection;
use sha2::Sha256;
use std::sync::LazyLock;

pub const PBKDF2_ITERATIONS: u32 = 120_000;
const KEY_LEN: usize = 32;

const EMAIL_MAX: usize = 255;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Validated sign-up input.
#[derive(Debug, PartialEq)]
pub struct SignUp {
    pub full_name: String,
    pub email: String,
}

fn check_email(domain: &str, raw: &str, errors: &mut Vec<String>) -> String {
    let email = raw.trim().to_lowercase();

    if !EMAIL_RE.is_match(&email) {
        errors.push("Invalid email format".to_string());
    }
    if !email.ends_with(&domain.to_lowercase()) {
        errors.push(format!("Only {} email addresses are allowed", domain));
    }
    if email.chars().count() > EMAIL_MAX {
        errors.push("Email is too long".to_string());
    }

    email
}

pub fn validate_signup(
    domain: &str,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<SignUp, Vec<String>> {
    let mut errors = Vec::new();

    let full_name = full_name.trim();
    let name_len = full_name.chars().count();
    if name_len < 2 {
        errors.push("Name must be at least 2 characters".to_string());
    } else if name_len > 100 {
        errors.push("Name is too long".to_string());
    }

    let email = check_email(domain, email, &mut errors);

    let pw_len = password.chars().count();
    if pw_len < PASSWORD_MIN {
        errors.push("Password must be at least 8 characters".to_string());
    } else if pw_len > PASSWORD_MAX {
        errors.push("Password is too long".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_string());
    }

    if errors.is_empty() {
        Ok(SignUp {
            full_name: full_name.to_string(),
            email,
        })
    } else {
        Err(errors)
    }
}

pub fn validate_signin(domain: &str, email: &str, password: &str) -> Result<String, Vec<String>> {
    let mut errors = Vec::new();
    let email = check_email(domain, email, &mut errors);

    if password.is_empty() {
        errors.push("Password is required".to_string());
    } else if password.chars().count() > PASSWORD_MAX {
        errors.push("Password is too long".to_string());
    }

    if errors.is_empty() { Ok(email) } else { Err(errors) }
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> String {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations.max(1), &mut key);
    hex::encode(key)
}

fn verify_password(officer: &Officer, password: &str) -> bool {
    let Ok(salt) = hex::decode(&officer.salt) else {
        return false;
    };
    derive_key(password, &salt, officer.iterations) == officer.password_hash
}

pub struct AuthLogic;

impl AuthLogic {
    /// Create an officer account and sign it in.
    pub fn signup(
        conn: &Connection,
        cfg: &Config,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<Officer> {
        let input = validate_signup(&cfg.email_domain, full_name, email, password)
            .map_err(|e| AppError::from_messages(&e))?;

        let salt = *uuid::Uuid::new_v4().as_bytes();
        let hash = derive_key(password, &salt, PBKDF2_ITERATIONS);
        let salt_hex = hex::encode(salt);

        officers::insert_officer(
            conn,
            &NewOfficer {
                email: &input.email,
                full_name: &input.full_name,
                password_hash: &hash,
                salt: &salt_hex,
                iterations: PBKDF2_ITERATIONS,
            },
        )?;

        let officer = officers::find_by_email(conn, &input.email)?
            .ok_or_else(|| AppError::Other("officer vanished after insert".into()))?;

        officers::set_active(conn, officer.id)?;
        ttlog(conn, "signup", &officer.email, "Officer account created")?;

        Ok(officer)
    }

    pub fn signin(conn: &Connection, cfg: &Config, email: &str, password: &str) -> AppResult<Officer> {
        let email = validate_signin(&cfg.email_domain, email, password)
            .map_err(|e| AppError::from_messages(&e))?;

        let officer = officers::find_by_email(conn, &email)?.ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&officer, password) {
            return Err(AppError::InvalidCredentials);
        }

        officers::set_active(conn, officer.id)?;
        ttlog(conn, "signin", &officer.email, "Signed in")?;

        Ok(officer)
    }

    pub fn signout(conn: &Connection) -> AppResult<bool> {
        let current = officers::active_officer(conn)?;
        let cleared = officers::clear_active(conn)?;

        if let Some((officer, _)) = current {
            ttlog(conn, "signout", &officer.email, "Signed out")?;
        }
        Ok(cleared)
    }

    /// The signed-in officer, or `NotSignedIn`.
    pub fn require_officer(conn: &Connection) -> AppResult<Officer> {
        officers::active_officer(conn)?
            .map(|(o, _)| o)
            .ok_or(AppError::NotSignedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;

    const DOMAIN: &str = "@sorsu.edu.ph";

    #[test]
    fn signup_rules_report_every_problem() {
        let errors = validate_signup(DOMAIN, "A", "someone@gmail.com", "short").unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Name must be at least 2 characters",
                "Only @sorsu.edu.ph email addresses are allowed",
                "Password must be at least 8 characters",
                "Password must contain at least one uppercase letter",
                "Password must contain at least one number",
            ]
        );
    }

    #[test]
    fn signup_normalizes_email() {
        let ok = validate_signup(DOMAIN, " Ana Cruz ", " Ana.Cruz@SORSU.edu.ph ", "Secret123").unwrap();
        assert_eq!(ok.full_name, "Ana Cruz");
        assert_eq!(ok.email, "ana.cruz@sorsu.edu.ph");
    }

    #[test]
    fn signin_requires_password() {
        let errors = validate_signin(DOMAIN, "not-an-email", "").unwrap_err();
        assert!(errors.contains(&"Invalid email format".to_string()));
        assert!(errors.contains(&"Password is required".to_string()));
    }

    #[test]
    fn signup_then_signin_round() {
        let pool = DbPool::in_memory().unwrap();
        let cfg = Config::default();

        let officer =
            AuthLogic::signup(&pool.conn, &cfg, "Ana Cruz", "ana@sorsu.edu.ph", "Secret123").unwrap();
        assert_eq!(AuthLogic::require_officer(&pool.conn).unwrap().id, officer.id);

        assert!(AuthLogic::signout(&pool.conn).unwrap());
        assert!(matches!(
            AuthLogic::require_officer(&pool.conn),
            Err(AppError::NotSignedIn)
        ));

        assert!(matches!(
            AuthLogic::signin(&pool.conn, &cfg, "ana@sorsu.edu.ph", "Wrong1234"),
            Err(AppError::InvalidCredentials)
        ));
        let again = AuthLogic::signin(&pool.conn, &cfg, "ANA@sorsu.edu.ph", "Secret123").unwrap();
        assert_eq!(again.id, officer.id);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let pool = DbPool::in_memory().unwrap();
        let cfg = Config::default();
        AuthLogic::signup(&pool.conn, &cfg, "Ana Cruz", "ana@sorsu.edu.ph", "Secret123").unwrap();
        let err = AuthLogic::signup(&pool.conn, &cfg, "Ana Two", "ana@sorsu.edu.ph", "Secret123");
        assert!(matches!(err, Err(AppError::DuplicateOfficer(_))));
    }
}
