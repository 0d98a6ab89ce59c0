use crate::error::AppError;
use actix_web::web;
use bcrypt::{hash, verify, DEFAULT_COST};
use once_cell::sync::OnceCell;

/// Hash checked when no usable hash exists, so a failed login costs the same
/// bcrypt round whether or not the email is registered.
static DUMMY_HASH: OnceCell<String> = OnceCell::new();

/// Hashes `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a hash produced by [`hash_password`].
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

/// Checks `password` against the stored hash of an account, if there is one.
///
/// A missing account and an account without a password (empty hash) are both
/// verified against [`DUMMY_HASH`] and always fail.
pub fn check_credentials(password: &str, stored: Option<&str>) -> Result<bool, AppError> {
    match stored {
        Some(hashed) if !hashed.is_empty() => verify_password(password, hashed),
        _ => {
            let dummy = DUMMY_HASH.get_or_try_init(|| hash_password("bettertasks-dummy"))?;
            verify_password(password, dummy)?;
            Ok(false)
        }
    }
}

/// [`hash_password`] on the blocking thread pool.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    web::block(move || hash_password(&password)).await?
}

/// [`check_credentials`] on the blocking thread pool.
pub async fn check_credentials_blocking(
    password: String,
    stored: Option<String>,
) -> Result<bool, AppError> {
    web::block(move || check_credentials(&password, stored.as_deref())).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "p1";
        let hashed = hash_password(password).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same", &first).unwrap());
        assert!(verify_password("same", &second).unwrap());
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        match verify_password("p1", "invalidhashformat") {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to verify password"));
            }
            Ok(false) => {}
            Ok(true) => panic!("Password verification should fail for invalid hash format"),
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_check_credentials_without_stored_hash_fails() {
        assert!(!check_credentials("bettertasks-dummy", None).unwrap());
        assert!(!check_credentials("", None).unwrap());
        assert!(!check_credentials("p1", Some("")).unwrap());
        assert!(DUMMY_HASH.get().is_some());
    }

    #[test]
    fn test_check_credentials_with_stored_hash() {
        let hashed = hash_password("p1").unwrap();

        assert!(check_credentials("p1", Some(&hashed)).unwrap());
        assert!(!check_credentials("p2", Some(&hashed)).unwrap());
    }

    #[actix_rt::test]
    async fn test_blocking_wrappers() {
        let hashed = hash_password_blocking("p1".to_string()).await.unwrap();

        assert!(check_credentials_blocking("p1".to_string(), Some(hashed.clone()))
            .await
            .unwrap());
        assert!(!check_credentials_blocking("p1".to_string(), None).await.unwrap());
    }
}
