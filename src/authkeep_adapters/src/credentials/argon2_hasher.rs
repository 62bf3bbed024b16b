use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher, SaltString, rand_core},
};
use async_trait::async_trait;
use authkeep_core::{CredentialHasher, HasherError, Password};
use secrecy::{ExposeSecret, Secret};

const MEMORY_COST_KIB: u32 = 15000;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// Argon2id hashing, run on the blocking pool so it never stalls the runtime.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<Secret<String>, HasherError> {
        let password = password.clone();
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| Secret::from(h.to_string()))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| HasherError(e.to_string()))?;

        result.map_err(HasherError)
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        password_hash: &Secret<String>,
        candidate: &Password,
    ) -> Result<bool, HasherError> {
        let expected_password_hash = password_hash.clone();
        let candidate = candidate.clone();
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected_password_hash: PasswordHash<'_> =
                    PasswordHash::new(expected_password_hash.expose_secret())
                        .map_err(|e| e.to_string())?;

                match argon2()?.verify_password(
                    candidate.as_ref().expose_secret().as_bytes(),
                    &expected_password_hash,
                ) {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(e.to_string()),
                }
            })
        })
        .await
        .map_err(|e| HasherError(e.to_string()))?;

        result.map_err(HasherError)
    }
}
