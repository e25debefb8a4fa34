use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use mapalocal_core::domain::{
    entities::accounts::InsertAccountEntity,
    repositories::{accounts::AccountRepository, clock::Clock},
    value_objects::{
        accounts::{AccountDto, LoginModel, LoginResponse, SignUpModel},
        enums::account_roles::AccountRole,
    },
};
use tokio::task;
use tracing::{info, warn};

use super::errors::{UseCaseError, UseCaseResult};
use crate::auth::{AuthUser, JwtKeys};

const MIN_PASSWORD_LEN: usize = 8;

pub struct AccountUseCase<A, C>
where
    A: AccountRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    account_repo: Arc<A>,
    clock: Arc<C>,
    jwt_keys: Arc<JwtKeys>,
}

impl<A, C> AccountUseCase<A, C>
where
    A: AccountRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    pub fn new(account_repo: Arc<A>, clock: Arc<C>, jwt_keys: Arc<JwtKeys>) -> Self {
        Self {
            account_repo,
            clock,
            jwt_keys,
        }
    }

    pub async fn sign_up(&self, model: SignUpModel) -> UseCaseResult<AccountDto> {
        let email = normalize_email(&model.email)?;
        let name = model.name.trim().to_string();
        if name.is_empty() {
            return Err(UseCaseError::Validation("name is required".to_string()));
        }
        if model.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(UseCaseError::Validation(format!(
                "password must have at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let role = match model.role.as_deref() {
            Some(raw) => AccountRole::from_str(raw)
                .ok_or_else(|| UseCaseError::Validation(format!("invalid role: {raw}")))?,
            None => AccountRole::User,
        };

        let password = model.password;
        let password_hash = task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(anyhow::Error::from)??;

        let created = self
            .account_repo
            .create(InsertAccountEntity {
                email: email.clone(),
                name,
                password_hash,
                role: role.as_str().to_string(),
            })
            .await?;

        let Some(account) = created else {
            warn!(%email, "accounts: sign-up with an email already in use");
            return Err(UseCaseError::Conflict("email is already registered"));
        };

        info!(account_id = %account.id, role = %role, "accounts: account created");
        Ok(AccountDto::from(account))
    }

    pub async fn login(&self, model: LoginModel) -> UseCaseResult<LoginResponse> {
        let email = normalize_email(&model.email)
            .map_err(|_| UseCaseError::Unauthorized("invalid credentials"))?;

        let Some(account) = self.account_repo.find_by_email(email).await? else {
            return Err(UseCaseError::Unauthorized("invalid credentials"));
        };

        let password = model.password;
        let password_hash = account.password_hash.clone();
        let verified = task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(anyhow::Error::from)?;
        if !verified {
            return Err(UseCaseError::Unauthorized("invalid credentials"));
        }

        let role = AccountRole::from_str(&account.role).unwrap_or_default();
        let access_token =
            self.jwt_keys
                .issue(account.id, &account.email, role, self.clock.now_utc())?;

        info!(account_id = %account.id, "accounts: login succeeded");
        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_keys.ttl_seconds,
            account: AccountDto::from(account),
        })
    }

    pub async fn me(&self, actor: &AuthUser) -> UseCaseResult<AccountDto> {
        self.account_repo
            .find_by_id(actor.account_id)
            .await?
            .map(AccountDto::from)
            .ok_or(UseCaseError::NotFound("account"))
    }
}

fn normalize_email(raw: &str) -> UseCaseResult<String> {
    let email = raw.trim().to_ascii_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(UseCaseError::Validation("invalid email".to_string()));
    }
    Ok(email)
}

fn hash_password(password: &str) -> UseCaseResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mapalocal_core::domain::{
        entities::accounts::AccountEntity,
        repositories::{accounts::MockAccountRepository, clock::MockClock},
    };
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_now_utc()
            .returning(|| Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap());
        clock
    }

    fn usecase(repo: MockAccountRepository) -> AccountUseCase<MockAccountRepository, MockClock> {
        AccountUseCase::new(
            Arc::new(repo),
            Arc::new(clock()),
            Arc::new(JwtKeys::new("secret", 3600)),
        )
    }

    fn stored_account(email: &str, password: &str, role: AccountRole) -> AccountEntity {
        AccountEntity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: "Ana".to_string(),
            password_hash: hash_password(password).unwrap(),
            role: role.as_str().to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn sign_up_hashes_password_and_defaults_to_user_role() {
        let mut repo = MockAccountRepository::new();
        repo.expect_create()
            .withf(|entity| {
                entity.email == "ana@example.com"
                    && entity.role == "USER"
                    && entity.password_hash != "correct horse"
                    && verify_password("correct horse", &entity.password_hash)
            })
            .returning(|entity| {
                Ok(Some(AccountEntity {
                    id: Uuid::new_v4(),
                    email: entity.email,
                    name: entity.name,
                    password_hash: entity.password_hash,
                    role: entity.role,
                    created_at: Utc::now(),
                }))
            });

        let account = usecase(repo)
            .sign_up(SignUpModel {
                email: " Ana@Example.com ".to_string(),
                name: "Ana".to_string(),
                password: "correct horse".to_string(),
                role: None,
            })
            .await
            .unwrap();

        assert_eq!(account.role, AccountRole::User);
        assert_eq!(account.email, "ana@example.com");
    }

    #[tokio::test]
    async fn sign_up_with_taken_email_is_a_conflict() {
        let mut repo = MockAccountRepository::new();
        repo.expect_create().returning(|_| Ok(None));

        let result = usecase(repo)
            .sign_up(SignUpModel {
                email: "ana@example.com".to_string(),
                name: "Ana".to_string(),
                password: "correct horse".to_string(),
                role: Some("owner".to_string()),
            })
            .await;

        assert!(matches!(result, Err(UseCaseError::Conflict(_))));
    }

    #[tokio::test]
    async fn sign_up_rejects_short_password_and_unknown_role() {
        let repo = MockAccountRepository::new();
        let usecase = usecase(repo);

        let short = usecase
            .sign_up(SignUpModel {
                email: "ana@example.com".to_string(),
                name: "Ana".to_string(),
                password: "short".to_string(),
                role: None,
            })
            .await;
        assert!(matches!(short, Err(UseCaseError::Validation(_))));

        let bad_role = usecase
            .sign_up(SignUpModel {
                email: "ana@example.com".to_string(),
                name: "Ana".to_string(),
                password: "long enough".to_string(),
                role: Some("ADMIN".to_string()),
            })
            .await;
        assert!(matches!(bad_role, Err(UseCaseError::Validation(_))));
    }

    #[tokio::test]
    async fn login_issues_a_token_for_valid_credentials() {
        let account = stored_account("owner@example.com", "s3cret-pass", AccountRole::Owner);
        let account_id = account.id;

        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .with(eq("owner@example.com".to_string()))
            .returning(move |_| Ok(Some(account.clone())));

        let response = usecase(repo)
            .login(LoginModel {
                email: "owner@example.com".to_string(),
                password: "s3cret-pass".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);
        assert_eq!(response.account.role, AccountRole::Owner);

        // Issued at 2026-03-10 12:00 UTC, which is in the past relative to the
        // real clock used by validation, so only the signature is checked here.
        let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = false;
        let claims = jsonwebtoken::decode::<crate::auth::Claims>(
            &response.access_token,
            &jsonwebtoken::DecodingKey::from_secret(b"secret"),
            &validation,
        )
        .unwrap()
        .claims;
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.role, "OWNER");
    }

    #[tokio::test]
    async fn me_returns_the_token_holder_or_not_found() {
        let account = stored_account("owner@example.com", "s3cret-pass", AccountRole::Owner);
        let actor = AuthUser {
            account_id: account.id,
            email: account.email.clone(),
            role: AccountRole::Owner,
        };
        let deleted = AuthUser {
            account_id: Uuid::new_v4(),
            ..actor.clone()
        };

        let mut repo = MockAccountRepository::new();
        let account_id = account.id;
        repo.expect_find_by_id()
            .with(eq(account_id))
            .returning(move |_| Ok(Some(account.clone())));
        repo.expect_find_by_id()
            .with(eq(deleted.account_id))
            .returning(|_| Ok(None));

        let usecase = usecase(repo);

        assert_eq!(usecase.me(&actor).await.unwrap().id, account_id);
        assert!(matches!(
            usecase.me(&deleted).await,
            Err(UseCaseError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_email() {
        let account = stored_account("owner@example.com", "s3cret-pass", AccountRole::Owner);

        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .with(eq("owner@example.com".to_string()))
            .returning(move |_| Ok(Some(account.clone())));
        repo.expect_find_by_email()
            .with(eq("ghost@example.com".to_string()))
            .returning(|_| Ok(None));

        let usecase = usecase(repo);

        let wrong = usecase
            .login(LoginModel {
                email: "owner@example.com".to_string(),
                password: "nope-nope".to_string(),
            })
            .await;
        assert!(matches!(wrong, Err(UseCaseError::Unauthorized(_))));

        let unknown = usecase
            .login(LoginModel {
                email: "ghost@example.com".to_string(),
                password: "whatever1".to_string(),
            })
            .await;
        assert!(matches!(unknown, Err(UseCaseError::Unauthorized(_))));
    }
}
