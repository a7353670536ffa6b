mod common;

use std::time::Duration;
use std::time::Instant;

use auth::HashingParams;
use vault_service::domain::identity::errors::AuthError;
use vault_service::domain::identity::models::Credential;
use vault_service::domain::identity::models::RegisterCommand;
use vault_service::domain::identity::ports::AuthServicePort;

#[tokio::test]
async fn test_register_authenticate_and_validate() {
    let service = common::auth_service(common::FAST_HASHING);

    let identity = service
        .register(RegisterCommand::new("alice", "a@x.com", "Abc123!"))
        .await
        .unwrap();
    assert!(identity.password_hash.starts_with("$argon2id$v=19$"));

    let issued = service
        .authenticate(Credential::new("alice", "Abc123!"))
        .await
        .unwrap();
    let claims = service.validate_token(&issued.token).unwrap();
    assert_eq!(claims.sub, identity.id.to_string());

    assert_eq!(
        service
            .authenticate(Credential::new("alice", "wrongpass"))
            .await
            .unwrap_err(),
        AuthError::InvalidCredentials
    );
    assert_eq!(
        service
            .authenticate(Credential::new("ghost", "whatever"))
            .await
            .unwrap_err(),
        AuthError::InvalidCredentials
    );
}

#[tokio::test]
async fn test_usernames_are_case_sensitive() {
    let service = common::auth_service(common::FAST_HASHING);

    service
        .register(RegisterCommand::new("alice", "a@x.com", "Abc123!"))
        .await
        .unwrap();

    assert_eq!(
        service
            .authenticate(Credential::new("Alice", "Abc123!"))
            .await
            .unwrap_err(),
        AuthError::InvalidCredentials
    );
}

fn median(mut samples: Vec<Duration>) -> Duration {
    samples.sort();
    samples[samples.len() / 2]
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_take_similar_time() {
    // Costly enough that hashing dominates the measurement.
    let service = common::auth_service(HashingParams {
        memory_kib: 8 * 1024,
        iterations: 1,
        parallelism: 1,
    });

    service
        .register(RegisterCommand::new("real", "real@x.com", "Abc123!"))
        .await
        .unwrap();

    // Warm up both paths
    let _ = service.authenticate(Credential::new("real", "Wrong1!")).await;
    let _ = service.authenticate(Credential::new("ghost", "Wrong1!")).await;

    const SAMPLES: usize = 7;
    let mut wrong_password = Vec::with_capacity(SAMPLES);
    let mut unknown_user = Vec::with_capacity(SAMPLES);

    for _ in 0..SAMPLES {
        let start = Instant::now();
        let result = service.authenticate(Credential::new("real", "Wrong1!")).await;
        wrong_password.push(start.elapsed());
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);

        let start = Instant::now();
        let result = service.authenticate(Credential::new("ghost", "Wrong1!")).await;
        unknown_user.push(start.elapsed());
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    let wrong_password = median(wrong_password);
    let unknown_user = median(unknown_user);
    let longer = wrong_password.max(unknown_user);
    let difference = longer - wrong_password.min(unknown_user);

    assert!(
        difference < longer / 2,
        "timing differs too much: wrong password {:?}, unknown user {:?}",
        wrong_password,
        unknown_user
    );
}
