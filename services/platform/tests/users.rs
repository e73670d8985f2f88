//! User registration and authentication

mod support;

use platform::error::Error;
use platform::models::user::UserRole;
use platform::usecases::{AuthenticateUserInput, RegisterUserInput};

use support::test_state;

fn registration(name: &str, email: &str, password: &str, role: UserRole) -> RegisterUserInput {
    RegisterUserInput {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

#[tokio::test]
async fn register_then_authenticate_round_trips() {
    let state = test_state().await;

    let registered = state
        .register_user
        .execute(registration(
            "Ana",
            "ana@example.com",
            "correct horse battery",
            UserRole::Client,
        ))
        .await
        .expect("registration failed");
    assert_eq!(registered.role, UserRole::Client);
    assert_ne!(
        registered.password_hash, "correct horse battery",
        "passwords must never be stored in the clear"
    );

    let authenticated = state
        .authenticate_user
        .execute(AuthenticateUserInput {
            email: "ana@example.com".to_string(),
            password: "correct horse battery".to_string(),
            role: UserRole::Client,
        })
        .await
        .expect("authentication failed");
    assert_eq!(authenticated.id, registered.id);
}

#[tokio::test]
async fn email_registers_once_per_role() {
    let state = test_state().await;

    state
        .register_user
        .execute(registration(
            "Ana",
            "ana@example.com",
            "correct horse battery",
            UserRole::Client,
        ))
        .await
        .expect("registration failed");

    let result = state
        .register_user
        .execute(registration(
            "Ana Again",
            "ana@example.com",
            "another password!",
            UserRole::Client,
        ))
        .await;
    assert!(matches!(result, Err(Error::EmailAlreadyRegistered { .. })));

    // The same address is free to hold a different role.
    state
        .register_user
        .execute(registration(
            "Ana",
            "ana@example.com",
            "correct horse battery",
            UserRole::Organizer,
        ))
        .await
        .expect("registration under another role failed");
}

#[tokio::test]
async fn wrong_password_and_wrong_role_are_distinct_failures() {
    let state = test_state().await;

    state
        .register_user
        .execute(registration(
            "Ana",
            "ana@example.com",
            "correct horse battery",
            UserRole::Client,
        ))
        .await
        .expect("registration failed");

    let result = state
        .authenticate_user
        .execute(AuthenticateUserInput {
            email: "ana@example.com".to_string(),
            password: "wrong password!!".to_string(),
            role: UserRole::Client,
        })
        .await;
    assert!(matches!(result, Err(Error::WrongPassword)));

    // Registered as a client, so the organizer lookup misses.
    let result = state
        .authenticate_user
        .execute(AuthenticateUserInput {
            email: "ana@example.com".to_string(),
            password: "correct horse battery".to_string(),
            role: UserRole::Organizer,
        })
        .await;
    assert!(matches!(result, Err(Error::UserNotFound { .. })));
}

#[tokio::test]
async fn registration_validates_its_fields() {
    let state = test_state().await;

    let result = state
        .register_user
        .execute(registration(
            "   ",
            "ana@example.com",
            "correct horse battery",
            UserRole::Client,
        ))
        .await;
    assert!(matches!(result, Err(Error::InvalidName(_))));

    let result = state
        .register_user
        .execute(registration(
            "Ana",
            "not-an-email",
            "correct horse battery",
            UserRole::Client,
        ))
        .await;
    assert!(matches!(result, Err(Error::InvalidEmail(_))));

    let result = state
        .register_user
        .execute(registration("Ana", "ana@example.com", "short", UserRole::Client))
        .await;
    assert!(matches!(result, Err(Error::InvalidPassword(_))));
}

#[tokio::test]
async fn emails_are_normalized_on_both_paths() {
    let state = test_state().await;

    let registered = state
        .register_user
        .execute(registration(
            "Ana",
            "  Ana@Example.Com  ",
            "correct horse battery",
            UserRole::Client,
        ))
        .await
        .expect("registration failed");
    assert_eq!(registered.email, "ana@example.com");

    let authenticated = state
        .authenticate_user
        .execute(AuthenticateUserInput {
            email: "ANA@EXAMPLE.COM".to_string(),
            password: "correct horse battery".to_string(),
            role: UserRole::Client,
        })
        .await
        .expect("authentication with a differently-cased email failed");
    assert_eq!(authenticated.id, registered.id);
}
