use super::common::*;
use crate::accounts::domain::{Credentials, UserRole};
use crate::accounts::service::AccountServiceError;

#[test]
fn register_returns_a_sanitized_profile() {
    let (service, repository) = build_service();

    let profile = service.register(farmer_registration()).expect("registered");

    assert!(profile.id.0.starts_with("usr-"));
    assert_eq!(profile.email, "farmer@demo.com");
    assert_eq!(profile.role, UserRole::Farmer);

    // The password only lives on the stored record.
    let record = repository
        .fetch(&profile.id)
        .expect("fetch")
        .expect("record");
    assert_eq!(record.password, "password");
    assert!(serde_json::to_string(&profile)
        .expect("serialize")
        .find("password")
        .is_none());
}

#[test]
fn duplicate_email_is_rejected() {
    let (service, _) = build_service();
    service.register(farmer_registration()).expect("registered");

    let mut second = transporter_registration();
    second.email = "farmer@demo.com".to_string();

    match service.register(second) {
        Err(err @ AccountServiceError::EmailTaken) => {
            assert_eq!(err.to_string(), "Email already in use");
        }
        other => panic!("expected duplicate-email rejection, got {other:?}"),
    }
}

#[test]
fn login_with_valid_credentials_returns_the_profile() {
    let (service, _) = build_service();
    let registered = service.register(farmer_registration()).expect("registered");

    let profile = service
        .login(&Credentials {
            email: "farmer@demo.com".to_string(),
            password: "password".to_string(),
        })
        .expect("logged in");

    assert_eq!(profile.id, registered.id);
}

#[test]
fn wrong_password_and_unknown_email_fail_the_same_way() {
    let (service, _) = build_service();
    service.register(farmer_registration()).expect("registered");

    let wrong_password = service.login(&Credentials {
        email: "farmer@demo.com".to_string(),
        password: "letmein".to_string(),
    });
    let unknown_email = service.login(&Credentials {
        email: "nobody@demo.com".to_string(),
        password: "password".to_string(),
    });

    for outcome in [wrong_password, unknown_email] {
        match outcome {
            Err(err @ AccountServiceError::InvalidCredentials) => {
                assert_eq!(err.to_string(), "Invalid credentials");
            }
            other => panic!("expected credential rejection, got {other:?}"),
        }
    }
}
