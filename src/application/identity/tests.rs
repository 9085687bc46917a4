use std::sync::Arc;

use crate::domain::{DomainError, GetUserDto, UpdateUserDto, UserRole};
use crate::infrastructure::crypto::JwtConfig;
use crate::infrastructure::database::test_connection;
use crate::infrastructure::SeaOrmRepositoryProvider;

use super::{IdentityService, RegisterUser};

async fn service() -> IdentityService {
    let repos = Arc::new(SeaOrmRepositoryProvider::new(test_connection().await));
    IdentityService::new(repos, JwtConfig::new("test-secret", 4), 4)
}

fn james() -> RegisterUser {
    RegisterUser {
        first_name: "James".into(),
        last_name: "Foo".into(),
        email: "James@Foo.com".into(),
        password: "supersecret".into(),
    }
}

#[tokio::test]
async fn register_then_login() {
    let svc = service().await;
    let user = svc.register(james()).await.unwrap();
    assert_eq!(user.email, "james@foo.com");
    assert_eq!(user.role, UserRole::Customer);
    assert_ne!(user.password_hash, "supersecret");

    let auth = svc.login("JAMES@foo.com", "supersecret").await.unwrap();
    assert_eq!(auth.user.id, user.id);
    assert_eq!(auth.expires_in, 4 * 3600);

    let authed = svc.authenticate(&auth.token).await.unwrap();
    assert_eq!(authed.id, user.id);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let svc = service().await;
    svc.register(james()).await.unwrap();
    let err = svc.register(james()).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let svc = service().await;
    svc.register(james()).await.unwrap();

    let a = svc.login("james@foo.com", "wrong").await.unwrap_err();
    let b = svc.login("nobody@foo.com", "supersecret").await.unwrap_err();
    assert!(matches!(a, DomainError::Unauthorized(_)));
    assert_eq!(a.to_string(), b.to_string());
}

#[tokio::test]
async fn token_of_deleted_user_is_rejected() {
    let svc = service().await;
    let user = svc.register(james()).await.unwrap();
    let token = svc.issue_token(&user).unwrap();

    svc.delete_user(&user, &user.id).await.unwrap();
    let err = svc.authenticate(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let svc = service().await;
    let err = svc.authenticate("not-a-jwt").await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));
}

#[tokio::test]
async fn customers_cannot_touch_other_accounts() {
    let svc = service().await;
    let james = svc.register(james()).await.unwrap();
    let jane = svc
        .register(RegisterUser {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@doe.com".into(),
            password: "supersecret".into(),
        })
        .await
        .unwrap();

    let err = svc.get_user(&james, &jane.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    let err = svc.delete_user(&james, &jane.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    let me = svc.get_user(&james, &james.id).await.unwrap();
    assert_eq!(me.id, james.id);
}

#[tokio::test]
async fn admin_manages_everyone() {
    let svc = service().await;
    let admin = svc
        .create_user(
            RegisterUser {
                first_name: "Admin".into(),
                last_name: "Admin".into(),
                email: "admin@admin.com".into(),
                password: "admin_admin".into(),
            },
            UserRole::Admin,
        )
        .await
        .unwrap();
    let james = svc.register(james()).await.unwrap();

    let updated = svc
        .update_user(
            &admin,
            &james.id,
            UpdateUserDto {
                first_name: None,
                last_name: Some("Bar".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.last_name, "Bar");

    let page = svc.list_users(GetUserDto::default()).await.unwrap();
    assert_eq!(page.total, 2);

    svc.delete_user(&admin, &james.id).await.unwrap();
    let err = svc.get_user(&admin, &james.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let svc = service().await;
    let james = svc.register(james()).await.unwrap();
    let err = svc
        .update_user(&james, &james.id, UpdateUserDto::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}
