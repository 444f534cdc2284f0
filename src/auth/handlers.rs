use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest},
        extractors::RequireAdmin,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::{AppError, AppResult},
    extract::Json,
    state::AppState,
    validation::{is_valid_email, normalize_email, required},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/crear-admin", post(create_admin))
}

struct NewUser {
    name: String,
    email: String,
    password: String,
}

fn validate_new_user(payload: RegisterRequest) -> AppResult<NewUser> {
    let (Some(name), Some(email), Some(password)) = (
        required(payload.name),
        required(payload.email),
        required(payload.password),
    ) else {
        return Err(AppError::Validation("missing fields".into()));
    };

    let email = normalize_email(&email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("invalid email".into()));
    }

    Ok(NewUser {
        name,
        email,
        password,
    })
}

async fn insert_user(state: &AppState, new_user: NewUser, is_admin: bool) -> AppResult<User> {
    let hash = hash_password(&new_user.password)?;
    let user = User::create(&state.db, &new_user.name, &new_user.email, &hash, is_admin)
        .await
        .map_err(|e| {
            let err = AppError::from(e);
            if matches!(err, AppError::Conflict(_)) {
                warn!(email = %new_user.email, "email already registered");
            }
            err
        })?;
    Ok(user)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let new_user = validate_new_user(payload)?;
    let user = insert_user(&state, new_user, false).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (required(payload.email), required(payload.password))
    else {
        return Err(AppError::Validation("missing fields".into()));
    };
    let email = normalize_email(&email);

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(AppError::Validation("user not found".into()));
        }
    };

    if !verify_password(&password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("invalid password".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.is_admin)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// Creates an admin account. Open while no admin exists, so the first one can
/// be bootstrapped; afterwards only an admin may call it.
#[instrument(skip(state, caller, payload))]
pub async fn create_admin(
    State(state): State<AppState>,
    caller: Option<RequireAdmin>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    if caller.is_none() && User::admin_exists(&state.db).await? {
        warn!("admin creation attempted without admin token");
        return Err(AppError::Forbidden("admin privileges required".into()));
    }

    let new_user = validate_new_user(payload)?;

    let user = insert_user(&state, new_user, true).await?;

    info!(
        user_id = %user.id,
        created_by = ?caller.map(|RequireAdmin(u)| u.id),
        "admin created"
    );
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, email: Option<&str>, password: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            name: name.map(Into::into),
            email: email.map(Into::into),
            password: password.map(Into::into),
        }
    }

    #[test]
    fn any_missing_field_is_rejected() {
        for req in [
            request(None, Some("a@b.co"), Some("pw")),
            request(Some("Ana"), None, Some("pw")),
            request(Some("Ana"), Some("a@b.co"), None),
            request(Some("  "), Some("a@b.co"), Some("pw")),
        ] {
            let err = validate_new_user(req).err().expect("should be rejected");
            assert_eq!(err.to_string(), "missing fields");
        }
    }

    #[test]
    fn email_is_normalized_before_storage() {
        let user = validate_new_user(request(Some("Ana"), Some(" Ana@Mail.COM "), Some("pw"))).unwrap();
        assert_eq!(user.email, "ana@mail.com");
        assert_eq!(user.name, "Ana");
    }

    #[test]
    fn malformed_email_is_rejected() {
        let err = validate_new_user(request(Some("Ana"), Some("nope"), Some("pw")))
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn public_user_hides_hash() {
        let response = PublicUser {
            id: uuid::Uuid::new_v4(),
            name: "Ana".into(),
            email: "test@example.com".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(!json.contains("password"));
    }
}
