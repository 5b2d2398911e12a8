use crate::geo::GeoVerdict;
use crate::models::account::{AdminSession, AdminSummary};
use crate::models::ip_log::IpLog;
use crate::models::review::{NewReview, Review};
use leptos::server_fn::codec::Json;
use leptos::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "ssr")]
use actix_web::{http::header, web, HttpRequest, HttpResponse};
#[cfg(feature = "ssr")]
use crate::auth::{authorize, Access, SESSION_COOKIE};
#[cfg(feature = "ssr")]
use crate::dashboard::{filter_reviews, ClassFilter, ALL_CLASSES_QUERY};
#[cfg(feature = "ssr")]
use crate::export::{export_file_name, reviews_to_csv};
#[cfg(feature = "ssr")]
use crate::state::AppState;
#[cfg(feature = "ssr")]
use leptos::logging::log;

/// Reviews for the dashboard plus the offset used to display their times.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReviewListing {
    pub reviews: Vec<Review>,
    pub utc_offset_hours: i32,
}

#[cfg(feature = "ssr")]
mod server {
    use super::*;
    use crate::error::AppError;
    use crate::geo::normalize_ip;
    use actix_web::cookie::{time::Duration, Cookie, SameSite};
    use leptos_actix::{extract, ResponseOptions};

    pub async fn state() -> Result<web::Data<AppState>, ServerFnError> {
        extract::<web::Data<AppState>>().await
    }

    /// Caller IP, from proxy headers only when configured to trust them.
    pub async fn caller_ip(state: &AppState) -> Result<Option<String>, ServerFnError> {
        let req = extract::<HttpRequest>().await?;
        let info = req.connection_info();
        let raw = if state.config.trust_proxy_headers {
            info.realip_remote_addr()
        } else {
            info.peer_addr()
        };
        let ip = raw.and_then(normalize_ip);
        Ok(ip)
    }

    /// Session token from the request cookie. The request handle is dropped
    /// before returning so callers can await afterwards.
    pub async fn session_token() -> Result<Option<String>, ServerFnError> {
        let req = extract::<HttpRequest>().await?;
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
        Ok(token)
    }

    pub async fn current_session(state: &AppState) -> Result<Option<AdminSession>, ServerFnError> {
        Ok(match session_token().await? {
            Some(token) => state.sessions.get(&token).await,
            None => None,
        })
    }

    pub async fn require(access: Access) -> Result<(web::Data<AppState>, AdminSession), ServerFnError> {
        let state = state().await?;
        let session = current_session(&state).await?;
        let session = authorize(session, access).map_err(AppError::into_server_error)?;
        Ok((state, session))
    }

    pub fn set_session_cookie(token: &str, expire: bool) -> Result<(), ServerFnError> {
        let mut cookie = Cookie::build(SESSION_COOKIE, token.to_string())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish();
        if expire {
            cookie.set_max_age(Duration::ZERO);
        }
        let response = expect_context::<ResponseOptions>();
        response.insert_header(
            header::SET_COOKIE,
            header::HeaderValue::from_str(&cookie.to_string())?,
        );
        Ok(())
    }
}

#[server(VerifyConnection, "/api")]
pub async fn verify_connection() -> Result<GeoVerdict, ServerFnError> {
    let state = server::state().await?;
    match server::caller_ip(&state).await? {
        Some(ip) => Ok(state.geo.verify(&ip).await),
        None => Ok(GeoVerdict::Unverified {
            reason: "caller address unavailable".to_string(),
        }),
    }
}

/// Classes already reviewed from the caller's connection.
#[server(ReviewedClasses, "/api")]
pub async fn reviewed_classes() -> Result<Vec<String>, ServerFnError> {
    let state = server::state().await?;
    let Some(ip) = server::caller_ip(&state).await? else {
        return Ok(Vec::new());
    };
    Ok(state.db.reviewed_classes_by_ip(&ip).await?)
}

/// The IP recorded with the review is the one the server sees, whatever the
/// browser sent.
#[server(name = SubmitReview, prefix = "/api", input = Json)]
pub async fn submit_review(review: NewReview) -> Result<(), ServerFnError> {
    use crate::error::AppError;

    let state = server::state().await?;
    let ip = server::caller_ip(&state)
        .await?
        .ok_or_else(|| AppError::InvalidInput("caller address unavailable".into()).into_server_error())?;
    let review = NewReview {
        ip_address: ip,
        ..review
    };
    crate::admission::submit(&state.db, review, chrono::Utc::now())
        .await
        .map(|_| ())
        .map_err(AppError::into_server_error)
}

#[server(Login, "/api")]
pub async fn login(username: String, password: String) -> Result<Option<AdminSession>, ServerFnError> {
    use crate::error::AppError;

    let state = server::state().await?;
    let session = crate::auth::authenticate(&state.db, &state.config, &username, &password)
        .await
        .map_err(AppError::into_server_error)?;
    if let Some(session) = &session {
        let token = state.sessions.create(session.clone()).await;
        server::set_session_cookie(&token, false)?;
    }
    Ok(session)
}

#[server(Logout, "/api")]
pub async fn logout() -> Result<(), ServerFnError> {
    let state = server::state().await?;
    if let Some(token) = server::session_token().await? {
        if let Some(session) = state.sessions.remove(&token).await {
            log!("[API] {} logged out", session.username);
        }
    }
    server::set_session_cookie("", true)
}

#[server(CurrentAdmin, "/api")]
pub async fn current_admin() -> Result<Option<AdminSession>, ServerFnError> {
    let state = server::state().await?;
    server::current_session(&state).await
}

#[server(ListReviews, "/api")]
pub async fn list_reviews() -> Result<ReviewListing, ServerFnError> {
    let (state, _) = server::require(Access::Admin).await?;
    let reviews = state.db.list_reviews().await?;
    Ok(ReviewListing {
        reviews,
        utc_offset_hours: state.config.utc_offset_hours,
    })
}

#[server(DeleteReview, "/api")]
pub async fn delete_review(review_id: String) -> Result<(), ServerFnError> {
    let (state, session) = server::require(Access::SuperAdmin).await?;
    let deleted = state.db.delete_review(&review_id).await?;
    log!("[API] {} deleted review {} (found: {})", session.username, review_id, deleted);
    Ok(())
}

#[server(DeleteAllReviews, "/api")]
pub async fn delete_all_reviews() -> Result<usize, ServerFnError> {
    let (state, session) = server::require(Access::SuperAdmin).await?;
    let deleted = state.db.delete_all_reviews().await?;
    log!("[API] {} deleted all {} reviews", session.username, deleted);
    Ok(deleted)
}

#[server(ListIpLogs, "/api")]
pub async fn list_ip_logs() -> Result<Vec<IpLog>, ServerFnError> {
    let (state, _) = server::require(Access::SuperAdmin).await?;
    Ok(state.db.list_ip_logs().await?)
}

#[server(DeleteIpLog, "/api")]
pub async fn delete_ip_log(log_id: String) -> Result<(), ServerFnError> {
    let (state, _) = server::require(Access::SuperAdmin).await?;
    state.db.delete_ip_log(&log_id).await?;
    Ok(())
}

#[server(ListAdmins, "/api")]
pub async fn list_admins() -> Result<Vec<AdminSummary>, ServerFnError> {
    use crate::models::account::Role;

    let (state, _) = server::require(Access::SuperAdmin).await?;
    let admins = state.db.list_admins().await?;
    Ok(admins
        .into_iter()
        .filter(|a| a.role == Role::Admin)
        .map(|a| AdminSummary {
            id: a.id,
            username: a.username,
            role: a.role,
        })
        .collect())
}

#[server(AddAdmin, "/api")]
pub async fn add_admin(username: String, password: String) -> Result<(), ServerFnError> {
    use crate::error::AppError;

    let (state, _) = server::require(Access::SuperAdmin).await?;
    let username = crate::validation::validate_new_admin(
        &username,
        &password,
        &state.config.superadmin_username,
    )
    .map_err(|msg| match msg {
        crate::locale::ERR_USERNAME_EXISTS => AppError::UsernameExists,
        _ => AppError::InvalidInput(msg.to_string()),
    })
    .map_err(AppError::into_server_error)?;
    state
        .db
        .insert_admin(username, &password)
        .await
        .map(|_| ())
        .map_err(AppError::into_server_error)
}

#[server(DeleteAdmin, "/api")]
pub async fn delete_admin(user_id: String) -> Result<(), ServerFnError> {
    let (state, _) = server::require(Access::SuperAdmin).await?;
    state.db.delete_admin(&user_id).await?;
    let revoked = state.sessions.revoke_user(&user_id).await;
    log!("[API] Admin {} deleted, {} sessions revoked", user_id, revoked);
    Ok(())
}

#[server(ChangePassword, "/api")]
pub async fn change_password(new_password: String, confirmation: String) -> Result<(), ServerFnError> {
    use crate::error::AppError;

    let (state, session) = server::require(Access::SecondaryAdmin).await?;
    crate::validation::validate_password_change(&new_password, &confirmation)
        .map_err(|msg| AppError::InvalidInput(msg.to_string()).into_server_error())?;
    if !state.db.update_password(&session.id, &new_password).await? {
        return Err(AppError::NotFound(session.id).into_server_error());
    }
    log!("[API] {} changed their password", session.username);
    Ok(())
}

#[cfg(feature = "ssr")]
#[derive(Deserialize)]
pub struct ExportQuery {
    pub class: Option<String>,
}

/// `GET /admin/export.csv?class=<name|all>`: the filtered list as a CSV download.
#[cfg(feature = "ssr")]
pub async fn export_reviews_csv(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ExportQuery>,
) -> HttpResponse {
    let session = match req.cookie(SESSION_COOKIE) {
        Some(cookie) => state.sessions.get(cookie.value()).await,
        None => None,
    };
    if let Err(err) = authorize(session, Access::Admin) {
        log!("[API] Export refused: {}", err);
        return HttpResponse::Unauthorized().body("Login required");
    }

    let filter = ClassFilter::from_query(query.class.as_deref().unwrap_or(ALL_CLASSES_QUERY));
    match state.db.list_reviews().await {
        Ok(reviews) => {
            let rows = filter_reviews(&reviews, &filter);
            log!("[API] Exporting {} of {} reviews ({})", rows.len(), reviews.len(), filter.as_query());
            let file_name = export_file_name(chrono::Utc::now().date_naive());
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file_name),
                ))
                .body(reviews_to_csv(&rows, state.config.utc_offset_hours))
        }
        Err(err) => {
            leptos::logging::error!("Failed to export reviews: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to export reviews")
        }
    }
}
