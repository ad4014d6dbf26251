pub mod admin_applications;
pub mod applications;
pub mod certificates;
pub mod dictionary;
pub mod documents;
pub mod health;
pub mod internships;
pub mod profile;
pub mod users;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::AppState;

/// Every route the gateway serves. Layers and state are added by the caller.
pub fn portal_router() -> Router<AppState> {
    let public_api = Router::new()
        .route("/health", get(health::health))
        .route("/api/portal/statuses", get(dictionary::list_statuses))
        .route(
            "/api/portal/internships",
            get(internships::list_internships),
        )
        .route(
            "/api/portal/internships/:id",
            get(internships::get_internship),
        )
        .route(
            "/api/portal/certificates/verify/:certificate_id",
            get(certificates::verify_certificate),
        );

    let account_api = Router::new()
        .route(
            "/api/portal/me",
            get(profile::get_me).put(profile::update_me),
        )
        .route("/api/portal/me/password", put(profile::change_password))
        .route(
            "/api/portal/applications",
            get(applications::list_my_applications).post(applications::submit_application),
        )
        .route(
            "/api/portal/applications/:id/withdraw",
            post(applications::withdraw_application),
        )
        .route(
            "/api/portal/documents",
            get(documents::list_documents).post(documents::upload_document),
        )
        .route(
            "/api/portal/documents/:id",
            axum::routing::delete(documents::delete_document),
        );

    let admin_api = Router::new()
        .route(
            "/api/portal/admin/applications",
            get(admin_applications::list_applications),
        )
        .route(
            "/api/portal/admin/applications/search",
            get(admin_applications::search_applications),
        )
        .route(
            "/api/portal/admin/applications/stats",
            get(admin_applications::application_stats),
        )
        .route(
            "/api/portal/admin/applications/export",
            get(admin_applications::export_applications),
        )
        .route(
            "/api/portal/admin/applications/:id",
            get(admin_applications::get_application)
                .delete(admin_applications::delete_application),
        )
        .route(
            "/api/portal/admin/applications/:id/status",
            post(admin_applications::update_application_status),
        )
        .route(
            "/api/portal/admin/internships",
            post(internships::create_internship),
        )
        .route(
            "/api/portal/admin/internships/:id",
            put(internships::update_internship).delete(internships::delete_internship),
        )
        .route(
            "/api/portal/admin/certificates",
            get(certificates::list_certificates).post(certificates::create_certificate),
        )
        .route(
            "/api/portal/admin/certificates/:id",
            put(certificates::update_certificate).delete(certificates::delete_certificate),
        )
        .route(
            "/api/portal/admin/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/portal/admin/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    public_api.merge(account_api).merge(admin_api)
}
