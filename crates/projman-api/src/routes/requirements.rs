//! # Requirement and Sub-Item Operations
//!
//! One function per operation. Each decodes its body (if any), makes a
//! single store call, and shapes the response. The store writes through
//! synchronously, so a successful response always reflects stored state.
//!
//! | Operation | Success | Failure |
//! |---|---|---|
//! | list | 200 list | - |
//! | create | 201 requirement | 400 body |
//! | get | 200 requirement | 404 |
//! | update | 200 requirement | 400 body, 404 |
//! | delete | 204 | 404 |
//! | list by status | 200 list (possibly empty) | - |
//! | add sub-item | 201 sub-item | 400 body, 404 parent |
//! | update sub-item | 200 sub-item | 400 body, 404 |
//! | delete sub-item | 204 | 404 |
//!
//! Bodies are decoded before any lookup, so a malformed body on a missing
//! ID reports 400.

use axum::http::StatusCode;
use axum::Json;
use projman_core::{Requirement, SubItem};

use crate::error::AppError;
use crate::extractors::decode_json;
use crate::state::AppState;

/// GET /requirements: All requirements in store order.
pub fn list_requirements(state: &AppState) -> Json<Vec<Requirement>> {
    Json(state.store.list())
}

/// GET /requirements/status/{status}: Requirements whose status matches exactly.
pub fn list_requirements_by_status(state: &AppState, status: &str) -> Json<Vec<Requirement>> {
    Json(state.store.list_by_status(status))
}

/// GET /requirements/{id}
pub fn get_requirement(state: &AppState, id: &str) -> Result<Json<Requirement>, AppError> {
    Ok(Json(state.store.get(id)?))
}

/// POST /requirements: Create a requirement with a server-assigned ID.
pub fn create_requirement(
    state: &AppState,
    body: &[u8],
) -> Result<(StatusCode, Json<Requirement>), AppError> {
    let requirement: Requirement = decode_json(body)?;
    let created = state.store.insert(requirement);
    tracing::info!(requirement_id = %created.id, "created requirement");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /requirements/{id}: Replace every field except the ID.
pub fn update_requirement(
    state: &AppState,
    id: &str,
    body: &[u8],
) -> Result<Json<Requirement>, AppError> {
    let replacement: Requirement = decode_json(body)?;
    Ok(Json(state.store.replace(id, replacement)?))
}

/// DELETE /requirements/{id}
pub fn delete_requirement(state: &AppState, id: &str) -> Result<StatusCode, AppError> {
    state.store.remove(id)?;
    tracing::info!(requirement_id = %id, "deleted requirement");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /requirements/{id}/subitems: Append a sub-item with a server-assigned ID.
pub fn add_sub_item(
    state: &AppState,
    requirement_id: &str,
    body: &[u8],
) -> Result<(StatusCode, Json<SubItem>), AppError> {
    let sub_item: SubItem = decode_json(body)?;
    let created = state.store.add_sub_item(requirement_id, sub_item)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /requirements/{id}/subitems/{sub_id}: Replace every field except the ID.
pub fn update_sub_item(
    state: &AppState,
    requirement_id: &str,
    sub_item_id: &str,
    body: &[u8],
) -> Result<Json<SubItem>, AppError> {
    let replacement: SubItem = decode_json(body)?;
    Ok(Json(state.store.replace_sub_item(
        requirement_id,
        sub_item_id,
        replacement,
    )?))
}

/// DELETE /requirements/{id}/subitems/{sub_id}
pub fn delete_sub_item(
    state: &AppState,
    requirement_id: &str,
    sub_item_id: &str,
) -> Result<StatusCode, AppError> {
    state.store.remove_sub_item(requirement_id, sub_item_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use projman_core::Status;

    fn create(state: &AppState, body: &str) -> Requirement {
        let (status, Json(created)) = create_requirement(state, body.as_bytes()).unwrap();
        assert_eq!(status, StatusCode::CREATED);
        created
    }

    #[test]
    fn create_without_status_defaults_to_pending() {
        let state = AppState::new();
        let created = create(&state, r#"{"name":"Auth"}"#);
        assert_eq!(created.status, Status::Pending);
    }

    #[test]
    fn create_with_malformed_body_is_bad_request() {
        let state = AppState::new();
        let err = create_requirement(&state, b"{not json").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(state.store.is_empty());
    }

    #[test]
    fn update_decodes_before_lookup() {
        let state = AppState::new();
        let err = update_requirement(&state, "req-404", b"[").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = update_requirement(&state, "req-404", b"{}").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn update_ignores_body_id() {
        let state = AppState::new();
        let created = create(&state, r#"{"name":"Auth"}"#);
        let Json(updated) = update_requirement(
            &state,
            &created.id,
            br#"{"id":"req-9","name":"Auth v2","status":"complete"}"#,
        )
        .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Auth v2");
        assert_eq!(updated.status, Status::Complete);
    }

    #[test]
    fn delete_then_delete_again_is_not_found() {
        let state = AppState::new();
        let created = create(&state, r#"{"name":"Auth"}"#);
        assert_eq!(
            delete_requirement(&state, &created.id).unwrap(),
            StatusCode::NO_CONTENT
        );
        assert!(matches!(
            delete_requirement(&state, &created.id),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            get_requirement(&state, &created.id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn sub_item_add_defaults_status_and_update_forces_id() {
        let state = AppState::new();
        let parent = create(&state, r#"{"name":"Login"}"#);

        let (status, Json(child)) = add_sub_item(&state, &parent.id, br#"{"name":"MFA"}"#).unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(child.status, Status::Pending);

        let Json(updated) = update_sub_item(
            &state,
            &parent.id,
            &child.id,
            br#"{"id":"sub-99","name":"TOTP","status":"in-progress"}"#,
        )
        .unwrap();
        assert_eq!(updated.id, child.id);
        assert_eq!(updated.status, Status::InProgress);
    }

    #[test]
    fn sub_item_add_to_missing_parent_is_not_found() {
        let state = AppState::new();
        assert!(matches!(
            add_sub_item(&state, "req-1", br#"{"name":"MFA"}"#),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            add_sub_item(&state, "req-1", b"nope"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn list_by_status_is_empty_not_an_error() {
        let state = AppState::new();
        let Json(list) = list_requirements_by_status(&state, "complete");
        assert!(list.is_empty());
    }
}
