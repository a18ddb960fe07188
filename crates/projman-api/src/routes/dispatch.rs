//! # Requirement Path Dispatch
//!
//! Maps `(method, path)` onto one requirement or sub-item operation.
//! Classification is a pure function ([`resolve`]) over the raw request path;
//! [`dispatch`] is the Axum handler that runs the resolved operation.
//!
//! | Path shape | Methods |
//! |---|---|
//! | `/requirements` | GET list, POST create |
//! | `/requirements/status/{status}` | GET list by status |
//! | `/requirements/{id}` | GET, PUT, DELETE |
//! | `/requirements/{id}/subitems` | POST add |
//! | `/requirements/{id}/subitems/{sub_id}` | PUT, DELETE |
//!
//! Precedence: the `status/` prefix wins first. Otherwise any path containing
//! `/subitems` goes to the sub-item branch, where a shape that is neither of
//! the two sub-item forms is [`RouteError::MalformedPath`]. Everything else
//! under `/requirements/` is keyed by its first segment.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::error::AppError;
use crate::routes::requirements;
use crate::state::AppState;

const COLLECTION: &str = "/requirements";
const ITEM_PREFIX: &str = "/requirements/";
const STATUS_PREFIX: &str = "status/";
const SUB_ITEMS_MARKER: &str = "/subitems";
const SUB_ITEMS_SEGMENT: &str = "subitems";

/// Reasons a request could not be mapped onto an operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("Invalid path")]
    MalformedPath,
    #[error("page not found")]
    Unrouted,
}

/// A fully classified request. Borrowed fields point into the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    ListRequirements,
    CreateRequirement,
    ListByStatus { status: &'a str },
    GetRequirement { id: &'a str },
    UpdateRequirement { id: &'a str },
    DeleteRequirement { id: &'a str },
    AddSubItem { requirement_id: &'a str },
    UpdateSubItem { requirement_id: &'a str, sub_item_id: &'a str },
    DeleteSubItem { requirement_id: &'a str, sub_item_id: &'a str },
}

/// Classify a request by method and raw path.
///
/// Path segments are taken as given: no percent-decoding, no trimming
/// beyond the fixed prefixes.
pub fn resolve<'a>(method: &Method, path: &'a str) -> Result<Operation<'a>, RouteError> {
    if path == COLLECTION {
        return match *method {
            Method::GET => Ok(Operation::ListRequirements),
            Method::POST => Ok(Operation::CreateRequirement),
            _ => Err(RouteError::MethodNotAllowed),
        };
    }

    let rest = path.strip_prefix(ITEM_PREFIX).ok_or(RouteError::Unrouted)?;

    if let Some(status) = rest.strip_prefix(STATUS_PREFIX) {
        return match *method {
            Method::GET => Ok(Operation::ListByStatus { status }),
            _ => Err(RouteError::MethodNotAllowed),
        };
    }

    if path.contains(SUB_ITEMS_MARKER) {
        return resolve_sub_item(method, path);
    }

    let id = rest.split('/').next().unwrap_or_default();
    match *method {
        Method::GET => Ok(Operation::GetRequirement { id }),
        Method::PUT => Ok(Operation::UpdateRequirement { id }),
        Method::DELETE => Ok(Operation::DeleteRequirement { id }),
        _ => Err(RouteError::MethodNotAllowed),
    }
}

/// `/requirements/{id}/subitems[/{sub_id}]`, split on `/` with the leading
/// empty segment kept: `["", "requirements", id, "subitems", sub_id]`.
fn resolve_sub_item<'a>(method: &Method, path: &'a str) -> Result<Operation<'a>, RouteError> {
    let parts: Vec<&'a str> = path.split('/').collect();
    if parts.len() < 4 || parts[3] != SUB_ITEMS_SEGMENT {
        return Err(RouteError::MalformedPath);
    }
    let requirement_id = parts[2];

    match (parts.len(), method) {
        (4, &Method::POST) => Ok(Operation::AddSubItem { requirement_id }),
        (4, _) => Err(RouteError::MethodNotAllowed),
        (5, &Method::PUT) => Ok(Operation::UpdateSubItem {
            requirement_id,
            sub_item_id: parts[4],
        }),
        (5, &Method::DELETE) => Ok(Operation::DeleteSubItem {
            requirement_id,
            sub_item_id: parts[4],
        }),
        (5, _) => Err(RouteError::MethodNotAllowed),
        _ => Err(RouteError::MalformedPath),
    }
}

impl Operation<'_> {
    /// Run the operation against the store. `body` is ignored by operations
    /// that take no payload.
    pub fn execute(self, state: &AppState, body: &[u8]) -> Result<Response, AppError> {
        let response = match self {
            Self::ListRequirements => requirements::list_requirements(state).into_response(),
            Self::CreateRequirement => {
                requirements::create_requirement(state, body)?.into_response()
            }
            Self::ListByStatus { status } => {
                requirements::list_requirements_by_status(state, status).into_response()
            }
            Self::GetRequirement { id } => {
                requirements::get_requirement(state, id)?.into_response()
            }
            Self::UpdateRequirement { id } => {
                requirements::update_requirement(state, id, body)?.into_response()
            }
            Self::DeleteRequirement { id } => {
                requirements::delete_requirement(state, id)?.into_response()
            }
            Self::AddSubItem { requirement_id } => {
                requirements::add_sub_item(state, requirement_id, body)?.into_response()
            }
            Self::UpdateSubItem {
                requirement_id,
                sub_item_id,
            } => requirements::update_sub_item(state, requirement_id, sub_item_id, body)?
                .into_response(),
            Self::DeleteSubItem {
                requirement_id,
                sub_item_id,
            } => requirements::delete_sub_item(state, requirement_id, sub_item_id)?
                .into_response(),
        };
        Ok(response)
    }
}

/// Axum entry point for every `/requirements` request.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, AppError> {
    let operation = resolve(&method, uri.path())?;
    operation.execute(&state, &body)
}
