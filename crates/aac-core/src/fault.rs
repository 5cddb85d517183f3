/// Every rejection a handler can surface to a client.
///
/// Each variant carries a stable machine-checkable category (see
/// [`Fault::category`]) plus a human-readable message. Storage failures are
/// logged server-side and never leak internals to the wire.
#[derive(Debug, thiserror::Error)]
pub enum Fault {
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("account is blocked")]
    Blocked,
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    DuplicateName(&'static str),
    #[error("{0}")]
    LimitExceeded(String),
    #[error("{0}")]
    PolicyViolation(String),
    #[error("character is already in a guild")]
    AlreadyMember,
    #[error("cannot delete a character who leads a guild; transfer or disband first")]
    LeadershipConflict,
    #[error("internal server error")]
    Storage(String),
}

impl Fault {
    /// Stable category string carried in every error response body.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::Blocked => "blocked",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::DuplicateName(_) => "duplicate_name",
            Self::LimitExceeded(_) => "limit_exceeded",
            Self::PolicyViolation(_) => "policy_violation",
            Self::AlreadyMember => "already_member",
            Self::LeadershipConflict => "leadership_conflict",
            Self::Storage(_) => "internal",
        }
    }
}

/// Constraint violations racing past an application-level check must surface
/// as the same taxonomy as the check itself, never as a raw storage error.
#[cfg(feature = "database")]
impl From<tokio_postgres::Error> for Fault {
    fn from(e: tokio_postgres::Error) -> Self {
        match e.as_db_error() {
            Some(db) if db.code() == &tokio_postgres::error::SqlState::UNIQUE_VIOLATION => {
                Self::DuplicateName("name already exists")
            }
            _ => Self::Storage(e.to_string()),
        }
    }
}

#[cfg(feature = "server")]
mod http {
    use super::*;
    use actix_web::HttpResponse;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    impl ResponseError for Fault {
        fn status_code(&self) -> StatusCode {
            match self {
                Fault::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                Fault::Blocked | Fault::Forbidden(_) => StatusCode::FORBIDDEN,
                Fault::NotFound(_) => StatusCode::NOT_FOUND,
                Fault::DuplicateName(_)
                | Fault::LimitExceeded(_)
                | Fault::PolicyViolation(_)
                | Fault::AlreadyMember
                | Fault::LeadershipConflict => StatusCode::BAD_REQUEST,
                Fault::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
        fn error_response(&self) -> HttpResponse {
            if let Fault::Storage(detail) = self {
                log::error!("storage failure: {}", detail);
            }
            HttpResponse::build(self.status_code()).json(serde_json::json!({
                "error": self.category(),
                "message": self.to_string(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_detail_never_reaches_the_message() {
        let fault = Fault::Storage("password_hash column dropped".into());
        assert_eq!(fault.to_string(), "internal server error");
        assert_eq!(fault.category(), "internal");
    }
    #[test]
    fn categories_are_stable() {
        assert_eq!(Fault::Blocked.category(), "blocked");
        assert_eq!(Fault::AlreadyMember.category(), "already_member");
        assert_eq!(Fault::LeadershipConflict.category(), "leadership_conflict");
        assert_eq!(Fault::DuplicateName("x").category(), "duplicate_name");
    }
    #[cfg(feature = "server")]
    #[test]
    fn statuses_follow_the_taxonomy() {
        use actix_web::ResponseError;
        assert_eq!(Fault::Unauthorized("no token").status_code().as_u16(), 401);
        assert_eq!(Fault::Blocked.status_code().as_u16(), 403);
        assert_eq!(Fault::Forbidden("not yours").status_code().as_u16(), 403);
        assert_eq!(Fault::NotFound("gone").status_code().as_u16(), 404);
        assert_eq!(Fault::LeadershipConflict.status_code().as_u16(), 400);
        assert_eq!(Fault::Storage("boom".into()).status_code().as_u16(), 500);
    }
}
