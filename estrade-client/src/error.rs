//! Client error types

use http::StatusCode;
use shared::AppError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict with current server state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status this error corresponds to, when one applies
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(e) => e.status(),
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::Conflict(_) => Some(StatusCode::CONFLICT),
            Self::Validation(_) => Some(StatusCode::BAD_REQUEST),
            Self::Internal(_) => Some(StatusCode::INTERNAL_SERVER_ERROR),
            Self::InvalidResponse(_) | Self::Serialization(_) => None,
        }
    }

    /// User-facing message, suitable for display as-is
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Votre session a expiré. Veuillez vous reconnecter.",
            Self::Forbidden(_) => {
                "Vous n'avez pas les droits nécessaires pour effectuer cette action."
            }
            Self::NotFound(_) => "La ressource demandée est introuvable.",
            Self::Conflict(_) => {
                "Cette demande existe déjà ou entre en conflit avec l'état actuel."
            }
            Self::Validation(_) => "Les données saisies sont invalides. Veuillez vérifier le formulaire.",
            _ => "Une erreur est survenue. Veuillez réessayer plus tard.",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<AppError> for ClientError {
    /// Map an application error onto the client taxonomy by its HTTP status
    fn from(err: AppError) -> Self {
        match err.http_status().as_u16() {
            401 => Self::Unauthorized,
            403 => Self::Forbidden(err.message),
            404 => Self::NotFound(err.message),
            409 => Self::Conflict(err.message),
            400 => Self::Validation(err.message),
            _ => Self::Internal(err.message),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ClientError::Unauthorized.status(),
            Some(StatusCode::UNAUTHORIZED)
        );
        assert_eq!(
            ClientError::NotFound("x".into()).status(),
            Some(StatusCode::NOT_FOUND)
        );
        assert_eq!(
            ClientError::Conflict("x".into()).status(),
            Some(StatusCode::CONFLICT)
        );
        assert!(ClientError::InvalidResponse("x".into()).status().is_none());
    }

    #[test]
    fn test_user_messages_are_french() {
        assert!(ClientError::Unauthorized.user_message().contains("session"));
        assert!(
            ClientError::Forbidden("no".into())
                .user_message()
                .contains("droits")
        );
        assert!(
            ClientError::NotFound("no".into())
                .user_message()
                .contains("introuvable")
        );
        assert!(
            ClientError::Conflict("dup".into())
                .user_message()
                .contains("conflit")
        );
        assert!(
            ClientError::Internal("boom".into())
                .user_message()
                .contains("réessayer")
        );
    }

    #[test]
    fn test_from_app_error() {
        let err: ClientError =
            AppError::with_message(ErrorCode::StructureNotFound, "Structure not found: 42").into();
        assert!(err.is_not_found());

        let err: ClientError =
            AppError::conflict(ErrorCode::FriendshipExists, "Friendship already exists").into();
        assert!(err.is_conflict());

        let err: ClientError =
            AppError::with_message(ErrorCode::SelfFriendRequest, "Cannot befriend yourself").into();
        assert!(matches!(err, ClientError::Validation(_)));

        let err: ClientError = AppError::not_authenticated().into();
        assert!(matches!(err, ClientError::Unauthorized));

        let err: ClientError =
            AppError::with_message(ErrorCode::AdminRequired, "Admin role required").into();
        assert!(matches!(err, ClientError::Forbidden(_)));
    }
}
