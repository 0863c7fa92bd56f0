//! Unified error codes for the Estrade platform
//!
//! This module defines all error codes used across the API client, the mock
//! backend and the stores. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Structure errors
//! - 4xxx: Area and audience zone errors
//! - 5xxx: Event errors
//! - 6xxx: Team errors
//! - 7xxx: Friendship errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session has expired
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Administrator role required
    AdminRequired = 2003,
    /// Cannot apply this operation to your own account
    CannotEditSelf = 2004,
    /// Cannot remove another administrator
    CannotRemoveAdmin = 2005,

    // ==================== 3xxx: Structure ====================
    /// Structure not found
    StructureNotFound = 3001,
    /// Structure name already exists
    StructureNameExists = 3002,
    /// Structure type not found
    StructureTypeNotFound = 3003,
    /// Gallery upload failed
    GalleryUploadFailed = 3004,

    // ==================== 4xxx: Area / Audience zone ====================
    /// Area not found
    AreaNotFound = 4001,
    /// Area name already exists within the structure
    AreaNameExists = 4002,
    /// Audience zone template not found
    ZoneTemplateNotFound = 4101,
    /// Audience zone capacity exceeds the parent area capacity
    ZoneCapacityExceedsArea = 4102,

    // ==================== 5xxx: Event ====================
    /// Event not found
    EventNotFound = 5001,
    /// Event dates are invalid (end before start)
    EventDatesInvalid = 5002,

    // ==================== 6xxx: Team ====================
    /// Team member not found
    TeamMemberNotFound = 6001,
    /// User is already a member of the team
    TeamMemberExists = 6002,
    /// Role is not allowed for team members
    TeamRoleInvalid = 6003,

    // ==================== 7xxx: Friendship ====================
    /// Friendship not found
    FriendshipNotFound = 7001,
    /// Friendship already exists
    FriendshipExists = 7002,
    /// Cannot send a friend request to yourself
    SelfFriendRequest = 7003,
    /// Friendship status transition not allowed
    FriendshipStatusInvalid = 7004,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Email is already registered
    EmailAlreadyRegistered = 8002,
    /// Structure is already in favorites
    FavoriteExists = 8003,
    /// Structure is not in favorites
    FavoriteNotFound = 8004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage error (persistence file unreadable/unwritable)
    StorageError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Session has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::CannotEditSelf => "Cannot apply this operation to your own account",
            ErrorCode::CannotRemoveAdmin => "Cannot remove another administrator",

            // Structure
            ErrorCode::StructureNotFound => "Structure not found",
            ErrorCode::StructureNameExists => "Structure name already exists",
            ErrorCode::StructureTypeNotFound => "Structure type not found",
            ErrorCode::GalleryUploadFailed => "Gallery upload failed",

            // Area / Audience zone
            ErrorCode::AreaNotFound => "Area not found",
            ErrorCode::AreaNameExists => "Area name already exists within the structure",
            ErrorCode::ZoneTemplateNotFound => "Audience zone template not found",
            ErrorCode::ZoneCapacityExceedsArea => {
                "Audience zone capacity exceeds the parent area capacity"
            }

            // Event
            ErrorCode::EventNotFound => "Event not found",
            ErrorCode::EventDatesInvalid => "Event end date must be after the start date",

            // Team
            ErrorCode::TeamMemberNotFound => "Team member not found",
            ErrorCode::TeamMemberExists => "User is already a member of the team",
            ErrorCode::TeamRoleInvalid => "Role is not allowed for team members",

            // Friendship
            ErrorCode::FriendshipNotFound => "Friendship not found",
            ErrorCode::FriendshipExists => "Friendship already exists",
            ErrorCode::SelfFriendRequest => "Cannot send a friend request to yourself",
            ErrorCode::FriendshipStatusInvalid => "Friendship status transition not allowed",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",
            ErrorCode::FavoriteExists => "Structure is already in favorites",
            ErrorCode::FavoriteNotFound => "Structure is not in favorites",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::SessionExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::CannotEditSelf),
            2005 => Ok(ErrorCode::CannotRemoveAdmin),

            // Structure
            3001 => Ok(ErrorCode::StructureNotFound),
            3002 => Ok(ErrorCode::StructureNameExists),
            3003 => Ok(ErrorCode::StructureTypeNotFound),
            3004 => Ok(ErrorCode::GalleryUploadFailed),

            // Area / Audience zone
            4001 => Ok(ErrorCode::AreaNotFound),
            4002 => Ok(ErrorCode::AreaNameExists),
            4101 => Ok(ErrorCode::ZoneTemplateNotFound),
            4102 => Ok(ErrorCode::ZoneCapacityExceedsArea),

            // Event
            5001 => Ok(ErrorCode::EventNotFound),
            5002 => Ok(ErrorCode::EventDatesInvalid),

            // Team
            6001 => Ok(ErrorCode::TeamMemberNotFound),
            6002 => Ok(ErrorCode::TeamMemberExists),
            6003 => Ok(ErrorCode::TeamRoleInvalid),

            // Friendship
            7001 => Ok(ErrorCode::FriendshipNotFound),
            7002 => Ok(ErrorCode::FriendshipExists),
            7003 => Ok(ErrorCode::SelfFriendRequest),
            7004 => Ok(ErrorCode::FriendshipStatusInvalid),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::EmailAlreadyRegistered),
            8003 => Ok(ErrorCode::FavoriteExists),
            8004 => Ok(ErrorCode::FavoriteNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        // General
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::Unknown.code(), 1);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::AlreadyExists.code(), 4);
        assert_eq!(ErrorCode::InvalidRequest.code(), 5);

        // Auth
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::TokenExpired.code(), 1003);
        assert_eq!(ErrorCode::TokenInvalid.code(), 1004);
        assert_eq!(ErrorCode::SessionExpired.code(), 1005);

        // Permission
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::RoleRequired.code(), 2002);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);
        assert_eq!(ErrorCode::CannotEditSelf.code(), 2004);
        assert_eq!(ErrorCode::CannotRemoveAdmin.code(), 2005);

        // Structure
        assert_eq!(ErrorCode::StructureNotFound.code(), 3001);
        assert_eq!(ErrorCode::StructureNameExists.code(), 3002);
        assert_eq!(ErrorCode::StructureTypeNotFound.code(), 3003);
        assert_eq!(ErrorCode::GalleryUploadFailed.code(), 3004);

        // Area / Audience zone
        assert_eq!(ErrorCode::AreaNotFound.code(), 4001);
        assert_eq!(ErrorCode::AreaNameExists.code(), 4002);
        assert_eq!(ErrorCode::ZoneTemplateNotFound.code(), 4101);
        assert_eq!(ErrorCode::ZoneCapacityExceedsArea.code(), 4102);

        // Event
        assert_eq!(ErrorCode::EventNotFound.code(), 5001);
        assert_eq!(ErrorCode::EventDatesInvalid.code(), 5002);

        // Team
        assert_eq!(ErrorCode::TeamMemberNotFound.code(), 6001);
        assert_eq!(ErrorCode::TeamMemberExists.code(), 6002);
        assert_eq!(ErrorCode::TeamRoleInvalid.code(), 6003);

        // Friendship
        assert_eq!(ErrorCode::FriendshipNotFound.code(), 7001);
        assert_eq!(ErrorCode::FriendshipExists.code(), 7002);
        assert_eq!(ErrorCode::SelfFriendRequest.code(), 7003);
        assert_eq!(ErrorCode::FriendshipStatusInvalid.code(), 7004);

        // User
        assert_eq!(ErrorCode::UserNotFound.code(), 8001);
        assert_eq!(ErrorCode::EmailAlreadyRegistered.code(), 8002);
        assert_eq!(ErrorCode::FavoriteExists.code(), 8003);
        assert_eq!(ErrorCode::FavoriteNotFound.code(), 8004);

        // System
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::StorageError.code(), 9002);
        assert_eq!(ErrorCode::NetworkError.code(), 9003);
        assert_eq!(ErrorCode::TimeoutError.code(), 9004);
        assert_eq!(ErrorCode::ConfigError.code(), 9005);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::StructureNotFound.is_success());
        assert!(!ErrorCode::InternalError.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::NotAuthenticated));
        assert_eq!(ErrorCode::try_from(3001), Ok(ErrorCode::StructureNotFound));
        assert_eq!(ErrorCode::try_from(7003), Ok(ErrorCode::SelfFriendRequest));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
        assert_eq!(ErrorCode::try_from(4500), Err(InvalidErrorCode(4500)));
    }

    #[test]
    fn test_serialize() {
        let code = ErrorCode::NotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "3");

        let code = ErrorCode::FriendshipExists;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "7002");

        let code = ErrorCode::Success;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "0");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("0").unwrap();
        assert_eq!(code, ErrorCode::Success);

        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::AreaNotFound);

        let code: ErrorCode = serde_json::from_str("9001").unwrap();
        assert_eq!(code, ErrorCode::InternalError);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());

        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::NotFound), "3");
        assert_eq!(format!("{}", ErrorCode::TeamMemberExists), "6002");
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::Success.message(),
            "Operation completed successfully"
        );
        assert_eq!(ErrorCode::StructureNotFound.message(), "Structure not found");
        assert_eq!(
            ErrorCode::SelfFriendRequest.message(),
            "Cannot send a friend request to yourself"
        );
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::NotAuthenticated,
            ErrorCode::PermissionDenied,
            ErrorCode::StructureNotFound,
            ErrorCode::FriendshipStatusInvalid,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ErrorCode::Success);
        set.insert(ErrorCode::NotFound);
        set.insert(ErrorCode::Success); // Duplicate

        assert_eq!(set.len(), 2);
        assert!(set.contains(&ErrorCode::Success));
        assert!(set.contains(&ErrorCode::NotFound));
    }
}
