//! Conversions from wire payloads to typed models

use crate::dto::{
    EventSummaryDto, FriendRequestEntryDto, FriendsDataDto, FriendshipDto, StructureCreatedDto,
    StructureDto, TeamMemberDto,
};
use crate::error::{ClientError, ClientResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use shared::models::{
    EventSummary, FriendRequestEntry, Friendship, FriendsData, Structure, StructureCreated,
    TeamMember,
};

/// Parse a timestamp in any of the formats the API is known to emit:
/// RFC 3339, naive datetime (taken as UTC), or a bare date.
pub(crate) fn parse_datetime(s: &str) -> ClientResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(ClientError::InvalidResponse(format!(
        "Unrecognized timestamp: {}",
        s
    )))
}

fn parse_datetime_opt(s: Option<&str>) -> ClientResult<Option<DateTime<Utc>>> {
    s.map(parse_datetime).transpose()
}

/// Convert a vector of wire payloads, failing on the first bad element
pub(crate) fn convert_vec<D, M>(items: Vec<D>) -> ClientResult<Vec<M>>
where
    M: TryFrom<D, Error = ClientError>,
{
    items.into_iter().map(M::try_from).collect()
}

impl TryFrom<StructureDto> for Structure {
    type Error = ClientError;

    fn try_from(dto: StructureDto) -> ClientResult<Self> {
        Ok(Self {
            id: dto.id,
            name: dto.name,
            types: dto.types,
            description: dto.description,
            address: dto.address,
            phone: dto.phone,
            email: dto.email,
            website: dto.website,
            logo_url: dto.logo_url,
            cover_url: dto.cover_url,
            gallery_urls: dto.gallery_urls,
            areas: dto.areas,
            created_at: parse_datetime(&dto.created_at)?,
            updated_at: parse_datetime(&dto.updated_at)?,
        })
    }
}

impl TryFrom<StructureCreatedDto> for StructureCreated {
    type Error = ClientError;

    fn try_from(dto: StructureCreatedDto) -> ClientResult<Self> {
        Ok(Self {
            structure: dto.structure.try_into()?,
            token: dto.token,
        })
    }
}

impl TryFrom<EventSummaryDto> for EventSummary {
    type Error = ClientError;

    fn try_from(dto: EventSummaryDto) -> ClientResult<Self> {
        Ok(Self {
            id: dto.id,
            structure_id: dto.structure_id,
            name: dto.name,
            start_at: parse_datetime(&dto.start_at)?,
            end_at: parse_datetime(&dto.end_at)?,
            status: dto.status,
        })
    }
}

impl TryFrom<TeamMemberDto> for TeamMember {
    type Error = ClientError;

    fn try_from(dto: TeamMemberDto) -> ClientResult<Self> {
        Ok(Self {
            id: dto.id,
            structure_id: dto.structure_id,
            user_id: dto.user_id,
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            role: dto.role,
            status: dto.status,
            invited_at: parse_datetime(&dto.invited_at)?,
            joined_at: parse_datetime_opt(dto.joined_at.as_deref())?,
        })
    }
}

impl TryFrom<FriendshipDto> for Friendship {
    type Error = ClientError;

    fn try_from(dto: FriendshipDto) -> ClientResult<Self> {
        Ok(Self {
            id: dto.id,
            sender_id: dto.sender_id,
            receiver_id: dto.receiver_id,
            status: dto.status,
            created_at: parse_datetime(&dto.created_at)?,
            updated_at: parse_datetime(&dto.updated_at)?,
        })
    }
}

impl TryFrom<FriendRequestEntryDto> for FriendRequestEntry {
    type Error = ClientError;

    fn try_from(dto: FriendRequestEntryDto) -> ClientResult<Self> {
        Ok(Self {
            friendship_id: dto.friendship_id,
            user: dto.user,
            status: dto.status,
            created_at: parse_datetime(&dto.created_at)?,
        })
    }
}

impl TryFrom<FriendsDataDto> for FriendsData {
    type Error = ClientError;

    fn try_from(dto: FriendsDataDto) -> ClientResult<Self> {
        Ok(Self {
            friends: dto.friends,
            pending: convert_vec(dto.pending)?,
            sent: convert_vec(dto.sent)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use shared::models::{FriendshipStatus, MemberStatus, UserRole};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_datetime("2025-03-01T10:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_datetime("2025-03-01T10:30:00").unwrap();
        assert_eq!(dt.hour(), 10);

        let dt = parse_datetime("2025-03-01T10:30:00.500").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_datetime("2025-03-01").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_datetime("yesterday").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn test_team_member_conversion() {
        let dto = TeamMemberDto {
            id: 5,
            structure_id: 1,
            user_id: None,
            email: "invitee@example.com".into(),
            first_name: String::new(),
            last_name: String::new(),
            role: UserRole::OrganizationService,
            status: MemberStatus::Pending,
            invited_at: "2025-02-10T09:00:00Z".into(),
            joined_at: None,
        };

        let member = TeamMember::try_from(dto).unwrap();
        assert_eq!(member.id, 5);
        assert!(member.user_id.is_none());
        assert!(member.joined_at.is_none());
        assert_eq!(member.status, MemberStatus::Pending);
    }

    #[test]
    fn test_friendship_conversion_rejects_bad_date() {
        let dto = FriendshipDto {
            id: 2,
            sender_id: 4,
            receiver_id: 1,
            status: FriendshipStatus::Pending,
            created_at: "not-a-date".into(),
            updated_at: "2025-02-10T09:00:00Z".into(),
        };

        assert!(Friendship::try_from(dto).is_err());
    }
}
