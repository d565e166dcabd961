use crate::domain::{base::Entity, CastMember, CastMemberType};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCastMemberCommand {
    pub name: Option<String>,
    pub member_type: Option<CastMemberType>,
}

impl CreateCastMemberCommand {
    pub fn with(name: Option<&str>, member_type: Option<CastMemberType>) -> Self {
        CreateCastMemberCommand {
            name: name.map(str::to_string),
            member_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCastMemberOutput {
    pub id: String,
}

impl From<&CastMember> for CreateCastMemberOutput {
    fn from(member: &CastMember) -> Self {
        CreateCastMemberOutput {
            id: member.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCastMemberCommand {
    pub id: String,
    pub name: Option<String>,
    pub member_type: Option<CastMemberType>,
}

impl UpdateCastMemberCommand {
    pub fn with(id: &str, name: Option<&str>, member_type: Option<CastMemberType>) -> Self {
        UpdateCastMemberCommand {
            id: id.to_string(),
            name: name.map(str::to_string),
            member_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateCastMemberOutput {
    pub id: String,
}

impl From<&CastMember> for UpdateCastMemberOutput {
    fn from(member: &CastMember) -> Self {
        UpdateCastMemberOutput {
            id: member.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastMemberOutput {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub member_type: Option<CastMemberType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CastMember> for CastMemberOutput {
    fn from(member: &CastMember) -> Self {
        CastMemberOutput {
            id: member.id().to_string(),
            name: member.name().map(str::to_string),
            member_type: member.member_type(),
            created_at: member.created_at(),
            updated_at: member.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastMemberListOutput {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub member_type: Option<CastMemberType>,
    pub created_at: DateTime<Utc>,
}

impl From<&CastMember> for CastMemberListOutput {
    fn from(member: &CastMember) -> Self {
        CastMemberListOutput {
            id: member.id().to_string(),
            name: member.name().map(str::to_string),
            member_type: member.member_type(),
            created_at: member.created_at(),
        }
    }
}
