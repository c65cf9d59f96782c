use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Moderation state of a design.
///
/// There is deliberately no transition table: any status may be set from any
/// prior status. `Pending` is an initial value only and is never a valid
/// target of the moderation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DesignStatus {
    Pending,
    Approved,
    Rejected,
    Selected,
}

impl DesignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DesignStatus::Pending => "pending",
            DesignStatus::Approved => "approved",
            DesignStatus::Rejected => "rejected",
            DesignStatus::Selected => "selected",
        }
    }
}

impl fmt::Display for DesignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DesignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DesignStatus::Pending),
            "approved" => Ok(DesignStatus::Approved),
            "rejected" => Ok(DesignStatus::Rejected),
            "selected" => Ok(DesignStatus::Selected),
            other => Err(format!("Unknown design status '{}'", other)),
        }
    }
}

/// A user-submitted design with its metadata, moderation status and vote count
#[derive(Debug, Clone)]
pub struct Design {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category_id: i64,
    pub username: String,
    pub status: DesignStatus,
    pub votes_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when a design is first persisted.
///
/// Status and vote count are not part of this struct on purpose: every new
/// design starts out approved with zero votes.
#[derive(Debug, Clone)]
pub struct NewDesign {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category_id: i64,
    pub username: String,
}
