use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::api;

#[derive(Debug, Clone, FromRow)]
pub struct Currency {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl Currency {
    pub fn to_message(&self) -> api::Currency {
        api::Currency {
            id: self.id,
            name: self.name.clone(),
            code: self.code.clone(),
            default: self.is_default,
            created_at: self.created_at,
        }
    }
}
