use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reference data. `max_days_per_year = NULL` means the type is unlimited;
/// ledger rows seeded from it carry a NULL entitlement and never block.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveType {
    pub id: u64,
    #[schema(example = "Annual")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 21)]
    pub max_days_per_year: Option<i32>,
}
