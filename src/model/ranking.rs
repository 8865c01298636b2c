use serde::Serialize;
use utoipa::ToSchema;

/// One leaderboard entry: employee identity plus total present days
/// (on-site and outstation alike).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankingEntry {
    #[schema(example = "EMP-001")]
    pub employee_code: String,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    #[schema(example = 18)]
    pub total_present: u32,
}
