use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 100;

/// `skip`/`limit` window, already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            skip: skip.unwrap_or(0).max(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Rows to skip, default 0
    pub skip: Option<i64>,
    /// Maximum rows to return, default 100
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    /// Only courses taught by this teacher profile
    pub teacher_id: Option<Uuid>,
}

impl CourseListQuery {
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

/// Filters shared by the enrollment and grade listings.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecordListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub student_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
}

impl RecordListQuery {
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_public_contract() {
        assert_eq!(Pagination::default().normalize(), Page { skip: 0, limit: 100 });
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(Page::new(Some(-4), Some(0)), Page { skip: 0, limit: 1 });
        assert_eq!(Page::new(Some(20), Some(5000)), Page { skip: 20, limit: 100 });
    }
}
