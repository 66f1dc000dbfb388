use serde::Serialize;
use utoipa::ToSchema;

use crate::routes::params::Page;

/// Listing window echoed back to the client. Single-item responses leave every field unset.
#[derive(Debug, Serialize, ToSchema, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn for_page(page: Page, total: u64) -> Self {
        Self {
            skip: Some(page.skip),
            limit: Some(page.limit),
            total: Some(i64::try_from(total).unwrap_or(i64::MAX)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    pub fn item(message: impl Into<String>, data: T) -> Self {
        Self::success(message, data, Some(Meta::empty()))
    }

    pub fn page(message: impl Into<String>, data: T, page: Page, total: u64) -> Self {
        Self::success(message, data, Some(Meta::for_page(page, total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_meta_echoes_the_window() {
        let response = ApiResponse::page("Courses", Vec::<u8>::new(), Page::new(Some(20), Some(10)), 42);
        assert_eq!(
            response.meta,
            Some(Meta {
                skip: Some(20),
                limit: Some(10),
                total: Some(42),
            })
        );
    }

    #[test]
    fn item_responses_carry_empty_meta() {
        let json = serde_json::to_value(ApiResponse::item("Course", 1)).unwrap();
        assert_eq!(json["data"], 1);
        assert!(json["meta"]["total"].is_null());
    }
}
