//! Repository implementations, one per aggregate.

pub mod marker;
pub mod notification;
pub mod report;
pub mod user;

pub use marker::MarkerRepository;
pub use notification::NotificationRepository;
pub use report::ReportRepository;
pub use user::UserRepository;

/// Normalize a page size for binding to `LIMIT`.
///
/// Values of zero or below mean "no limit" and bind as SQL `NULL`.
pub(crate) fn page_limit(limit: i64) -> Option<i64> {
    (limit > 0).then_some(limit)
}

/// Normalize a page offset for binding to `OFFSET`.
///
/// Values of zero or below mean "no skip" and bind as SQL `NULL`.
pub(crate) fn page_offset(offset: i64) -> Option<i64> {
    (offset > 0).then_some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds_normalization() {
        assert_eq!(page_limit(10), Some(10));
        assert_eq!(page_limit(0), None);
        assert_eq!(page_limit(-5), None);
        assert_eq!(page_offset(3), Some(3));
        assert_eq!(page_offset(0), None);
        assert_eq!(page_offset(-1), None);
    }
}
