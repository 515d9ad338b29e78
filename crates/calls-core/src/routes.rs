//! URL contract of the calls pages

/// Route of the calls list
pub const CALLS: &str = "/calls";

/// Query parameter carrying the 1-based page number
pub const PAGE_PARAM: &str = "page";

/// Calls list at a given page
#[must_use]
pub fn calls_page(page: u32) -> String {
    format!("{CALLS}?{PAGE_PARAM}={}", page.max(1))
}

/// Detail page of one call
#[must_use]
pub fn call_detail(call_id: &str) -> String {
    format!("{CALLS}/{call_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_calls_page() {
        assert_eq!(calls_page(3), "/calls?page=3");
        assert_eq!(calls_page(0), "/calls?page=1");
    }

    #[test]
    fn test_call_detail() {
        assert_eq!(call_detail("abc-123"), "/calls/abc-123");
    }
}
