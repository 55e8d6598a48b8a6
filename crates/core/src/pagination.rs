//! Page-number handling for the paginated routes.
//!
//! The `p` query parameter is untrusted. Anything that is not an integer
//! greater than one lands on the first page.

/// Maximum number of items shown per page.
pub const PAGE_SIZE: u64 = 10;

/// Number of items to skip for the raw `p` parameter.
///
/// Pages `1`, `0`, negatives and garbage all resolve to offset 0; only
/// `p >= 2` advances.
pub fn resolve_offset(raw: Option<&str>) -> u64 {
    let page = parse(raw).saturating_sub(1);
    if page < 1 {
        return 0;
    }
    (page as u64).saturating_mul(PAGE_SIZE)
}

/// 1-based page number shown to the user for the raw `p` parameter.
pub fn page_number(raw: Option<&str>) -> u64 {
    parse(raw).max(1) as u64
}

/// Rows to request for one page: a full page plus one row of lookahead.
pub const FETCH_LIMIT: u64 = PAGE_SIZE + 1;

/// Cut a [`FETCH_LIMIT`]-sized fetch down to one page.
///
/// The next page number is only returned when the lookahead row came back,
/// so a total that is an exact multiple of [`PAGE_SIZE`] offers no next page.
pub fn take_page<T>(mut fetched: Vec<T>, current: u64) -> (Vec<T>, Option<u64>) {
    let has_more = fetched.len() as u64 > PAGE_SIZE;
    fetched.truncate(PAGE_SIZE as usize);
    (fetched, has_more.then(|| current.saturating_add(1)))
}

fn parse(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.parse::<i64>().ok()).unwrap_or(0)
}
