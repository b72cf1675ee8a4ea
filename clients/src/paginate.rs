//! Bounded page accumulation over cursor-paged endpoints
//!
//! [`fetch_at_least`] drives a typed single-page operation until it has
//! gathered a target number of records or runs into one of its stop
//! conditions. Pages are fetched strictly one after another because each
//! page's cursor comes from the previous page's result.

use crate::error::ClientError;
use std::future::Future;

/// Hard per-call record ceiling of the paged endpoints this crate talks to
pub const PER_CALL_MAX: usize = 20;

/// One batch of records with its continuation state
///
/// Used both for a single remote page and for the merged result of an
/// accumulation run. `count` always equals `records.len()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// Records in upstream order
    pub records: Vec<T>,
    /// Continuation cursor issued with this batch
    pub cursor: u64,
    /// Whether more data is believed to be available
    pub has_more: bool,
    /// Number of records in this batch
    pub count: usize,
}

impl<T> Page<T> {
    /// Build a page, deriving `count` from the records
    #[must_use]
    pub fn new(records: Vec<T>, cursor: u64, has_more: bool) -> Self {
        let count = records.len();
        Self {
            records,
            cursor,
            has_more,
            count,
        }
    }
}

/// Accumulate at least `target_count` records across up to `max_pages` calls
///
/// The page operation receives `(cursor, page_size)` where `page_size` is
/// the smaller of [`PER_CALL_MAX`] and the records still missing. The loop
/// stops when the target is reached, the page budget is spent, a page comes
/// back absent or empty (exhaustion, whatever its `has_more` flag claims),
/// or a page reports `has_more == false`.
///
/// Records are concatenated in page-arrival order with no reordering or
/// dedup; the returned cursor is the last page's cursor so callers can
/// continue where the run stopped. Returns `Ok(None)` when nothing at all
/// was collected. The merged `has_more` holds only when the page budget
/// still had room and the target was met.
///
/// # Errors
///
/// A page operation error before anything was collected is passed through;
/// after the first successful page it ends the loop and the partial
/// accumulation is returned instead.
pub async fn fetch_at_least<T, F, Fut>(
    mut page_op: F,
    target_count: usize,
    max_pages: usize,
) -> Result<Option<Page<T>>, ClientError>
where
    F: FnMut(u64, usize) -> Fut,
    Fut: Future<Output = Result<Option<Page<T>>, ClientError>>,
{
    let mut collected: Vec<T> = Vec::new();
    let mut cursor: u64 = 0;
    let mut pages_fetched: usize = 0;

    while collected.len() < target_count && pages_fetched < max_pages {
        let remaining = target_count - collected.len();
        let page_size = PER_CALL_MAX.min(remaining);

        let page = match page_op(cursor, page_size).await {
            Ok(Some(page)) if !page.records.is_empty() => page,
            // Absent or empty means the upstream is out of data.
            Ok(_) => break,
            Err(e) if collected.is_empty() => return Err(e),
            Err(_) => break,
        };

        let page_has_more = page.has_more;
        collected.extend(page.records);
        cursor = page.cursor;
        pages_fetched += 1;

        if !page_has_more {
            break;
        }
    }

    if collected.is_empty() {
        return Ok(None);
    }

    let has_more = pages_fetched < max_pages && collected.len() >= target_count;
    Ok(Some(Page::new(collected, cursor, has_more)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted page operation that records every `(cursor, page_size)` it
    /// is asked for and serves pre-built results in order.
    struct Script {
        pages: Vec<Result<Option<Page<u32>>, ClientError>>,
        calls: Mutex<Vec<(u64, usize)>>,
    }

    impl Script {
        fn new(pages: Vec<Result<Option<Page<u32>>, ClientError>>) -> Self {
            Self {
                pages,
                calls: Mutex::new(Vec::new()),
            }
        }

        async fn serve(
            &self,
            cursor: u64,
            page_size: usize,
        ) -> Result<Option<Page<u32>>, ClientError> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push((cursor, page_size));
            match self.pages.get(index) {
                Some(Ok(page)) => Ok(page.clone()),
                Some(Err(ClientError::Malformed(msg))) => {
                    Err(ClientError::Malformed(msg.clone()))
                }
                Some(Err(ClientError::MissingApiKey(var))) => Err(ClientError::MissingApiKey(*var)),
                None => Ok(None),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn requested_sizes(&self) -> Vec<usize> {
            self.calls.lock().unwrap().iter().map(|c| c.1).collect()
        }

        fn requested_cursors(&self) -> Vec<u64> {
            self.calls.lock().unwrap().iter().map(|c| c.0).collect()
        }
    }

    fn page(start: u32, len: usize, cursor: u64, has_more: bool) -> Page<u32> {
        Page::new((start..start + u32::try_from(len).unwrap()).collect(), cursor, has_more)
    }

    #[tokio::test]
    async fn test_first_page_empty_returns_none_after_one_call() {
        let script = Script::new(vec![Ok(Some(page(0, 0, 0, true)))]);

        let result = fetch_at_least(|c, s| script.serve(c, s), 50, 10)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(script.call_count(), 1);
    }

    #[tokio::test]
    async fn test_first_page_absent_returns_none_after_one_call() {
        let script = Script::new(vec![Ok(None)]);

        let result = fetch_at_least(|c, s| script.serve(c, s), 50, 10)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(script.call_count(), 1);
    }

    #[tokio::test]
    async fn test_target_met_across_three_pages() {
        // 20 + 20 + 10 with the upstream reporting no more data on the last
        // page: exactly three calls, fifty records, last page's cursor.
        let script = Script::new(vec![
            Ok(Some(page(0, 20, 20, true))),
            Ok(Some(page(20, 20, 40, true))),
            Ok(Some(page(40, 10, 50, false))),
        ]);

        let result = fetch_at_least(|c, s| script.serve(c, s), 50, 10)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.count, 50);
        assert_eq!(result.records.len(), 50);
        assert_eq!(result.cursor, 50);
        assert_eq!(script.call_count(), 3);
        assert_eq!(script.requested_sizes(), vec![20, 20, 10]);
        assert_eq!(script.requested_cursors(), vec![0, 20, 40]);
        // Budget had room and the target was met.
        assert!(result.has_more);
    }

    #[tokio::test]
    async fn test_page_cap_stops_short_of_target() {
        // Target 100 with a cap of three pages of twenty: sixty records and
        // the merged has_more stays false because the target was not met.
        let script = Script::new(vec![
            Ok(Some(page(0, 20, 20, true))),
            Ok(Some(page(20, 20, 40, true))),
            Ok(Some(page(40, 20, 60, true))),
        ]);

        let result = fetch_at_least(|c, s| script.serve(c, s), 100, 3)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.count, 60);
        assert_eq!(script.call_count(), 3);
        assert!(!result.has_more);
    }

    #[tokio::test]
    async fn test_never_exceeds_max_pages() {
        let script = Script::new(
            (0..50)
                .map(|i| Ok(Some(page(i * 20, 20, u64::from(i + 1) * 20, true))))
                .collect(),
        );

        let result = fetch_at_least(|c, s| script.serve(c, s), 10_000, 5)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(script.call_count(), 5);
        assert_eq!(result.count, 100);
    }

    #[tokio::test]
    async fn test_records_keep_arrival_order() {
        let script = Script::new(vec![
            Ok(Some(page(0, 3, 3, true))),
            Ok(Some(page(3, 3, 6, true))),
            Ok(Some(page(6, 3, 9, true))),
        ]);

        let result = fetch_at_least(|c, s| script.serve(c, s), 9, 10)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.records, (0..9).collect::<Vec<u32>>());
    }

    #[tokio::test]
    async fn test_upstream_exhaustion_before_target() {
        // One page of twenty saying has_more=false against a target of 100:
        // partial result, no more data reported.
        let script = Script::new(vec![Ok(Some(page(0, 20, 20, false)))]);

        let result = fetch_at_least(|c, s| script.serve(c, s), 100, 10)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.count, 20);
        assert_eq!(script.call_count(), 1);
        assert!(!result.has_more);
    }

    #[tokio::test]
    async fn test_empty_page_after_data_keeps_partial() {
        // A mid-run empty page ends the loop even though it claims more
        // data exists.
        let script = Script::new(vec![
            Ok(Some(page(0, 20, 20, true))),
            Ok(Some(page(0, 0, 40, true))),
        ]);

        let result = fetch_at_least(|c, s| script.serve(c, s), 100, 10)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.count, 20);
        assert_eq!(result.cursor, 20);
        assert_eq!(script.call_count(), 2);
        assert!(!result.has_more);
    }

    #[tokio::test]
    async fn test_error_on_first_page_propagates() {
        let script = Script::new(vec![Err(ClientError::Malformed("bad payload".to_string()))]);

        let result = fetch_at_least(|c, s| script.serve(c, s), 50, 10).await;

        assert!(matches!(result, Err(ClientError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_error_after_data_keeps_partial() {
        let script = Script::new(vec![
            Ok(Some(page(0, 20, 20, true))),
            Err(ClientError::Malformed("bad payload".to_string())),
        ]);

        let result = fetch_at_least(|c, s| script.serve(c, s), 50, 10)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.count, 20);
        assert_eq!(script.call_count(), 2);
    }

    #[tokio::test]
    async fn test_zero_target_makes_no_calls() {
        let script = Script::new(vec![Ok(Some(page(0, 20, 20, true)))]);

        let result = fetch_at_least(|c, s| script.serve(c, s), 0, 10)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(script.call_count(), 0);
    }

    #[test]
    fn test_page_count_matches_records() {
        let page = Page::new(vec![1, 2, 3], 3, true);
        assert_eq!(page.count, 3);
    }
}
