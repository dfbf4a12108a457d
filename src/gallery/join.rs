use std::future::Future;

use futures::future::join_all;

/// Run one operation per key concurrently and wait until every one settles.
///
/// Results come back in key order. A failure is kept next to its key and
/// never cancels its siblings.
pub async fn join_settled<K, F, Fut, T, E>(
    keys: impl IntoIterator<Item = K>,
    op: F,
) -> Vec<(K, Result<T, E>)>
where
    K: Clone,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    join_all(keys.into_iter().map(|key| {
        let fut = op(key.clone());
        async move { (key, fut.await) }
    }))
    .await
}
