// src/utils/batch.rs

use crate::error::AppResult;
use futures::stream::{self, StreamExt};
use std::future::Future;

/// 同時実行数を制限して全タスクを実行する
///
/// 全タスクの完了を待ってから、入力順で最初のエラーを返す。
/// 成功時は入力順の結果を返す。
pub async fn run_batch<I, T, F, Fut, R>(items: I, concurrency: usize, task: F) -> AppResult<Vec<R>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = AppResult<R>>,
{
    let results: Vec<AppResult<R>> = stream::iter(items)
        .map(task)
        .buffered(concurrency.max(1))
        .collect()
        .await;

    results.into_iter().collect()
}
