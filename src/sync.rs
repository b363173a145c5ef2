use crate::config::Config;
use crate::fetcher::{SnapshotFetcher, SnapshotSource};
use crate::models::Snapshot;
use crate::publisher::{PublishOutcome, Publisher};
use crate::report::ReportFormatter;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    FetchFailed,
    Stored,
    SavedLocally(PathBuf),
    PublishFailed,
}

/// Fetches the snapshot, printing a diagnostic instead of failing.
pub fn fetch_snapshot<W: Write>(
    source: &dyn SnapshotSource,
    out: &mut W,
) -> std::io::Result<Option<Snapshot>> {
    match source.fetch() {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(e) => {
            tracing::warn!(error = %e, "fetch failed");
            writeln!(out, "获取待办数据失败: {e}")?;
            Ok(None)
        }
    }
}

/// Publishes the report and prints the outcome.
pub fn publish<W: Write>(
    publisher: &Publisher,
    content: &str,
    out: &mut W,
) -> std::io::Result<SyncOutcome> {
    if !publisher.has_store() {
        writeln!(out, "⚠️ 记忆存储未配置，保存到本地文件")?;
    }
    match publisher.publish(content) {
        Ok(PublishOutcome::Stored) => {
            writeln!(out, "✅ 已同步到记忆存储")?;
            Ok(SyncOutcome::Stored)
        }
        Ok(PublishOutcome::SavedLocally(path)) => {
            writeln!(out, "✅ 已保存到 {}", path.display())?;
            Ok(SyncOutcome::SavedLocally(path))
        }
        Err(e) => {
            tracing::warn!(error = %e, "publish failed");
            writeln!(out, "❌ 同步失败: {e}")?;
            Ok(SyncOutcome::PublishFailed)
        }
    }
}

/// One full pass: fetch, format, print, publish.
pub fn run<W: Write>(
    source: &dyn SnapshotSource,
    formatter: &ReportFormatter,
    publisher: &Publisher,
    out: &mut W,
) -> std::io::Result<SyncOutcome> {
    writeln!(out, "🔄 正在同步待办事项...")?;
    sync_once(source, formatter, publisher, out)
}

/// Builds the pipeline from `config` and runs it, printing any setup error.
pub fn run_with_config<W: Write>(config: &Config, out: &mut W) -> std::io::Result<SyncOutcome> {
    writeln!(out, "🔄 正在同步待办事项...")?;

    let fetcher = match SnapshotFetcher::new(&config.api_base, config.timeout()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            writeln!(out, "获取待办数据失败: {e}")?;
            writeln!(out, "没有待办数据可同步")?;
            return Ok(SyncOutcome::FetchFailed);
        }
    };
    let publisher = match Publisher::from_config(config) {
        Ok(publisher) => publisher,
        Err(e) => {
            writeln!(out, "❌ 同步失败: {e}")?;
            return Ok(SyncOutcome::PublishFailed);
        }
    };
    let formatter = ReportFormatter::new(config.report_title());

    sync_once(&fetcher, &formatter, &publisher, out)
}

fn sync_once<W: Write>(
    source: &dyn SnapshotSource,
    formatter: &ReportFormatter,
    publisher: &Publisher,
    out: &mut W,
) -> std::io::Result<SyncOutcome> {
    let snapshot = fetch_snapshot(source, out)?;

    // Absent only when the fetch failed.
    let content = match formatter.format(snapshot.as_ref()) {
        Some(content) => content,
        None => {
            writeln!(out, "没有待办数据可同步")?;
            return Ok(SyncOutcome::FetchFailed);
        }
    };

    writeln!(out, "{content}")?;
    writeln!(out, "\n{}\n", "=".repeat(50))?;

    publish(publisher, &content, out)
}
