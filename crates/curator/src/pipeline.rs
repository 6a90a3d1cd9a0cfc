use curator_transcript::align;
use serde_json::Value;

use crate::backend::Backend;
use crate::error::Result;
use crate::input::{
    ClusterRequest, ClusterTask, DraftRequest, DraftTask, HighlightRequest, HighlightTask,
    ShareCardRequest, ShareCardTask, SummaryRequest, SummaryTask,
};
use crate::types::{
    ClusterRecord, DraftRecord, HighlightRecord, Produced, ShareCard, SummaryRecord,
};
use crate::{fallback, normalize, prompts};

/// One kind of record the pipeline can produce.
///
/// [`run`] drives every task the same way: gate, generate, extract,
/// [`normalize`](Task::normalize), [`ground`](Task::ground). Any failure along
/// the way yields [`fallback`](Task::fallback) instead.
pub trait Task {
    type Record;

    /// Name used in log events.
    const NAME: &'static str;

    fn prompt(&self) -> String;

    /// `None` rejects the block.
    fn normalize(&self, block: &Value) -> Option<Self::Record>;

    fn fallback(&self) -> Self::Record;

    /// Post-process an accepted backend record. Fallback records are built
    /// grounded and skip this step.
    fn ground(&self, record: Self::Record) -> Self::Record {
        record
    }
}

pub async fn run<T: Task>(task: &T, backend: &Backend<'_>) -> Produced<T::Record> {
    let produced = match from_model(task, backend).await {
        Some(record) => Produced::model(record),
        None => Produced::fallback(task.fallback()),
    };

    tracing::info!(task = T::NAME, provenance = %produced.provenance, "task_completed");
    produced
}

async fn from_model<T: Task>(task: &T, backend: &Backend<'_>) -> Option<T::Record> {
    if !backend.gate.model_access_allowed(backend.context) {
        tracing::debug!(task = T::NAME, "model_access_denied");
        return None;
    }

    let text = generate(backend, &task.prompt(), T::NAME).await?;

    let block = match curator_json_block::extract(&text) {
        Ok(block) => block,
        Err(err) => {
            tracing::warn!(task = T::NAME, error = %err, "block_extract_failed");
            return None;
        }
    };

    let Some(record) = task.normalize(&block) else {
        tracing::warn!(task = T::NAME, "record_rejected");
        return None;
    };

    Some(task.ground(record))
}

async fn generate(backend: &Backend<'_>, prompt: &str, task: &'static str) -> Option<String> {
    let call = backend.generator.generate(prompt);

    let result = match backend.timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(task, timeout_ms = limit.as_millis() as u64, "generate_timed_out");
                return None;
            }
        },
        None => call.await,
    };

    match result {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!(task, error = %err, "generate_failed");
            None
        }
    }
}

// ── Tasks ─────────────────────────────────────────────────────────────────────

impl Task for HighlightTask {
    type Record = HighlightRecord;
    const NAME: &'static str = "highlights";

    fn prompt(&self) -> String {
        prompts::highlights(&self.transcript, self.max_highlights)
    }

    fn normalize(&self, block: &Value) -> Option<HighlightRecord> {
        normalize::highlights(block, self)
    }

    fn fallback(&self) -> HighlightRecord {
        fallback::highlights(self)
    }

    /// Re-time every quote against the task's segments; the i-th highlight
    /// falls back to the i-th segment.
    fn ground(&self, mut record: HighlightRecord) -> HighlightRecord {
        for (index, highlight) in record.highlights.iter_mut().enumerate() {
            let range = align(&self.segments, &highlight.quote, index);
            highlight.start_sec = range.start_sec;
            highlight.end_sec = range.end_sec;
        }
        record
    }
}

impl Task for ClusterTask {
    type Record = ClusterRecord;
    const NAME: &'static str = "clusters";

    fn prompt(&self) -> String {
        prompts::clusters(&self.comments, self.cluster_k)
    }

    fn normalize(&self, block: &Value) -> Option<ClusterRecord> {
        normalize::clusters(block, self)
    }

    fn fallback(&self) -> ClusterRecord {
        fallback::clusters(self)
    }
}

impl Task for DraftTask {
    type Record = DraftRecord;
    const NAME: &'static str = "drafts";

    fn prompt(&self) -> String {
        prompts::drafts(&self.target_cluster, &self.tone, &self.constraints, &self.evidence)
    }

    fn normalize(&self, block: &Value) -> Option<DraftRecord> {
        normalize::drafts(block, self)
    }

    fn fallback(&self) -> DraftRecord {
        fallback::drafts(self)
    }
}

impl Task for SummaryTask {
    type Record = SummaryRecord;
    const NAME: &'static str = "summary";

    fn prompt(&self) -> String {
        prompts::summary(&self.post, &self.comments, self.mode)
    }

    fn normalize(&self, block: &Value) -> Option<SummaryRecord> {
        normalize::summary(block, self)
    }

    fn fallback(&self) -> SummaryRecord {
        fallback::summary(self)
    }
}

impl Task for ShareCardTask {
    type Record = ShareCard;
    const NAME: &'static str = "share_card";

    fn prompt(&self) -> String {
        prompts::share_card(&self.episode_title, &self.highlights, &self.tone)
    }

    fn normalize(&self, block: &Value) -> Option<ShareCard> {
        normalize::share_card(block, self)
    }

    fn fallback(&self) -> ShareCard {
        fallback::share_card(self)
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

pub async fn produce_highlights(
    request: HighlightRequest,
    backend: &Backend<'_>,
) -> Result<Produced<HighlightRecord>> {
    let task = HighlightTask::new(request)?;
    Ok(run(&task, backend).await)
}

pub async fn produce_clusters(
    request: ClusterRequest,
    backend: &Backend<'_>,
) -> Result<Produced<ClusterRecord>> {
    let task = ClusterTask::new(request)?;
    Ok(run(&task, backend).await)
}

pub async fn produce_drafts(request: DraftRequest, backend: &Backend<'_>) -> Produced<DraftRecord> {
    run(&DraftTask::from(request), backend).await
}

pub async fn produce_summary(
    request: SummaryRequest,
    backend: &Backend<'_>,
) -> Result<Produced<SummaryRecord>> {
    let task = SummaryTask::new(request)?;
    Ok(run(&task, backend).await)
}

pub async fn produce_share_card(
    request: ShareCardRequest,
    backend: &Backend<'_>,
) -> Produced<ShareCard> {
    run(&ShareCardTask::from(request), backend).await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::Segment;
    use crate::backend::{
        AllowAll, BoxFuture, DenyAll, GenerateError, RequestContext, TextGenerator,
    };
    use crate::input::CommentInput;
    use crate::types::{Highlight, Provenance};

    /// Replies with a fixed text (or error) and counts calls.
    struct Scripted {
        reply: std::result::Result<&'static str, &'static str>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn ok(reply: &'static str) -> Self {
            Self {
                reply: Ok(reply),
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn err(message: &'static str) -> Self {
            Self {
                reply: Err(message),
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TextGenerator for Scripted {
        fn generate<'a>(
            &'a self,
            _prompt: &'a str,
        ) -> BoxFuture<'a, std::result::Result<String, GenerateError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }
                self.reply.map(str::to_string).map_err(GenerateError::from)
            })
        }
    }

    fn transcript() -> HighlightRequest {
        HighlightRequest {
            transcript: "我们先对齐目标。再讨论执行路径。".into(),
            max_highlights: Some(2),
            segments: None,
        }
    }

    fn comments() -> ClusterRequest {
        ClusterRequest {
            comments: ["深度更好", "效率更好", "两者平衡", "平台决定形态"]
                .into_iter()
                .map(|t| CommentInput::Text(t.into()))
                .collect(),
            cluster_k: Some(2),
        }
    }

    #[tokio::test]
    async fn denied_gate_never_calls_generator() {
        let generator = Scripted::ok(r#"[{"quote":"再讨论执行路径"}]"#);
        let context = RequestContext::new();
        let backend = Backend::new(&generator, &DenyAll, &context);

        let produced = produce_highlights(transcript(), &backend).await.unwrap();
        assert!(produced.is_fallback());
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn model_quotes_are_regrounded() {
        let generator = Scripted::ok(
            "好的，结果如下：\n```json\n[{\"quote\":\"再讨论执行路径\",\"reason\":\"行动导向\",\"score\":91,\"startSec\":500}]\n```",
        );
        let context = RequestContext::new();
        let backend = Backend::new(&generator, &AllowAll, &context);

        let produced = produce_highlights(transcript(), &backend).await.unwrap();
        assert_eq!(produced.provenance, Provenance::Model);
        let highlight = &produced.record.highlights[0];
        assert_eq!((highlight.start_sec, highlight.end_sec), (10, 19));
        assert_eq!(highlight.score, 91);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn grounded_highlight_round_trips() {
        let expected = HighlightRecord {
            highlights: vec![Highlight {
                start_sec: 12,
                end_sec: 27,
                quote: "再讨论执行路径".into(),
                reason: "行动导向".into(),
                score: 88,
            }],
        };
        let generator = Scripted::ok(
            r#"{"highlights":[{"startSec":12,"endSec":27,"quote":"再讨论执行路径","reason":"行动导向","score":88}]}"#,
        );
        let context = RequestContext::new();
        let backend = Backend::new(&generator, &AllowAll, &context);

        let request = HighlightRequest {
            segments: Some(vec![
                Segment::new(0, 11, "我们先对齐目标"),
                Segment::new(12, 27, "再讨论执行路径"),
            ]),
            ..transcript()
        };
        let produced = produce_highlights(request, &backend).await.unwrap();

        assert_eq!(produced.provenance, Provenance::Model);
        assert_eq!(produced.record, expected);
    }

    #[tokio::test]
    async fn generator_failure_falls_back() {
        let generator = Scripted::err("rate limited");
        let context = RequestContext::new();
        let backend = Backend::new(&generator, &AllowAll, &context);

        let produced = produce_clusters(comments(), &backend).await.unwrap();
        assert!(produced.is_fallback());
        assert_eq!(produced.record.clusters.len(), 2);
    }

    #[tokio::test]
    async fn unparseable_and_rejected_output_fall_back() {
        let context = RequestContext::new();

        let prose = Scripted::ok("抱歉，我无法完成这个请求。");
        let backend = Backend::new(&prose, &AllowAll, &context);
        assert!(produce_drafts(DraftRequest::default(), &backend).await.is_fallback());

        let empty = Scripted::ok(r#"{"drafts": []}"#);
        let backend = Backend::new(&empty, &AllowAll, &context);
        let produced = produce_drafts(DraftRequest::default(), &backend).await;
        assert!(produced.is_fallback());
        assert_eq!(produced.record.drafts.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_generator_times_out() {
        let generator = Scripted {
            delay: Some(Duration::from_secs(60)),
            ..Scripted::ok(r#"{"headline":"h","summary":"s","commentDrafts":["a"]}"#)
        };
        let context = RequestContext::new();
        let backend =
            Backend::new(&generator, &AllowAll, &context).with_timeout(Duration::from_secs(5));

        let produced = produce_share_card(ShareCardRequest::default(), &backend).await;
        assert!(produced.is_fallback());
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn input_errors_propagate() {
        let generator = Scripted::ok("{}");
        let context = RequestContext::new();
        let backend = Backend::new(&generator, &AllowAll, &context);

        let err = produce_summary(SummaryRequest::default(), &backend).await.unwrap_err();
        assert_eq!(err, crate::Error::EmptyPost);
        assert_eq!(generator.calls(), 0);
    }
}
