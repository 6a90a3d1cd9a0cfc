use curator::{
    ClusterRequest, DraftRequest, HighlightRequest, ShareCardRequest, SummaryRequest,
    produce_clusters, produce_drafts, produce_highlights, produce_share_card, produce_summary,
};

use crate::GlobalArgs;
use crate::io::{print_json, read_json};
use crate::runtime::Runtime;

pub async fn highlights(runtime: &Runtime, global: &GlobalArgs) -> anyhow::Result<()> {
    let request: HighlightRequest = read_json(global)?;
    print_json(&produce_highlights(request, &runtime.backend()).await?)
}

pub async fn clusters(runtime: &Runtime, global: &GlobalArgs) -> anyhow::Result<()> {
    let request: ClusterRequest = read_json(global)?;
    print_json(&produce_clusters(request, &runtime.backend()).await?)
}

pub async fn drafts(runtime: &Runtime, global: &GlobalArgs) -> anyhow::Result<()> {
    let request: DraftRequest = read_json(global)?;
    print_json(&produce_drafts(request, &runtime.backend()).await)
}

pub async fn summary(runtime: &Runtime, global: &GlobalArgs) -> anyhow::Result<()> {
    let request: SummaryRequest = read_json(global)?;
    print_json(&produce_summary(request, &runtime.backend()).await?)
}

pub async fn share_card(runtime: &Runtime, global: &GlobalArgs) -> anyhow::Result<()> {
    let request: ShareCardRequest = read_json(global)?;
    print_json(&produce_share_card(request, &runtime.backend()).await)
}
