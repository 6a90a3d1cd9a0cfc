use curator_eval::{CommunityRun, PodcastRun};

use crate::GlobalArgs;
use crate::io::{print_json, read_json};

pub fn podcast(global: &GlobalArgs) -> anyhow::Result<()> {
    let run: PodcastRun = read_json(global)?;
    print_json(&run.evaluate())
}

pub fn community(global: &GlobalArgs) -> anyhow::Result<()> {
    let run: CommunityRun = read_json(global)?;
    print_json(&run.evaluate())
}
