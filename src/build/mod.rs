use anyhow::Result;

use crate::config::{BuildConfig, PROJECT_NAME_PLACEHOLDER};

pub mod revision;
pub mod sphinx;

use revision::RevisionLookup;
use sphinx::{DocBuilder, SphinxJob};

/// Main build orchestrator: stamp the build identifier into the template
/// arguments, then hand the assembled job to the documentation builder.
pub fn run(
    config: &BuildConfig,
    revision: &dyn RevisionLookup,
    builder: &dyn DocBuilder,
) -> Result<()> {
    if config.project_name == PROJECT_NAME_PLACEHOLDER {
        anyhow::bail!("Please edit src/config.rs and give your project a name");
    }

    let describe = revision.describe()?;
    let build_info = revision::build_info(&describe);

    let job = SphinxJob {
        source_dir: config.source_dir.clone(),
        conf_dir: config.conf_dir.clone(),
        doctree_dir: config.doctree_dir.clone(),
        out_dir: config.out_dir.clone(),
        template_args: config.template_args(build_info),
        force_all: config.force_all,
        fresh_env: config.fresh_env,
    };

    println!("Building into {}", job.out_dir.display());
    builder.build(&job)?;

    Ok(())
}
