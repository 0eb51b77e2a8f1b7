use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// One fully assembled invocation of the documentation builder.
#[derive(Debug, Clone)]
pub struct SphinxJob {
    pub source_dir: PathBuf,
    pub conf_dir: PathBuf,
    pub doctree_dir: PathBuf,
    pub out_dir: PathBuf,
    pub template_args: BTreeMap<String, String>,
    pub force_all: bool,
    pub fresh_env: bool,
}

impl SphinxJob {
    /// Command-line arguments for `sphinx-build`. Template args go through
    /// `-A key=value`; `-a` writes all output files and `-E` discards the
    /// saved environment.
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-b".into(), "html".into()];
        args.push("-d".into());
        args.push(self.doctree_dir.clone().into());
        args.push("-c".into());
        args.push(self.conf_dir.clone().into());
        if self.force_all {
            args.push("-a".into());
        }
        if self.fresh_env {
            args.push("-E".into());
        }
        for (key, value) in &self.template_args {
            args.push("-A".into());
            args.push(format!("{key}={value}").into());
        }
        args.push(self.source_dir.clone().into());
        args.push(self.out_dir.clone().into());
        args
    }
}

/// The external documentation builder, injected so the build orchestrator
/// can be tested without spawning processes.
pub trait DocBuilder {
    fn build(&self, job: &SphinxJob) -> Result<()>;
}

/// Runs the real `sphinx-build` binary.
#[derive(Debug, Default)]
pub struct SphinxBuilder;

impl DocBuilder for SphinxBuilder {
    fn build(&self, job: &SphinxJob) -> Result<()> {
        let status = Command::new("sphinx-build")
            .args(job.to_args())
            .status()
            .context("Failed to run sphinx-build")?;

        if !status.success() {
            anyhow::bail!("sphinx-build failed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> SphinxJob {
        SphinxJob {
            source_dir: PathBuf::from("source"),
            conf_dir: PathBuf::from("source"),
            doctree_dir: PathBuf::from("source/doctrees"),
            out_dir: PathBuf::from("../static/overview"),
            template_args: BTreeMap::from([(
                "course_id".to_string(),
                "overview".to_string(),
            )]),
            force_all: false,
            fresh_env: false,
        }
    }

    #[test]
    fn test_args_incremental_build() {
        let args = job().to_args();

        assert!(!args.contains(&OsString::from("-a")));
        assert!(!args.contains(&OsString::from("-E")));
        // html builder, then source and output dirs last
        assert_eq!(&args[..2], &[OsString::from("-b"), OsString::from("html")]);
        assert_eq!(args[args.len() - 2], OsString::from("source"));
        assert_eq!(args[args.len() - 1], OsString::from("../static/overview"));
    }

    #[test]
    fn test_args_full_rebuild() {
        let mut job = job();
        job.force_all = true;
        job.fresh_env = true;
        let args = job.to_args();

        assert!(args.contains(&OsString::from("-a")));
        assert!(args.contains(&OsString::from("-E")));
    }

    #[test]
    fn test_args_encode_template_args() {
        let mut job = job();
        job.template_args
            .insert("build_info".to_string(), "v1.2.0".to_string());
        let args = job.to_args();

        let pos = args
            .iter()
            .position(|a| a == &OsString::from("build_info=v1.2.0"))
            .unwrap();
        assert_eq!(args[pos - 1], OsString::from("-A"));
    }
}
