use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The course this deployment builds. Edit this before the first build.
pub const PROJECT_NAME: &str = "overview";

/// Sentinel left in freshly cloned course templates.
pub const PROJECT_NAME_PLACEHOLDER: &str = "<project_name>";

pub const DEFAULT_MASTER_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_MASTER_APP: &str = "runestone";

/// Optional per-deployment override file, looked up in the document root.
pub const OVERRIDES_FILE: &str = "courseconfig.toml";

/// Values a deployment may pin in courseconfig.toml. All three fields are
/// required: a file that defines only some of them contributes nothing,
/// the same as no file at all.
#[derive(Debug, PartialEq, Deserialize)]
pub struct Overrides {
    pub master_url: String,
    pub master_app: String,
    pub minify_js: bool,
}

/// Load the override file. Callers substitute the defaults on any error;
/// a missing file is the normal case for local development.
pub fn load_overrides(path: &Path) -> Result<Overrides> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Fully resolved configuration for one build invocation.
#[derive(Debug)]
pub struct BuildConfig {
    pub project_name: String,
    pub source_dir: PathBuf,
    pub conf_dir: PathBuf,
    pub doctree_dir: PathBuf,
    pub out_dir: PathBuf,
    pub master_url: String,
    pub master_app: String,
    pub minify_js: bool,
    pub force_all: bool,
    pub fresh_env: bool,
}

impl BuildConfig {
    /// Assemble the configuration for a document root: hardcoded defaults,
    /// with whatever courseconfig.toml pins layered on top.
    pub fn resolve(docroot: &Path) -> Self {
        let overrides = load_overrides(&docroot.join(OVERRIDES_FILE)).ok();
        Self::with_overrides(docroot, overrides)
    }

    fn with_overrides(docroot: &Path, overrides: Option<Overrides>) -> Self {
        let (master_url, master_app, minify_js) = match overrides {
            Some(o) => (o.master_url, o.master_app, o.minify_js),
            None => (
                DEFAULT_MASTER_URL.to_string(),
                DEFAULT_MASTER_APP.to_string(),
                false,
            ),
        };

        let source_dir = docroot.join("source");
        BuildConfig {
            project_name: PROJECT_NAME.to_string(),
            conf_dir: source_dir.clone(),
            doctree_dir: source_dir.join("doctrees"),
            source_dir,
            out_dir: docroot.join("..").join("static").join(PROJECT_NAME),
            master_url,
            master_app,
            minify_js,
            force_all: false,
            fresh_env: false,
        }
    }

    /// The rebuild-everything flag maps to both builder directives: write
    /// every output file and discard the saved environment.
    pub fn request_full_rebuild(&mut self) {
        self.force_all = true;
        self.fresh_env = true;
    }

    /// Template arguments handed to the Sphinx HTML builder via `-A`.
    pub fn template_args(&self, build_info: &str) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("course_id".to_string(), self.project_name.clone()),
            ("login_required".to_string(), "false".to_string()),
            ("appname".to_string(), self.master_app.clone()),
            ("loglevel".to_string(), "10".to_string()),
            ("course_url".to_string(), self.master_url.clone()),
            ("minify_js".to_string(), self.minify_js.to_string()),
            ("build_info".to_string(), build_info.to_string()),
        ])
    }
}
