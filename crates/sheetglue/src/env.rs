//! Environment probe: development checkout or installed build
//!
//! The probe looks at the path of the running module. When the component
//! `depth` places from the end equals the marker (by default the `target`
//! in `<checkout>/target/debug/<binary>`), the module runs from a
//! development checkout. Detection happens once, in [`init`], and the
//! result is readable process-wide afterwards.

use once_cell::sync::OnceCell;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Component name that marks a development checkout
pub const DEFAULT_MARKER: &str = "target";

/// Position of the marker, counted from the end of the path
pub const DEFAULT_DEPTH: usize = 3;

/// Environment variable overriding [`ProbeOptions::marker`]
pub const MARKER_ENV: &str = "SHEETGLUE_DEV_MARKER";

static ENVIRONMENT: OnceCell<Environment> = OnceCell::new();

/// Options for the environment probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Path component that identifies a development checkout
    pub marker: String,
    /// Which component to compare, counted from the end (1 = last)
    pub depth: usize,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            depth: DEFAULT_DEPTH,
        }
    }
}

impl ProbeOptions {
    /// Defaults, with the marker taken from `SHEETGLUE_DEV_MARKER` if set
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Some(marker) = std::env::var_os(MARKER_ENV) {
            if !marker.is_empty() {
                options.marker = marker.to_string_lossy().into_owned();
            }
        }
        options
    }

    /// Replace the marker
    pub fn with_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.marker = marker.into();
        self
    }

    /// Replace the depth
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

/// The named components of a path (root, prefixes and `.` are skipped)
pub fn path_segments(path: &Path) -> Vec<&OsStr> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s),
            _ => None,
        })
        .collect()
}

/// Whether `path` looks like a module inside a development checkout
pub fn is_dev_path(path: &Path, options: &ProbeOptions) -> bool {
    if options.depth == 0 {
        return false;
    }

    let segments = path_segments(path);
    segments
        .len()
        .checked_sub(options.depth)
        .and_then(|i| segments.get(i))
        .is_some_and(|s| *s == OsStr::new(&options.marker))
}

/// Absolute path of the running module, if it can be determined
pub fn locate_module() -> Option<PathBuf> {
    match std::env::current_exe() {
        Ok(exe) => Some(exe.canonicalize().unwrap_or(exe)),
        Err(e) => {
            tracing::debug!("cannot locate running module: {e}");
            None
        }
    }
}

/// Result of the environment probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    dev_checkout: bool,
    module_path: Option<PathBuf>,
    program_name: Option<String>,
}

impl Environment {
    /// Probe the running process
    ///
    /// On a development checkout the program name is taken from the first
    /// command-line argument.
    pub fn detect(options: &ProbeOptions, module_path: Option<PathBuf>) -> Self {
        let argv0 = std::env::args_os()
            .next()
            .map(|a| a.to_string_lossy().into_owned());
        Self::classify(options, module_path, argv0)
    }

    /// Classify an explicit module path and argv[0]
    ///
    /// An unknown module path classifies as an installed build.
    pub fn classify(
        options: &ProbeOptions,
        module_path: Option<PathBuf>,
        argv0: Option<String>,
    ) -> Self {
        let dev_checkout = module_path
            .as_deref()
            .is_some_and(|p| is_dev_path(p, options));

        let program_name = if dev_checkout { argv0 } else { None };

        tracing::debug!(
            dev_checkout,
            module = ?module_path,
            marker = %options.marker,
            "environment probed"
        );

        Self {
            dev_checkout,
            module_path,
            program_name,
        }
    }

    /// Whether the module runs from a development checkout
    pub fn dev_checkout(&self) -> bool {
        self.dev_checkout
    }

    /// Path the classification was based on
    pub fn module_path(&self) -> Option<&Path> {
        self.module_path.as_deref()
    }

    /// Program name set by the probe, if it corrected one
    pub fn program_name(&self) -> Option<&str> {
        self.program_name.as_deref()
    }
}

/// Probe the running module once and store the result
///
/// Later calls return the stored environment unchanged, whatever options
/// they pass.
pub fn init(options: &ProbeOptions) -> &'static Environment {
    ENVIRONMENT.get_or_init(|| Environment::detect(options, locate_module()))
}

/// Like [`init`], classifying `module_path` instead of the running executable
///
/// Hosts that load this code as a plugin pass the plugin's own path here.
pub fn init_with_path(
    options: &ProbeOptions,
    module_path: Option<PathBuf>,
) -> &'static Environment {
    ENVIRONMENT.get_or_init(|| Environment::detect(options, module_path))
}

/// Store an already classified environment
///
/// Hosts that know their own argv[0] (an embedding interpreter, say) build
/// the [`Environment`] with [`Environment::classify`] and install it here.
/// Like [`init`], only the first call has an effect.
pub fn install(environment: Environment) -> &'static Environment {
    ENVIRONMENT.get_or_init(|| environment)
}

/// The stored environment, probing with [`ProbeOptions::from_env`] if
/// nothing has called [`init`] yet
pub fn environment() -> &'static Environment {
    ENVIRONMENT.get_or_init(|| Environment::detect(&ProbeOptions::from_env(), locate_module()))
}

/// Whether the process runs from a development checkout
pub fn is_dev_checkout() -> bool {
    environment().dev_checkout()
}

/// The reported program name
///
/// The name corrected by the probe when there is one, otherwise the file
/// stem of the running executable.
pub fn program_name() -> String {
    if let Some(name) = environment().program_name() {
        return name.to_string();
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| {
            exe.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_path() {
        let options = ProbeOptions::default();
        assert!(is_dev_path(
            Path::new("/home/dev/sheetglue/target/debug/sheetglue"),
            &options
        ));
        assert!(is_dev_path(Path::new("target/release/app"), &options));
    }

    #[test]
    fn test_installed_paths() {
        let options = ProbeOptions::default();
        assert!(!is_dev_path(Path::new("/usr/bin/sheetglue"), &options));
        assert!(!is_dev_path(Path::new("/usr/local/target/bin"), &options));
        assert!(!is_dev_path(Path::new("/a/b"), &options));
        assert!(!is_dev_path(Path::new(""), &options));
    }

    #[test]
    fn test_custom_marker_and_depth() {
        let options = ProbeOptions::default().with_marker("introspection");
        assert!(is_dev_path(
            Path::new("/src/gnm/introspection/gi/overrides"),
            &options
        ));

        let options = options.with_depth(1);
        assert!(is_dev_path(Path::new("/x/introspection"), &options));
        assert!(!is_dev_path(Path::new("/x/introspection"), &options.with_depth(0)));
    }

    #[test]
    fn test_classify_sets_program_name_only_in_checkout() {
        let options = ProbeOptions::default();

        let env = Environment::classify(
            &options,
            Some(PathBuf::from("/w/proj/target/debug/tool")),
            Some("./target/debug/tool".into()),
        );
        assert!(env.dev_checkout());
        assert_eq!(env.program_name(), Some("./target/debug/tool"));

        let env = Environment::classify(
            &options,
            Some(PathBuf::from("/usr/bin/tool")),
            Some("tool".into()),
        );
        assert!(!env.dev_checkout());
        assert_eq!(env.program_name(), None);
    }

    #[test]
    fn test_unknown_location_is_not_dev() {
        let env = Environment::classify(&ProbeOptions::default(), None, Some("x".into()));
        assert!(!env.dev_checkout());
        assert_eq!(env.module_path(), None);
        assert_eq!(env.program_name(), None);
    }
}
