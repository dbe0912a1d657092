use std::fmt;

/// Boxed error type returned by module lifecycle callbacks and hook
/// handlers. The manager never interprets these; they flow back to the
/// caller (lifecycle) or to the hook error observer (hooks) as-is.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The lifecycle phase during which a module callback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Install,
    Uninstall,
    Activate,
    Deactivate,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Uninstall => write!(f, "uninstall"),
            Self::Activate => write!(f, "activate"),
            Self::Deactivate => write!(f, "deactivate"),
        }
    }
}

/// Errors that can occur in the module manager.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Registration of a module id that is already present.
    #[error("module '{id}' is already registered")]
    DuplicateModule { id: String },

    /// Operation targets a module id absent from the registry.
    #[error("module '{id}' is not registered")]
    NotRegistered { id: String },

    /// Unregistration blocked because other modules, active or not,
    /// declare the target as a dependency.
    #[error("cannot unregister '{id}': required by {dependents:?}")]
    DependentModulesExist { id: String, dependents: Vec<String> },

    /// Deactivation blocked because currently active modules declare the
    /// target as a dependency.
    #[error("cannot deactivate '{id}': active dependents {dependents:?}")]
    ActiveDependentsExist { id: String, dependents: Vec<String> },

    /// Dependency resolution reached an id that is not in the registry.
    #[error("missing dependency '{id}' (required by '{required_by}')")]
    MissingDependency { id: String, required_by: String },

    /// Dependency resolution found a module that transitively depends on
    /// itself.
    #[error("circular dependency detected at module '{id}'")]
    CircularDependency { id: String },

    /// A module lifecycle callback failed. The module's own error is
    /// preserved unwrapped as the source.
    #[error("module '{id}' failed during {phase}: {source}")]
    Lifecycle {
        id: String,
        phase: LifecyclePhase,
        source: BoxError,
    },
}

impl Error {
    /// The id of the module the error concerns.
    pub fn module_id(&self) -> &str {
        match self {
            Self::DuplicateModule { id }
            | Self::NotRegistered { id }
            | Self::DependentModulesExist { id, .. }
            | Self::ActiveDependentsExist { id, .. }
            | Self::MissingDependency { id, .. }
            | Self::CircularDependency { id }
            | Self::Lifecycle { id, .. } => id,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
