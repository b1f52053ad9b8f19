/// How much of the solver's progress is reported to a trace sink.
///
/// Levels are cumulative: each one emits everything the previous one does.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Nothing.
    #[default]
    None,
    /// The final solution.
    Low,
    /// The solution after every pivot.
    Medium,
    /// Balanced marginals, potentials and pivots.
    High,
    /// Entering candidates and cycles.
    Full,
}

impl std::str::FromStr for Verbosity {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "0" => Ok(Self::None),
            "low" | "1" => Ok(Self::Low),
            "medium" | "2" => Ok(Self::Medium),
            "high" | "3" => Ok(Self::High),
            "full" | "4" => Ok(Self::Full),
            other => Err(format!("unknown verbosity: {}", other)),
        }
    }
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// Log level that shows the trace at this verbosity.
impl From<Verbosity> for log::LevelFilter {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::None => log::LevelFilter::Warn,
            Verbosity::Low => log::LevelFilter::Info,
            Verbosity::Medium => log::LevelFilter::Debug,
            Verbosity::High => log::LevelFilter::Trace,
            Verbosity::Full => log::LevelFilter::Trace,
        }
    }
}
