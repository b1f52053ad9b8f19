//! Earth Mover's Distance between weighted signatures.
//!
//! Signatures are weighted point sets over an arbitrary feature space. The
//! distance between two of them is the minimum work needed to move the mass
//! of one onto the other, normalized by the mass actually moved. We solve
//! the underlying transportation problem exactly with a network simplex.
//!
//! ## Modules
//!
//! - [`transport`]: optimal transport traits and the [`Signature`] density
//! - [`simplex`]: the transportation-simplex solver
//! - [`space`]: coordinate feature space with common ground metrics
pub mod simplex;
pub mod space;
pub mod transport;

pub use simplex::*;
pub use space::*;
pub use transport::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Ground distances, transport costs, and dual potentials.
pub type Energy = f64;
/// Signature weights and the flows that move them.
pub type Mass = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// TRANSPORTATION SIMPLEX
// Tolerances are relative: scaled by total mass or by the largest ground distance.
// ============================================================================
/// Relative tolerance for mass balancing and the optimality test.
pub const EMD_EPSILON: Energy = 1e-6;
/// Maximum number of pivots before giving up on convergence.
pub const EMD_ITERATIONS: usize = 500;

// ============================================================================
// RANDOM SIGNATURES
// Shape of the instances produced by `Arbitrary`.
// ============================================================================
/// Largest number of bins in a random signature.
pub const ARBITRARY_BINS: usize = 16;
/// Dimension of the points in a random signature.
pub const ARBITRARY_DIMENSIONS: usize = 2;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at the given level.
/// Location, target, and thread columns are suppressed.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term]).expect("initialize logger");
}

/// Raised once a graceful stop is requested. Solves started with
/// [`Simplex::interrupt`] abandon work at their next pivot.
#[cfg(feature = "cli")]
pub static INTERRUPTED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Register graceful interrupt handlers. Type "Q" + Enter to abandon
/// running solves, or set EMD_DURATION (e.g. "30s", "5m") for a deadline.
#[cfg(feature = "cli")]
pub fn brb() {
    if let Ok(duration) = std::env::var("EMD_DURATION") {
        match parse_duration(&duration) {
            Some(deadline) => {
                log::info!("solves will stop after {}", duration);
                std::thread::spawn(move || {
                    std::thread::sleep(deadline);
                    log::warn!("deadline reached, abandoning solves");
                    INTERRUPTED.store(true, std::sync::atomic::Ordering::Relaxed);
                });
            }
            None => log::warn!("ignoring unparseable EMD_DURATION={}", duration),
        }
    }
    std::thread::spawn(|| {
        loop {
            let ref mut buffer = String::new();
            match std::io::stdin().read_line(buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) if buffer.trim().to_uppercase() == "Q" => {
                    log::warn!("graceful interrupt requested, abandoning solves...");
                    INTERRUPTED.store(true, std::sync::atomic::Ordering::Relaxed);
                    break;
                }
                Ok(_) => continue,
            }
        }
    });
}

/// Parse duration string like "30s", "5m", "2h" into Duration.
#[cfg(feature = "cli")]
fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.len().saturating_sub(1));
    let value: u64 = num.parse().ok()?;
    match unit {
        "s" => Some(std::time::Duration::from_secs(value)),
        "m" => Some(std::time::Duration::from_secs(value * 60)),
        "h" => Some(std::time::Duration::from_secs(value * 3600)),
        _ => None,
    }
}
