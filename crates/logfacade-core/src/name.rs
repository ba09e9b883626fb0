//! Logger name inference
//!
//! When a caller does not pass a name, the facade names the logger after the
//! code that asked for it. Two mechanisms are offered:
//!
//! - The [`logger!`](crate::logger) macro expands `module_path!()` at the call
//!   site, which yields the exact module path (`my_crate::net::conn`).
//! - The inferring functions (`get_logger`, `LoggerFactory::logger`, ...) are
//!   `#[track_caller]` and derive a module-style name from the caller's source
//!   file (`crates/app/src/net/conn.rs` becomes `app::net::conn`).
//!
//! # Caller-depth contract
//!
//! `Location::caller()` reports the first caller outside an unbroken chain of
//! `#[track_caller]` functions. Every function between a public inferring
//! entry point and [`caller_name`] must therefore carry `#[track_caller]`;
//! adding one untracked layer silently names every logger after that layer.

use std::panic::Location;

/// Name used when the calling context yields nothing usable
pub const UNKNOWN_LOGGER_NAME: &str = "unknown";

/// Directories that root module paths inside a package
const SOURCE_ROOTS: [&str; 4] = ["src", "tests", "examples", "benches"];

/// Files that stand for their parent module rather than a module of their own
const MODULE_ROOT_FILES: [&str; 3] = ["mod", "lib", "main"];

/// Name of the code that called into the current `#[track_caller]` chain
#[track_caller]
pub fn caller_name() -> String {
    name_from_location(Location::caller())
}

/// Module-style name for a source location
pub fn name_from_location(location: &Location<'_>) -> String {
    name_from_path(location.file())
}

/// Module-style name for a source file path
///
/// The last source root directory (`src`, `tests`, ...) splits the path. The
/// directory in front of it names the package: `-` becomes `_` and a
/// `-<version>` suffix, as in registry checkouts, is dropped. What follows
/// it names the module: the `.rs` extension is removed and `mod.rs`,
/// `lib.rs` and `main.rs` collapse into their directory, so a crate root is
/// named after its package alone. Returns [`UNKNOWN_LOGGER_NAME`] when
/// neither part yields anything.
///
/// # Example
///
/// ```
/// use logfacade_core::name::{name_from_path, UNKNOWN_LOGGER_NAME};
///
/// assert_eq!(name_from_path("crates/billing/src/config.rs"), "billing::config");
/// assert_eq!(name_from_path("crates/auth-server/src/lib.rs"), "auth_server");
/// assert_eq!(name_from_path("src/net/mod.rs"), "net");
/// assert_eq!(name_from_path("tests/facade.rs"), "facade");
/// assert_eq!(name_from_path("src/lib.rs"), UNKNOWN_LOGGER_NAME);
/// assert_eq!(name_from_path(""), UNKNOWN_LOGGER_NAME);
/// ```
pub fn name_from_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let segments: Vec<&str> = normalized
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    let root = segments
        .iter()
        .rposition(|segment| SOURCE_ROOTS.contains(segment));
    let (package, mut modules) = match root {
        Some(root) => (
            root.checked_sub(1)
                .and_then(|index| package_name(segments[index])),
            segments[root + 1..].to_vec(),
        ),
        None => (None, segments),
    };

    if let Some(file) = modules.pop() {
        let stem = file.strip_suffix(".rs").unwrap_or(file);
        if !stem.is_empty() && !MODULE_ROOT_FILES.contains(&stem) {
            modules.push(stem);
        }
    }

    let name: Vec<String> = package
        .into_iter()
        .chain(modules.into_iter().map(str::to_string))
        .collect();
    if name.is_empty() {
        UNKNOWN_LOGGER_NAME.to_string()
    } else {
        name.join("::")
    }
}

/// Crate-style name for a package directory, if it looks like one
fn package_name(dir: &str) -> Option<String> {
    let base = dir
        .match_indices('-')
        .map(|(index, _)| index)
        .find(|&index| is_version(&dir[index + 1..]))
        .map_or(dir, |index| &dir[..index]);

    if base.is_empty() || base.starts_with('.') {
        return None;
    }
    Some(base.replace('-', "_"))
}

fn is_version(suffix: &str) -> bool {
    suffix.starts_with(|c: char| c.is_ascii_digit()) && suffix.contains('.')
}

/// Get a logger named after the current module
///
/// `logger!()` returns the default event kind; `logger!(factory)` uses the
/// given event factory. Both go through the process-wide facade.
///
/// # Example
///
/// ```
/// let logger = logfacade_core::logger!();
/// assert_eq!(logger.name(), module_path!());
/// ```
#[macro_export]
macro_rules! logger {
    () => {
        $crate::get_logger_named(module_path!())
    };
    ($factory:expr) => {
        $crate::get_logger_named_with(module_path!(), $factory)
    };
}
