//! Core identifier types, configuration, and error taxonomy for aac.
//!
//! Every other crate in the workspace builds on three things defined here:
//!
//! - [`ID`] — compile-time-typed UUID v7 identifiers for domain entities
//! - [`Settings`] — explicit immutable configuration, built once at startup
//!   and injected into each component (never read from ambient state)
//! - [`Fault`] — the rejection taxonomy every handler surfaces to clients

mod fault;
mod settings;

pub use fault::*;
pub use settings::*;

use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
/// An `ID<Account>` can never be passed where an `ID<Character>` is expected.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
}

impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}
impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::from(uuid::Uuid::now_v7())
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

/// Seconds since the Unix epoch, as transmitted in every timestamp field.
pub fn epoch_secs(time: std::time::SystemTime) -> i64 {
    time.duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Current wall-clock time in seconds since the Unix epoch.
pub fn now_secs() -> i64 {
    epoch_secs(std::time::SystemTime::now())
}

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", now_secs())).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Apple;
    struct Orange;

    #[test]
    fn ids_are_distinct_by_default() {
        assert_ne!(ID::<Apple>::default(), ID::<Apple>::default());
    }
    #[test]
    fn ids_roundtrip_through_uuid() {
        let id = ID::<Apple>::default();
        assert_eq!(id, ID::from(uuid::Uuid::from(id)));
    }
    #[test]
    fn ids_of_different_entities_do_not_unify() {
        // would not compile: ID::<Apple>::default() == ID::<Orange>::default()
        let _ = ID::<Orange>::default();
    }
    #[test]
    fn epoch_of_unix_origin_is_zero() {
        assert_eq!(epoch_secs(std::time::UNIX_EPOCH), 0);
    }
}
