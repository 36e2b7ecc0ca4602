use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use foldhash::{HashMap, HashMapExt};

use crate::{MessageSink, PrintOptions, SessionBuilder, TimingSession};

/// Named timing sessions, created on first use.
///
/// Gives independent logical flows (e.g. the requests handled by a server) their own
/// session without passing session objects around: each flow refers to its session by key.
///
/// The registry is a plain map driven through `&mut self`. It does not synchronize access;
/// wrap it in a lock if several threads need it.
///
/// # Examples
///
/// ```
/// use stepwatch::{InstanceRegistry, MemorySink};
///
/// let sink = MemorySink::new();
/// let mut registry = InstanceRegistry::with_sink(sink.clone());
///
/// registry.start_instance("request-1");
/// registry.get_instance("request-1").step_named("parsed");
/// registry.get_instance("request-1").step_named("handled");
///
/// // Stops the session, prints its report and removes it from the registry.
/// let finished = registry.stop_instance("request-1", true);
///
/// assert!(finished.is_finalized());
/// assert!(registry.is_empty());
/// assert_eq!(sink.messages().len(), 1);
/// ```
pub struct InstanceRegistry<K> {
    instances: HashMap<K, TimingSession>,
    template: SessionBuilder,
}

impl<K> InstanceRegistry<K>
where
    K: Hash + Eq,
{
    /// Creates an empty registry whose sessions use default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_builder(TimingSession::builder())
    }

    /// Creates an empty registry whose sessions report to the given sink.
    #[must_use]
    pub fn with_sink(sink: impl MessageSink + 'static) -> Self {
        Self::with_builder(TimingSession::builder().sink(sink))
    }

    /// Creates an empty registry whose sessions are built from a clone of `builder`.
    #[must_use]
    pub fn with_builder(builder: SessionBuilder) -> Self {
        Self {
            instances: HashMap::new(),
            template: builder,
        }
    }

    /// Returns the session registered under `key`, creating an empty one if there is none.
    pub fn get_instance(&mut self, key: K) -> &mut TimingSession {
        self.instances
            .entry(key)
            .or_insert_with(|| self.template.clone().build())
    }

    /// Same as [`get_instance()`](Self::get_instance).
    pub fn new_instance(&mut self, key: K) -> &mut TimingSession {
        self.get_instance(key)
    }

    /// Starts or resumes the session registered under `key`.
    ///
    /// A paused session is unpaused. Any other session (including a newly created one)
    /// is restarted and named after the key, discarding previously recorded steps.
    pub fn start_instance(&mut self, key: K) -> &mut TimingSession
    where
        K: Display,
    {
        let name = key.to_string();
        let session = self.get_instance(key);

        if session.is_paused() {
            session.unpause()
        } else {
            session.start_named(name)
        }
    }

    /// Stops the session registered under `key`, creating an empty one if there is none.
    ///
    /// If `finalize` is true, the session records its final step, prints its report to
    /// its sink and is removed from the registry; ownership passes to the caller. Otherwise
    /// the session is only paused and stays registered, ready for
    /// [`start_instance()`](Self::start_instance) to resume it.
    pub fn stop_instance(&mut self, key: K, finalize: bool) -> StoppedInstance<'_> {
        if !finalize {
            return StoppedInstance::Paused(self.get_instance(key).pause());
        }

        let mut session = self
            .instances
            .remove(&key)
            .unwrap_or_else(|| self.template.clone().build());

        session.stop().print(PrintOptions::new());

        StoppedInstance::Finalized(session)
    }

    /// Drops every registered session without stopping or reporting it.
    pub fn clean_instances(&mut self) {
        self.instances.clear();
    }

    /// Whether a session is registered under `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.instances.contains_key(key)
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no session is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Keys of all registered sessions, in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.instances.keys()
    }
}

impl<K> Default for InstanceRegistry<K>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Debug for InstanceRegistry<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceRegistry")
            .field("instances", &self.instances)
            .finish_non_exhaustive()
    }
}

/// Outcome of [`InstanceRegistry::stop_instance()`].
#[derive(Debug)]
#[non_exhaustive]
pub enum StoppedInstance<'a> {
    /// The session was stopped, reported and removed from the registry.
    Finalized(TimingSession),

    /// The session was paused and is still registered.
    Paused(&'a mut TimingSession),
}

impl StoppedInstance<'_> {
    /// The stopped session.
    #[must_use]
    pub fn session(&self) -> &TimingSession {
        match self {
            Self::Finalized(session) => session,
            Self::Paused(session) => session,
        }
    }

    /// Whether the session was removed from the registry.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        matches!(self, Self::Finalized(_))
    }

    /// Takes ownership of a finalized session. Returns `None` for a paused one.
    #[must_use]
    pub fn into_finalized(self) -> Option<TimingSession> {
        match self {
            Self::Finalized(session) => Some(session),
            Self::Paused(_) => None,
        }
    }
}
