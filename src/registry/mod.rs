//! Directory of interactive test sessions.
//!
//! The registry owns every session created during a shell run and tracks
//! which one is current. It is an ordinary value: the shell context holds
//! one, and tests build their own, so isolation is a matter of calling
//! [`TestRegistry::reset`] or constructing a fresh registry.

use tracing::debug;

use crate::error::RegistryError;
use crate::session::InteractiveTestSession;


/// Sessions keyed by name, in creation order, with a current-test pointer.
#[derive(Debug, Clone, Default)]
pub struct TestRegistry {
    sessions: Vec<InteractiveTestSession>,
    current: Option<String>,
}

impl TestRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sessions: Vec::new(),
            current: None,
        }
    }

    /// Creates a session, replacing any session with the same name, and
    /// makes it current.
    ///
    /// A replaced session keeps its position in [`list_tests`](Self::list_tests).
    #[expect(
        clippy::indexing_slicing,
        reason = "index comes from position() or push() on the same vector"
    )]
    pub fn create_test(
        &mut self,
        name: &str,
        target_class: Option<&str>,
    ) -> &mut InteractiveTestSession {
        let session = InteractiveTestSession::new(name, target_class);
        self.current = Some(String::from(name));
        if let Some(index) = self.position(name) {
            debug!(test = name, "replacing existing test");
            self.sessions[index] = session;
            return &mut self.sessions[index];
        }

        debug!(test = name, target = session.target_class(), "test created");
        self.sessions.push(session);
        let last = self.sessions.len() - 1;
        &mut self.sessions[last]
    }

    /// Looks a session up by name without creating one.
    #[must_use]
    pub fn get_test(&self, name: &str) -> Option<&InteractiveTestSession> {
        self.sessions.iter().find(|session| session.name() == name)
    }

    /// Looks a session up by name for mutation.
    pub fn get_test_mut(&mut self, name: &str) -> Option<&mut InteractiveTestSession> {
        self.sessions
            .iter_mut()
            .find(|session| session.name() == name)
    }

    /// The current session, if one exists.
    #[must_use]
    pub fn current_test(&self) -> Option<&InteractiveTestSession> {
        self.current.as_deref().and_then(|name| self.get_test(name))
    }

    /// The current session for mutation, if one exists.
    pub fn current_test_mut(&mut self) -> Option<&mut InteractiveTestSession> {
        let name = self.current.clone()?;
        self.get_test_mut(&name)
    }

    /// The current session, or an error naming the missing precondition.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoCurrentTest`] when no test is current.
    pub fn require_current_test(&self) -> Result<&InteractiveTestSession, RegistryError> {
        self.current_test().ok_or(RegistryError::NoCurrentTest)
    }

    /// The current session for mutation, or an error.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoCurrentTest`] when no test is current.
    pub fn require_current_test_mut(
        &mut self,
    ) -> Result<&mut InteractiveTestSession, RegistryError> {
        self.current_test_mut().ok_or(RegistryError::NoCurrentTest)
    }

    /// Makes an existing session current.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownTest`] if no session has that name.
    pub fn set_current_test(&mut self, name: &str) -> Result<(), RegistryError> {
        if self.position(name).is_none() {
            return Err(RegistryError::UnknownTest {
                name: String::from(name),
            });
        }
        self.current = Some(String::from(name));
        Ok(())
    }

    /// Iterates sessions in creation order.
    ///
    /// The iterator is lazy and clonable; calling this again restarts from
    /// the first session.
    pub fn list_tests(&self) -> std::slice::Iter<'_, InteractiveTestSession> {
        self.sessions.iter()
    }

    /// Number of sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Discards every session and clears the current pointer.
    pub fn reset(&mut self) {
        debug!(discarded = self.sessions.len(), "test registry reset");
        self.sessions.clear();
        self.current = None;
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sessions
            .iter()
            .position(|session| session.name() == name)
    }
}
