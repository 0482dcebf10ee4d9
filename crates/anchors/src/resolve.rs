//! A value that transitions from pending to resolved exactly once.

use tokio::sync::watch::{channel, Sender};

#[cfg(test)]
mod tests;

/// The state of a [`ResolveOnce`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<T> {
    /// Not yet resolved. May carry a placeholder to serve in the meantime.
    Pending(Option<T>),
    /// Terminal.
    Resolved(T),
}

/// A cell resolved at most once.
///
/// Readers always observe a whole [`Resolution`]: either the pending state
/// with its placeholder, or the resolved value. Once resolved the cell never
/// returns to pending.
#[derive(Debug)]
pub struct ResolveOnce<T>(Sender<Resolution<T>>);

impl<T> Resolution<T> {
    /// The placeholder while pending, or the resolved value.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Pending(placeholder) => placeholder.as_ref(),
            Self::Resolved(value) => Some(value),
        }
    }

    /// Whether this is the terminal state.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl<T: Clone> ResolveOnce<T> {
    /// A pending cell with the given placeholder, if any.
    pub fn new(placeholder: Option<T>) -> Self {
        let (tx, _rx) = channel(Resolution::Pending(placeholder));
        Self(tx)
    }

    /// Resolve the cell to `value`.
    ///
    /// Returns `false` and leaves the cell untouched if it was already resolved.
    pub fn resolve(&self, value: T) -> bool {
        self.0.send_if_modified(|state| match state {
            Resolution::Resolved(_) => false,
            Resolution::Pending(_) => {
                *state = Resolution::Resolved(value);
                true
            }
        })
    }

    /// A snapshot of the current state.
    pub fn get(&self) -> Resolution<T> {
        self.0.borrow().clone()
    }

    /// The placeholder while pending, or the resolved value.
    pub fn value(&self) -> Option<T> {
        self.0.borrow().value().cloned()
    }

    /// Whether the cell has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.0.borrow().is_resolved()
    }

    /// Wait for the cell to resolve and return the resolved value.
    ///
    /// Never completes if the cell is never resolved. Callers that cannot wait
    /// indefinitely should wrap this in a timeout.
    pub async fn resolved(&self) -> T {
        let mut rx = self.0.subscribe();
        let value = match rx.wait_for(Resolution::<T>::is_resolved).await {
            Ok(state) => state.value().cloned(),
            // The sender lives as long as `self`.
            Err(_) => None,
        };
        match value {
            Some(value) => value,
            None => std::future::pending().await,
        }
    }
}
