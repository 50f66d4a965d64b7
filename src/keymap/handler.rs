//! Binding handlers: callbacks invoked in place, or payloads handed to a
//! dispatch callback

use std::fmt;
use std::rc::Rc;

use super::event::KeyEvent;

/// A handler invoked directly with the triggering event
pub type Callback = Rc<dyn Fn(&KeyEvent)>;

/// Receives dispatchable payloads together with the triggering event
pub type DispatchCallback<P> = Rc<dyn Fn(&P, &KeyEvent)>;

/// What a binding does when its combination is pressed
pub enum Handler<P> {
    /// Called with the event; responsible for anything it wants to suppress
    Invocable(Callback),
    /// Forwarded with the event to the configured dispatch callback
    Dispatchable(P),
}

impl<P> Handler<P> {
    pub fn invocable(f: impl Fn(&KeyEvent) + 'static) -> Self {
        Handler::Invocable(Rc::new(f))
    }

    pub fn dispatchable(payload: P) -> Self {
        Handler::Dispatchable(payload)
    }

    /// The payload of a dispatchable handler
    pub fn payload(&self) -> Option<&P> {
        match self {
            Handler::Dispatchable(payload) => Some(payload),
            Handler::Invocable(_) => None,
        }
    }

    pub fn is_invocable(&self) -> bool {
        matches!(self, Handler::Invocable(_))
    }

    /// Run this handler for `event`
    ///
    /// Returns false only for a payload with no dispatch callback to receive
    /// it; such a match is inert.
    pub fn invoke(&self, event: &KeyEvent, dispatch: Option<&DispatchCallback<P>>) -> bool {
        match self {
            Handler::Invocable(callback) => {
                callback(event);
                true
            }
            Handler::Dispatchable(payload) => match dispatch {
                Some(dispatch) => {
                    dispatch(payload, event);
                    true
                }
                None => {
                    tracing::debug!("Payload handler matched without a dispatch callback");
                    false
                }
            },
        }
    }
}

impl<P: Clone> Clone for Handler<P> {
    fn clone(&self) -> Self {
        match self {
            Handler::Invocable(callback) => Handler::Invocable(Rc::clone(callback)),
            Handler::Dispatchable(payload) => Handler::Dispatchable(payload.clone()),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for Handler<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Invocable(_) => f.write_str("Invocable(..)"),
            Handler::Dispatchable(payload) => f.debug_tuple("Dispatchable").field(payload).finish(),
        }
    }
}
