//! Runtime context manager
//!
//! [`ShortcutManager`] owns everything that changes while the application
//! runs: the processed tree, the active context, the dispatch callback and
//! the one listener it keeps attached to an [`InputSource`].
//!
//! # Architecture
//!
//! ```text
//! host keydown → InputSource::emit → listener → resolve() → Handler
//!                                        ↑
//!                         active context (ContextHandle)
//! ```
//!
//! Everything runs on the host's UI thread, so state lives in `Rc`/`RefCell`.
//! The listener reads the active context when each event fires, never a copy
//! taken at initialization.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::event::KeyEvent;
use super::handler::DispatchCallback;
use super::matcher::resolve;
use super::platform::Platform;
use super::tree::{preprocess, RawNode, ShortcutTree};

/// Callback an [`InputSource`] invokes once per physical keydown
pub type Listener = Rc<dyn Fn(&KeyEvent)>;

/// A stream of keydown events a manager can subscribe to
pub trait InputSource {
    /// Identifies one attached listener
    type Handle;

    fn attach(&self, listener: Listener) -> Self::Handle;

    fn detach(&self, handle: Self::Handle);
}

/// Identifies a listener attached to a [`KeyBus`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

/// In-process keydown stream; clones share the same listeners
///
/// Hosts call [`KeyBus::emit`] from their event loop for every keydown.
#[derive(Clone, Default)]
pub struct KeyBus {
    inner: Rc<RefCell<BusInner>>,
}

impl KeyBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every attached listener, returning how many ran
    ///
    /// Listeners may attach or detach while the event is delivered; those
    /// changes apply from the next event on.
    pub fn emit(&self, event: &KeyEvent) -> usize {
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl InputSource for KeyBus {
    type Handle = ListenerId;

    fn attach(&self, listener: Listener) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, listener));
        id
    }

    fn detach(&self, handle: ListenerId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(id, _)| *id != handle);
    }
}

impl fmt::Debug for KeyBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Shared view of the active context
///
/// Handlers can hold one of these to switch context from inside a key press.
#[derive(Clone, Debug, Default)]
pub struct ContextHandle {
    active: Rc<RefCell<Option<String>>>,
}

impl ContextHandle {
    /// Make `id` the active context; it need not exist in the tree
    pub fn set_context(&self, id: impl Into<String>) {
        let id = id.into();
        tracing::debug!("Active context set to {:?}", id);
        *self.active.borrow_mut() = Some(id);
    }

    pub fn context(&self) -> Option<String> {
        self.active.borrow().clone()
    }

    pub fn clear(&self) {
        self.active.borrow_mut().take();
    }
}

/// Options accepted by [`ShortcutManager::initialize`]
pub struct InitOptions<P> {
    /// Receives payloads of dispatchable handlers; without it they are inert
    pub dispatch: Option<DispatchCallback<P>>,
}

impl<P> InitOptions<P> {
    pub fn with_dispatch(f: impl Fn(&P, &KeyEvent) + 'static) -> Self {
        Self {
            dispatch: Some(Rc::new(f)),
        }
    }
}

impl<P> Default for InitOptions<P> {
    fn default() -> Self {
        Self { dispatch: None }
    }
}

/// Tree and dispatch callback installed by one `initialize` call
struct Installed<P> {
    tree: ShortcutTree<P>,
    dispatch: Option<DispatchCallback<P>>,
}

impl<P> Installed<P> {
    /// Resolve and run the handler for `event`; true if one ran
    fn deliver(&self, active: &ContextHandle, event: &KeyEvent) -> bool {
        let context = active.context();
        match resolve(&self.tree, context.as_deref(), event) {
            Some(handler) => handler.invoke(event, self.dispatch.as_ref()),
            None => false,
        }
    }
}

/// Owns the shortcut runtime state for one application
///
/// At most one listener is attached to the source at any time. Dropping the
/// manager detaches it.
pub struct ShortcutManager<P: 'static, S: InputSource = KeyBus> {
    source: S,
    platform: Platform,
    active: ContextHandle,
    installed: Option<Rc<Installed<P>>>,
    listener: Option<S::Handle>,
}

impl<P: 'static, S: InputSource> ShortcutManager<P, S> {
    /// Create a manager resolving `defmod` for the host platform
    pub fn new(source: S) -> Self {
        Self::with_platform(source, Platform::current())
    }

    pub fn with_platform(source: S, platform: Platform) -> Self {
        Self {
            source,
            platform,
            active: ContextHandle::default(),
            installed: None,
            listener: None,
        }
    }

    /// Install a new tree and listener
    ///
    /// Replaces the previous tree and dispatch callback (clearing the
    /// callback if `options` has none) and swaps the listener. The active
    /// context is kept as is.
    pub fn initialize(&mut self, raw: &RawNode<P>, options: InitOptions<P>)
    where
        P: Clone,
    {
        let installed = Rc::new(Installed {
            tree: preprocess(raw, self.platform),
            dispatch: options.dispatch,
        });

        self.detach_listener();

        let listener: Listener = {
            let installed = Rc::clone(&installed);
            let active = self.active.clone();
            Rc::new(move |event: &KeyEvent| {
                installed.deliver(&active, event);
            })
        };
        self.listener = Some(self.source.attach(listener));
        self.installed = Some(installed);

        tracing::info!(
            "Shortcut manager initialized (active context {:?})",
            self.active.context()
        );
    }

    /// Make `id` the active context
    ///
    /// Unknown ids are accepted; no key resolves until a known one is set.
    pub fn set_context(&self, id: impl Into<String>) {
        self.active.set_context(id);
    }

    /// The active context, if any
    pub fn context(&self) -> Option<String> {
        self.active.context()
    }

    /// Handle for switching context from inside handlers
    pub fn context_handle(&self) -> ContextHandle {
        self.active.clone()
    }

    /// Detach the listener and reset all state; safe to call repeatedly
    pub fn shutdown(&mut self) {
        let was_initialized = self.installed.is_some();
        self.detach_listener();
        self.installed = None;
        self.active.clear();
        if was_initialized {
            tracing::info!("Shortcut manager shut down");
        }
    }

    /// Resolve and run a handler for `event` without going through the source
    ///
    /// Returns true if a handler ran.
    pub fn handle_event(&self, event: &KeyEvent) -> bool {
        match &self.installed {
            Some(installed) => installed.deliver(&self.active, event),
            None => false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.installed.is_some()
    }

    /// Whether a listener is currently attached
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// The installed tree
    pub fn tree(&self) -> Option<&ShortcutTree<P>> {
        self.installed.as_ref().map(|installed| &installed.tree)
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn detach_listener(&mut self) {
        if let Some(handle) = self.listener.take() {
            self.source.detach(handle);
            tracing::debug!("Detached key listener");
        }
    }
}

impl<P: 'static, S: InputSource> Drop for ShortcutManager<P, S> {
    fn drop(&mut self) {
        self.detach_listener();
    }
}

impl<P: 'static, S: InputSource> fmt::Debug for ShortcutManager<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutManager")
            .field("platform", &self.platform)
            .field("active", &self.active.context())
            .field("initialized", &self.is_initialized())
            .field("listening", &self.is_listening())
            .finish()
    }
}
