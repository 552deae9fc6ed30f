// Keyshortcut Lifecycle Guard
// Registers a binding while attached, deregisters exactly once on detach or drop

use crate::{Binding, Dispatcher, ListenerId, ShortcutAction, ShortcutError};

/// A mounted shortcut.
///
/// Creating one registers its binding; dropping it (or calling
/// [`KeyShortcut::detach`]) deregisters it. The dispatcher never diffs
/// actions, so changing the action goes through [`KeyShortcut::set_action`],
/// which swaps the registration for a new one.
#[derive(Debug)]
pub struct KeyShortcut<'d> {
    dispatcher: &'d Dispatcher,
    binding: Binding,
    id: ListenerId,
    attached: bool,
}

impl<'d> KeyShortcut<'d> {
    /// Register `binding` on `dispatcher`
    pub fn attach(dispatcher: &'d Dispatcher, binding: Binding) -> Result<Self, ShortcutError> {
        let id = dispatcher.register(binding.clone())?;
        Ok(Self {
            dispatcher,
            binding,
            id,
            attached: true,
        })
    }

    /// Id of the current registration
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Replace the action, re-registering under a new id.
    ///
    /// Passing the action already in place keeps the current registration.
    pub fn set_action(&mut self, action: ShortcutAction) -> Result<ListenerId, ShortcutError> {
        if let Some(current) = &self.binding.action {
            if current.ptr_eq(&action) {
                return Ok(self.id);
            }
        }
        self.binding.action = Some(action);
        let id = self.dispatcher.register(self.binding.clone())?;
        self.dispatcher.deregister(self.id);
        self.id = id;
        Ok(id)
    }

    /// Deregister now instead of on drop
    pub fn detach(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.attached {
            self.attached = false;
            self.dispatcher.deregister(self.id);
        }
    }
}

impl KeyShortcut<'static> {
    /// Register `binding` on the process-wide dispatcher
    pub fn attach_shared(binding: Binding) -> Result<Self, ShortcutError> {
        Self::attach(Dispatcher::shared(), binding)
    }
}

impl Drop for KeyShortcut<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
