//! Activation dispatch
//!
//! The OS calls the registered COM activator on one of its own threads. The
//! activator only owns an [`ActivationSink`], which parses the invocation and
//! queues it. The [`ActivationRouter`] owned by the toaster drains the queue and
//! runs the user handler on the owner's thread.

use std::collections::BTreeMap;
use std::fmt;

use tokio::sync::mpsc;

use crate::domain::arguments::ToastArguments;

/// Values typed or selected by the user in toast input fields, keyed by input id
pub type UserInput = BTreeMap<String, String>;

/// Handler invoked for each activation
pub type ActivationHandler = Box<dyn FnMut(&ToastArguments, &UserInput) + Send>;

/// One click on a toast body or action button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub arguments: ToastArguments,
    pub user_input: UserInput,
}

impl Activation {
    /// Index of the clicked action button, `None` for a body click
    pub fn action_id(&self) -> Option<usize> {
        self.arguments.get("actionId").and_then(|id| id.parse().ok())
    }
}

/// Sending half handed to the OS-facing activator
#[derive(Clone)]
pub struct ActivationSink {
    tx: mpsc::UnboundedSender<Activation>,
}

impl ActivationSink {
    /// Queue an activation. The raw invocation string uses the toast argument
    /// wire format. Returns false once the router is gone.
    pub fn deliver(&self, raw_arguments: &str, user_input: UserInput) -> bool {
        let activation = Activation {
            arguments: ToastArguments::parsed(raw_arguments),
            user_input,
        };
        tracing::debug!(arguments = %activation.arguments, "Toast activated");
        if self.tx.send(activation).is_err() {
            tracing::warn!("Activation received after the toaster was dropped");
            return false;
        }
        true
    }
}

impl fmt::Debug for ActivationSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationSink")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Receiving half: queues activations until the owner dispatches them
pub struct ActivationRouter {
    tx: mpsc::UnboundedSender<Activation>,
    rx: mpsc::UnboundedReceiver<Activation>,
    handler: Option<ActivationHandler>,
}

impl ActivationRouter {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            handler: None,
        }
    }

    /// A new sink feeding this router
    pub fn sink(&self) -> ActivationSink {
        ActivationSink {
            tx: self.tx.clone(),
        }
    }

    /// Install the handler, replacing any previous one
    pub fn set_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&ToastArguments, &UserInput) + Send + 'static,
    {
        self.handler = Some(Box::new(handler));
    }

    pub fn clear_handler(&mut self) {
        self.handler = None;
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Dispatch every queued activation without waiting.
    /// Returns how many were taken off the queue.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(activation) = self.rx.try_recv() {
            self.invoke(&activation);
            count += 1;
        }
        count
    }

    /// Wait for the next activation, dispatch it, and return it
    pub async fn dispatch_next(&mut self) -> Option<Activation> {
        // The router keeps a sender of its own, so this only ends on cancellation
        let activation = self.rx.recv().await?;
        self.invoke(&activation);
        Some(activation)
    }

    fn invoke(&mut self, activation: &Activation) {
        match self.handler.as_mut() {
            Some(handler) => handler(&activation.arguments, &activation.user_input),
            None => tracing::warn!(
                arguments = %activation.arguments,
                "Activation dropped, no handler installed"
            ),
        }
    }
}

impl Default for ActivationRouter {
    fn default() -> Self {
        Self::new()
    }
}
