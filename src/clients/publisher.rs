use std::sync::{Mutex, PoisonError};

use crate::clients::{EventPublisher, PublishError};
use crate::domain::document::CompletionEvent;

/// Completion-event publisher backed by a ZMQ PUSH socket.
///
/// The socket is connected once at startup and is not `Sync`, so sends are
/// serialized behind a mutex.
pub struct ZmqEventPublisher {
    socket: Mutex<zmq::Socket>,
}

impl ZmqEventPublisher {
    pub fn connect(context: &zmq::Context, address: &str) -> Result<Self, zmq::Error> {
        let socket = context.socket(zmq::PUSH)?;
        socket.connect(address)?;
        Ok(Self {
            socket: Mutex::new(socket),
        })
    }
}

impl EventPublisher for ZmqEventPublisher {
    fn publish(&self, event: &CompletionEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(event)?;
        let socket = self.socket.lock().unwrap_or_else(PoisonError::into_inner);
        socket.send(payload, 0)?;
        Ok(())
    }
}
