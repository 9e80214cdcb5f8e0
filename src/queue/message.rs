//! Message type carried by the blocking queue
//!
//! A message is a small fixed-shape record: an integer tag, two integer
//! arguments and a caller-chosen payload. The queue never looks inside the
//! payload; it only moves it from sender to receiver.

/// Fixed-shape message record
///
/// `P` is the opaque payload. It moves into the queue on send and out of it
/// on receive, so ownership of whatever it refers to stays with the caller.
///
/// # Example
///
/// ```rust
/// use msgpass::queue::Message;
///
/// let message = Message::new(1, 2, 3, "payload");
/// let (what, arg1, arg2, payload) = message.into_parts();
/// assert_eq!((what, arg1, arg2, payload), (1, 2, 3, "payload"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message<P = ()> {
    /// Tag identifying the message kind, used by `clear_msg_type`
    pub what: i32,
    /// First integer argument
    pub arg1: i32,
    /// Second integer argument
    pub arg2: i32,
    /// Opaque caller payload
    pub payload: P,
}

impl<P> Message<P> {
    pub fn new(what: i32, arg1: i32, arg2: i32, payload: P) -> Self {
        Self {
            what,
            arg1,
            arg2,
            payload,
        }
    }

    /// Split the message into `(what, arg1, arg2, payload)`
    pub fn into_parts(self) -> (i32, i32, i32, P) {
        (self.what, self.arg1, self.arg2, self.payload)
    }
}

impl<P> From<(i32, i32, i32, P)> for Message<P> {
    fn from((what, arg1, arg2, payload): (i32, i32, i32, P)) -> Self {
        Self::new(what, arg1, arg2, payload)
    }
}
