//! Cross-thread messaging through the public API

use msgpass::queue::api::{Message, MessageQueue, QueueError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_request_reply_between_threads() {
    let requests: Arc<MessageQueue<String>> = Arc::new(MessageQueue::new());
    let replies: Arc<MessageQueue<String>> = Arc::new(MessageQueue::new());

    let server = {
        let requests = Arc::clone(&requests);
        let replies = Arc::clone(&replies);
        thread::spawn(move || {
            while let Ok(request) = requests.receive() {
                let reply = Message::new(request.what, request.arg1 * 2, 0, request.payload.to_uppercase());
                if replies.send_message(reply).is_err() {
                    break;
                }
            }
        })
    };

    for i in 0..10 {
        requests.send(i, i, 0, format!("req-{}", i)).unwrap();
    }
    for i in 0..10 {
        let reply = replies.receive().unwrap();
        assert_eq!(reply.what, i);
        assert_eq!(reply.arg1, i * 2);
        assert_eq!(reply.payload, format!("REQ-{}", i));
    }

    requests.close().unwrap();
    server.join().unwrap();
}

#[test]
fn test_clear_then_drain_with_timeout() {
    let queue = MessageQueue::new();
    for what in [5, 6, 5, 7, 5] {
        queue.send(what, 0, 0, ()).unwrap();
    }

    assert_eq!(queue.clear_msg_type(5).unwrap(), 3);
    assert_eq!(queue.count().unwrap(), 2);

    let mut tags = Vec::new();
    while let Some(message) = queue.receive_timeout(Duration::from_millis(10)).unwrap() {
        tags.push(message.what);
    }
    assert_eq!(tags, vec![6, 7]);

    let stats = queue.stats().unwrap();
    assert_eq!((stats.sent, stats.received, stats.cleared), (5, 2, 3));
}

#[test]
fn test_closed_queue_rejects_send_from_any_thread() {
    let queue: Arc<MessageQueue> = Arc::new(MessageQueue::new());
    queue.close().unwrap();

    let sender = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.send(1, 0, 0, ()))
    };

    assert_eq!(sender.join().unwrap(), Err(QueueError::Closed));
    assert_eq!(queue.receive(), Err(QueueError::Closed));
}
