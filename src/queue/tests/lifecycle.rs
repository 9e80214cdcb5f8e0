//! Tests for the queue's closed state

#[cfg(test)]
mod tests {
    use crate::queue::api::{MessageQueue, QueueError};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_send_after_close_fails() {
        let queue = MessageQueue::new();
        queue.close().unwrap();

        assert_eq!(queue.send(1, 2, 3, ()), Err(QueueError::Closed));
        assert_eq!(queue.count().unwrap(), 0);
        assert_eq!(queue.stats().unwrap().sent, 0);
    }

    #[test]
    fn test_pending_messages_are_drained_before_closed() {
        let queue = MessageQueue::new();
        queue.send(1, 0, 0, ()).unwrap();
        queue.send(2, 0, 0, ()).unwrap();
        queue.close().unwrap();

        assert_eq!(queue.receive().unwrap().what, 1);
        assert_eq!(queue.try_receive().unwrap().map(|m| m.what), Some(2));
        assert_eq!(queue.receive(), Err(QueueError::Closed));
        assert_eq!(queue.try_receive(), Err(QueueError::Closed));
        assert_eq!(
            queue.receive_timeout(Duration::from_secs(1)),
            Err(QueueError::Closed)
        );
    }

    #[test]
    fn test_close_wakes_all_blocked_receivers() {
        const RECEIVERS: usize = 4;
        let queue: Arc<MessageQueue<()>> = Arc::new(MessageQueue::new());

        let receivers: Vec<_> = (0..RECEIVERS)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.receive())
            })
            .collect();

        // Give the receivers time to block
        thread::sleep(Duration::from_millis(50));
        assert!(queue.close().unwrap());

        for receiver in receivers {
            assert_eq!(receiver.join().unwrap(), Err(QueueError::Closed));
        }
    }

    #[test]
    fn test_close_wakes_timed_receivers() {
        let queue: Arc<MessageQueue<()>> = Arc::new(MessageQueue::new());

        let receiver = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.receive_timeout(Duration::from_secs(30)))
        };

        thread::sleep(Duration::from_millis(20));
        queue.close().unwrap();

        assert_eq!(receiver.join().unwrap(), Err(QueueError::Closed));
    }

    #[test]
    fn test_peek_and_clear_still_work_after_close() {
        let queue = MessageQueue::new();
        queue.send(1, 0, 0, ()).unwrap();
        queue.send(2, 0, 0, ()).unwrap();
        queue.close().unwrap();

        assert_eq!(queue.peek().unwrap().map(|m| m.what), Some(1));
        assert_eq!(queue.clear_msg_type(1).unwrap(), 1);
        assert_eq!(queue.count().unwrap(), 1);
    }

    #[test]
    fn test_queue_error_is_not_user_actionable() {
        use crate::core::error_handling::ContextualError;

        let error = QueueError::SynchronizationFailure {
            message: "poisoned".to_string(),
        };
        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
        assert_eq!(error.to_string(), "Synchronisation failure: poisoned");
        assert_eq!(QueueError::Closed.to_string(), "Queue is closed");
    }
}
