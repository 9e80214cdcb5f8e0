//! Ping-pong demo through the public API

use msgpass::app::ping_pong::{run_printer, PingPong, PrinterConfig, PING};
use msgpass::queue::api::MessageQueue;
use std::sync::Arc;
use std::thread;

fn printer(label: &str, text: &str, rounds: Option<u64>) -> PrinterConfig {
    PrinterConfig {
        label: label.to_string(),
        text: text.to_string(),
        rounds,
        interval: None,
    }
}

#[test]
fn test_two_printers_on_shared_queues() {
    let to_a: Arc<MessageQueue> = Arc::new(MessageQueue::new());
    let to_b: Arc<MessageQueue> = Arc::new(MessageQueue::new());

    let b = {
        let (to_a, to_b) = (Arc::clone(&to_a), Arc::clone(&to_b));
        thread::spawn(move || {
            let mut out: Vec<u8> = Vec::new();
            let handled = run_printer(&printer("b", "B", Some(4)), &to_b, &to_a, &mut out).unwrap();
            (handled, out)
        })
    };

    to_a.send(PING, 2, 3, ()).unwrap();
    let mut out: Vec<u8> = Vec::new();
    let handled = run_printer(&printer("a", "A", Some(4)), &to_a, &to_b, &mut out).unwrap();
    let (b_handled, b_out) = b.join().unwrap();

    assert_eq!((handled, b_handled), (4, 4));
    assert_eq!(out, b"AAAA");
    assert_eq!(b_out, b"BBBB");
    // b's last forward is left waiting for a
    assert_eq!(to_a.count().unwrap(), 1);
}

#[test]
fn test_demo_with_sink_output() {
    let demo = PingPong::new(printer("hello", "Hello ", Some(50)), printer("world", "World!\n", Some(50)));

    let report = demo.start(std::io::sink(), std::io::sink()).unwrap().join().unwrap();

    assert_eq!(report.hello_handled, 50);
    assert_eq!(report.world_handled, 50);
    assert_eq!(report.world_queue.received, 50);
}
