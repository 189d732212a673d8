//! Concurrent produce/consume behaviour of the message buffer

use ltapp_messaging::{MessageBuffer, MessagePayload, MessagingError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_consumed_minus_taken_equals_size() {
    let buffer = Arc::new(MessageBuffer::new());
    let taken = Arc::new(AtomicUsize::new(0));
    let producers = 4;
    let per_producer = 2_000;

    let mut handles = Vec::new();
    for p in 0..producers {
        let buffer = buffer.clone();
        handles.push(thread::spawn(move || {
            for i in 0..per_producer {
                buffer.enqueue(MessagePayload::from(format!("p{}-{}", p, i)));
            }
        }));
    }
    for _ in 0..3 {
        let buffer = buffer.clone();
        let taken = taken.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..1_500 {
                match buffer.take_one() {
                    Ok(_) => {
                        taken.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(MessagingError::EmptyBuffer) => thread::yield_now(),
                    Err(e) => panic!("unexpected error: {}", e),
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = buffer.stats();
    assert_eq!(stats.total_consumed, (producers * per_producer) as u64);
    assert_eq!(
        stats.total_consumed - taken.load(Ordering::Relaxed) as u64,
        stats.size as u64
    );
    assert_eq!(buffer.size(), stats.size);
}

#[test]
fn test_single_element_has_exactly_one_taker() {
    for _ in 0..200 {
        let buffer = Arc::new(MessageBuffer::new());
        buffer.enqueue(MessagePayload::from("only"));
        let barrier = Arc::new(Barrier::new(2));

        let results: Vec<_> = (0..2)
            .map(|_| {
                let buffer = buffer.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    buffer.take_one().is_ok()
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(results.iter().filter(|ok| **ok).count(), 1);
        assert!(buffer.is_empty());
    }
}

#[test]
fn test_stats_snapshot_never_exceeds_consumed() {
    let buffer = Arc::new(MessageBuffer::new());
    let writer = {
        let buffer = buffer.clone();
        thread::spawn(move || {
            for i in 0..5_000 {
                buffer.enqueue(MessagePayload::from(format!("m{}", i)));
                if i % 3 == 0 {
                    let _ = buffer.take_one();
                }
            }
        })
    };

    for _ in 0..5_000 {
        let stats = buffer.stats();
        assert!(stats.size as u64 <= stats.total_consumed);
    }
    writer.join().unwrap();
}
