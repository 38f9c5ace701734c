#![cfg(miri)]

use fifo::{LockingQueue, Queue, UnsafeQueue};
use std::rc::Rc;
use std::sync::{Arc, Barrier};
use std::thread;

const MIRI_CHUNK: usize = 4;
const MIRI_ITEMS: usize = 30;

mod miri_engine_tests {
    use super::*;

    #[test]
    fn miri_test_chunk_rotation() {
        let mut queue = UnsafeQueue::<Box<usize>, MIRI_CHUNK>::new();
        for i in 0..MIRI_ITEMS {
            queue.add(Box::new(i));
        }
        for i in 0..MIRI_ITEMS {
            assert_eq!(queue.next().map(|b| *b), Some(i));
        }
        assert!(queue.next().is_none());

        queue.add(Box::new(99));
        assert_eq!(queue.peek().map(|b| **b), Some(99));
    }

    #[test]
    fn miri_test_batches() {
        let mut queue = UnsafeQueue::<String, MIRI_CHUNK>::new();
        queue.add("head".to_string());
        queue.add_list((0..MIRI_ITEMS).map(|i| i.to_string()));
        let out = queue.next_n(MIRI_ITEMS / 2);
        assert_eq!(out[0], "head");
        assert_eq!(out.len(), MIRI_ITEMS / 2);
        assert_eq!(queue.len(), MIRI_ITEMS + 1 - MIRI_ITEMS / 2);
    }

    #[test]
    fn miri_test_drop_with_items_in_flight() {
        let tracker = Rc::new(());
        {
            let mut queue = UnsafeQueue::<Rc<()>, MIRI_CHUNK>::new();
            queue.add_list((0..MIRI_ITEMS).map(|_| tracker.clone()));
            drop(queue.next_n(MIRI_CHUNK + 1));
            queue.next();
            assert_eq!(Rc::strong_count(&tracker), MIRI_ITEMS - MIRI_CHUNK - 2 + 1);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn miri_test_clear_then_reuse() {
        let mut queue = UnsafeQueue::<Vec<u8>, MIRI_CHUNK>::new();
        queue.add_list((0..MIRI_ITEMS as u8).map(|i| vec![i; 3]));
        queue.next();
        queue.clear();
        assert!(queue.is_empty());
        queue.add_list([vec![1], vec![2]]);
        assert_eq!(queue.next_n(5), vec![vec![1], vec![2]]);
    }

    #[test]
    fn miri_test_into_iter_partial() {
        let mut queue: UnsafeQueue<Box<u32>, MIRI_CHUNK> = (0..10).map(Box::new).collect();
        let firsts: Vec<u32> = queue.by_ref().take(5).map(|b| *b).collect();
        assert_eq!(firsts, vec![0, 1, 2, 3, 4]);
        drop(queue);
    }
}

mod miri_concurrent_tests {
    use super::*;

    #[test]
    fn miri_test_queue_producer_consumer() {
        let queue = Arc::new(Queue::<usize, MIRI_CHUNK>::new());
        let barrier = Arc::new(Barrier::new(2));

        let queue_prod = queue.clone();
        let barrier_prod = barrier.clone();
        let producer = thread::spawn(move || {
            barrier_prod.wait();
            for i in 0..MIRI_ITEMS {
                queue_prod.add(i);
            }
        });

        barrier.wait();
        let mut received = Vec::new();
        while received.len() < MIRI_ITEMS {
            match queue.next() {
                Some(item) => received.push(item),
                None => thread::yield_now(),
            }
        }
        producer.join().unwrap();

        assert_eq!(received, (0..MIRI_ITEMS).collect::<Vec<_>>());
    }

    #[test]
    fn miri_test_locking_queue_batches() {
        let queue = Arc::new(LockingQueue::<usize, MIRI_CHUNK>::new());

        let handles: Vec<_> = (0..2)
            .map(|t| {
                let queue = queue.clone();
                thread::spawn(move || queue.add_list(t * 100..t * 100 + 10))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let mut out = queue.next_n(100);
        assert_eq!(out.len(), 20);
        out.sort_unstable();
        let expected: Vec<usize> = (0..10).chain(100..110).collect();
        assert_eq!(out, expected);
    }
}
