//! # Priority Ring Demo
//!
//! This example simulates a telemetry admission buffer: a burst of events
//! with mixed severities arrives faster than it is drained, and the buffer
//! keeps the important ones near the front.
//!
//! Run with: `cargo run --example demo`

use std::thread;
use std::time::Duration;

use anyhow::Result;
use priority_ring::{BufferError, Config, PriorityBuffer, SearchFilter};

const SEVERITIES: [(&str, i64); 4] = [("debug", 0), ("info", 1), ("warn", 5), ("error", 9)];

fn main() -> Result<()> {
    // Initialize logging so we can see what's happening
    priority_ring::init_logging();

    let config = Config::new(16)
        .with_bubble_window(4)
        .with_overwrite_guard(true)
        .with_thread_safe(true);

    println!("📦 Configuration:");
    println!("   Capacity: {}", config.capacity);
    println!("   Bubble window: {}", config.bubble_window);
    println!("   Overwrite guard: {}", config.overwrite_guard);
    println!();

    let mut buffer = PriorityBuffer::new(config)?;
    let shared = buffer
        .shared()
        .ok_or_else(|| anyhow::anyhow!("expected a thread safe buffer"))?;

    // Producer: a burst of 40 events
    let producer = thread::spawn(move || {
        let mut rejected = 0;
        for i in 0..40usize {
            let (label, priority) = SEVERITIES[(i * 7) % SEVERITIES.len()];
            match shared.insert(format!("{}-{}", label, i), priority) {
                Ok(()) => {}
                Err(BufferError::BufferFull { .. }) => rejected += 1,
                Err(e) => log::error!("Unexpected insert failure: {}", e),
            }
            thread::sleep(Duration::from_millis(1));
        }
        rejected
    });

    let rejected = producer
        .join()
        .map_err(|_| anyhow::anyhow!("producer thread panicked"))?;

    println!("🚦 Burst finished: {} stored, {} rejected by the guard", buffer.len(), rejected);

    let max = buffer.peek_max_priority()?;
    println!("   Most important: {} (priority {})", max.value, max.priority);

    let urgent = buffer.search(&[SearchFilter::min_priority(5)]);
    println!("   Warn or worse at offsets: {:?}", urgent);
    println!();

    println!("🧹 Draining:");
    while let Ok(event) = buffer.dequeue() {
        println!(
            "   #{:<3} priority {:<2} {}",
            event.insertion_order, event.priority, event.value
        );
    }

    Ok(())
}
