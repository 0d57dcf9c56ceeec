//! Producers enqueue from their own threads; the registry publishes on the
//! consumer side and the joined producers' mutations are all visible.

use field_core::{FieldRecord, FieldRegistry};
use glam::Vec3;
use std::thread;

#[test]
fn mutations_from_joined_threads_are_visible_after_publish() {
    let (producer, mut registry) = FieldRegistry::new();

    let mut workers = Vec::new();
    for i in 0..4 {
        let p = producer.clone();
        workers.push(thread::spawn(move || {
            let h = p.create_handle();
            p.set_record(
                h,
                FieldRecord {
                    center: Vec3::new(i as f32 * 10.0, 0.0, 0.0),
                    radius: 5.0,
                    enabled: true,
                    tag_filter: None,
                },
            );
            h
        }));
    }
    let handles: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();

    // Join happens-before publish, so every worker's enqueue is in this frame.
    let snap = registry.publish();
    assert_eq!(snap.len(), 4);
    for h in handles {
        assert!(snap.get(h).unwrap().enabled);
    }
}

#[test]
fn snapshot_reads_are_safe_across_threads() {
    let (producer, mut registry) = FieldRegistry::new();
    let h = producer.create_handle();
    producer.set_record(
        h,
        FieldRecord {
            center: Vec3::ZERO,
            radius: 10.0,
            enabled: true,
            tag_filter: None,
        },
    );
    let snap = registry.publish();

    let readers: Vec<_> = (0..4)
        .map(|i| {
            let s = snap.clone();
            thread::spawn(move || s.any_affects(Vec3::new(i as f32, 0.0, 0.0), &[]))
        })
        .collect();
    for r in readers {
        assert!(r.join().unwrap());
    }
}
