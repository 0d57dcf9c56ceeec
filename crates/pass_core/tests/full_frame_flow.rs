//! End-to-end frame flow: producers push field intent, the consumer publishes
//! once, candidates are collected per view, and the processor emits sorted
//! draw commands.

use std::sync::Arc;

use field_core::{FieldEmitter, FieldRegistry, ReceiverTag};
use glam::Vec3;
use material_runtime::{ShaderId, VertexFactoryKind, default_surface_material};
use pass_core::{PassOutcome, PassProcessor, SimpleDrawList};
use scene_core::{
    GeometrySection, ObjectBinding, ReceiverDescriptor, RegisteredReceiver, collect_view_batches,
};

fn sections(n: u32) -> Vec<GeometrySection> {
    (0..n)
        .map(|i| GeometrySection {
            first_index: i * 6,
            index_count: 6,
            section_index: i,
        })
        .collect()
}

#[test]
fn one_frame_from_push_to_sorted_commands() {
    let (producer, mut registry) = FieldRegistry::new();
    let default = default_surface_material(ShaderId(1), ShaderId(2));

    // Two emitters: one broad field at the origin, one tag-filtered far away.
    let broad = FieldEmitter::register(&producer, Vec3::ZERO, 20.0, None);
    let filtered = FieldEmitter::register(
        &producer,
        Vec3::new(100.0, 0.0, 0.0),
        10.0,
        Some(ReceiverTag::from("ruins")),
    );

    // Receivers: inside the broad field, inside the filtered field with the
    // right tag, and one far from everything.
    let receivers = [
        RegisteredReceiver::new(
            ReceiverDescriptor::bake(true, &[], &[], Vec3::new(5.0, 0.0, 0.0), sections(2)),
            None,
            &default,
            VertexFactoryKind::LocalVertex,
            ObjectBinding { object_id: 1 },
        ),
        RegisteredReceiver::new(
            ReceiverDescriptor::bake(
                true,
                &[ReceiverTag::from("ruins")],
                &[],
                Vec3::new(104.0, 0.0, 0.0),
                sections(1),
            ),
            None,
            &default,
            VertexFactoryKind::SkinnedVertex,
            ObjectBinding { object_id: 2 },
        ),
        RegisteredReceiver::new(
            ReceiverDescriptor::bake(true, &[], &[], Vec3::new(500.0, 0.0, 0.0), sections(1)),
            None,
            &default,
            VertexFactoryKind::LocalVertex,
            ObjectBinding { object_id: 3 },
        ),
    ];

    // Publish strictly before evaluation; the snapshot is frozen for the frame.
    let snapshot = registry.publish();
    assert_eq!(snapshot.len(), 2);
    let processor = PassProcessor::new(snapshot, None);

    // Single view, everything visible in it.
    let candidates = collect_view_batches(&receivers, &[0b1, 0b1, 0b1], 1);
    assert_eq!(candidates.len(), 3);

    let mut list = SimpleDrawList::new();
    let mut emitted = 0u32;
    for candidate in &candidates {
        match processor.add_mesh_batch(candidate.descriptor, &candidate.batch, &mut list) {
            PassOutcome::Emitted(n) => emitted += n,
            PassOutcome::Rejected(_) | PassOutcome::Handled | PassOutcome::Skipped => {}
        }
    }

    // Receiver 1 contributes two sections, receiver 2 one, receiver 3 none.
    assert_eq!(emitted, 3);
    let commands = list.sorted();
    assert_eq!(commands.len(), 3);
    let mut keys: Vec<u64> = commands.iter().map(|c| c.sort_key).collect();
    keys.dedup();
    // Local-vertex draws (no pixel stage) and skinned draws (pixel stage
    // required) land on different pipelines.
    assert_eq!(keys.len(), 2);

    // Mutations after the publish do not affect this frame's processor.
    filtered.unregister();
    drop(broad);
    let mut late = SimpleDrawList::new();
    assert_eq!(
        processor.add_mesh_batch(&receivers[0].descriptor, &receivers[0].batch(), &mut late),
        PassOutcome::Emitted(2)
    );

    // Next frame: both emitters retired, nothing is affected.
    let next = registry.publish();
    assert!(next.is_empty());
    let next_processor = PassProcessor::new(next, None);
    let mut none = SimpleDrawList::new();
    for candidate in &candidates {
        let outcome = next_processor.add_mesh_batch(candidate.descriptor, &candidate.batch, &mut none);
        assert!(matches!(outcome, PassOutcome::Rejected(_)));
    }
    assert!(none.commands.is_empty());
}

#[test]
fn parallel_candidate_evaluation_shares_the_processor() {
    let (producer, mut registry) = FieldRegistry::new();
    let default = default_surface_material(ShaderId(1), ShaderId(2));
    let _emitter = FieldEmitter::register(&producer, Vec3::ZERO, 50.0, None);
    let snapshot = registry.publish();
    let processor = Arc::new(PassProcessor::new(snapshot, None));

    let workers: Vec<_> = (0..4u8)
        .map(|i| {
            let processor = Arc::clone(&processor);
            let default = Arc::clone(&default);
            std::thread::spawn(move || {
                let r = RegisteredReceiver::new(
                    ReceiverDescriptor::bake(
                        true,
                        &[],
                        &[],
                        Vec3::new(f32::from(i) * 3.0, 0.0, 0.0),
                        sections(1),
                    ),
                    None,
                    &default,
                    VertexFactoryKind::LocalVertex,
                    ObjectBinding {
                        object_id: u32::from(i),
                    },
                );
                let mut out = SimpleDrawList::new();
                let outcome = processor.add_mesh_batch(&r.descriptor, &r.batch(), &mut out);
                (outcome, out.commands.len())
            })
        })
        .collect();

    for w in workers {
        let (outcome, commands) = w.join().unwrap();
        assert_eq!(outcome, PassOutcome::Emitted(1));
        assert_eq!(commands, 1);
    }
}
