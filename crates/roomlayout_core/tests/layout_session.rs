use roomlayout_core::{
    CommandOutcome, FurnitureId, LayoutCommand, LayoutSession, Rotation,
    SharedFurnitureCollection,
};
use std::collections::HashSet;
use std::thread;

fn run(session: &mut LayoutSession, line: &str) -> CommandOutcome {
    let command = LayoutCommand::parse(line).unwrap().unwrap();
    session.apply(command)
}

#[test]
fn scripted_gestures_drive_the_session_layout() {
    let mut session = LayoutSession::start();

    let CommandOutcome::Added(chair) = run(&mut session, "add chair 10 20") else {
        panic!("add should report the created item");
    };
    assert_eq!(
        run(&mut session, &format!("rotate {}", chair.id)),
        CommandOutcome::Rotated(chair.id, Rotation::Deg90)
    );
    assert_eq!(
        run(&mut session, &format!("move {} 15 25", chair.id)),
        CommandOutcome::Moved(chair.id)
    );
    assert_eq!(run(&mut session, "count"), CommandOutcome::Count(1));

    let CommandOutcome::Listing(items) = run(&mut session, "list") else {
        panic!("list should report items");
    };
    assert_eq!(items.len(), 1);
    assert_eq!((items[0].x, items[0].y), (15.0, 25.0));
    assert_eq!(items[0].rotation, Rotation::Deg90);

    assert_eq!(
        run(&mut session, &format!("remove {}", chair.id)),
        CommandOutcome::Removed(chair.id)
    );
    assert_eq!(session.end().count(), 0);
}

#[test]
fn commands_on_missing_ids_report_unchanged() {
    let mut session = LayoutSession::start();
    run(&mut session, "add sofa 0 0");
    let missing = FurnitureId::new(77);

    assert_eq!(run(&mut session, "rotate 77"), CommandOutcome::Unchanged(missing));
    assert_eq!(run(&mut session, "move 77 1 1"), CommandOutcome::Unchanged(missing));
    assert_eq!(run(&mut session, "remove 77"), CommandOutcome::Unchanged(missing));
    assert_eq!(session.collection().count(), 1);
}

#[test]
fn clear_reports_removed_count() {
    let mut session = LayoutSession::start();
    run(&mut session, "add sofa 0 0");
    run(&mut session, "add lamp 1 1");

    assert_eq!(run(&mut session, "clear"), CommandOutcome::Cleared { removed: 2 });
    assert_eq!(run(&mut session, "clear"), CommandOutcome::Cleared { removed: 0 });
    assert!(session.collection().is_empty());
}

#[test]
fn outcome_lines_are_human_readable() {
    let mut session = LayoutSession::start();
    let added = run(&mut session, "add chair 10 20");
    assert_eq!(added.to_string(), "added 1 chair at (10, 20)");
    assert_eq!(run(&mut session, "rotate 1").to_string(), "rotated 1 to 90");
    assert_eq!(run(&mut session, "rotate 2").to_string(), "no item 2");
    assert_eq!(run(&mut session, "list").to_string(), "1 chair (10, 20) 90");
}

#[test]
fn shared_collection_counts_concurrent_adds_exactly() {
    let shared = SharedFurnitureCollection::new();
    let workers = (0..8)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                (0..250)
                    .map(|index| shared.add("chair", f64::from(worker), f64::from(index)).id)
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();

    let ids = workers
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect::<HashSet<_>>();

    assert_eq!(ids.len(), 2_000);
    assert_eq!(shared.count(), 2_000);
}

#[test]
fn shared_collection_rotations_are_not_lost() {
    let shared = SharedFurnitureCollection::new();
    let id = shared.add("table", 0.0, 0.0).id;

    let workers = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    shared.rotate(id);
                }
            })
        })
        .collect::<Vec<_>>();
    for handle in workers {
        handle.join().unwrap();
    }

    // 100 quarter turns is a whole number of full turns.
    assert_eq!(shared.get(id).unwrap().rotation, Rotation::Deg0);
    assert_eq!(shared.snapshot().items.len(), 1);
}
