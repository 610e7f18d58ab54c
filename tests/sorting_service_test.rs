use sorting_robot::{
    Item, Phase, ScriptedRandom, SeededRandom, SortingError, SortingRobot, SortingService,
    ThreadRandom,
};
use std::collections::HashSet;
use std::sync::Arc;

fn items(codes: &[&str]) -> Vec<Item> {
    codes.iter().map(|c| Item::new(*c)).collect()
}

#[tokio::test]
async fn test_tomato_cucumber_walkthrough() {
    let robot = SortingService::new(ThreadRandom);

    robot
        .load_items(items(&["tomato", "cucumber"]))
        .await
        .unwrap();

    let first = robot.select_item().await.unwrap();
    assert!(first.code == "tomato" || first.code == "cucumber");
    let snapshot = robot.snapshot().await.unwrap();
    assert_eq!(snapshot.cargo.len(), 1);
    assert_ne!(snapshot.cargo[0], first);

    robot.move_item("A").await.unwrap();
    let snapshot = robot.snapshot().await.unwrap();
    assert_eq!(snapshot.cubbies["A"].items, vec![first.clone()]);

    let second = robot.select_item().await.unwrap();
    assert_ne!(second, first);
    robot.move_item("A").await.unwrap();
    assert_eq!(robot.snapshot().await.unwrap().cubbies["A"].items.len(), 2);

    robot.load_items(items(&["potato"])).await.unwrap();
    robot.select_item().await.unwrap();
    let err = robot.move_item("A").await.unwrap_err();
    assert!(matches!(err, SortingError::CubbyFull { .. }));
}

#[tokio::test]
async fn test_rejections_leave_state_intact() {
    let robot = SortingService::new(ScriptedRandom::new(vec![0]));

    assert!(matches!(
        robot.select_item().await,
        Err(SortingError::EmptyCargo)
    ));
    assert!(matches!(
        robot.move_item("A").await,
        Err(SortingError::NothingSelected)
    ));
    assert!(matches!(
        robot.load_items(Vec::new()).await,
        Err(SortingError::InvalidArgument { .. })
    ));

    let snapshot = robot.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert!(snapshot.cargo.is_empty());
    assert!(snapshot.cubbies.is_empty());

    robot.load_items(items(&["a", "b"])).await.unwrap();
    let selected = robot.select_item().await.unwrap();
    assert!(matches!(
        robot.select_item().await,
        Err(SortingError::AlreadySelected)
    ));

    let snapshot = robot.snapshot().await.unwrap();
    assert_eq!(snapshot.selected, Some(selected));
    assert_eq!(snapshot.cargo, items(&["b"]));
}

#[tokio::test]
async fn test_seeded_services_agree() {
    let codes = ["a", "b", "c", "d", "e", "f"];
    let left = SortingService::new(SeededRandom::new(99));
    let right = SortingService::new(SeededRandom::new(99));
    left.load_items(items(&codes)).await.unwrap();
    right.load_items(items(&codes)).await.unwrap();

    for (n, cubby) in ["x", "x", "y", "y", "z", "z"].iter().enumerate() {
        let l = left.select_item().await.unwrap();
        let r = right.select_item().await.unwrap();
        assert_eq!(l, r, "selection {} diverged", n);
        left.move_item(cubby).await.unwrap();
        right.move_item(cubby).await.unwrap();
    }

    assert_eq!(
        left.snapshot().await.unwrap(),
        right.snapshot().await.unwrap()
    );
}

#[tokio::test]
async fn test_concurrent_selects_serialize() {
    let robot = Arc::new(SortingService::new(ThreadRandom));
    robot
        .load_items(items(&["a", "b", "c", "d", "e", "f", "g", "h"]))
        .await
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let robot = robot.clone();
            tokio::spawn(async move { robot.select_item().await })
        })
        .collect();

    let mut selected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => selected += 1,
            Err(SortingError::AlreadySelected) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(selected, 1);
    assert_eq!(robot.snapshot().await.unwrap().cargo.len(), 7);
}

#[tokio::test]
async fn test_every_item_sorted_exactly_once() {
    let codes: Vec<String> = (0..10).map(|i| format!("item-{}", i)).collect();
    let robot = SortingService::new(ThreadRandom);
    robot
        .load_items(codes.iter().map(|c| Item::new(c.as_str())).collect())
        .await
        .unwrap();

    for n in 0..codes.len() {
        robot.select_item().await.unwrap();
        robot.move_item(&format!("cubby-{}", n / 2)).await.unwrap();
    }

    let snapshot = robot.snapshot().await.unwrap();
    assert!(snapshot.cargo.is_empty());
    assert_eq!(snapshot.cubbies.len(), 5);
    let sorted: HashSet<String> = snapshot
        .cubbies
        .values()
        .flat_map(|c| c.items.iter().map(|i| i.code.clone()))
        .collect();
    assert_eq!(sorted, codes.into_iter().collect());
}
