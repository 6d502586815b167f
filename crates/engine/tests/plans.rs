//! Multi-turn plans driven through full rounds.

mod common;

use common::Fixture;
use mirefall_engine::{
    ActionPlan, ActionRouter, ConsumableEffect, Intent, Item, ItemHandle, PlanSeed, PropState,
    TilePos, TurnManager, start_plan, stop_plan,
};

#[test]
fn travel_plan_walks_through_a_closed_door() {
    // The only route passes a closed door: the plan's approach bumps it,
    // arbitration opens it (costing that turn), then the walk continues.
    let router = ActionRouter::standard();
    let mut manager = TurnManager::new();
    let mut fix = Fixture::open(5, 1);
    let player = fix.spawn(0, 0, 0);
    let door = TilePos::new(2, 0);
    fix.world.set_prop(door, PropState::closed_door());

    assert!(start_plan(
        &mut fix.world,
        player,
        ActionPlan::travel_to(),
        PlanSeed::new().at(TilePos::new(4, 0)),
    ));

    for _ in 0..6 {
        manager.process_unified_round(&mut fix.ctrl(), &router).unwrap();
    }

    assert_eq!(fix.world.player().unwrap().position, TilePos::new(4, 0));
    assert_eq!(fix.world.prop_at(door), Some(&PropState::Door { open: true }));
    assert!(fix.world.player().unwrap().active_plan.is_none());
}

#[test]
fn melee_assault_crosses_the_room_and_lands_one_blow() {
    let router = ActionRouter::standard();
    let mut manager = TurnManager::new();
    let mut fix = Fixture::open(7, 1);
    fix.spawn(0, 6, 0); // player, out of the way
    let hunter = fix.spawn(1, 0, 0);
    let prey = fix.spawn(2, 4, 0);

    assert!(start_plan(
        &mut fix.world,
        hunter,
        ActionPlan::melee_assault(),
        PlanSeed::new().target(prey),
    ));

    for _ in 0..5 {
        manager.process_unified_round(&mut fix.ctrl(), &router).unwrap();
    }

    // One strike (the plan's single attack step), then the plan retired.
    assert_eq!(fix.world.actor(prey).unwrap().hp.current, 7);
    assert!(fix.world.actor(hunter).unwrap().active_plan.is_none());
}

#[test]
fn loot_plan_fills_the_inventory() {
    let router = ActionRouter::standard();
    let mut manager = TurnManager::new();
    let mut fix = Fixture::open(5, 1);
    let player = fix.spawn(0, 0, 0);
    let chest = TilePos::new(3, 0);
    fix.world.set_prop(
        chest,
        PropState::container(vec![
            Item::consumable(ItemHandle(1), "salve", ConsumableEffect::Heal(4)),
            Item::consumable(ItemHandle(2), "tonic", ConsumableEffect::Heal(2)),
        ]),
    );

    assert!(start_plan(
        &mut fix.world,
        player,
        ActionPlan::loot_container(),
        PlanSeed::new().at(chest),
    ));

    for _ in 0..4 {
        manager.process_unified_round(&mut fix.ctrl(), &router).unwrap();
    }

    assert_eq!(fix.world.player().unwrap().inventory.len(), 2);
    match fix.world.prop_at(chest) {
        Some(PropState::Container { items, searched }) => {
            assert!(items.is_empty());
            assert!(*searched);
        }
        other => panic!("container vanished: {other:?}"),
    }
    assert!(fix.world.player().unwrap().active_plan.is_none());
}

#[test]
fn queued_manual_intent_preempts_the_plan() {
    let router = ActionRouter::standard();
    let mut manager = TurnManager::new();
    let mut fix = Fixture::open(8, 1);
    let player = fix.spawn(0, 0, 0);

    assert!(start_plan(
        &mut fix.world,
        player,
        ActionPlan::travel_to(),
        PlanSeed::new().at(TilePos::new(7, 0)),
    ));
    manager.queue_action(Intent::wait(player));

    manager.process_unified_round(&mut fix.ctrl(), &router).unwrap();

    // The manual wait won: no plan movement happened and the plan is gone.
    assert_eq!(fix.world.player().unwrap().position, TilePos::ORIGIN);
    assert!(fix.world.player().unwrap().active_plan.is_none());
}

#[test]
fn stop_plan_clears_without_side_effects() {
    let mut fix = Fixture::open(5, 1);
    let player = fix.spawn(0, 0, 0);

    assert!(start_plan(
        &mut fix.world,
        player,
        ActionPlan::travel_to(),
        PlanSeed::new().at(TilePos::new(4, 0)),
    ));
    assert!(fix.world.player().unwrap().active_plan.is_some());

    stop_plan(&mut fix.world, player);
    assert!(fix.world.player().unwrap().active_plan.is_none());
    assert_eq!(fix.world.player().unwrap().position, TilePos::ORIGIN);

    // Stopping again is a quiet no-op.
    stop_plan(&mut fix.world, player);
}

#[test]
fn force_door_is_free_when_the_door_already_stands_open() {
    let router = ActionRouter::standard();
    let mut manager = TurnManager::new();
    let mut fix = Fixture::open(5, 1);
    let player = fix.spawn(0, 0, 0);
    let door = TilePos::new(3, 0);
    fix.world.set_prop(door, PropState::Door { open: true });

    assert!(start_plan(
        &mut fix.world,
        player,
        ActionPlan::force_door(),
        PlanSeed::new().at(door),
    ));

    let report = manager.process_unified_round(&mut fix.ctrl(), &router).unwrap();

    // Both steps skip: no movement, no turn spent, plan gone.
    assert_eq!(report.actions_executed, 0);
    assert_eq!(fix.world.player().unwrap().position, TilePos::ORIGIN);
    assert!(fix.world.player().unwrap().active_plan.is_none());
}

#[test]
fn force_door_walks_up_and_opens_a_closed_one() {
    let router = ActionRouter::standard();
    let mut manager = TurnManager::new();
    let mut fix = Fixture::open(5, 1);
    let player = fix.spawn(0, 0, 0);
    let door = TilePos::new(3, 0);
    fix.world.set_prop(door, PropState::closed_door());

    assert!(start_plan(
        &mut fix.world,
        player,
        ActionPlan::force_door(),
        PlanSeed::new().at(door),
    ));

    for _ in 0..3 {
        manager.process_unified_round(&mut fix.ctrl(), &router).unwrap();
    }

    assert_eq!(fix.world.prop_at(door), Some(&PropState::Door { open: true }));
    assert!(fix.world.player().unwrap().active_plan.is_none());
}

#[test]
fn plan_cancels_when_its_target_dies_mid_approach() {
    let router = ActionRouter::standard();
    let mut manager = TurnManager::new();
    let mut fix = Fixture::open(8, 1);
    fix.spawn(0, 7, 0);
    let hunter = fix.spawn(1, 0, 0);
    let prey = fix.spawn(2, 5, 0);

    assert!(start_plan(
        &mut fix.world,
        hunter,
        ActionPlan::melee_assault(),
        PlanSeed::new().target(prey),
    ));

    manager.process_unified_round(&mut fix.ctrl(), &router).unwrap();
    assert!(fix.world.actor(hunter).unwrap().active_plan.is_some());

    // The prey dies to something else before the hunter arrives.
    fix.world.damage_actor(prey, 99);
    for _ in 0..2 {
        manager.process_unified_round(&mut fix.ctrl(), &router).unwrap();
    }

    assert!(fix.world.actor(hunter).unwrap().active_plan.is_none());
}
