mod common;

use std::sync::Arc;
use elevator_fleet::controllers::FleetController;
use elevator_fleet::errors::FleetError;
use elevator_fleet::event_handling::EventHandler;
use elevator_fleet::models::{DoorStatus, FleetEvent, MovementStatus, RequestId, RequestStatus};
use common::{assert_invariants, build_fleet, build_fleet_with, create_mock_settings, rider};

#[tokio::test]
async fn test_maintenance_evicts_boarded_riders() {
    let fleet = build_fleet(1, 10);
    let manager = &fleet.state_manager;
    let elevator_id = fleet.elevator(0);
    fleet.place_idle(elevator_id, 4).await;

    let first = manager.create_request(4).await.unwrap();
    let second = manager.create_request(4).await.unwrap();
    assert_eq!(first.status, RequestStatus::Boarded);
    assert_eq!(second.status, RequestStatus::Boarded);
    manager.toggle_door(elevator_id).await.unwrap();

    let elevator = manager.enter_maintenance(elevator_id).await.unwrap();

    assert!(elevator.under_maintenance);
    assert_eq!(elevator.current_floor, 0);
    assert_eq!(elevator.door_status, DoorStatus::Closed);
    assert_eq!(elevator.movement_status, MovementStatus::Idle);
    assert_eq!(elevator.next_floor, None);
    assert_invariants(&elevator);

    for request_id in [first.id, second.id] {
        assert_eq!(manager.get_request(request_id).unwrap().status, RequestStatus::Fulfilled);
    }
    assert!(manager.get_pending_requests(elevator_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_maintenance_clears_travel_and_is_idempotent() {
    let fleet = build_fleet(1, 10);
    let manager = &fleet.state_manager;
    let elevator_id = fleet.elevator(0);
    let request = manager.create_request(6).await.unwrap();
    manager.advance_elevator(elevator_id).await.unwrap();

    let first = manager.enter_maintenance(elevator_id).await.unwrap();
    let second = manager.enter_maintenance(elevator_id).await.unwrap();

    assert_eq!(manager.get_request(request.id).unwrap().status, RequestStatus::Fulfilled);
    assert_eq!(first.current_floor, second.current_floor);
    assert_eq!(first.next_floor, second.next_floor);
    assert_eq!(first.movement_status, second.movement_status);
    assert_eq!(first.door_status, second.door_status);
    assert!(second.under_maintenance);
}

#[tokio::test]
async fn test_toggle_door_flips_only_the_door() {
    let fleet = build_fleet(1, 10);
    let elevator_id = fleet.elevator(0);
    let before = fleet.state_manager.get_elevator(elevator_id).await.unwrap();

    let opened = fleet.state_manager.toggle_door(elevator_id).await.unwrap();
    assert_eq!(opened.door_status, DoorStatus::Open);
    assert_eq!(opened.current_floor, before.current_floor);
    assert_eq!(opened.movement_status, before.movement_status);
    assert_eq!(opened.next_floor, before.next_floor);

    let closed = fleet.state_manager.toggle_door(elevator_id).await.unwrap();
    assert_eq!(closed.door_status, DoorStatus::Closed);
}

#[tokio::test]
async fn test_set_destination_validation() {
    let fleet = build_fleet(2, 10);
    let manager = &fleet.state_manager;

    let waiting = manager.create_request(0).await.unwrap();
    let result = manager.set_destination(waiting.id, 0).await;
    assert!(matches!(result, Err(FleetError::SameFloor { floor: 0, .. })));

    let result = manager.set_destination(waiting.id, -3).await;
    assert!(matches!(result, Err(FleetError::InvalidFloor(-3))));

    let result = manager.set_destination(RequestId(999), 3).await;
    assert!(matches!(result, Err(FleetError::RequestNotFound(_))));

    let far_away = manager.create_request(5).await.unwrap();
    let result = manager.set_destination(far_away.id, 2).await;
    assert!(matches!(result, Err(FleetError::ElevatorNotArrived { request_id, .. }) if request_id == far_away.id));

    let updated = manager.set_destination(waiting.id, 7).await.unwrap();
    assert_eq!(updated.destination_floor, Some(7));
    assert_eq!(manager.get_request(waiting.id).unwrap().destination_floor, Some(7));

    let evicted_elevator = far_away.elevator_id.unwrap();
    manager.enter_maintenance(evicted_elevator).await.unwrap();
    let result = manager.set_destination(far_away.id, 2).await;
    assert!(matches!(result, Err(FleetError::AlreadyFulfilled(_))));
}

#[tokio::test]
async fn test_event_handler_collects_trip_stats() {
    let fleet = build_fleet(1, 10);
    let manager = fleet.state_manager.clone();
    let elevator_id = fleet.elevator(0);
    let handler = EventHandler::new(fleet.events);

    let request = manager.create_request(3).await.unwrap();
    manager.advance_elevator(elevator_id).await.unwrap();
    manager.set_destination(request.id, 5).await.unwrap();
    manager.advance_elevator(elevator_id).await.unwrap();
    manager.toggle_door(elevator_id).await.unwrap();
    manager.toggle_door(elevator_id).await.unwrap();
    let _ = manager.advance_elevator(elevator_id).await;

    let processed = handler.drain().await;
    // Assigned, woken, two moves, boarding, destination, delivery, two door toggles, idled.
    assert_eq!(processed, 10);

    let stats = handler.stats_for(elevator_id);
    assert_eq!(stats.moves, 2);
    assert_eq!(stats.floors_travelled, 5);
    assert_eq!(stats.boardings, 1);
    assert_eq!(stats.deliveries, 1);
    assert_eq!(stats.door_toggles, 2);
    assert_eq!(handler.all_stats().len(), 1);
}

#[tokio::test]
async fn test_event_handler_counts_evictions() {
    let fleet = build_fleet(1, 10);
    let elevator_id = fleet.elevator(0);
    let manager = fleet.state_manager.clone();
    let handler = EventHandler::new(fleet.events);

    manager.create_request(0).await.unwrap();
    manager.create_request(0).await.unwrap();
    manager.enter_maintenance(elevator_id).await.unwrap();

    handler.drain().await;
    assert_eq!(handler.stats_for(elevator_id).evictions, 2);
}

#[tokio::test]
async fn test_event_is_serialisable() {
    let fleet = build_fleet(1, 10);
    let elevator_id = fleet.elevator(0);
    let mut events = fleet.events;
    fleet.state_manager.toggle_door(elevator_id).await.unwrap();

    let event = events.try_recv().unwrap();
    assert!(matches!(event, FleetEvent::DoorToggled(_)));
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("DoorToggled"));
    assert!(json.contains("Open"));
}

#[tokio::test]
async fn test_full_event_channel_never_blocks_operations() {
    let mut settings = create_mock_settings(1, 10);
    settings.events.channel_capacity = 1;
    let fleet = build_fleet_with(settings);
    let elevator_id = fleet.elevator(0);

    for _ in 0..5 {
        fleet.state_manager.toggle_door(elevator_id).await.unwrap();
    }

    let elevator = fleet.state_manager.get_elevator(elevator_id).await.unwrap();
    assert_eq!(elevator.door_status, DoorStatus::Open);
}

#[tokio::test]
async fn test_fleet_controller_delivers_scripted_riders() {
    let mut settings = create_mock_settings(2, 10);
    settings.simulation.riders = vec![rider(0, 7), rider(5, 1)];
    let fleet = build_fleet_with(settings.clone());
    let state_manager = Arc::new(fleet.state_manager.clone());
    let controller = FleetController::new(Arc::new(settings), Arc::clone(&state_manager));

    assert_eq!(controller.submit_riders().await, 2);
    assert_eq!(controller.riders_remaining(), 2);

    let first_cycle = controller.run_stepping_cycle().await.unwrap();
    assert_eq!(first_cycle.destinations_set, 1);
    assert_eq!(first_cycle.advanced, 1);

    let mut cycles = 1;
    while controller.riders_remaining() > 0 && cycles < 20 {
        controller.run_stepping_cycle().await.unwrap();
        cycles += 1;
    }
    assert_eq!(controller.riders_remaining(), 0);

    let settle = controller.run_stepping_cycle().await.unwrap();
    assert_eq!(settle.rejected, 0);

    for request in state_manager.list_requests() {
        assert_eq!(request.status, RequestStatus::Fulfilled);
    }
    for elevator in state_manager.list_elevators().await {
        assert_invariants(&elevator);
        assert_eq!(elevator.movement_status, MovementStatus::Idle);
    }
}

#[tokio::test]
async fn test_install_system_provisions_idle_elevators() {
    let fleet = build_fleet(3, 10);

    let elevators = fleet.state_manager.list_elevators().await;
    assert_eq!(elevators.len(), 3);
    for elevator in elevators {
        assert_eq!(elevator.current_floor, 0);
        assert_eq!(elevator.door_status, DoorStatus::Closed);
        assert!(!elevator.under_maintenance);
        assert_invariants(&elevator);
    }

    let system = fleet.systems.register("Annex", 2, 4).unwrap();
    let added = fleet.state_manager.install_system(&system);
    assert_eq!(added.len(), 2);
    assert_eq!(fleet.state_manager.list_elevators().await.len(), 5);
}

#[tokio::test]
async fn test_panicked_task_converts_to_task_join_error() {
    let task = tokio::spawn(async {
        panic!("advance task crashed");
    });

    let error: FleetError = task.await.unwrap_err().into();
    assert!(matches!(error, FleetError::TaskJoinError(ref message) if message.contains("panic")));
}
