mod common;

use elevator_fleet::config::Settings;
use elevator_fleet::errors::FleetError;
use elevator_fleet::repositories::{SystemDirectory, SystemRepository};
use elevator_fleet::models::SystemId;
use common::{create_mock_settings, rider};

#[test]
fn test_default_configuration_loads() {
    let settings = Settings::new().unwrap();

    assert!(!settings.fleet.systems.is_empty());
    assert!(settings.events.channel_capacity > 0);
    assert!(settings
        .simulation
        .riders
        .iter()
        .all(|rider| rider.pickup_floor != rider.destination_floor));
}

#[test]
fn test_validation_rejects_unusable_settings() {
    let mut settings = create_mock_settings(2, 10);
    assert!(settings.validate().is_ok());

    settings.events.channel_capacity = 0;
    assert!(matches!(settings.validate(), Err(FleetError::ConfigError(_))));

    let mut settings = create_mock_settings(2, 0);
    assert!(matches!(settings.validate(), Err(FleetError::ConfigError(_))));

    settings.fleet.systems[0].max_floors = 10;
    settings.simulation.riders = vec![rider(-1, 4)];
    assert!(matches!(settings.validate(), Err(FleetError::ConfigError(_))));
}

#[tokio::test]
async fn test_system_repository_registration() {
    let systems = SystemRepository::new();

    let tower = systems.register("Tower", 4, 20).unwrap();
    let annex = systems.register("Annex", 1, 3).unwrap();
    assert_ne!(tower.id, annex.id);

    assert_eq!(systems.max_floors(tower.id).await.unwrap(), 20);
    assert_eq!(systems.list_systems().await, vec![tower, annex]);
    assert!(matches!(systems.get_system(SystemId(77)).await, Err(FleetError::SystemNotFound(_))));
    assert!(matches!(systems.register("Empty", 1, 0), Err(FleetError::ConfigError(_))));
}
