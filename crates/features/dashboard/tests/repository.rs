mod common;

use common::{FailingDashboard, wired_container};
use std::sync::Arc;
use thw_dashboard::{DASHBOARD_TITLE, DashboardError, DashboardRepository, DashboardViewModel};
use thw_kernel::{ContainerError, Lifetime, ViewModel};

#[tokio::test]
async fn mock_dashboard_is_exact() {
    let container = wired_container();
    let repository = container.resolve::<dyn DashboardRepository>().unwrap();
    let composition = repository.fetch_dashboard_data().await.unwrap();

    assert_eq!(composition.title, DASHBOARD_TITLE);
    let modules: Vec<_> = composition
        .modules
        .iter()
        .map(|m| (m.id.as_str(), m.name.as_str(), m.is_enabled))
        .collect();
    assert_eq!(
        modules,
        [
            ("sonarr", "Sonarr", true),
            ("radarr", "Radarr", true),
            ("lidarr", "Lidarr", false),
            ("overseerr", "Overseerr", true),
        ]
    );
}

#[tokio::test]
async fn repository_is_transient() {
    let container = wired_container();
    assert_eq!(container.lifetime_of::<dyn DashboardRepository>(), Some(Lifetime::Transient));

    let a = container.resolve::<dyn DashboardRepository>().unwrap();
    let b = container.resolve::<dyn DashboardRepository>().unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn repository_needs_its_capabilities() {
    let container = thw_kernel::Container::new();
    thw_dashboard::register(&container);
    let err = container.resolve::<dyn DashboardRepository>().err().unwrap();
    assert!(matches!(err, ContainerError::Unregistered { .. }));
}

#[tokio::test]
async fn view_model_loads_on_appear() {
    let container = wired_container();
    let vm = DashboardViewModel::new(container.resolve().unwrap());
    assert!(vm.composition().is_none());

    vm.on_view_appear().await;

    assert!(!vm.is_loading());
    assert!(vm.error().is_none());
    let ids: Vec<_> = vm.enabled_modules().into_iter().map(|m| m.id).collect();
    assert_eq!(ids, ["sonarr", "radarr", "overseerr"]);
}

#[tokio::test]
async fn view_model_records_network_failures() {
    let vm = DashboardViewModel::new(Arc::new(FailingDashboard));

    let err = vm.load().await.unwrap_err();
    assert!(matches!(err, DashboardError::Network { .. }));

    let recorded = vm.error().unwrap();
    assert_eq!(recorded.message(), err.to_string());
    assert!(recorded.chain().iter().any(|c| c.contains("offline")));
    assert!(!vm.is_loading());
    assert!(vm.enabled_modules().is_empty());

    vm.clear_error();
    assert!(vm.error().is_none());
}
