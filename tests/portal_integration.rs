//! End-to-end flows against the scripted transport.

use std::sync::Arc;

use serde_json::{Value, json};

use admin_portal::core::error::FetchError;
use admin_portal::core::loader::DataSource;
use admin_portal::core::{
    AdminApi, Coordinator, Gateway, Keyed, Method, MockTransport, OptimisticList, PageKey,
    RegionContent, load_session,
};
use admin_portal::models::{SystemStatus, UserDraft, UserList};
use admin_portal::modules::{self, LoadOptions, ModuleData};

fn api(mock: MockTransport) -> (AdminApi, Arc<MockTransport>) {
    let mock = Arc::new(mock);
    let gateway = Gateway::new(mock.clone()).with_base_url("https://api.test");
    (AdminApi::new(gateway), mock)
}

#[tokio::test]
async fn test_boot_with_unreachable_backend_uses_fallback_session() {
    let (api, mock) = api(MockTransport::new());

    let session = load_session(&api).await;

    assert_eq!(session.admin.name, "System Administrator");
    assert_eq!(session.system_status, SystemStatus::Operational);
    assert_eq!(session.source, DataSource::Placeholder);
    assert_eq!(mock.sent().len(), 2);
}

#[tokio::test]
async fn test_boot_mixes_remote_and_fallback_parts() {
    let (api, _) = api(
        MockTransport::new()
            .ok(Method::Get, "/admin/system/status", json!({ "status": "degraded" }))
            .fail(Method::Get, "/admin/profile", FetchError::Timeout),
    );

    let session = load_session(&api).await;

    assert_eq!(session.system_status, SystemStatus::Degraded);
    assert_eq!(session.admin.name, "System Administrator");
    assert!(session.source.is_placeholder());
}

#[tokio::test]
async fn test_every_page_renders_placeholder_when_backend_errors() {
    let mut mock = MockTransport::new();
    for path in [
        "/admin/dashboard",
        "/admin/users",
        "/admin/courses",
        "/admin/analytics",
        "/admin/ai/models",
    ] {
        mock = mock.status(Method::Get, path, 500);
    }
    let (api, _) = api(mock);

    for page in PageKey::ALL {
        let loaded = modules::load(page, &api, LoadOptions::default())
            .await
            .unwrap();
        assert!(loaded.source.is_placeholder(), "{}", page.key());
        assert_eq!(loaded.data, ModuleData::placeholder(page), "{}", page.key());
    }
}

#[tokio::test]
async fn test_slow_page_result_cannot_overwrite_newer_page() {
    let (api, _) = api(MockTransport::new());
    let mut coordinator: Coordinator<ModuleData> = Coordinator::new();
    coordinator.mount_region();

    let users = coordinator.navigate(PageKey::Users, false).unwrap();
    let courses = coordinator.navigate(PageKey::Courses, false).unwrap();

    let courses_data = modules::load(PageKey::Courses, &api, LoadOptions::default())
        .await
        .unwrap();
    assert!(coordinator.commit(courses, Ok(courses_data.data)));

    let users_data = modules::load(PageKey::Users, &api, LoadOptions::default())
        .await
        .unwrap();
    assert!(!coordinator.commit(users, Ok(users_data.data)));

    let region = coordinator.region().unwrap();
    assert_eq!(coordinator.current_page(), PageKey::Courses);
    assert!(matches!(
        &region.content,
        RegionContent::Ready(ModuleData::Courses(_))
    ));
}

#[tokio::test]
async fn test_retry_replaces_failed_region() {
    let mut coordinator: Coordinator<ModuleData> = Coordinator::new();
    coordinator.mount_region();

    let first = coordinator.navigate(PageKey::Analytics, false).unwrap();
    coordinator.commit(first, Err("render failed".to_string()));
    assert!(matches!(
        coordinator.region().map(|r| &r.content),
        Some(RegionContent::Failed(_))
    ));

    let second = coordinator.retry().unwrap();
    assert_eq!(second.page, PageKey::Analytics);
    assert!(!coordinator.is_current(first));
    assert!(coordinator.commit(second, Ok(ModuleData::placeholder(PageKey::Analytics))));
}

#[tokio::test]
async fn test_failed_update_rolls_back_optimistic_edit() {
    let (api, mock) = api(MockTransport::new().status(Method::Put, "/admin/users/user_001", 500));
    let original = UserList::placeholder().0;
    let mut list = OptimisticList::new(original.clone());

    let mut edited = original[0].clone();
    edited.name = "Renamed".to_string();
    let op = list.apply_update(edited.clone()).unwrap();
    assert_eq!(list.get("user_001").map(|u| u.name.as_str()), Some("Renamed"));

    let result = api
        .update_user(edited.key(), &UserDraft::from_user(&edited))
        .await
        .into_result();
    assert!(result.is_err());

    assert!(list.rollback(op));
    assert_eq!(list.items(), original.as_slice());
    assert!(!list.has_pending());
    assert_eq!(mock.sent()[0].method, Method::Put);
}

#[tokio::test]
async fn test_confirmed_create_takes_server_copy() {
    let server = json!({
        "id": "u100",
        "name": "Ada",
        "email": "ada@x.io",
        "role": "Educator",
        "status": "Active",
        "lastLogin": "2025-06-28T10:00:00Z",
        "joinDate": "2025-06-28"
    });
    let (api, _) = api(MockTransport::new().ok(Method::Post, "/admin/users", server));
    let mut list = OptimisticList::new(Vec::new());

    let mut local = UserList::placeholder().0[0].clone();
    local.id = "user_local".to_string();
    let op = list.apply_create(local.clone());

    let saved = api
        .create_user(&UserDraft::from_user(&local))
        .await
        .into_result()
        .unwrap();
    assert!(list.confirm(op, Some(saved)));

    assert!(list.get("user_local").is_none());
    assert_eq!(list.get("u100").map(|u| u.name.as_str()), Some("Ada"));
}

#[tokio::test]
async fn test_accepted_update_without_payload_keeps_local_edit() {
    let (api, _) = api(MockTransport::new().ok(Method::Put, "/admin/users/user_001", Value::Null));
    let mut list = OptimisticList::new(UserList::placeholder().0);

    let mut edited = list.items()[0].clone();
    edited.name = "Renamed".to_string();
    let op = list.apply_update(edited.clone()).unwrap();

    let server_copy = api
        .update_user(edited.key(), &UserDraft::from_user(&edited))
        .await
        .into_optional()
        .unwrap();
    assert_eq!(server_copy, None);

    assert!(list.confirm(op, server_copy));
    assert_eq!(list.get("user_001").map(|u| u.name.as_str()), Some("Renamed"));
    assert!(!list.has_pending());
}

#[tokio::test]
async fn test_accepted_delete_without_payload_confirms() {
    let (api, _) = api(MockTransport::new().ok(
        Method::Delete,
        "/admin/courses/course_001",
        Value::Null,
    ));

    let result = api.delete_course("course_001").await.into_optional();
    assert_eq!(result, Ok(None));
}
