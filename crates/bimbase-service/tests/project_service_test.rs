//! Project service against the real DAO implementations.

use bimbase_config::{StorageBackend, StorageConfig};
use bimbase_core::{AggregateGroup, AggregateResult, DaoErrorKind, Project, ProjectStatus};
use bimbase_repository::{DaoBinder, InMemoryDao, NullDao};
use bimbase_service::{
    CreateProjectRequest, ProjectService, ProjectServiceImpl, RenameProjectRequest, RetryPolicy,
};
use std::sync::Arc;

fn memory_service() -> ProjectServiceImpl {
    ProjectServiceImpl::from_binder(&DaoBinder::default())
}

#[tokio::test]
async fn test_project_lifecycle() {
    let service = memory_service();

    let created = service
        .create_project(CreateProjectRequest::new("Bridge", "alice"))
        .await
        .unwrap();
    let id = created.id.unwrap();
    assert_eq!(service.get_project(id).await.unwrap(), created);

    let request = RenameProjectRequest {
        name: "Viaduct".to_string(),
    };
    assert_eq!(service.rename_project(id, request).await.unwrap().name, "Viaduct");

    let archived = service.archive_project(id).await.unwrap();
    assert_eq!(archived.status, ProjectStatus::Archived);

    assert!(service.delete_project(id).await.unwrap());
    assert!(!service.delete_project(id).await.unwrap());

    let err = service.get_project(id).await.unwrap_err();
    assert_eq!(err.kind(), Some(DaoErrorKind::NotFound));
}

#[tokio::test]
async fn test_list_is_scoped_and_sorted() {
    let service = memory_service();
    for (name, owner) in [("Tunnel", "alice"), ("Bridge", "alice"), ("Dam", "bob")] {
        service
            .create_project(CreateProjectRequest::new(name, owner))
            .await
            .unwrap();
    }

    let names: Vec<String> = service
        .list_projects(Some("alice"))
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Bridge", "Tunnel"]);
    assert_eq!(service.list_projects(None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_same_name_lists_in_creation_order() {
    let service = memory_service();
    let mut created = Vec::new();
    for description in ["first", "second", "third"] {
        let request = CreateProjectRequest::new("Bridge", "alice").with_description(description);
        created.push(service.create_project(request).await.unwrap().id);
    }

    let listed: Vec<_> = service
        .list_projects(Some("alice"))
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, created);
}

#[tokio::test]
async fn test_purge_and_count_by_status() {
    let service = memory_service();
    let mut ids = Vec::new();
    for name in ["a", "b", "c"] {
        let project = service
            .create_project(CreateProjectRequest::new(name, "alice"))
            .await
            .unwrap();
        ids.push(project.id.unwrap());
    }
    service.archive_project(ids[0]).await.unwrap();
    service.archive_project(ids[1]).await.unwrap();

    let counts = service.count_by_status().await.unwrap();
    assert_eq!(
        counts,
        AggregateResult::Groups(vec![
            AggregateGroup {
                key: ProjectStatus::Active.into(),
                count: 1,
            },
            AggregateGroup {
                key: ProjectStatus::Archived.into(),
                count: 2,
            },
        ])
    );

    assert_eq!(service.purge_archived("bob").await.unwrap(), 0);
    assert_eq!(service.purge_archived("alice").await.unwrap(), 2);
    assert_eq!(service.list_projects(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_save_project_upserts() {
    let service = memory_service();
    let draft = Project::new("Bridge", "alice");

    let inserted = service.save_project(draft).await.unwrap();
    let mut changed = inserted.clone();
    changed.rename("Viaduct");
    let updated = service.save_project(changed).await.unwrap();

    assert_eq!(updated.id, inserted.id);
    assert_eq!(service.list_projects(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_disabled_storage_is_silent() {
    let config = StorageConfig::default().with_entity("Project", StorageBackend::Disabled);
    let service = ProjectServiceImpl::from_config(&config);

    let created = service
        .create_project(CreateProjectRequest::new("Bridge", "alice"))
        .await
        .unwrap();
    assert!(created.id.is_none());

    assert!(service.list_projects(None).await.unwrap().is_empty());
    assert!(service.count_by_status().await.unwrap().is_none());
    assert_eq!(service.purge_archived("alice").await.unwrap(), 0);
}

#[tokio::test]
async fn test_with_dao_swaps_storage() {
    let service = memory_service().with_dao(Arc::new(NullDao::<Project>::new()));
    service
        .create_project(CreateProjectRequest::new("Bridge", "alice"))
        .await
        .unwrap();
    assert!(service.list_projects(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unavailable_storage_surfaces() {
    let dao = Arc::new(InMemoryDao::<Project>::new());
    dao.set_available(false);
    let service = ProjectServiceImpl::new(dao.clone()).with_retry(RetryPolicy::no_retry());

    let err = service.list_projects(None).await.unwrap_err();
    assert!(err.is_retriable());

    dao.set_available(true);
    assert!(service.list_projects(None).await.unwrap().is_empty());
}
