//! Behaviour of the null-object DAO bound for disabled features.

mod common;

use bimbase_core::{Entity, Filter, OrderBy, Project, ProjectId};
use bimbase_repository::conformance::check_null_object;
use bimbase_repository::{Dao, NullDao};
use common::{IfcModel, ModelId};
use futures::executor::block_on;
use proptest::prelude::*;
use std::sync::Arc;

#[tokio::test]
async fn test_project_scenario() {
    let dao: Arc<dyn Dao<Project>> = Arc::new(NullDao::<Project>::new());

    let all = dao.select(&Filter::new(), &OrderBy::none()).await.unwrap();
    assert!(all.is_empty());

    // "projectId-123" is not a valid UUID; any well-formed id behaves the same.
    let probe = ProjectId::parse("550e8400-e29b-41d4-a716-446655440123").unwrap();
    assert!(dao.select_by_id(&probe).await.unwrap().is_none());

    let draft = Project::new("Test project", "alice");
    let returned = dao.insert(&draft).await.unwrap();
    assert_eq!(returned, draft);
    assert!(returned.id.is_none());

    assert!(!dao.delete(&probe).await.unwrap());
}

#[tokio::test]
async fn test_null_object_conformance_for_projects() {
    let dao = NullDao::<Project>::new();
    let sample = Project::new("Bridge", "alice").with_description("Steel truss");
    check_null_object::<Project>(&dao, &sample, &ProjectId::new()).await.unwrap();
}

#[tokio::test]
async fn test_null_object_conformance_for_models() {
    let dao = NullDao::<IfcModel>::new();
    check_null_object::<IfcModel>(&dao, &IfcModel::new("bridge", "structural", 3), &ModelId(99))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_null_object_accepts_invalid_entities() {
    // No validation: the null object never fails.
    let dao = NullDao::<Project>::new();
    let invalid = Project::new("", "");
    assert_eq!(dao.insert(&invalid).await.unwrap(), invalid);
}

#[tokio::test]
async fn test_shared_across_tasks() {
    let dao: Arc<dyn Dao<Project>> = Arc::new(NullDao::<Project>::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let dao = Arc::clone(&dao);
            tokio::spawn(async move {
                let project = Project::new(format!("p{}", i), "alice");
                dao.insert(&project).await.unwrap() == project
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}

proptest! {
    #[test]
    fn writes_are_identity(name in "[A-Za-z ]{0,40}", owner in "[a-z]{0,10}", with_id in any::<bool>()) {
        let dao = NullDao::<Project>::new();
        let mut project = Project::new(name, owner);
        if with_id {
            project = project.with_id(ProjectId::new());
        }

        prop_assert_eq!(block_on(dao.insert(&project)).unwrap(), project.clone());
        prop_assert_eq!(block_on(dao.update(&project)).unwrap(), project.clone());
        prop_assert_eq!(block_on(dao.insert_or_update(&project)).unwrap(), project);
    }

    #[test]
    fn reads_are_always_empty(field in "[a-z]{1,8}", value in any::<i64>(), order in prop::collection::vec("[a-z]{1,8}", 0..4)) {
        let dao = NullDao::<Project>::new();
        let filter = Filter::new().eq(field, value);
        let order: OrderBy = order.into_iter().collect();

        prop_assert!(block_on(dao.select(&filter, &order)).unwrap().is_empty());
        prop_assert!(block_on(dao.select_by_id(&ProjectId::new())).unwrap().is_none());
        prop_assert_eq!(block_on(dao.delete_where(&filter)).unwrap(), 0);
    }
}
