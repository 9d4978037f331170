//! Concurrent readers against a reloading role set handle

mod common;

use common::{init_logging, ROLES_OK};
use horizon_rbac::{AccessRequest, RoleService, RoleSetHandle, RoleSetLoader};
use std::sync::Arc;

const ROLES_V2: &str = r#"
RolePriorityRankDesc: [owner, maintainer, guest]
Roles:
  - name: owner
    rules:
      - {apiGroups: "*", resources: "*", verbs: "*", scopes: "*", nonResourceURLs: "*"}
  - name: maintainer
    rules:
      - {apiGroups: ["/api/core/v1/*"], resources: [clusters], verbs: [get], scopes: "*"}
  - name: guest
    rules:
      - {apiGroups: ["/api/core/v1/*"], resources: [groups], verbs: [get], scopes: "*"}
"#;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_see_whole_role_sets_during_reload() {
    init_logging();
    let loader = RoleSetLoader::default();
    let handle = Arc::new(RoleSetHandle::new());
    handle.reload(ROLES_OK.as_bytes(), &loader).unwrap();

    let mut readers = Vec::new();
    for _ in 0..8 {
        let handle = Arc::clone(&handle);
        readers.push(tokio::spawn(async move {
            for _ in 0..500 {
                // Every snapshot is one of the two complete definitions
                let snapshot = handle.snapshot().expect("role set installed");
                let names: Vec<&str> = snapshot.ranked().map(|r| r.name.as_str()).collect();
                assert!(
                    names == ["owner", "maintainer"] || names == ["owner", "maintainer", "guest"],
                    "torn role set: {:?}",
                    names
                );
                assert_eq!(names.len(), snapshot.priority_rank().len());
                tokio::task::yield_now().await;
            }
        }));
    }

    let writer = {
        let handle = Arc::clone(&handle);
        tokio::spawn(async move {
            let loader = RoleSetLoader::default();
            for i in 0..100 {
                let definition = if i % 2 == 0 { ROLES_V2 } else { ROLES_OK };
                handle.reload(definition.as_bytes(), &loader).unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }

    // Last reload installed the reference definition
    assert_eq!(handle.list_roles().unwrap().len(), 2);
}

#[tokio::test]
async fn test_failed_reload_is_invisible_to_readers() {
    let loader = RoleSetLoader::default();
    let handle = RoleSetHandle::from_role_set(ROLES_V2.parse().unwrap());

    let broken = "RolePriorityRankDesc: [owner, maintainer]\nRoles:\n  - name: owner\n";
    assert!(handle.reload(broken.as_bytes(), &loader).is_err());

    let guest = handle.get_role("guest").unwrap();
    assert!(handle.is_allowed(
        &guest,
        &AccessRequest::resource("/api/core/v1/*", "groups", "get", "x")
    ));
    assert_eq!(handle.list_roles().unwrap().len(), 3);
}

#[test]
fn test_role_set_shared_across_threads() {
    let set = Arc::new(ROLES_V2.parse::<horizon_rbac::RoleSet>().unwrap());
    let request = AccessRequest::resource("/api/core/v1/*", "clusters", "get", "x");

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let set = Arc::clone(&set);
            let request = request.clone();
            scope.spawn(move || {
                for role in set.list_roles().unwrap() {
                    let allowed = set.is_allowed(&role, &request);
                    assert_eq!(allowed, role.name != "guest");
                }
            });
        }
    });
}
