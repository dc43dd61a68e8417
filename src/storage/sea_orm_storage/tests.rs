//! 基于临时 SQLite 文件的存储层测试

use super::SeaOrmStorage;
use crate::models::ReorderOutcome;
use crate::models::contents::entities::{Item, ItemKind};
use crate::models::contents::requests::{ItemInput, ItemPayload};
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{CourseForm, CourseListQuery};
use crate::models::modules::requests::ModuleFormsetPlan;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest};
use crate::storage::Storage;
use sea_orm::Database;
use tempfile::TempDir;

async fn create_test_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("educa-test.db");
    let db = Database::connect(format!("sqlite:{}?mode=rwc", db_path.display()))
        .await
        .unwrap();
    let storage = SeaOrmStorage::from_connection(db).await.unwrap();
    (storage, temp_dir)
}

async fn create_instructor(storage: &SeaOrmStorage, username: &str) -> i64 {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "not-a-real-hash".to_string(),
            role: UserRole::Instructor,
            display_name: None,
            avatar_url: None,
        })
        .await
        .unwrap()
        .id
}

async fn create_course(storage: &SeaOrmStorage, owner_id: i64, slug: &str) -> Course {
    let subject = match storage.get_subject_by_slug("programming").await.unwrap() {
        Some(subject) => subject,
        None => storage
            .create_subject(CreateSubjectRequest {
                title: "Programming".to_string(),
                slug: "programming".to_string(),
            })
            .await
            .unwrap(),
    };
    storage
        .create_course(
            owner_id,
            CourseForm {
                subject_id: subject.id,
                title: format!("Course {slug}"),
                slug: slug.to_string(),
                overview: "Overview".to_string(),
            },
        )
        .await
        .unwrap()
}

fn text(title: &str) -> ItemInput {
    ItemInput {
        title: title.to_string(),
        payload: ItemPayload::Text {
            content: format!("{title} body"),
        },
    }
}

fn video(title: &str) -> ItemInput {
    ItemInput {
        title: title.to_string(),
        payload: ItemPayload::Video {
            url: "https://example.com/watch".to_string(),
        },
    }
}

#[tokio::test]
async fn test_module_orders_follow_creation_order() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let course = create_course(&storage, owner, "rust-101").await;

    for title in ["Intro", "Ownership", "Traits"] {
        storage
            .create_module(course.id, title.to_string(), String::new(), None)
            .await
            .unwrap();
    }

    let modules = storage
        .list_modules_for_owner(course.id, owner)
        .await
        .unwrap()
        .unwrap();
    let orders: Vec<_> = modules.iter().map(|m| (m.title.as_str(), m.order)).collect();
    assert_eq!(orders, vec![("Intro", 0), ("Ownership", 1), ("Traits", 2)]);
}

#[tokio::test]
async fn test_module_order_scoped_per_course() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let course_a = create_course(&storage, owner, "course-a").await;
    let course_b = create_course(&storage, owner, "course-b").await;

    for _ in 0..3 {
        storage
            .create_module(course_a.id, "A".to_string(), String::new(), None)
            .await
            .unwrap();
    }
    let first_in_b = storage
        .create_module(course_b.id, "B".to_string(), String::new(), None)
        .await
        .unwrap();

    assert_eq!(first_in_b.order, 0);
}

#[tokio::test]
async fn test_explicit_order_is_kept() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let course = create_course(&storage, owner, "rust-101").await;

    let module = storage
        .create_module(course.id, "Late".to_string(), String::new(), Some(5))
        .await
        .unwrap();
    assert_eq!(module.order, 5);

    let next = storage
        .create_module(course.id, "After".to_string(), String::new(), None)
        .await
        .unwrap();
    assert_eq!(next.order, 6);
}

#[tokio::test]
async fn test_content_orders_and_resolution() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let course = create_course(&storage, owner, "rust-101").await;
    let module = storage
        .create_module(course.id, "Intro".to_string(), String::new(), None)
        .await
        .unwrap();

    let (first, _) = storage
        .create_content_for_owner(module.id, owner, text("Notes"))
        .await
        .unwrap()
        .unwrap();
    let (second, item) = storage
        .create_content_for_owner(module.id, owner, video("Lecture"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first.order, 0);
    assert_eq!(second.order, 1);
    assert_eq!(second.content_type, ItemKind::Video);
    assert_eq!(second.object_id, item.id());

    let (_, details) = storage
        .list_contents_for_owner(module.id, owner)
        .await
        .unwrap()
        .unwrap();
    let kinds: Vec<_> = details.iter().map(|d| d.item.kind()).collect();
    assert_eq!(kinds, vec![ItemKind::Text, ItemKind::Video]);
    match &details[0].item {
        Item::Text(text) => assert_eq!(text.content, "Notes body"),
        other => panic!("unexpected item {other:?}"),
    }
}

#[tokio::test]
async fn test_non_owner_sees_nothing() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let intruder = create_instructor(&storage, "mallory").await;
    let course = create_course(&storage, owner, "rust-101").await;
    let module = storage
        .create_module(course.id, "Intro".to_string(), String::new(), None)
        .await
        .unwrap();
    let (content, item) = storage
        .create_content_for_owner(module.id, owner, text("Notes"))
        .await
        .unwrap()
        .unwrap();

    assert!(storage.get_course_for_owner(course.id, intruder).await.unwrap().is_none());
    assert!(storage.list_modules_for_owner(course.id, intruder).await.unwrap().is_none());
    assert!(storage.get_module_for_owner(module.id, intruder).await.unwrap().is_none());
    assert!(storage.list_contents_for_owner(module.id, intruder).await.unwrap().is_none());
    assert!(
        storage
            .create_content_for_owner(module.id, intruder, text("Spam"))
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .update_item_for_owner(item.id(), intruder, text("Hijacked"))
            .await
            .unwrap()
            .is_none()
    );
    assert!(!storage.delete_content_for_owner(content.id, intruder).await.unwrap());
    assert!(!storage.delete_course_for_owner(course.id, intruder).await.unwrap());

    let listed = storage
        .list_courses_for_owner(CourseListQuery {
            owner_id: intruder,
            page: None,
            size: None,
            search: None,
        })
        .await
        .unwrap();
    assert!(listed.items.is_empty());

    // 所有者的数据保持不变
    assert!(storage.get_course_for_owner(course.id, owner).await.unwrap().is_some());
    assert!(
        storage
            .get_item_for_owner(ItemKind::Text, item.id(), owner)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_reorder_modules_skips_foreign_ids() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let other = create_instructor(&storage, "bob").await;
    let mine = create_course(&storage, owner, "mine").await;
    let theirs = create_course(&storage, other, "theirs").await;

    let own_module = storage
        .create_module(mine.id, "Mine".to_string(), String::new(), None)
        .await
        .unwrap();
    let foreign_module = storage
        .create_module(theirs.id, "Theirs".to_string(), String::new(), None)
        .await
        .unwrap();

    let results = storage
        .reorder_modules_for_owner(owner, vec![(own_module.id, 2), (foreign_module.id, 9)])
        .await
        .unwrap();

    assert_eq!(
        results,
        vec![
            ReorderOutcome { id: own_module.id, updated: true },
            ReorderOutcome { id: foreign_module.id, updated: false },
        ]
    );
    let mine_after = storage.get_module_for_owner(own_module.id, owner).await.unwrap().unwrap();
    let theirs_after = storage
        .get_module_for_owner(foreign_module.id, other)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mine_after.order, 2);
    assert_eq!(theirs_after.order, 0);
}

#[tokio::test]
async fn test_reorder_contents_skips_foreign_and_missing_ids() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let other = create_instructor(&storage, "bob").await;
    let mine = create_course(&storage, owner, "mine").await;
    let theirs = create_course(&storage, other, "theirs").await;
    let my_module = storage
        .create_module(mine.id, "Mine".to_string(), String::new(), None)
        .await
        .unwrap();
    let their_module = storage
        .create_module(theirs.id, "Theirs".to_string(), String::new(), None)
        .await
        .unwrap();

    let (a, _) = storage
        .create_content_for_owner(my_module.id, owner, text("A"))
        .await
        .unwrap()
        .unwrap();
    let (b, _) = storage
        .create_content_for_owner(my_module.id, owner, text("B"))
        .await
        .unwrap()
        .unwrap();
    let (foreign, _) = storage
        .create_content_for_owner(their_module.id, other, text("X"))
        .await
        .unwrap()
        .unwrap();

    let results = storage
        .reorder_contents_for_owner(owner, vec![(a.id, 1), (b.id, 0), (foreign.id, 5), (9999, 3)])
        .await
        .unwrap();
    let updated: Vec<_> = results.iter().map(|r| r.updated).collect();
    assert_eq!(updated, vec![true, true, false, false]);

    let (_, details) = storage
        .list_contents_for_owner(my_module.id, owner)
        .await
        .unwrap()
        .unwrap();
    let ids: Vec<_> = details.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);

    let (_, theirs_after) = storage
        .list_contents_for_owner(their_module.id, other)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(theirs_after[0].order, 0);
}

#[tokio::test]
async fn test_delete_content_removes_item_of_each_kind() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let course = create_course(&storage, owner, "rust-101").await;
    let module = storage
        .create_module(course.id, "Intro".to_string(), String::new(), None)
        .await
        .unwrap();

    let inputs = vec![
        text("Text"),
        video("Video"),
        ItemInput {
            title: "File".to_string(),
            payload: ItemPayload::File {
                token: "file-token".to_string(),
            },
        },
        ItemInput {
            title: "Image".to_string(),
            payload: ItemPayload::Image {
                token: "image-token".to_string(),
            },
        },
    ];

    for input in inputs {
        let kind = input.payload.kind();
        let (content, item) = storage
            .create_content_for_owner(module.id, owner, input)
            .await
            .unwrap()
            .unwrap();

        assert!(storage.delete_content_for_owner(content.id, owner).await.unwrap());
        assert!(
            storage
                .get_item_for_owner(kind, item.id(), owner)
                .await
                .unwrap()
                .is_none(),
            "{kind} item should be gone"
        );
    }

    let (_, details) = storage
        .list_contents_for_owner(module.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert!(details.is_empty());
}

#[tokio::test]
async fn test_update_item_leaves_content_row_alone() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let course = create_course(&storage, owner, "rust-101").await;
    let module = storage
        .create_module(course.id, "Intro".to_string(), String::new(), None)
        .await
        .unwrap();
    let (content, item) = storage
        .create_content_for_owner(module.id, owner, text("Draft"))
        .await
        .unwrap()
        .unwrap();

    let updated = storage
        .update_item_for_owner(item.id(), owner, text("Final"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.base().title, "Final");

    let (_, details) = storage
        .list_contents_for_owner(module.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].id, content.id);
    assert_eq!(details[0].order, 0);
    assert_eq!(details[0].item.base().title, "Final");
}

#[tokio::test]
async fn test_update_missing_item_returns_none() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;

    assert!(
        storage
            .update_item_for_owner(4242, owner, text("Nothing"))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_formset_appends_after_existing_and_deletes_items() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let course = create_course(&storage, owner, "rust-101").await;
    let keep = storage
        .create_module(course.id, "Keep".to_string(), String::new(), None)
        .await
        .unwrap();
    let drop = storage
        .create_module(course.id, "Drop".to_string(), String::new(), None)
        .await
        .unwrap();
    let (_, dropped_item) = storage
        .create_content_for_owner(drop.id, owner, text("Gone"))
        .await
        .unwrap()
        .unwrap();

    let plan = ModuleFormsetPlan {
        creates: vec![("New".to_string(), "Fresh".to_string())],
        updates: vec![(keep.id, "Kept".to_string(), "Edited".to_string())],
        deletes: vec![drop.id],
    };
    let modules = storage
        .apply_module_formset(course.id, owner, plan)
        .await
        .unwrap()
        .unwrap();

    let summary: Vec<_> = modules
        .iter()
        .map(|m| (m.title.as_str(), m.description.as_str(), m.order))
        .collect();
    assert_eq!(summary, vec![("Kept", "Edited", 0), ("New", "Fresh", 1)]);
    assert!(
        storage
            .get_item_for_owner(ItemKind::Text, dropped_item.id(), owner)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_formset_on_foreign_course_is_rejected() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let intruder = create_instructor(&storage, "mallory").await;
    let course = create_course(&storage, owner, "rust-101").await;

    let plan = ModuleFormsetPlan {
        creates: vec![("Injected".to_string(), String::new())],
        ..Default::default()
    };
    assert!(
        storage
            .apply_module_formset(course.id, intruder, plan)
            .await
            .unwrap()
            .is_none()
    );
    let modules = storage
        .list_modules_for_owner(course.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert!(modules.is_empty());
}

#[tokio::test]
async fn test_formset_ignores_modules_of_other_courses() {
    let (storage, _temp_dir) = create_test_storage().await;
    let alice = create_instructor(&storage, "alice").await;
    let bob = create_instructor(&storage, "bob").await;
    let alice_course = create_course(&storage, alice, "alice-course").await;
    let bob_course = create_course(&storage, bob, "bob-course").await;
    let bob_module = storage
        .create_module(bob_course.id, "Bob's".to_string(), "Mine".to_string(), None)
        .await
        .unwrap();
    let (_, bob_item) = storage
        .create_content_for_owner(bob_module.id, bob, text("Bob notes"))
        .await
        .unwrap()
        .unwrap();

    let plan = ModuleFormsetPlan {
        creates: vec![],
        updates: vec![(bob_module.id, "Renamed".to_string(), String::new())],
        deletes: vec![bob_module.id],
    };
    let modules = storage
        .apply_module_formset(alice_course.id, alice, plan)
        .await
        .unwrap()
        .unwrap();
    assert!(modules.is_empty());

    // 另一课程的模块、内容与条目都保持原样
    let module = storage
        .get_module_for_owner(bob_module.id, bob)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(module.title, "Bob's");
    let (_, details) = storage
        .list_contents_for_owner(bob_module.id, bob)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.len(), 1);
    assert!(
        storage
            .get_item_for_owner(ItemKind::Text, bob_item.id(), bob)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_delete_course_removes_items() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let course = create_course(&storage, owner, "rust-101").await;
    let module = storage
        .create_module(course.id, "Intro".to_string(), String::new(), None)
        .await
        .unwrap();
    let (_, item) = storage
        .create_content_for_owner(module.id, owner, video("Lecture"))
        .await
        .unwrap()
        .unwrap();

    assert!(storage.delete_course_for_owner(course.id, owner).await.unwrap());
    assert!(storage.get_course_for_owner(course.id, owner).await.unwrap().is_none());
    assert!(storage.get_module_for_owner(module.id, owner).await.unwrap().is_none());
    assert!(
        storage
            .get_item_for_owner(ItemKind::Video, item.id(), owner)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_subjects_listed_by_title_with_course_counts() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    storage
        .create_subject(CreateSubjectRequest {
            title: "Mathematics".to_string(),
            slug: "mathematics".to_string(),
        })
        .await
        .unwrap();
    // create_course 会创建 "Programming" 学科
    create_course(&storage, owner, "one").await;
    create_course(&storage, owner, "two").await;

    let subjects = storage.list_subjects_with_course_count().await.unwrap();
    let summary: Vec<_> = subjects
        .iter()
        .map(|s| (s.subject.title.as_str(), s.total_courses))
        .collect();
    assert_eq!(summary, vec![("Mathematics", 0), ("Programming", 2)]);
}

#[tokio::test]
async fn test_course_slug_taken() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let course = create_course(&storage, owner, "rust-101").await;

    assert!(storage.course_slug_taken("rust-101", None).await.unwrap());
    assert!(!storage.course_slug_taken("rust-101", Some(course.id)).await.unwrap());
    assert!(!storage.course_slug_taken("go-101", None).await.unwrap());
}

#[tokio::test]
async fn test_courses_listed_newest_first_with_search() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let first = create_course(&storage, owner, "first").await;
    let second = create_course(&storage, owner, "second").await;

    let listed = storage
        .list_courses_for_owner(CourseListQuery {
            owner_id: owner,
            page: Some(1),
            size: Some(10),
            search: None,
        })
        .await
        .unwrap();
    let ids: Vec<_> = listed.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(listed.pagination.total, 2);

    let searched = storage
        .list_courses_for_owner(CourseListQuery {
            owner_id: owner,
            page: None,
            size: None,
            search: Some("first".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(searched.items.len(), 1);
    assert_eq!(searched.items[0].id, first.id);
}

#[tokio::test]
async fn test_course_search_treats_wildcards_literally() {
    let (storage, _temp_dir) = create_test_storage().await;
    let owner = create_instructor(&storage, "alice").await;
    let percent = create_course(&storage, owner, "percent").await;
    let plain = create_course(&storage, owner, "plain").await;
    let underscore = create_course(&storage, owner, "underscore").await;

    for (course, title) in [
        (&percent, "100% Rust"),
        (&plain, "1000 Rust"),
        (&underscore, "snake_case basics"),
    ] {
        storage
            .update_course_for_owner(
                course.id,
                owner,
                CourseForm {
                    subject_id: course.subject_id,
                    title: title.to_string(),
                    slug: course.slug.clone(),
                    overview: "Overview".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();
    }

    let search = |term: &str| CourseListQuery {
        owner_id: owner,
        page: None,
        size: None,
        search: Some(term.to_string()),
    };

    let found = storage.list_courses_for_owner(search("100%")).await.unwrap();
    let ids: Vec<_> = found.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![percent.id]);

    let found = storage.list_courses_for_owner(search("e_c")).await.unwrap();
    let ids: Vec<_> = found.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![underscore.id]);

    let found = storage.list_courses_for_owner(search("0 R")).await.unwrap();
    let ids: Vec<_> = found.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![plain.id]);
}

#[tokio::test]
async fn test_user_lookup_by_username_or_email() {
    let (storage, _dir) = create_test_storage().await;
    let id = create_instructor(&storage, "carol").await;

    let by_name = storage.get_user_by_username_or_email("carol").await.unwrap();
    let by_email = storage
        .get_user_by_username_or_email("carol@example.com")
        .await
        .unwrap();
    assert_eq!(by_name.map(|u| u.id), Some(id));
    assert_eq!(by_email.map(|u| u.id), Some(id));
    assert!(storage.get_user_by_username_or_email("dave").await.unwrap().is_none());
    assert_eq!(storage.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_user_profile_and_last_login() {
    let (storage, _dir) = create_test_storage().await;
    let id = create_instructor(&storage, "erin").await;

    let updated = storage
        .update_user(
            id,
            UpdateUserRequest {
                email: Some("erin@school.test".to_string()),
                display_name: Some("Erin".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.email, "erin@school.test");
    assert_eq!(updated.display_name.as_deref(), Some("Erin"));
    assert_eq!(updated.role, UserRole::Instructor);

    assert!(storage.update_last_login(id).await.unwrap());
    let user = storage.get_user_by_id(id).await.unwrap().unwrap();
    assert!(user.last_login.is_some());

    assert!(storage.update_user(9999, UpdateUserRequest::default()).await.unwrap().is_none());
    assert!(!storage.update_last_login(9999).await.unwrap());
}
