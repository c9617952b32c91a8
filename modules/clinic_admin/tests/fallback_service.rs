//! Behaviour of the façades while the remote service is unreachable.
//!
//! Every test builds its own store, so state never leaks between tests.

mod common;

use std::time::Duration;

use chrono::{Local, Utc};

use clinic_admin::domain::seed::SeedData;
use clinic_admin::error::ClinicError;
use clinic_admin::model::{
    ExaminationPatch, ExaminationQuery, NewExamination, NewUser, Role, UserPatch, UserQuery,
};

use common::{examination, offline_admin, user};

fn new_patient(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        role: Role::Patient,
        telephone: Some("+62-811-000".to_string()),
        address: None,
    }
}

#[tokio::test]
async fn seeded_users_are_listed_in_insertion_order() {
    let (admin, _) = offline_admin(SeedData::demo());

    let users = admin.users_api().list_users(UserQuery::default()).await.unwrap();
    let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn repeated_listing_without_mutation_is_stable() {
    let (admin, _) = offline_admin(SeedData::demo());
    let api = admin.users_api();

    let first = api.list_users(UserQuery::default()).await.unwrap();
    let second = api.list_users(UserQuery::default()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn role_filter_returns_ordered_subset() {
    let (admin, _) = offline_admin(SeedData::demo());
    let api = admin.users_api();

    let all = api.list_users(UserQuery::default()).await.unwrap();
    let staff = api.list_users(UserQuery::role(Role::Staff)).await.unwrap();

    assert!(staff.iter().all(|u| u.role == Role::Staff));
    let expected: Vec<_> = all.into_iter().filter(|u| u.role == Role::Staff).collect();
    assert_eq!(staff, expected);
    assert_eq!(staff.len(), 2);
}

#[tokio::test]
async fn search_matches_name_or_email_ignoring_case() {
    let (admin, _) = offline_admin(SeedData::demo());

    let by_name = admin
        .users_api()
        .list_users(UserQuery {
            role: None,
            search: Some("ALICE".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, "3");

    let by_email = admin
        .users_api()
        .list_users(UserQuery {
            role: Some(Role::Staff),
            search: Some("emily@".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].name, "Dr. Emily Davis");
}

#[tokio::test]
async fn created_user_appears_in_later_listings() {
    let (admin, _) = offline_admin(SeedData::demo());
    let api = admin.users_api();

    let before = Utc::now();
    let created = api
        .create_user(new_patient("Citra Lestari", "citra@patient.example"))
        .await
        .unwrap();
    let after = Utc::now();

    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Citra Lestari");
    assert_eq!(created.email, "citra@patient.example");
    assert_eq!(created.role, Role::Patient);
    assert_eq!(created.telephone.as_deref(), Some("+62-811-000"));
    assert!(created.created_at >= before && created.created_at <= after);

    let users = api.list_users(UserQuery::default()).await.unwrap();
    assert_eq!(users.len(), 6);
    assert_eq!(users.last(), Some(&created));
}

#[tokio::test]
async fn created_ids_are_unique() {
    let (admin, _) = offline_admin(SeedData::default());
    let api = admin.users_api();

    let a = api.create_user(new_patient("A", "a@x.example")).await.unwrap();
    let b = api.create_user(new_patient("B", "b@x.example")).await.unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn invalid_user_is_rejected_before_storing() {
    let (admin, transport) = offline_admin(SeedData::default());
    let api = admin.users_api();

    let err = api
        .create_user(new_patient("  ", "nobody@x.example"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicError::Validation { .. }));

    let err = api
        .create_user(new_patient("Nobody", "not-an-email"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicError::Validation { .. }));

    assert_eq!(transport.calls(), 0);
    assert!(admin.store().users().is_empty());
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let (admin, _) = offline_admin(SeedData::demo());

    let updated = admin
        .users_api()
        .update_user(
            "4",
            UserPatch {
                address: Some("1 New Street".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Bob Brown");
    assert_eq!(updated.role, Role::Patient);
    assert_eq!(updated.address.as_deref(), Some("1 New Street"));
}

#[tokio::test]
async fn update_of_unknown_user_is_not_found() {
    let (admin, _) = offline_admin(SeedData::demo());

    let err = admin
        .users_api()
        .update_user(
            "999",
            UserPatch {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn deleting_twice_fails_the_second_time() {
    let (admin, _) = offline_admin(SeedData::demo());
    let api = admin.users_api();

    api.delete_user("3").await.unwrap();
    let users = api.list_users(UserQuery::default()).await.unwrap();
    assert!(users.iter().all(|u| u.id != "3"));

    let err = api.delete_user("3").await.unwrap_err();
    assert_eq!(err, ClinicError::not_found("User", "3"));
}

#[tokio::test]
async fn examination_crud_round_trip() {
    let (admin, _) = offline_admin(SeedData::demo());
    let api = admin.examinations_api();

    let created = api
        .create_examination(NewExamination {
            tanggal: Local::now().date_naive(),
            skor: 7.0,
            usia: 31,
            jenis_kelamin: "P".to_string(),
            alamat: "Jl. Sudirman 5".to_string(),
            lama_sakit: "1 minggu".to_string(),
            pasien: None,
        })
        .await
        .unwrap();
    assert_eq!(created.created_at, created.updated_at);

    tokio::time::sleep(Duration::from_millis(5)).await;
    let updated = api
        .update_examination(
            &created.id,
            ExaminationPatch {
                skor: Some(9.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.skor, 9.5);
    assert_eq!(updated.alamat, "Jl. Sudirman 5");
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);

    api.delete_examination(&created.id).await.unwrap();
    let err = api.delete_examination(&created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn negative_score_is_a_validation_error() {
    let (admin, _) = offline_admin(SeedData::demo());

    let err = admin
        .examinations_api()
        .update_examination(
            "1",
            ExaminationPatch {
                skor: Some(-1.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicError::Validation { .. }));
}

#[tokio::test]
async fn examination_search_looks_at_patient_name() {
    let (admin, _) = offline_admin(SeedData::demo());

    let exams = admin
        .examinations_api()
        .list_examinations(ExaminationQuery {
            search: Some("alice".to_string()),
        })
        .await
        .unwrap();

    let ids: Vec<&str> = exams.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
}

#[tokio::test]
async fn stats_count_roles_and_todays_examinations() {
    let admin_user = user("1", "Ada Admin", Role::Admin);
    let staff_user = user("2", "Sam Staff", Role::Staff);
    let p1 = user("3", "Pat One", Role::Patient);
    let p2 = user("4", "Pat Two", Role::Patient);
    let today = Local::now().date_naive();
    let long_ago = today - chrono::Duration::days(40);

    let seed = SeedData {
        examinations: vec![
            examination("1", today, Some(&p1)),
            examination("2", long_ago, Some(&p2)),
            examination("3", long_ago, Some(&p1)),
        ],
        users: vec![admin_user, staff_user, p1, p2],
        assignments: vec![],
    };
    let (admin, _) = offline_admin(seed);

    let stats = admin.dashboard_api().stats().await.unwrap();
    assert_eq!(stats.total_users, 4);
    assert_eq!(stats.total_examinations, 3);
    assert_eq!(stats.admin_count, 1);
    assert_eq!(stats.staff_count, 1);
    assert_eq!(stats.active_staff, 1);
    assert_eq!(stats.patient_count, 2);
    assert_eq!(stats.today_examinations, 1);

    let from_lists = admin.dashboard_api().stats_from_lists().await.unwrap();
    assert_eq!(from_lists, stats);
}

#[tokio::test]
async fn trend_series_have_fixed_bucket_counts() {
    let (admin, _) = offline_admin(SeedData::demo());
    let api = admin.dashboard_api();

    let daily = api.examination_trends().await.unwrap();
    assert_eq!(daily.len(), 7);
    assert_eq!(
        daily.last().map(|p| p.label.clone()),
        Some(Local::now().date_naive().format("%Y-%m-%d").to_string())
    );

    let weekly = api.monthly_stats().await.unwrap();
    let labels: Vec<&str> = weekly.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["Week 1", "Week 2", "Week 3", "Week 4"]);
}

#[tokio::test]
async fn assigning_to_unknown_staff_is_not_found() {
    let (admin, _) = offline_admin(SeedData::demo());

    let err = admin
        .staff_api()
        .assign_patient("staff-not-existing", "3")
        .await
        .unwrap_err();
    assert_eq!(err, ClinicError::not_found("Staff", "staff-not-existing"));

    // A patient id is not a staff id.
    let err = admin.staff_api().assign_patient("3", "4").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn assignment_lifecycle() {
    let (admin, _) = offline_admin(SeedData::demo());
    let api = admin.staff_api();

    let before = api.staff_patients("5").await.unwrap();
    assert_eq!(before.len(), 1);

    let assignment = api.assign_patient("5", "3").await.unwrap();
    assert_eq!(assignment.staff_name.as_deref(), Some("Dr. Emily Davis"));
    assert_eq!(assignment.patient_name.as_deref(), Some("Alice Johnson"));

    let patients = api.staff_patients("5").await.unwrap();
    let ids: Vec<&str> = patients.iter().map(|a| a.patient_id.as_str()).collect();
    assert_eq!(ids, ["4", "3"]);

    api.unassign_patient("5", "3").await.unwrap();
    let err = api.unassign_patient("5", "3").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(api.staff_patients("5").await.unwrap(), before);
}

#[tokio::test]
async fn staff_examinations_follow_assignments() {
    let (admin, _) = offline_admin(SeedData::demo());

    let exams = admin.staff_api().staff_examinations("2").await.unwrap();
    let ids: Vec<&str> = exams.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);

    assert!(admin
        .staff_api()
        .staff_examinations("1")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn degraded_layer_stops_calling_the_remote_service() {
    let (admin, transport) = offline_admin(SeedData::demo());
    let api = admin.users_api();

    api.list_users(UserQuery::default()).await.unwrap();
    assert!(admin.is_degraded());
    let after_first = transport.calls();

    api.list_users(UserQuery::default()).await.unwrap();
    api.list_users(UserQuery::role(Role::Admin)).await.unwrap();
    assert_eq!(transport.calls(), after_first);
}
