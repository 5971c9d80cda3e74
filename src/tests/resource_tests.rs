// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::collection::Scope;
use crate::config::IdPolicy;
use crate::document::Document;
use crate::error::HandlerError;
use crate::resource::{
    AggregateResource, CollectionResource, Endpoint, LoginResource, MultiplexResource, Request,
    ResourceContext, SingletonResource, Status, Verb,
};
use crate::seed::demo_document;
use crate::storage::{DocumentStore, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;

fn context(doc: &Document) -> (Arc<MemoryStore>, ResourceContext) {
    let store = Arc::new(MemoryStore::new(doc).unwrap());
    let ctx = ResourceContext::new(store.clone(), IdPolicy::CollectionLength);
    (store, ctx)
}

fn marketplace() -> Endpoint {
    Endpoint::Multiplex(
        MultiplexResource::new("type")
            .variant("course", CollectionResource::new("courses", "Course"))
            .variant("subscription", CollectionResource::new("subscriptions", "Subscription"))
            .variant("instructor", CollectionResource::new("instructors", "Instructor").verbs(&[Verb::Get]))
            .default_view(&["courses", "subscriptions"]),
    )
}

fn students() -> Endpoint {
    Endpoint::Collection(
        CollectionResource::new("users", "Student")
            .scoped(Scope::new("role", "student"))
            .verbs(&[Verb::Get, Verb::Put, Verb::Delete]),
    )
}

#[test]
fn test_list_and_get() {
    let (_, ctx) = context(&demo_document());
    let courses = Endpoint::Collection(CollectionResource::new("courses", "Course"));

    let reply = courses.handle(&ctx, &Request::new(Verb::Get)).unwrap();
    assert_eq!(reply.status, Status::Ok);
    assert_eq!(reply.body.as_array().unwrap().len(), 3);

    let reply = courses.handle(&ctx, &Request::new(Verb::Get).with_query("id", "2")).unwrap();
    assert_eq!(reply.body["title"], "Advanced JavaScript");
}

#[test]
fn test_get_with_garbage_id_is_not_found() {
    let (_, ctx) = context(&demo_document());
    let courses = Endpoint::Collection(CollectionResource::new("courses", "Course"));

    let err = courses
        .handle(&ctx, &Request::new(Verb::Get).with_query("id", "abc"))
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(ref m) if m == "Course not found"));
}

#[test]
fn test_create_returns_created() {
    let (store, ctx) = context(&demo_document());
    let courses = Endpoint::Collection(CollectionResource::new("courses", "Course"));

    let reply = courses
        .handle(&ctx, &Request::new(Verb::Post).with_body(json!({ "title": "Rust" })))
        .unwrap();
    assert_eq!(reply.status, Status::Created);
    assert_eq!(reply.status.code(), 201);
    assert_eq!(reply.body, json!({ "id": 4, "title": "Rust" }));
    assert_eq!(store.saves(), 1);
}

#[test]
fn test_non_object_body_is_rejected() {
    let (store, ctx) = context(&demo_document());
    let courses = Endpoint::Collection(CollectionResource::new("courses", "Course"));

    let err = courses
        .handle(&ctx, &Request::new(Verb::Post).with_body(json!([1, 2])))
        .unwrap_err();
    assert!(matches!(err, HandlerError::InvalidRequest(_)));
    assert_eq!(store.saves(), 0);
}

#[test]
fn test_missed_update_and_delete_do_not_write() {
    let (store, ctx) = context(&demo_document());
    let payments = Endpoint::Collection(CollectionResource::new("payments", "Payment").verbs(&[Verb::Get, Verb::Put]));

    let err = payments
        .handle(&ctx, &Request::new(Verb::Put).with_query("id", "99").with_body(json!({ "status": "refunded" })))
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(ref m) if m == "Payment not found"));

    let err = students()
        .handle(&ctx, &Request::new(Verb::Delete).with_query("id", "99"))
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(ref m) if m == "Student not found"));

    assert_eq!(store.saves(), 0);
}

#[test]
fn test_students_scope() {
    let (store, ctx) = context(&demo_document());

    let listed = students().handle(&ctx, &Request::new(Verb::Get)).unwrap();
    assert!(listed.body.as_array().unwrap().iter().all(|u| u["role"] == "student"));

    // id 1 is the admin: out of scope for the student endpoint
    let err = students()
        .handle(&ctx, &Request::new(Verb::Put).with_query("id", "1").with_body(json!({ "name": "X" })))
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(_)));

    let reply = students()
        .handle(&ctx, &Request::new(Verb::Delete).with_query("id", "3"))
        .unwrap();
    assert_eq!(reply.body, json!({ "message": "Student 3 deleted" }));
    assert_eq!(store.saves(), 1);
}

#[test]
fn test_method_not_allowed() {
    let (_, ctx) = context(&demo_document());
    let payments = Endpoint::Collection(CollectionResource::new("payments", "Payment").verbs(&[Verb::Get, Verb::Put]));

    match payments.handle(&ctx, &Request::new(Verb::Delete)) {
        Err(HandlerError::MethodNotAllowed { method, allow }) => {
            assert_eq!(method, "DELETE");
            assert_eq!(allow, vec![Verb::Get, Verb::Put]);
        }
        other => panic!("Expected MethodNotAllowed, got {:?}", other),
    }

    let err = payments.dispatch(&ctx, "PATCH", Default::default(), None).unwrap_err();
    assert_eq!(err.to_string(), "Method PATCH Not Allowed");
}

#[test]
fn test_marketplace_dispatch() {
    let (store, ctx) = context(&demo_document());
    let market = marketplace();

    assert_eq!(market.allowed(), vec![Verb::Get, Verb::Post, Verb::Put, Verb::Delete]);

    // Default view
    let reply = market.handle(&ctx, &Request::new(Verb::Get)).unwrap();
    let keys: Vec<&String> = reply.body.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["courses", "subscriptions"]);

    // Read-only variant
    let reply = market
        .handle(&ctx, &Request::new(Verb::Get).with_query("type", "instructor"))
        .unwrap();
    assert_eq!(reply.body["instructors"].as_array().unwrap().len(), 2);

    // Create through a variant
    let reply = market
        .handle(
            &ctx,
            &Request::new(Verb::Post)
                .with_query("type", "subscription")
                .with_body(json!({ "name": "Team", "price": 99 })),
        )
        .unwrap();
    assert_eq!(reply.status, Status::Created);
    assert_eq!(reply.body["id"], 3);

    let doc = store.load().unwrap();
    assert_eq!(doc.collection("subscriptions").unwrap().len(), 3);
}

#[test]
fn test_marketplace_rejects_bad_discriminator() {
    let (store, ctx) = context(&demo_document());
    let market = marketplace();

    for (verb, ty) in [(Verb::Post, None), (Verb::Put, Some("bundle")), (Verb::Delete, Some("instructor"))] {
        let mut req = Request::new(verb).with_query("id", "1");
        if let Some(ty) = ty {
            req = req.with_query("type", ty);
        }
        match market.handle(&ctx, &req) {
            Err(HandlerError::InvalidRequest(msg)) => {
                assert_eq!(msg, format!("Invalid type for {} request", verb));
            }
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }
    }
    assert_eq!(store.saves(), 0);
}

#[test]
fn test_account_singleton() {
    let (_, ctx) = context(&demo_document());
    let account = Endpoint::Singleton(SingletonResource::new("users", "Admin user").scoped(Scope::new("role", "admin")));

    let reply = account.handle(&ctx, &Request::new(Verb::Get)).unwrap();
    assert_eq!(reply.body["email"], "admin@example.com");

    let reply = account
        .handle(&ctx, &Request::new(Verb::Put).with_body(json!({ "name": "Root" })))
        .unwrap();
    assert_eq!(reply.body["name"], "Root");
    assert_eq!(reply.body["role"], "admin");

    let (_, empty_ctx) = context(&Document::new());
    let err = account.handle(&empty_ctx, &Request::new(Verb::Get)).unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(ref m) if m == "Admin user not found"));
}

#[test]
fn test_dashboard_aggregate() {
    let (_, ctx) = context(&demo_document());
    let dashboard = Endpoint::Aggregate(
        AggregateResource::new()
            .section("stats", "dashboardStats")
            .section("recentActivity", "recentActivity")
            .section("missing", "noSuchSection"),
    );

    let reply = dashboard.handle(&ctx, &Request::new(Verb::Get)).unwrap();
    assert_eq!(reply.body["stats"]["totalCourses"], 3);
    assert_eq!(reply.body["recentActivity"].as_array().unwrap().len(), 2);
    assert!(reply.body.get("missing").is_none());
}

#[test]
fn test_login_requires_both_fields() {
    let (_, ctx) = context(&demo_document());
    let login = Endpoint::Login(LoginResource::default());

    let err = login
        .handle(&ctx, &Request::new(Verb::Post).with_body(json!({ "email": "admin@example.com" })))
        .unwrap_err();
    assert!(matches!(err, HandlerError::InvalidCredentials));

    let reply = login
        .handle(
            &ctx,
            &Request::new(Verb::Post).with_body(json!({ "email": "instructor@example.com", "password": "instructor" })),
        )
        .unwrap();
    assert_eq!(reply.body, json!({ "token": "instructor-token", "role": "instructor" }));
}

#[test]
fn test_storage_fault_surfaces() {
    let ctx = ResourceContext::new(Arc::new(MemoryStore::unavailable()), IdPolicy::CollectionLength);
    let courses = Endpoint::Collection(CollectionResource::new("courses", "Course"));

    let err = courses.handle(&ctx, &Request::new(Verb::Get)).unwrap_err();
    assert!(matches!(err, HandlerError::StorageFault(_)));

    // A non-array section used as a collection is a storage fault too
    let (_, ctx) = context(&demo_document());
    let stats = Endpoint::Collection(CollectionResource::new("dashboardStats", "Stat"));
    let err = stats.handle(&ctx, &Request::new(Verb::Get)).unwrap_err();
    assert!(matches!(err, HandlerError::StorageFault(_)));
}

#[test]
fn test_list_filters_are_whitelisted() {
    let (_, ctx) = context(&demo_document());
    let users = Endpoint::Collection(CollectionResource::new("users", "User").verbs(&[Verb::Get]).filter_by("role"));

    let reply = users
        .handle(&ctx, &Request::new(Verb::Get).with_query("role", "student"))
        .unwrap();
    assert_eq!(reply.body.as_array().unwrap().len(), 2);

    // `name` is not a declared filter and is ignored
    let reply = users
        .handle(&ctx, &Request::new(Verb::Get).with_query("name", "John Doe"))
        .unwrap();
    let all: &Vec<Value> = reply.body.as_array().unwrap();
    assert_eq!(all.len(), 4);
}

#[test]
fn test_create_after_max_id_is_rejected_without_writing() {
    let store = Arc::new(MemoryStore::new(&demo_document()).unwrap());
    let ctx = ResourceContext::new(store.clone(), IdPolicy::NextAfterMax);
    let courses = Endpoint::Collection(CollectionResource::new("courses", "Course"));

    courses
        .handle(
            &ctx,
            &Request::new(Verb::Put)
                .with_query("id", "1")
                .with_body(json!({ "id": i64::MAX })),
        )
        .unwrap();
    assert_eq!(store.saves(), 1);

    let err = courses
        .handle(&ctx, &Request::new(Verb::Post).with_body(json!({ "title": "One too many" })))
        .unwrap_err();
    assert!(matches!(err, HandlerError::InvalidRequest(ref m) if m == "No ids left in courses"));
    assert_eq!(store.saves(), 1);
    assert_eq!(store.load().unwrap().collection("courses").unwrap().len(), 3);
}

#[test]
fn test_id_with_trailing_garbage_uses_leading_digits() {
    let (store, ctx) = context(&demo_document());

    let reply = marketplace()
        .handle(
            &ctx,
            &Request::new(Verb::Delete).with_query("type", "course").with_query("id", "2abc"),
        )
        .unwrap();
    assert_eq!(reply.body, json!({ "message": "Course 2abc deleted" }));

    let ids: Vec<Value> = store
        .load()
        .unwrap()
        .collection("courses")
        .unwrap()
        .iter()
        .map(|c| c["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!(1), json!(3)]);
}
