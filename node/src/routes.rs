// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! LMS endpoint catalogue: path -> resource configuration.

use lms_store::collection::Scope;
use lms_store::resource::{
    AggregateResource, CollectionResource, Endpoint, LoginResource, MultiplexResource, SingletonResource, Verb,
};

pub const LOGIN_PATH: &str = "/api/login";

/// Endpoints whose records are addressed by id, and so also get a
/// `<path>/:id` route.
pub fn addresses_records(endpoint: &Endpoint) -> bool {
    matches!(endpoint, Endpoint::Collection(_) | Endpoint::Multiplex(_))
}

pub fn catalog() -> Vec<(&'static str, Endpoint)> {
    vec![
        (
            "/api/users",
            Endpoint::Collection(
                CollectionResource::new("users", "User")
                    .verbs(&[Verb::Get])
                    .filter_by("role"),
            ),
        ),
        (
            "/api/courses",
            Endpoint::Collection(CollectionResource::new("courses", "Course").verbs(&[Verb::Get, Verb::Delete])),
        ),
        (LOGIN_PATH, Endpoint::Login(LoginResource::default())),
        (
            "/api/admin/students",
            Endpoint::Collection(
                CollectionResource::new("users", "Student")
                    .scoped(Scope::new("role", "student"))
                    .verbs(&[Verb::Get, Verb::Put, Verb::Delete])
                    .filter_by("status"),
            ),
        ),
        (
            "/api/admin/payments",
            Endpoint::Collection(
                CollectionResource::new("payments", "Payment")
                    .verbs(&[Verb::Get, Verb::Put])
                    .filter_by("status"),
            ),
        ),
        (
            "/api/admin/marketplace",
            Endpoint::Multiplex(
                MultiplexResource::new("type")
                    .variant("course", CollectionResource::new("courses", "Course"))
                    .variant("subscription", CollectionResource::new("subscriptions", "Subscription"))
                    .variant(
                        "instructor",
                        CollectionResource::new("instructors", "Instructor").verbs(&[Verb::Get]),
                    )
                    .default_view(&["courses", "subscriptions"]),
            ),
        ),
        (
            "/api/admin/account",
            Endpoint::Singleton(SingletonResource::new("users", "Admin user").scoped(Scope::new("role", "admin"))),
        ),
        (
            "/api/admin/dashboard",
            Endpoint::Aggregate(
                AggregateResource::new()
                    .section("stats", "dashboardStats")
                    .section("recentActivity", "recentActivity"),
            ),
        ),
    ]
}
