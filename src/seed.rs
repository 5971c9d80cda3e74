// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Demo document used by `lms init` and by a node started with
//! seed-if-missing.

use serde_json::json;

use crate::document::Document;

pub fn demo_document() -> Document {
    let mut doc = Document::new();

    doc.set_section(
        "users",
        json!([
            { "id": 1, "name": "Admin User", "email": "admin@example.com", "password": "admin", "role": "admin" },
            { "id": 2, "name": "John Doe", "email": "student@example.com", "password": "student", "role": "student", "status": "active", "enrolledCourses": 3 },
            { "id": 3, "name": "Jane Smith", "email": "student2@example.com", "password": "student2", "role": "student", "status": "inactive", "enrolledCourses": 2 },
            { "id": 4, "name": "Sarah Wilson", "email": "instructor@example.com", "password": "instructor", "role": "instructor" }
        ]),
    );

    doc.set_section(
        "courses",
        json!([
            { "id": 1, "title": "Introduction to React", "instructor": "Sarah Wilson", "category": "Web Development", "price": 49.99, "students": 120, "status": "published" },
            { "id": 2, "title": "Advanced JavaScript", "instructor": "Sarah Wilson", "category": "Programming", "price": 59.99, "students": 85, "status": "pending_review" },
            { "id": 3, "title": "Data Structures and Algorithms", "instructor": "Mike Chen", "category": "Computer Science", "price": 39.99, "students": 42, "status": "draft" }
        ]),
    );

    doc.set_section(
        "payments",
        json!([
            { "id": 1, "student": "John Doe", "course": "Introduction to React", "instructor": "Sarah Wilson", "amount": 49.99, "platformFee": 10.0, "instructorShare": 39.99, "status": "completed", "refundable": true, "date": "2024-01-15" },
            { "id": 2, "student": "Jane Smith", "course": "Advanced JavaScript", "instructor": "Sarah Wilson", "amount": 59.99, "platformFee": 12.0, "instructorShare": 47.99, "status": "pending", "refundable": false, "date": "2024-01-20" }
        ]),
    );

    doc.set_section(
        "instructors",
        json!([
            { "id": 1, "name": "Sarah Wilson", "email": "instructor@example.com", "courses": 2 },
            { "id": 2, "name": "Mike Chen", "email": "mike@example.com", "courses": 1 }
        ]),
    );

    doc.set_section(
        "subscriptions",
        json!([
            { "id": 1, "name": "Monthly Pro", "price": 19.99, "status": "active" },
            { "id": 2, "name": "Annual Pro", "price": 199.99, "status": "inactive" }
        ]),
    );

    doc.set_section(
        "dashboardStats",
        json!({
            "totalUsers": 4,
            "totalStudents": 2,
            "totalInstructors": 1,
            "totalCourses": 3,
            "totalRevenue": 109.98,
            "activeSubscriptions": 1,
            "monthlyGrowth": 12,
            "avgRating": 4.6
        }),
    );

    doc.set_section(
        "recentActivity",
        json!([
            { "id": 1, "icon": "🎓", "message": "John Doe enrolled in Introduction to React", "time": "2 hours ago" },
            { "id": 2, "icon": "💳", "message": "Payment received for Advanced JavaScript", "time": "5 hours ago" }
        ]),
    );

    doc
}
