//! Shared fixtures for the lifecycle test modules: an in-memory migrated
//! database plus seed helpers for the common actors.

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use model::entities::{employer_profile, seeker_profile, user};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set};

use crate::posting::NewPosting;

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    db.execute_unprepared("PRAGMA foreign_keys = ON;")
        .await
        .expect("Failed to enable foreign keys");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn seed_employer(db: &DatabaseConnection, name: &str) -> user::Model {
    let employer = user::ActiveModel {
        name: Set(name.to_string()),
        phone: Set(format!("+91-emp-{name}")),
        email: Set(format!("{}@employer.example", name.to_lowercase())),
        role: Set(user::UserRole::Employer),
        availability_status: Set(None),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed employer");

    employer_profile::ActiveModel {
        user_id: Set(employer.id),
        company_name: Set(format!("{name} Services")),
        company_type: Set(None),
        industry: Set(None),
        business_description: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to seed employer profile");

    employer
}

pub async fn seed_seeker(db: &DatabaseConnection, name: &str) -> user::Model {
    let seeker = user::ActiveModel {
        name: Set(name.to_string()),
        phone: Set(format!("+91-seek-{name}")),
        email: Set(format!("{}@seeker.example", name.to_lowercase())),
        role: Set(user::UserRole::Seeker),
        availability_status: Set(Some("available".to_string())),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed seeker");

    seeker_profile::ActiveModel {
        user_id: Set(seeker.id),
        experience: Set(Some("2-5 years".to_string())),
        education: Set(Some("Secondary".to_string())),
        expected_salary: Set(Some(15000)),
        job_types: Set(vec!["Cook".to_string()].into()),
        availability: Set(vec!["Full Time".to_string()].into()),
        languages: Set(vec!["Hindi".to_string()].into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed seeker profile");

    seeker
}

pub fn posting_attrs(required_candidates: i32) -> NewPosting {
    NewPosting {
        title: "Live-in Cook".to_string(),
        description: "Cook for a family of four".to_string(),
        requirements: None,
        benefits: None,
        location: "Pune".to_string(),
        job_type: "Cook".to_string(),
        salary: 18000,
        required_candidates,
    }
}
