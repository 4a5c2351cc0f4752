use crate::models::{Activity, CurrentUser};

/// Activities written to an empty store on first access.
pub fn seed_activities() -> Vec<Activity> {
    vec![
        Activity {
            id: 1,
            name: "Senderismo en el Parque Nacional".to_string(),
            place: "Parque Nacional La Campana".to_string(),
            date: "2025-11-15".to_string(),
            time: "09:00".to_string(),
            description: "Excursión al cerro La Campana.".to_string(),
            image_ref: "https://images.unsplash.com/photo-1551632811-561732d1e306?q=80&w=2070&auto=format&fit=crop".to_string(),
            capacity: 20,
            attendees: vec![],
            comments: vec![],
        },
        Activity {
            id: 2,
            name: "Día de Playa y Surf".to_string(),
            place: "Pichilemu".to_string(),
            date: "2026-01-20".to_string(),
            time: "11:00".to_string(),
            description: "Clases de surf.".to_string(),
            image_ref: "https://images.unsplash.com/photo-1502680390469-be75c88b63f8?q=80&w=2070&auto=format&fit=crop".to_string(),
            capacity: 15,
            attendees: vec![],
            comments: vec![],
        },
    ]
}

/// Session identity written to an empty store on first access.
pub fn default_user() -> CurrentUser {
    CurrentUser {
        id: 1,
        name: "Usuario Demo".to_string(),
        email: None,
        bio: None,
        avatar_ref: None,
    }
}
