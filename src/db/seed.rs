//! Fixed sample data loaded at startup.

use crate::models::{Admin, Room, Student};

const SAMPLE_ROOMS: &[(&str, &str, i64, &str, &str, i64)] = &[
    ("room_001", "Block A", 1, "101", "Computer Science", 30),
    ("room_002", "Block A", 1, "102", "Electronics", 25),
    ("room_003", "Block B", 2, "201", "Mechanical Engineering", 35),
    ("room_004", "Block B", 2, "202", "Civil Engineering", 30),
    ("room_005", "Block C", 3, "301", "Computer Science", 40),
];

const STUDENTS: &[&str] = &["STU001", "STU002", "STU003"];

const ADMINS: &[(&str, &str)] = &[("admin1", "admin123"), ("admin2", "secure456")];

pub fn sample_rooms(created_at: i64) -> Vec<Room> {
    SAMPLE_ROOMS
        .iter()
        .map(|&(id, block, floor, number, department, capacity)| Room {
            id: id.to_string(),
            block_name: block.to_string(),
            floor_number: floor,
            room_number: number.to_string(),
            department_name: department.to_string(),
            capacity: Some(capacity),
            created_at,
        })
        .collect()
}

pub fn students(created_at: i64) -> Vec<Student> {
    STUDENTS
        .iter()
        .map(|&reg| Student {
            registration_number: reg.to_string(),
            created_at,
        })
        .collect()
}

pub fn admins() -> Vec<Admin> {
    ADMINS
        .iter()
        .map(|&(id, password)| Admin {
            admin_id: id.to_string(),
            password: password.to_string(),
        })
        .collect()
}
