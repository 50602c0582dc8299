//! Diesel row structs. Internal to the persistence adapters.

use diesel::prelude::*;

use super::schema::{capture_results, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub tier: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = capture_results)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CaptureRow {
    pub id: i64,
    pub user_id: i32,
    pub image_data: Vec<u8>,
    pub object_name: String,
    pub confidence: f64,
    pub description: String,
    pub buy_link: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = capture_results)]
pub(crate) struct NewCaptureRow<'a> {
    pub user_id: i32,
    pub image_data: &'a [u8],
    pub object_name: &'a str,
    pub confidence: f64,
    pub description: &'a str,
    pub buy_link: Option<&'a str>,
}
